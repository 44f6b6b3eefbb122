//! Focus-tracking state machine.
//!
//! The tracker owns the single [`ActiveTabSnapshot`] and decides when a
//! focus event must be emitted. Conceptually it moves between two states:
//!
//! ```text
//!           active tab with new URL
//!   Idle ─────────────────────────────► Focused(url)
//!    ▲                                      │
//!    └──────── window unfocused ────────────┘
//! ```
//!
//! An event fires only on a real transition: a new URL, or crossing
//! between "some tab active" and "no tab active". Redundant signals for an
//! unchanged state emit nothing, which also makes stale async completions
//! harmless: a completion that no longer disagrees with the current
//! snapshot is a natural no-op.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, trace, warn};
use url::Url;

use crate::browser::{BrowserHost, WindowState};
use crate::error::{Error, Result};
use crate::identifiers::TabId;
use crate::protocol::OutboundEvent;

// ============================================================================
// ActiveTabSnapshot
// ============================================================================

/// The last tab observed active in the last-focused window.
///
/// At most one snapshot exists at a time; it is replaced wholesale on
/// every confirmed change and cleared when focus leaves the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTabSnapshot {
    /// Browser tab identifier.
    pub tab_id: TabId,
    /// Tab URL at observation time.
    pub url: String,
    /// Tab title at observation time.
    pub title: String,
}

// ============================================================================
// FocusTracker
// ============================================================================

/// Maintains the active-tab snapshot and decides event emission.
#[derive(Debug, Default)]
pub struct FocusTracker {
    /// Current truth; `None` while no tab is known active.
    snapshot: Option<ActiveTabSnapshot>,
}

impl FocusTracker {
    /// Creates a tracker in the Idle state.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot, if any.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Option<&ActiveTabSnapshot> {
        self.snapshot.as_ref()
    }

    /// Queries the browser and applies the result.
    ///
    /// Called once per focus signal. The query result is authoritative at
    /// completion time; decisions never rely on state captured when the
    /// triggering signal fired. Query failures are logged and skip this
    /// recomputation without touching the snapshot.
    pub async fn refresh(&mut self, host: &dyn BrowserHost) -> Option<OutboundEvent> {
        match host.last_focused_window().await {
            Ok(window) => self.apply(window.as_ref()),
            Err(e) => {
                warn!(error = %e, "focused-window query failed");
                None
            }
        }
    }

    /// Applies a freshly queried window state, returning the event to emit.
    ///
    /// This is the whole decision procedure; `None` means nothing changed
    /// (or the change could not be resolved) and nothing goes on the wire.
    pub fn apply(&mut self, window: Option<&WindowState>) -> Option<OutboundEvent> {
        let Some(window) = window else {
            warn!("browser reported no last-focused window, skipping recomputation");
            return None;
        };

        if !window.focused {
            return self.apply_unfocused();
        }

        let Some(tab) = window.active_tab() else {
            warn!("focused window has no active tab, skipping recomputation");
            return None;
        };

        if self
            .snapshot
            .as_ref()
            .is_some_and(|current| current.url == tab.url)
        {
            trace!(url = %tab.url, "active tab unchanged, suppressing duplicate");
            return None;
        }

        match display_hostname(&tab.url) {
            Ok(display_name) => {
                debug!(tab_id = %tab.id, url = %tab.url, "focus moved to new tab");
                self.snapshot = Some(ActiveTabSnapshot {
                    tab_id: tab.id,
                    url: tab.url.clone(),
                    title: tab.title.clone(),
                });
                Some(OutboundEvent::focus_change(tab.id, &tab.title, display_name))
            }
            Err(e) => {
                // State stays put so a later parseable URL still diffs
                // against the last emitted one.
                warn!(error = %e, "active tab URL unusable, event not emitted");
                None
            }
        }
    }

    /// Handles a window without OS-level focus.
    fn apply_unfocused(&mut self) -> Option<OutboundEvent> {
        if self.snapshot.take().is_some() {
            debug!("focus left the browser");
            Some(OutboundEvent::FocusLost)
        } else {
            trace!("already idle, suppressing duplicate focus-lost");
            None
        }
    }
}

// ============================================================================
// Hostname Extraction
// ============================================================================

/// Extracts the host component used as the event display name.
fn display_hostname(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| Error::url_parse(url, e.to_string()))?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| Error::url_parse(url, "URL has no host component"))
}

// ============================================================================
// Tests
// ============================================================================
