//! Browser capability interface.
//!
//! The relay never talks to the browser directly; it consumes a narrow
//! capability seam that the embedding extension glue implements. This
//! keeps the focus state machine and the channel testable against a
//! scripted double.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BrowserHost`] | Async capability: query last-focused window, close a tab |
//! | [`WindowState`] | Snapshot of one window with its tabs populated |
//! | [`TabInfo`] | Snapshot of one tab (id, url, title, active flag) |
//! | [`FocusSignal`] | The three browser signals that trigger recomputation |
//!
//! # Subscriptions
//!
//! The embedder registers the browser-side listeners and forwards each
//! firing as a [`FocusSignal`] into the relay (see [`crate::relay`]):
//!
//! - tab activated
//! - tab updated, filtered on the `url` and `audible` properties
//! - window focus changed
//!
//! All three kinds drive the same recomputation; the tracker's dedup rule
//! guarantees that a signal pair arriving for one logical change still
//! produces at most one emitted event.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;

use crate::error::Result;
use crate::identifiers::TabId;

// ============================================================================
// TabInfo
// ============================================================================

/// Snapshot of a single browser tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    /// Browser-assigned tab identifier.
    pub id: TabId,
    /// Current tab URL.
    pub url: String,
    /// Current tab title.
    pub title: String,
    /// Whether this tab is the selected tab of its window.
    pub active: bool,
}

// ============================================================================
// WindowState
// ============================================================================

/// Snapshot of the last-focused browser window, tabs populated.
///
/// `focused` reflects OS-level focus: it is `false` when the user has
/// switched to another application even though this window remains the
/// most recently focused browser window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    /// Whether the window currently holds OS-level focus.
    pub focused: bool,
    /// Tabs of the window.
    pub tabs: Vec<TabInfo>,
}

impl WindowState {
    /// Returns the tab marked active in this window, if any.
    #[inline]
    #[must_use]
    pub fn active_tab(&self) -> Option<&TabInfo> {
        self.tabs.iter().find(|tab| tab.active)
    }
}

// ============================================================================
// FocusSignal
// ============================================================================

/// Browser signals that trigger a focus recomputation.
///
/// The kinds are carried for diagnostics; the tracker handles all of them
/// identically by re-querying the last-focused window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSignal {
    /// The active tab of some window changed.
    TabActivated,
    /// The active tab was updated (url or audible property).
    TabUpdated,
    /// OS-level window focus moved.
    WindowFocusChanged,
}

impl FocusSignal {
    /// Returns the signal name for log fields.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TabActivated => "tab_activated",
            Self::TabUpdated => "tab_updated",
            Self::WindowFocusChanged => "window_focus_changed",
        }
    }
}

// ============================================================================
// BrowserHost
// ============================================================================

/// Capability interface onto the browser's window and tab APIs.
///
/// Both operations are asynchronous requests whose completion interleaves
/// with newer signals; callers must treat every completed query as
/// authoritative at completion time rather than at trigger time.
#[async_trait]
pub trait BrowserHost: Send + Sync {
    /// Queries the last-focused window with its tabs populated.
    ///
    /// Returns `None` when the browser reports no last-focused window.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TabResolution`] if the query itself fails.
    async fn last_focused_window(&self) -> Result<Option<WindowState>>;

    /// Closes a tab by ID. Fire-and-forget from the relay's perspective.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Action`] if the tab no longer exists; the
    /// caller swallows this after logging.
    async fn close_tab(&self, tab_id: TabId) -> Result<()>;
}

// ============================================================================
// Tests
// ============================================================================
