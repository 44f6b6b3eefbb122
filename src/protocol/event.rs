//! Outbound wire message types.
//!
//! Messages sent from the extension side to the native peer. Two families
//! share the channel and are distinguished by their tag field:
//!
//! | Family | Tag | Messages |
//! |--------|-----|----------|
//! | Command | `cmd` | `ping` |
//! | Event | `event_type` | `focus_change`, `focus_lost` |
//!
//! Outbound messages are value objects: constructed by the focus tracker
//! (events) or the ping trigger (commands), consumed exactly once by the
//! channel, then discarded.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;

use crate::identifiers::TabId;

// ============================================================================
// Outbound
// ============================================================================

/// Any message the relay can put on the wire.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Outbound {
    /// Command family, tagged with `cmd`.
    Command(OutboundCommand),
    /// Event family, tagged with `event_type`.
    Event(OutboundEvent),
}

impl Outbound {
    /// Creates the manual liveness-check ping.
    #[inline]
    #[must_use]
    pub const fn ping() -> Self {
        Self::Command(OutboundCommand::Ping)
    }
}

impl From<OutboundEvent> for Outbound {
    #[inline]
    fn from(event: OutboundEvent) -> Self {
        Self::Event(event)
    }
}

// ============================================================================
// OutboundCommand
// ============================================================================

/// Commands sent to the peer.
///
/// # Format
///
/// ```json
/// {"cmd":"ping"}
/// ```
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum OutboundCommand {
    /// User-triggered liveness check. The peer is not required to answer;
    /// any reply arrives as an inbound `ACK`.
    Ping,
}

// ============================================================================
// OutboundEvent
// ============================================================================

/// Focus events sent to the peer.
///
/// # Format
///
/// ```json
/// {"event_type":"focus_change","tab_id":1,"tab_name":"A","display_name":"a.com"}
/// {"event_type":"focus_lost"}
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// The active tab of the last-focused window changed.
    FocusChange {
        /// Browser tab identifier.
        tab_id: TabId,
        /// Tab title at the moment of emission.
        tab_name: String,
        /// Host component of the tab URL.
        display_name: String,
    },

    /// OS-level focus left the browser entirely.
    FocusLost,
}

impl OutboundEvent {
    /// Creates a focus-change event.
    #[inline]
    #[must_use]
    pub fn focus_change(
        tab_id: TabId,
        tab_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self::FocusChange {
            tab_id,
            tab_name: tab_name.into(),
            display_name: display_name.into(),
        }
    }

    /// Returns `true` if this is a focus-lost event.
    #[inline]
    #[must_use]
    pub fn is_focus_lost(&self) -> bool {
        matches!(self, Self::FocusLost)
    }
}

// ============================================================================
// Tests
// ============================================================================
