//! Error types for the focus relay.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use focus_relay::{Result, Error};
//!
//! async fn example<W>(channel: &mut Channel<W>) -> Result<()> {
//!     channel.send(Outbound::Event(OutboundEvent::FocusLost)).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Connection | [`Error::Connection`], [`Error::ConnectionClosed`] |
//! | Protocol | [`Error::Framing`], [`Error::UnknownCommand`] |
//! | Focus | [`Error::TabResolution`], [`Error::UrlParse`] |
//! | Dispatch | [`Error::Action`] |
//! | External | [`Error::Io`], [`Error::Json`] |
//!
//! Every variant is handled at its point of detection; none of them are
//! allowed to crash the relay loop. Connection errors are terminal for the
//! outbound direction, frame-level errors drop a single message, and focus
//! errors skip a single recomputation.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::TabId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for diagnostics.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// Channel to the native peer could not be established.
    ///
    /// Returned when the registered peer cannot be located or started.
    /// Fatal to the outbound direction until the whole process restarts.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Channel to the native peer was closed.
    ///
    /// Returned when the peer ends the channel. Never retried; subsequent
    /// sends become silent no-ops.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Malformed inbound frame.
    ///
    /// The offending frame is dropped; the channel stays open.
    #[error("Framing error: {message}")]
    Framing {
        /// Description of the framing violation.
        message: String,
    },

    /// Well-formed frame with an unrecognized command type.
    ///
    /// Dropped with a diagnostic; never treated as fatal.
    #[error("Unknown command: {command}")]
    UnknownCommand {
        /// The unrecognized `type` value.
        command: String,
    },

    // ========================================================================
    // Focus Errors
    // ========================================================================
    /// The browser reported no focused window or no resolvable active tab.
    ///
    /// Not inferred as focus-lost; the recomputation is skipped and the
    /// tracker state is left unchanged.
    #[error("Tab resolution failed: {message}")]
    TabResolution {
        /// Description of what could not be resolved.
        message: String,
    },

    /// Active tab URL failed to parse or has no host component.
    ///
    /// The emission is skipped; tracker state is left unchanged.
    #[error("URL parse failed for {url}: {message}")]
    UrlParse {
        /// The URL that failed to parse.
        url: String,
        /// Description of the parse failure.
        message: String,
    },

    // ========================================================================
    // Dispatch Errors
    // ========================================================================
    /// A peer-requested tab action failed (e.g. closing a nonexistent tab).
    ///
    /// Swallowed after logging; the protocol defines no error reply.
    #[error("Tab action failed for {tab_id}: {message}")]
    Action {
        /// Target tab of the failed action.
        tab_id: TabId,
        /// Description of the failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error on the wire.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a framing error.
    #[inline]
    pub fn framing(message: impl Into<String>) -> Self {
        Self::Framing {
            message: message.into(),
        }
    }

    /// Creates an unknown command error.
    #[inline]
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates a tab resolution error.
    #[inline]
    pub fn tab_resolution(message: impl Into<String>) -> Self {
        Self::TabResolution {
            message: message.into(),
        }
    }

    /// Creates a URL parse error.
    #[inline]
    pub fn url_parse(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UrlParse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a tab action error.
    #[inline]
    pub fn action(tab_id: TabId, message: impl Into<String>) -> Self {
        Self::Action {
            tab_id,
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection error.
    ///
    /// Connection errors end the outbound direction until process restart.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::ConnectionClosed)
    }

    /// Returns `true` if this error drops a single inbound frame.
    #[inline]
    #[must_use]
    pub fn is_frame_error(&self) -> bool {
        matches!(self, Self::Framing { .. } | Self::UnknownCommand { .. })
    }

    /// Returns `true` if this error skips a single focus recomputation.
    #[inline]
    #[must_use]
    pub fn is_focus_error(&self) -> bool {
        matches!(self, Self::TabResolution { .. } | Self::UrlParse { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::connection("peer not registered");
        assert_eq!(err.to_string(), "Connection failed: peer not registered");
    }

    #[test]
    fn test_framing_error_display() {
        let err = Error::framing("truncated frame");
        assert_eq!(err.to_string(), "Framing error: truncated frame");
    }

    #[test]
    fn test_is_connection_error() {
        let conn_err = Error::connection("test");
        let closed_err = Error::ConnectionClosed;
        let other_err = Error::framing("test");

        assert!(conn_err.is_connection_error());
        assert!(closed_err.is_connection_error());
        assert!(!other_err.is_connection_error());
    }

    #[test]
    fn test_is_frame_error() {
        let framing_err = Error::framing("bad bytes");
        let unknown_err = Error::unknown_command("Bogus");
        let other_err = Error::ConnectionClosed;

        assert!(framing_err.is_frame_error());
        assert!(unknown_err.is_frame_error());
        assert!(!other_err.is_frame_error());
    }

    #[test]
    fn test_is_focus_error() {
        let resolution_err = Error::tab_resolution("no focused window");
        let parse_err = Error::url_parse("not a url", "relative URL without a base");
        let other_err = Error::framing("test");

        assert!(resolution_err.is_focus_error());
        assert!(parse_err.is_focus_error());
        assert!(!other_err.is_focus_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
