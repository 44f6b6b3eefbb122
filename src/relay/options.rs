//! Relay configuration options.
//!
//! Provides a type-safe value object for the small amount of configuration
//! the relay carries: the registered peer identity and the inbound frame
//! cap.
//!
//! # Example
//!
//! ```ignore
//! use focus_relay::RelayOptions;
//!
//! let options = RelayOptions::new()
//!     .with_peer_name("com.example.focus_peer")
//!     .with_max_frame_len(64 * 1024);
//! ```

// ============================================================================
// Imports
// ============================================================================

use crate::protocol::DEFAULT_MAX_FRAME_LEN;

// ============================================================================
// Constants
// ============================================================================

/// Default registered identity of the native peer.
pub const DEFAULT_PEER_NAME: &str = "com.focus_relay.peer";

// ============================================================================
// RelayOptions
// ============================================================================

/// Relay configuration.
///
/// The peer name is the platform-registered native-messaging identity the
/// host runtime connects to; it is carried here for diagnostics and for
/// embedders that establish the wire themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOptions {
    /// Registered identity of the native peer.
    pub peer_name: String,

    /// Cap on a single inbound frame body in bytes.
    pub max_frame_len: usize,
}

impl RelayOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            peer_name: DEFAULT_PEER_NAME.to_string(),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }

    /// Sets the registered peer identity.
    #[inline]
    #[must_use]
    pub fn with_peer_name(mut self, peer_name: impl Into<String>) -> Self {
        self.peer_name = peer_name.into();
        self
    }

    /// Sets the inbound frame-body cap.
    #[inline]
    #[must_use]
    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RelayOptions::new();
        assert_eq!(options.peer_name, DEFAULT_PEER_NAME);
        assert_eq!(options.max_frame_len, DEFAULT_MAX_FRAME_LEN);
    }

    #[test]
    fn test_builder_methods() {
        let options = RelayOptions::new()
            .with_peer_name("com.example.peer")
            .with_max_frame_len(1024);

        assert_eq!(options.peer_name, "com.example.peer");
        assert_eq!(options.max_frame_len, 1024);
    }
}
