//! Transport layer for the native-messaging wire.
//!
//! A single duplex byte stream connects the extension side to the native
//! peer. The [`Channel`] owns the write half and the connection state; the
//! read half is driven by the relay loop, which feeds complete frames back
//! into [`Channel::handle_frame`].
//!
//! ```text
//! ┌──────────────────┐                          ┌─────────────────┐
//! │  Relay (Rust)    │    length-prefixed JSON  │  Native peer    │
//! │                  │◄────────────────────────►│  (external      │
//! │  Channel         │      duplex stream       │   process)      │
//! └──────────────────┘                          └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. Host runtime establishes the wire to the registered peer
//! 2. `Channel::new` starts `Connected`
//! 3. `Channel::send` and `Channel::handle_frame` carry event and command flow
//! 4. `Channel::on_disconnect` is terminal; no reconnect, sends become no-ops

// ============================================================================
// Submodules
// ============================================================================

/// Channel ownership, framing, and inbound dispatch.
pub mod channel;

// ============================================================================
// Re-exports
// ============================================================================

pub use channel::{Channel, ConnectionState};
