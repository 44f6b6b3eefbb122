//! Native-messaging wire protocol.
//!
//! This module defines the message format for communication between the
//! extension side (this crate) and the native peer.
//!
//! # Protocol Overview
//!
//! | Message | Direction | Purpose |
//! |---------|-----------|---------|
//! | `{"cmd":"ping"}` | Extension → Peer | Manual liveness check |
//! | `{"event_type":"focus_change",...}` | Extension → Peer | Active tab changed |
//! | `{"event_type":"focus_lost"}` | Extension → Peer | Focus left the browser |
//! | `{"type":"ACK"}` | Peer → Extension | Acknowledgment, no-op |
//! | `{"type":"Close","tab_id":...}` | Peer → Extension | Close a tab |
//!
//! Messages travel as length-prefixed frames; see [`framing`]. Outbound
//! and inbound shapes are closed tagged-variant types with explicit
//! encode/decode, so unexpected shapes fail loudly at the boundary
//! instead of surfacing as missing fields later.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Inbound command decoding |
//! | `event` | Outbound message types |
//! | `framing` | Length-prefixed frame encode/decode |

// ============================================================================
// Submodules
// ============================================================================

/// Inbound command decoding.
pub mod command;

/// Outbound message types.
pub mod event;

/// Length-prefixed frame encode/decode.
pub mod framing;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::InboundCommand;
pub use event::{Outbound, OutboundCommand, OutboundEvent};
pub use framing::{DEFAULT_MAX_FRAME_LEN, FrameDecoder, encode_frame};
