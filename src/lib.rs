//! Focus Relay - browser tab focus tracking over native messaging.
//!
//! This library tracks which browser tab currently holds user focus and
//! relays focus-change events, over a length-prefixed message channel, to
//! an external native peer. The peer can send a small command set back
//! (acknowledgment, close-tab) which is executed against the browser's
//! tab state.
//!
//! # Architecture
//!
//! Two components, loosely coupled through a single outbound channel:
//!
//! - **[`Channel`]**: owns the connection to the native peer; frames
//!   outgoing messages, deframes and dispatches incoming commands, and
//!   tracks the connected/disconnected lifecycle (no auto-reconnect).
//! - **[`FocusTracker`]**: consumes browser focus signals, recomputes the
//!   active tab of the last-focused window, and decides whether a
//!   focus-changed or focus-lost event fires, de-duplicating redundant
//!   events.
//!
//! The [`Relay`] event loop wires them together on a single task. The
//! browser itself is behind the [`BrowserHost`] capability trait so the
//! whole pipeline runs against a test double.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use focus_relay::{BrowserHost, Relay, RelayOptions};
//!
//! # async fn example(host: Arc<dyn BrowserHost>) -> focus_relay::Result<()> {
//! // The host runtime hands us the duplex wire to the registered peer.
//! let (reader, writer) = tokio::io::duplex(64 * 1024);
//!
//! let (relay, signals) = Relay::new(reader, writer, host, RelayOptions::new());
//! tokio::spawn(relay.run());
//!
//! // Browser listeners forward their firings through the handle.
//! signals.tab_activated();
//! signals.window_focus_changed();
//! signals.ping_peer();
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Browser capability seam: [`BrowserHost`], snapshots, signals |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`focus`] | Focus-tracking state machine |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Wire message types and framing |
//! | [`relay`] | Event loop and configuration |
//! | [`transport`] | Channel to the native peer |
//!
//! # Delivery Semantics
//!
//! Events are best-effort. A peer disconnect is terminal for the process:
//! sends degrade to logged no-ops while focus tracking keeps running, and
//! only an external restart re-establishes the channel.

// ============================================================================
// Modules
// ============================================================================

/// Browser capability seam.
///
/// The [`BrowserHost`] trait is the only path to the real browser; inject
/// a double to drive the relay in tests.
pub mod browser;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Focus-tracking state machine.
///
/// [`FocusTracker`] owns the active-tab snapshot and the dedup rules.
pub mod focus;

/// Type-safe identifiers for browser entities.
pub mod identifiers;

/// Native-messaging wire protocol.
///
/// Message shapes and the length-prefixed framing.
pub mod protocol;

/// Relay event loop and configuration.
pub mod relay;

/// Channel to the native peer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{BrowserHost, FocusSignal, TabInfo, WindowState};

// Error types
pub use error::{Error, Result};

// Focus types
pub use focus::{ActiveTabSnapshot, FocusTracker};

// Identifier types
pub use identifiers::TabId;

// Protocol types
pub use protocol::{FrameDecoder, InboundCommand, Outbound, OutboundCommand, OutboundEvent};

// Relay types
pub use relay::{DEFAULT_PEER_NAME, Relay, RelayOptions, Signal, SignalHandle};

// Transport types
pub use transport::{Channel, ConnectionState};
