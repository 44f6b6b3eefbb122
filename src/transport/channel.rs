//! Channel to the native peer.
//!
//! The [`Channel`] owns the write half of the duplex wire and the
//! connection state. It is the only writer; the relay loop is
//! single-tasked, so writes serialize without locking.
//!
//! # Lifecycle
//!
//! ```text
//! Connected ──(peer closes wire)──► Disconnected
//! ```
//!
//! Disconnect is terminal for the process lifetime. There is no automatic
//! reconnect; every later [`send`](Channel::send) completes as a silent
//! no-op, observable only through logging. Malformed inbound frames are
//! dropped individually and never change the state.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace, warn};

use crate::browser::BrowserHost;
use crate::error::{Error, Result};
use crate::protocol::{InboundCommand, Outbound, encode_frame};

// ============================================================================
// ConnectionState
// ============================================================================

/// Connection state of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Wire is open; sends produce frames.
    Connected,
    /// Peer closed the wire; sends are no-ops until process restart.
    Disconnected,
}

// ============================================================================
// Channel
// ============================================================================

/// Owns the outbound wire and dispatches inbound commands.
pub struct Channel<W> {
    /// Write half of the wire.
    writer: W,
    /// Current connection state.
    state: ConnectionState,
    /// Browser capability for peer-requested tab actions.
    host: Arc<dyn BrowserHost>,
}

impl<W: AsyncWrite + Unpin> Channel<W> {
    /// Creates a channel over an already-established wire.
    ///
    /// The host runtime establishes the wire to the registered peer before
    /// this crate is involved, so a new channel starts `Connected`.
    #[must_use]
    pub fn new(writer: W, host: Arc<dyn BrowserHost>) -> Self {
        Self {
            writer,
            state: ConnectionState::Connected,
            host,
        }
    }

    /// Returns the current connection state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns `true` while the wire is open.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Frames and writes an outbound message.
    ///
    /// When disconnected this is a no-op returning `Ok(())`: callers
    /// producing events must not need to know connection state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the write fails while connected, or
    /// [`Error::Json`] if the message fails to serialize.
    pub async fn send(&mut self, message: &Outbound) -> Result<()> {
        if !self.is_connected() {
            debug!(?message, "dropping outbound message, peer disconnected");
            return Ok(());
        }

        let frame = encode_frame(message)?;
        self.writer.write_all(&frame).await?;
        self.writer.flush().await?;
        trace!(bytes = frame.len(), "outbound frame written");
        Ok(())
    }

    /// Decodes and dispatches one complete inbound frame body.
    ///
    /// All failure modes are handled here: malformed frames and unknown
    /// command types are dropped with a diagnostic, and a failed tab-close
    /// action is swallowed because the protocol defines no error reply.
    pub async fn handle_frame(&mut self, raw: &[u8]) {
        match InboundCommand::decode(raw) {
            Ok(InboundCommand::Ack) => {
                trace!("peer acknowledgment received");
            }

            Ok(InboundCommand::Close { tab_id }) => {
                debug!(%tab_id, "peer requested tab close");
                if let Err(e) = self.host.close_tab(tab_id).await {
                    warn!(%tab_id, error = %e, "close-tab action failed");
                }
            }

            Err(e @ Error::UnknownCommand { .. }) => {
                debug!(error = %e, "ignoring unrecognized inbound command");
            }

            Err(e) => {
                warn!(error = %e, "dropping malformed inbound frame");
            }
        }
    }

    /// Marks the channel disconnected.
    ///
    /// Invoked when the platform signals that the peer closed the wire.
    /// Idempotent; only the first call logs.
    pub fn on_disconnect(&mut self) {
        if self.is_connected() {
            warn!("peer disconnected, outbound events disabled until restart");
            self.state = ConnectionState::Disconnected;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
