//! Inbound command decoding.
//!
//! Commands arrive from the native peer as JSON objects discriminated by
//! their `type` field:
//!
//! | `type` | Meaning |
//! |--------|---------|
//! | `ACK` | Informational acknowledgment, no-op |
//! | `Close` | Close the tab named by `tab_id` |
//! | anything else | Ignored |
//!
//! Decoding is explicit rather than derive-driven so the two failure modes
//! stay distinct: bytes that are not a valid command object are a
//! [`Framing`](crate::Error::Framing) error, a valid object with an
//! unrecognized `type` is an [`UnknownCommand`](crate::Error::UnknownCommand).
//! Both drop the single frame and leave the channel open.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::TabId;

// ============================================================================
// InboundCommand
// ============================================================================

/// A command decoded from the wire.
///
/// Value object: constructed from raw frame bytes, consumed exactly once
/// by the dispatch step, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundCommand {
    /// Peer acknowledgment. Purely informational.
    Ack,

    /// Close the given tab.
    Close {
        /// Target tab, coerced from the wire's string-or-int form.
        tab_id: TabId,
    },
}

impl InboundCommand {
    /// Decodes a complete frame body into a command.
    ///
    /// # Errors
    ///
    /// - [`Error::Framing`] if the bytes are not a JSON object with a
    ///   string `type`, or if a `Close` carries an unusable `tab_id`.
    /// - [`Error::UnknownCommand`] if the `type` value is unrecognized.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(raw)
            .map_err(|e| Error::framing(format!("invalid JSON payload: {e}")))?;

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::framing("missing or non-string `type` field"))?;

        match kind {
            "ACK" => Ok(Self::Ack),
            "Close" => {
                let raw_id = value
                    .get("tab_id")
                    .ok_or_else(|| Error::framing("Close command missing `tab_id`"))?;
                Ok(Self::Close {
                    tab_id: TabId::from_wire(raw_id)?,
                })
            }
            other => Err(Error::unknown_command(other)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
