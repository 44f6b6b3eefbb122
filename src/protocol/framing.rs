//! Length-prefixed message framing.
//!
//! The native-messaging wire is a byte stream carrying discrete JSON
//! messages. Each message is preceded by a 4-byte little-endian `u32`
//! giving the length of the UTF-8 body that follows:
//!
//! ```text
//! ┌────────────────┬──────────────────────────┐
//! │ length (u32 LE)│ body (length bytes, JSON)│
//! └────────────────┴──────────────────────────┘
//! ```
//!
//! [`encode_frame`] produces outbound frames; [`FrameDecoder`] splits the
//! inbound stream back into bodies, tolerating arbitrary read-chunk
//! boundaries. A frame whose declared length exceeds the configured cap is
//! reported as a framing error and its bytes are discarded as they arrive,
//! so one oversized frame never desynchronizes the stream.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Size of the length prefix in bytes.
const LENGTH_PREFIX_LEN: usize = 4;

/// Default cap on a single inbound frame body (1 MiB, the browser-side
/// native-messaging limit).
pub const DEFAULT_MAX_FRAME_LEN: usize = 1024 * 1024;

// ============================================================================
// Encoding
// ============================================================================

/// Serializes a message and wraps it in a length-prefixed frame.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails, or [`Error::Framing`]
/// if the body would not fit a `u32` length prefix.
pub fn encode_frame<T: Serialize>(message: &T) -> Result<Vec<u8>> {
    let body = serde_json::to_vec(message)?;
    let len = u32::try_from(body.len())
        .map_err(|_| Error::framing(format!("frame body too large: {} bytes", body.len())))?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_LEN + body.len());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

// ============================================================================
// FrameDecoder
// ============================================================================

/// Incremental deframer for the inbound byte stream.
///
/// Feed raw reads in with [`push`](Self::push), then drain complete frame
/// bodies with [`next_frame`](Self::next_frame) until it yields `Ok(None)`.
#[derive(Debug)]
pub struct FrameDecoder {
    /// Buffered bytes not yet consumed.
    buf: Vec<u8>,
    /// Remaining bytes of an oversized frame still to discard.
    skip: usize,
    /// Cap on a single frame body.
    max_frame_len: usize,
}

impl FrameDecoder {
    /// Creates a decoder with the given frame-body cap.
    #[must_use]
    pub fn new(max_frame_len: usize) -> Self {
        Self {
            buf: Vec::new(),
            skip: 0,
            max_frame_len,
        }
    }

    /// Appends raw bytes read from the wire.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Returns the next complete frame body, if one is buffered.
    ///
    /// `Ok(None)` means more bytes are needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Framing`] when a frame declares a length above the
    /// cap. The frame's bytes are discarded; decoding continues with the
    /// next frame.
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        self.discard_skipped();
        if self.skip > 0 {
            return Ok(None);
        }

        if self.buf.len() < LENGTH_PREFIX_LEN {
            return Ok(None);
        }

        let mut prefix = [0u8; LENGTH_PREFIX_LEN];
        prefix.copy_from_slice(&self.buf[..LENGTH_PREFIX_LEN]);
        let len = u32::from_le_bytes(prefix) as usize;

        if len > self.max_frame_len {
            self.buf.drain(..LENGTH_PREFIX_LEN);
            self.skip = len;
            self.discard_skipped();
            return Err(Error::framing(format!(
                "frame length {len} exceeds cap {}",
                self.max_frame_len
            )));
        }

        if self.buf.len() < LENGTH_PREFIX_LEN + len {
            return Ok(None);
        }

        let body = self.buf[LENGTH_PREFIX_LEN..LENGTH_PREFIX_LEN + len].to_vec();
        self.buf.drain(..LENGTH_PREFIX_LEN + len);
        Ok(Some(body))
    }

    /// Drops buffered bytes belonging to an oversized frame.
    fn discard_skipped(&mut self) {
        if self.skip > 0 {
            let n = self.skip.min(self.buf.len());
            self.buf.drain(..n);
            self.skip -= n;
        }
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_LEN)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn frame_of(body: &[u8]) -> Vec<u8> {
        let mut frame = (body.len() as u32).to_le_bytes().to_vec();
        frame.extend_from_slice(body);
        frame
    }

    #[test]
    fn test_encode_frame_layout() {
        let frame = encode_frame(&json!({"cmd": "ping"})).expect("encode");
        let body = br#"{"cmd":"ping"}"#;
        assert_eq!(&frame[..4], &(body.len() as u32).to_le_bytes());
        assert_eq!(&frame[4..], body);
    }

    #[test]
    fn test_decode_single_frame() {
        let mut decoder = FrameDecoder::default();
        decoder.push(&frame_of(br#"{"type":"ACK"}"#));

        let body = decoder.next_frame().expect("decode").expect("complete");
        assert_eq!(body, br#"{"type":"ACK"}"#);
        assert!(decoder.next_frame().expect("decode").is_none());
    }

    #[test]
    fn test_decode_across_chunk_boundaries() {
        let frame = frame_of(br#"{"type":"ACK"}"#);
        let mut decoder = FrameDecoder::default();

        for byte in &frame[..frame.len() - 1] {
            decoder.push(std::slice::from_ref(byte));
            assert!(decoder.next_frame().expect("decode").is_none());
        }

        decoder.push(&frame[frame.len() - 1..]);
        let body = decoder.next_frame().expect("decode").expect("complete");
        assert_eq!(body, br#"{"type":"ACK"}"#);
    }

    #[test]
    fn test_decode_back_to_back_frames() {
        let mut bytes = frame_of(b"first");
        bytes.extend_from_slice(&frame_of(b"second"));

        let mut decoder = FrameDecoder::default();
        decoder.push(&bytes);

        assert_eq!(
            decoder.next_frame().expect("decode").expect("first"),
            b"first"
        );
        assert_eq!(
            decoder.next_frame().expect("decode").expect("second"),
            b"second"
        );
        assert!(decoder.next_frame().expect("decode").is_none());
    }

    #[test]
    fn test_oversized_frame_is_skipped_not_fatal() {
        let mut decoder = FrameDecoder::new(8);
        let mut bytes = frame_of(b"way past the eight byte cap");
        bytes.extend_from_slice(&frame_of(b"ok"));
        decoder.push(&bytes);

        let err = decoder.next_frame().unwrap_err();
        assert!(matches!(err, Error::Framing { .. }));

        // Decoding resumes at the next frame.
        assert_eq!(decoder.next_frame().expect("decode").expect("next"), b"ok");
    }

    #[test]
    fn test_oversized_frame_discarded_incrementally() {
        let mut decoder = FrameDecoder::new(8);
        let big = frame_of(&[0u8; 64]);

        decoder.push(&big[..10]);
        assert!(decoder.next_frame().is_err());

        // Remainder of the oversized body trickles in, then a valid frame.
        decoder.push(&big[10..]);
        assert!(decoder.next_frame().expect("decode").is_none());

        decoder.push(&frame_of(b"ok"));
        assert_eq!(decoder.next_frame().expect("decode").expect("next"), b"ok");
    }

    #[test]
    fn test_empty_body_frame() {
        let mut decoder = FrameDecoder::default();
        decoder.push(&frame_of(b""));
        let body = decoder.next_frame().expect("decode").expect("complete");
        assert!(body.is_empty());
    }
}
