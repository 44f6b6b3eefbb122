//! Relay event loop.
//!
//! Wires the two components together: browser signals drive the
//! [`FocusTracker`], whose events go out through the [`Channel`]; inbound
//! peer frames come off the wire and dispatch through the same channel.
//!
//! ```text
//! browser signal ─► FocusTracker ─(maybe event)─► Channel ─► wire
//! wire ─► FrameDecoder ─► Channel dispatch ─► BrowserHost::close_tab
//! ```
//!
//! Everything runs on one task; handlers never block, and the only
//! concurrency is the interleaving of async browser queries with newer
//! signals, which the tracker's fresh-query-plus-dedup discipline already
//! absorbs.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `options` | Relay configuration |

// ============================================================================
// Submodules
// ============================================================================

/// Relay configuration options.
pub mod options;

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

use crate::browser::{BrowserHost, FocusSignal};
use crate::error::{Error, Result};
use crate::focus::FocusTracker;
use crate::protocol::{FrameDecoder, Outbound};
use crate::transport::Channel;

pub use options::{DEFAULT_PEER_NAME, RelayOptions};

// ============================================================================
// Constants
// ============================================================================

/// Read buffer size for the inbound wire.
const READ_BUF_LEN: usize = 4096;

// ============================================================================
// Signal
// ============================================================================

/// Inputs injected into the relay loop by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A browser focus signal fired; recompute the active tab.
    Focus(FocusSignal),
    /// The user triggered a liveness ping toward the peer.
    PingPeer,
}

// ============================================================================
// SignalHandle
// ============================================================================

/// Typed registration surface for browser-side listeners.
///
/// The embedder subscribes to the browser's events and forwards each
/// firing through one of these methods. Dropping every handle ends the
/// relay loop.
#[derive(Debug, Clone)]
pub struct SignalHandle {
    /// Channel into the relay loop.
    tx: mpsc::UnboundedSender<Signal>,
}

impl SignalHandle {
    /// Forwards a tab-activated firing.
    pub fn tab_activated(&self) {
        self.send(Signal::Focus(FocusSignal::TabActivated));
    }

    /// Forwards a tab-updated firing (url/audible filter).
    pub fn tab_updated(&self) {
        self.send(Signal::Focus(FocusSignal::TabUpdated));
    }

    /// Forwards a window-focus-changed firing.
    pub fn window_focus_changed(&self) {
        self.send(Signal::Focus(FocusSignal::WindowFocusChanged));
    }

    /// Forwards the UI ping trigger.
    pub fn ping_peer(&self) {
        self.send(Signal::PingPeer);
    }

    /// Sends a signal, ignoring a stopped relay.
    fn send(&self, signal: Signal) {
        if self.tx.send(signal).is_err() {
            trace!(?signal, "relay stopped, signal dropped");
        }
    }
}

// ============================================================================
// Relay
// ============================================================================

/// Owns the relay loop: tracker, channel, and the inbound wire reader.
pub struct Relay<R, W> {
    /// Read half of the wire.
    reader: R,
    /// Channel manager over the write half.
    channel: Channel<W>,
    /// Focus-tracking state machine.
    tracker: FocusTracker,
    /// Browser capability, shared with the channel.
    host: Arc<dyn BrowserHost>,
    /// Signal intake from the embedder.
    signal_rx: mpsc::UnboundedReceiver<Signal>,
    /// Inbound stream deframer.
    decoder: FrameDecoder,
}

impl<R, W> Relay<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a relay over an already-established wire.
    ///
    /// Returns the relay and the [`SignalHandle`] the embedder registers
    /// its browser listeners against.
    #[must_use]
    pub fn new(
        reader: R,
        writer: W,
        host: Arc<dyn BrowserHost>,
        options: RelayOptions,
    ) -> (Self, SignalHandle) {
        let (tx, signal_rx) = mpsc::unbounded_channel();
        info!(peer = %options.peer_name, "channel open to registered peer");

        let relay = Self {
            reader,
            channel: Channel::new(writer, Arc::clone(&host)),
            tracker: FocusTracker::new(),
            host,
            signal_rx,
            decoder: FrameDecoder::new(options.max_frame_len),
        };
        (relay, SignalHandle { tx })
    }

    /// Creates a relay by obtaining the wire from the platform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] when the platform cannot locate or
    /// start the registered peer; the caller must not continue believing
    /// it is connected.
    pub fn connect<F>(
        transport: F,
        host: Arc<dyn BrowserHost>,
        options: RelayOptions,
    ) -> Result<(Self, SignalHandle)>
    where
        F: FnOnce(&str) -> std::io::Result<(R, W)>,
    {
        let (reader, writer) = transport(&options.peer_name).map_err(|e| {
            Error::connection(format!("cannot reach peer {}: {e}", options.peer_name))
        })?;
        Ok(Self::new(reader, writer, host, options))
    }

    /// Returns `true` while the channel to the peer is open.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    /// Drives the relay until every [`SignalHandle`] is dropped.
    ///
    /// Wire EOF or a read error marks the channel disconnected but does
    /// not stop the loop: focus tracking keeps recomputing so the snapshot
    /// stays correct, with sends degraded to no-ops.
    pub async fn run(mut self) {
        let mut read_buf = vec![0u8; READ_BUF_LEN];

        loop {
            if self.channel.is_connected() {
                tokio::select! {
                    read = self.reader.read(&mut read_buf) => match read {
                        Ok(0) => {
                            debug!("wire reached EOF");
                            self.channel.on_disconnect();
                        }
                        Ok(n) => {
                            self.decoder.push(&read_buf[..n]);
                            self.drain_frames().await;
                        }
                        Err(e) => {
                            error!(error = %e, "wire read failed");
                            self.channel.on_disconnect();
                        }
                    },

                    signal = self.signal_rx.recv() => match signal {
                        Some(signal) => self.handle_signal(signal).await,
                        None => break,
                    }
                }
            } else {
                // Wire is gone for good; only signals remain to service.
                match self.signal_rx.recv().await {
                    Some(signal) => self.handle_signal(signal).await,
                    None => break,
                }
            }
        }

        debug!("relay loop terminated");
    }

    /// Dispatches every complete frame currently buffered.
    async fn drain_frames(&mut self) {
        loop {
            match self.decoder.next_frame() {
                Ok(Some(frame)) => self.channel.handle_frame(&frame).await,
                Ok(None) => break,
                Err(e) => warn!(error = %e, "discarding oversized inbound frame"),
            }
        }
    }

    /// Handles one embedder signal.
    async fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Focus(kind) => {
                trace!(signal = kind.name(), "recomputing focus");
                if let Some(event) = self.tracker.refresh(self.host.as_ref()).await {
                    let message = Outbound::Event(event);
                    if let Err(e) = self.channel.send(&message).await {
                        error!(error = %e, "failed to send focus event");
                    }
                }
            }

            Signal::PingPeer => {
                if let Err(e) = self.channel.send(&Outbound::ping()).await {
                    error!(error = %e, "failed to send ping");
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use tokio::io::{AsyncWriteExt, DuplexStream, duplex};

    use crate::browser::{TabInfo, WindowState};
    use crate::identifiers::TabId;
    use crate::protocol::encode_frame;

    /// Scripted browser double: the window state is swapped by the test,
    /// close-tab calls are recorded.
    #[derive(Default)]
    struct ScriptedHost {
        window: Mutex<Option<WindowState>>,
        closed: Mutex<Vec<TabId>>,
    }

    impl ScriptedHost {
        fn set_window(&self, window: Option<WindowState>) {
            *self.window.lock().expect("lock") = window;
        }
    }

    #[async_trait]
    impl BrowserHost for ScriptedHost {
        async fn last_focused_window(&self) -> Result<Option<WindowState>> {
            Ok(self.window.lock().expect("lock").clone())
        }

        async fn close_tab(&self, tab_id: TabId) -> Result<()> {
            self.closed.lock().expect("lock").push(tab_id);
            Ok(())
        }
    }

    fn focused_on(url: &str) -> WindowState {
        WindowState {
            focused: true,
            tabs: vec![TabInfo {
                id: TabId::new(1),
                url: url.to_string(),
                title: "A".to_string(),
                active: true,
            }],
        }
    }

    fn unfocused() -> WindowState {
        WindowState {
            focused: false,
            tabs: Vec::new(),
        }
    }

    /// Opt-in log output for debugging test runs (`RUST_LOG=trace`).
    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    /// Spawns a relay over in-memory wires; returns the peer-side stream
    /// and the signal handle.
    fn spawn_relay(host: Arc<ScriptedHost>) -> (DuplexStream, DuplexStream, SignalHandle) {
        init_logging();
        // Extension side reads what the peer writes and vice versa.
        let (peer_write, ext_read) = duplex(64 * 1024);
        let (ext_write, peer_read) = duplex(64 * 1024);

        let (relay, handle) = Relay::new(ext_read, ext_write, host, RelayOptions::new());
        tokio::spawn(relay.run());
        (peer_write, peer_read, handle)
    }

    /// Reads one framed JSON message from the peer side.
    async fn read_peer_frame(peer_read: &mut DuplexStream) -> Value {
        let mut prefix = [0u8; 4];
        peer_read.read_exact(&mut prefix).await.expect("prefix");
        let len = u32::from_le_bytes(prefix) as usize;
        let mut body = vec![0u8; len];
        peer_read.read_exact(&mut body).await.expect("body");
        serde_json::from_slice(&body).expect("json body")
    }

    #[tokio::test]
    async fn test_focus_signal_emits_focus_change() {
        let host = Arc::new(ScriptedHost::default());
        host.set_window(Some(focused_on("https://a.com/x")));
        let (_peer_write, mut peer_read, handle) = spawn_relay(Arc::clone(&host));

        handle.tab_activated();

        let frame = read_peer_frame(&mut peer_read).await;
        assert_eq!(
            frame,
            json!({
                "event_type": "focus_change",
                "tab_id": 1,
                "tab_name": "A",
                "display_name": "a.com"
            })
        );
    }

    #[tokio::test]
    async fn test_duplicate_signals_emit_once() {
        let host = Arc::new(ScriptedHost::default());
        host.set_window(Some(focused_on("https://a.com/x")));
        let (_peer_write, mut peer_read, handle) = spawn_relay(Arc::clone(&host));

        // A window-focus signal and a tab-activated signal arriving for
        // the same logical change produce exactly one focus_change.
        handle.window_focus_changed();
        handle.tab_activated();

        let first = read_peer_frame(&mut peer_read).await;
        assert_eq!(first["event_type"], "focus_change");

        host.set_window(Some(unfocused()));
        handle.window_focus_changed();

        // The duplicated signal emitted nothing; the very next frame is
        // already focus_lost.
        let second = read_peer_frame(&mut peer_read).await;
        assert_eq!(second, json!({"event_type": "focus_lost"}));
    }

    #[tokio::test]
    async fn test_ping_signal_sends_ping() {
        let host = Arc::new(ScriptedHost::default());
        let (_peer_write, mut peer_read, handle) = spawn_relay(host);

        handle.ping_peer();

        let frame = read_peer_frame(&mut peer_read).await;
        assert_eq!(frame, json!({"cmd": "ping"}));
    }

    #[tokio::test]
    async fn test_peer_close_command_closes_tab() {
        let host = Arc::new(ScriptedHost::default());
        let (mut peer_write, _peer_read, _handle) = spawn_relay(Arc::clone(&host));

        let frame = encode_frame(&json!({"type": "Close", "tab_id": "7"})).expect("encode");
        peer_write.write_all(&frame).await.expect("write");

        // The dispatch happens on the relay task; poll for the effect.
        for _ in 0..50 {
            if !host.closed.lock().expect("lock").is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(*host.closed.lock().expect("lock"), vec![TabId::new(7)]);
    }

    #[tokio::test]
    async fn test_bogus_command_is_ignored_and_channel_survives() {
        let host = Arc::new(ScriptedHost::default());
        host.set_window(Some(focused_on("https://a.com/x")));
        let (mut peer_write, mut peer_read, handle) = spawn_relay(Arc::clone(&host));

        let frame = encode_frame(&json!({"type": "Bogus"})).expect("encode");
        peer_write.write_all(&frame).await.expect("write");

        // Channel still relays events afterwards.
        handle.tab_activated();
        let frame = read_peer_frame(&mut peer_read).await;
        assert_eq!(frame["event_type"], "focus_change");
        assert!(host.closed.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_degrades_sends_but_tracking_continues() {
        let host = Arc::new(ScriptedHost::default());
        host.set_window(Some(focused_on("https://a.com/x")));

        let (peer_write, ext_read) = duplex(64 * 1024);
        let (ext_write, mut peer_read) = duplex(64 * 1024);
        let (relay, handle) =
            Relay::new(
                ext_read,
                ext_write,
                Arc::clone(&host) as Arc<dyn BrowserHost>,
                RelayOptions::new(),
            );
        let relay_task = tokio::spawn(relay.run());

        // Peer closes its write half; the relay sees EOF.
        drop(peer_write);
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Signals after disconnect produce no bytes on the wire.
        handle.tab_activated();
        host.set_window(Some(focused_on("https://b.com/y")));
        handle.tab_updated();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut leftover = Vec::new();
        drop(handle);
        relay_task.await.expect("relay task");
        peer_read.read_to_end(&mut leftover).await.expect("drain");
        assert!(leftover.is_empty());
    }

    #[tokio::test]
    async fn test_loop_ends_when_handles_dropped() {
        let host = Arc::new(ScriptedHost::default());
        let (_peer_write, ext_read) = duplex(64 * 1024);
        let (ext_write, _peer_read) = duplex(64 * 1024);
        let (relay, handle) = Relay::new(ext_read, ext_write, host, RelayOptions::new());
        let task = tokio::spawn(relay.run());

        let cloned = handle.clone();
        drop(handle);
        drop(cloned);

        task.await.expect("relay loop ends cleanly");
    }

    #[tokio::test]
    async fn test_connect_maps_transport_failure() {
        let host: Arc<dyn BrowserHost> = Arc::new(ScriptedHost::default());
        let result = Relay::<DuplexStream, DuplexStream>::connect(
            |_peer| Err(std::io::Error::new(ErrorKind::NotFound, "peer not registered")),
            host,
            RelayOptions::new(),
        );

        let err = result.err().expect("connection failure");
        assert!(err.is_connection_error());
    }
}
