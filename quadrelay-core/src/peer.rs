//! Peer actor (protocol-agnostic core).
//!
//! One actor == one TCP connection. Generalizes the split-pump socket
//! actor to the relay's fixed-frame wire shape: every read is exactly
//! [`FRAME_LEN`] bytes, writes are queued commands of arbitrary length.
//!
//! Responsibilities:
//! - Own the socket
//! - Drive a read pump (fixed-size frames) and a write pump (queued sends)
//! - Emit lifecycle events (`Frame` / `Disconnected`)
//! - Never contain room or protocol logic — that lives in the binary crate

use bytes::Bytes;
use flume::{Receiver, Sender};

use compio::io::{AsyncRead, AsyncWrite};
use compio::net::TcpStream;

/// Every inbound frame on the wire is this many bytes. Matches the
/// `quadrelay-wire` frame layout; kept local here so this crate stays
/// protocol-agnostic.
pub const FRAME_LEN: usize = 8;

/// Commands from the room coordinator to a peer's socket.
#[derive(Debug)]
pub enum PeerCmd {
    /// Write `bytes` to the socket. If `ack` is set, the write's outcome
    /// is reported back over it — used to rendezvous a [`crate::waitall::WaitAll`]
    /// barrier on the game-start handshake.
    Send {
        bytes: Bytes,
        ack: Option<Sender<std::io::Result<()>>>,
    },
    /// Close the socket and stop the actor.
    Close,
}

/// Events from a peer's socket to its room coordinator.
#[derive(Debug, Clone)]
pub enum PeerEvent {
    /// A full `FRAME_LEN`-byte frame was read.
    Frame([u8; FRAME_LEN]),
    /// The socket closed, orderly or otherwise. No further events follow.
    Disconnected,
}

/// Drives one peer's socket: reads fixed-size frames, writes queued
/// commands, and reports both as [`PeerEvent`]s.
pub struct PeerActor<S = TcpStream>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    stream: S,
    event_tx: Sender<PeerEvent>,
    cmd_rx: Receiver<PeerCmd>,
}

impl<S> PeerActor<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(stream: S, event_tx: Sender<PeerEvent>, cmd_rx: Receiver<PeerCmd>) -> Self {
        Self {
            stream,
            event_tx,
            cmd_rx,
        }
    }

    /// Run the actor's event loop until the socket closes or a `Close`
    /// command arrives.
    ///
    /// The read and the command queue are raced with `select!` on every
    /// iteration — not just drained once before each fresh read — so a
    /// command enqueued while a read is already outstanding (which is
    /// the common case: the room coordinator's very next write to a
    /// peer almost always arrives while that peer is parked waiting for
    /// its opponent's move) still gets flushed instead of sitting in the
    /// channel until the peer happens to send something.
    pub async fn run(mut self) {
        use compio::buf::BufResult;
        use compio::io::AsyncReadExt;
        use futures::{select, FutureExt};

        // Drain any commands queued before the actor started (e.g. the
        // CREATE/JOIN reply) so the first write isn't stuck behind a read.
        if !self.drain_writes().await {
            return;
        }

        loop {
            let buf = [0u8; FRAME_LEN];
            select! {
                cmd = self.cmd_rx.recv_async().fuse() => {
                    if !self.handle_cmd(cmd).await {
                        return;
                    }
                }
                result = (&mut self.stream).read_exact(buf).fuse() => {
                    let BufResult(result, buf) = result;
                    match result {
                        Ok(()) => {
                            let _ = self.event_tx.send(PeerEvent::Frame(buf));
                        }
                        Err(_) => {
                            let _ = self.event_tx.send(PeerEvent::Disconnected);
                            return;
                        }
                    }
                }
            }

            if !self.drain_writes().await {
                return;
            }
        }
    }

    /// Flush every command currently queued, returning `false` if the
    /// actor should stop (socket error or explicit close).
    async fn drain_writes(&mut self) -> bool {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            if !self.handle_cmd(Ok(cmd)).await {
                return false;
            }
        }
        true
    }

    /// Apply one command (or react to the channel closing), returning
    /// `false` if the actor should stop.
    async fn handle_cmd(&mut self, cmd: Result<PeerCmd, flume::RecvError>) -> bool {
        use compio::buf::BufResult;
        use compio::io::AsyncWriteExt;

        match cmd {
            Ok(PeerCmd::Send { bytes, ack }) => {
                let BufResult(result, _) = (&mut self.stream).write_all(bytes.to_vec()).await;
                let ok = result.is_ok();
                if let Some(ack) = ack {
                    let _ = ack.send(result);
                }
                if !ok {
                    let _ = self.event_tx.send(PeerEvent::Disconnected);
                    return false;
                }
                true
            }
            Ok(PeerCmd::Close) => {
                let _ = self.event_tx.send(PeerEvent::Disconnected);
                false
            }
            Err(_) => true,
        }
    }
}
