//! Submit-and-continue wrappers over `compio`'s completion-based I/O.
//!
//! These mirror the three operations the reactor originally exposed —
//! accept, recv, send — each taking ownership of whatever the operation
//! needs and a continuation to run once the kernel completion lands.
//! `submit_*` returns immediately; the continuation runs later, on a
//! spawned `compio` task, exactly once. There is no analogue of a
//! pending-op record to free here: the task's stack frame is the record,
//! and it's reclaimed when the task completes.
//!
//! Most per-connection reads are driven directly by [`crate::peer::PeerActor`]
//! in a loop, the same way a hand-rolled reactor would re-arm a recv from
//! inside its own completion handler. These free functions are for the
//! two call sites that need a one-shot op with an external continuation:
//! the listener's repeating accept, and a coordinated send whose completion
//! feeds a [`crate::waitall::WaitAll`] barrier.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use compio::buf::{BufResult, IoBuf, IoBufMut};
use compio::io::{AsyncReadExt, AsyncWriteExt};
use compio::net::{TcpListener, TcpStream};

/// Submit an accept on `listener`. `cont` receives the accepted stream and
/// its peer address, or the error that made the accept fail.
pub fn submit_accept<F>(listener: Arc<TcpListener>, cont: F)
where
    F: FnOnce(io::Result<(TcpStream, SocketAddr)>) + Send + 'static,
{
    compio::runtime::spawn(async move {
        let result = listener.accept().await;
        cont(result);
    })
    .detach();
}

/// Submit a fixed-size read of `buf.len()` bytes from `stream`. `cont`
/// receives the outcome along with the stream and buffer back, since
/// `compio`'s buffer ownership model hands both back on completion.
pub fn submit_recv<B, F>(mut stream: TcpStream, buf: B, cont: F)
where
    B: IoBufMut + Send + 'static,
    F: FnOnce(io::Result<()>, TcpStream, B) + Send + 'static,
{
    compio::runtime::spawn(async move {
        let BufResult(result, buf) = stream.read_exact(buf).await;
        cont(result, stream, buf);
    })
    .detach();
}

/// Submit a full write of `buf` to `stream`. `cont` receives the outcome
/// along with the stream and buffer back.
pub fn submit_send<B, F>(mut stream: TcpStream, buf: B, cont: F)
where
    B: IoBuf + Send + 'static,
    F: FnOnce(io::Result<()>, TcpStream, B) + Send + 'static,
{
    compio::runtime::spawn(async move {
        let BufResult(result, buf) = stream.write_all(buf).await;
        cont(result, stream, buf);
    })
    .detach();
}
