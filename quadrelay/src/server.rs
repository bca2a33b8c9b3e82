//! Listener and first-recv dispatch.
//!
//! Mirrors `server_loop()`/`add_accept_req()`: a permanent accept loop
//! feeding a one-shot first read per connection, whose first byte picks
//! `CREATE_ROOM` or `JOIN_ROOM`. Socket-level `bind`/`listen` setup is
//! delegated to `compio::net::TcpListener`, per `SPEC_FULL.md` §1's
//! explicit out-of-scope list.

use std::net::SocketAddr;

use compio::buf::BufResult;
use compio::io::{AsyncReadExt, AsyncWriteExt};
use compio::net::{TcpListener, TcpStream};

use quadrelay_core::error::{RelayError, Result};
use quadrelay_core::peer::FRAME_LEN;
use quadrelay_wire::frame;
use quadrelay_wire::opcode::Opcode;

use crate::config::ServerConfig;
use crate::registry::RoomRegistry;
use crate::room;

/// Bind the listener and run the accept loop until the process is
/// killed. Shutdown is out of scope, same as the original.
pub async fn run(config: ServerConfig) -> Result<()> {
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| RelayError::ListenerBind { addr, source })?;
    tracing::info!(port = config.port, "listening");

    let registry = RoomRegistry::new();

    loop {
        let (stream, peer_addr) = match listener.accept().await {
            Ok(pair) => pair,
            Err(error) => {
                tracing::warn!(%error, "accept failed");
                continue;
            }
        };

        if let Err(error) = quadrelay_core::tcp::enable_tcp_nodelay(&stream) {
            tracing::debug!(%error, "failed to set TCP_NODELAY");
        }

        let registry = registry.clone();
        compio::runtime::spawn(async move {
            dispatch_first_recv(stream, peer_addr, registry).await;
        })
        .detach();
    }
}

/// Read a new connection's first fixed-size frame and route it to
/// `CREATE_ROOM` or `JOIN_ROOM`. Anything else is logged and the socket
/// is dropped without a reply.
async fn dispatch_first_recv(mut stream: TcpStream, peer_addr: SocketAddr, registry: RoomRegistry) {
    let buf = [0u8; FRAME_LEN];
    let BufResult(result, buf) = stream.read_exact(buf).await;
    if result.is_err() {
        tracing::debug!(%peer_addr, "connection closed before first frame");
        return;
    }

    match Opcode::parse(buf[0]) {
        Ok(Opcode::CreateRoom) => {
            let mut rng = rand::thread_rng();
            let code = room::create(stream, registry, &mut rng);
            tracing::debug!(%peer_addr, room = %code, "create dispatched");
        }
        Ok(Opcode::JoinRoom) => {
            let code = String::from_utf8_lossy(&buf[1..5]).into_owned();
            tracing::debug!(%peer_addr, room = %code, "join dispatched");
            if let Err(mut stream) = registry.join(&code, stream) {
                tracing::warn!(%peer_addr, room = %code, "bad room join");
                let _ = stream.write_all(frame::JOIN_REFUSED.to_vec()).await;
            }
        }
        Ok(Opcode::StatePush) | Err(_) => {
            tracing::warn!(%peer_addr, opcode = buf[0], "bad opcode on first recv");
        }
    }
}
