//! Room coordinator: the per-match state machine.
//!
//! The source expresses this as callbacks chained off each I/O
//! submission (`EVENT_TYPE_WRITE_JOIN` scheduling the game-start writes,
//! which on completion would schedule the first `STATE_PUSH`, and so
//! on). Per `SPEC_FULL.md`'s design notes, the idiomatic translation
//! with native tasks is a single coordinator task per room that owns
//! both peers' command/event channels directly — no heap-allocated
//! per-op continuation records, no `WaitAll` ownership juggling beyond
//! the barrier itself. Each peer's socket is still driven by its own
//! task ([`quadrelay_core::peer::PeerActor`]); this function is the
//! "room" side of that split.

use std::sync::Arc;

use bytes::Bytes;
use compio::net::TcpStream;
use flume::Receiver;
use futures::{select, FutureExt};
use rand::Rng;

use quadrelay_core::peer::{PeerActor, PeerCmd, PeerEvent};
use quadrelay_core::waitall::WaitAll;
use quadrelay_wire::board::{self, Board};
use quadrelay_wire::frame;
use quadrelay_wire::room_state::RoomState;

use crate::registry::RoomRegistry;

/// Index of the room's creator among `socket[2]`.
const CREATOR: usize = 0;
/// Index of the room's joiner among `socket[2]`.
const JOINER: usize = 1;

/// Mint a room for `creator`, register it, and spawn its coordinator
/// task. Returns the freshly-minted code (the coordinator sends it to
/// `creator` itself once its `PeerActor` is up).
pub fn create(creator: TcpStream, registry: RoomRegistry, rng: &mut impl Rng) -> String {
    let (code, join_rx) = registry.create(rng);
    tracing::info!(room = %code, "created room");

    let task_code = code.clone();
    compio::runtime::spawn(async move {
        run(task_code, creator, join_rx, registry).await;
    })
    .detach();

    code
}

/// Drive one room from creation through teardown.
async fn run(code: String, creator: TcpStream, join_rx: Receiver<TcpStream>, registry: RoomRegistry) {
    let (a_cmd_tx, a_cmd_rx) = flume::unbounded();
    let (a_event_tx, a_event_rx) = flume::unbounded();
    compio::runtime::spawn(PeerActor::new(creator, a_event_tx, a_cmd_rx).run()).detach();

    let _ = a_cmd_tx.send(PeerCmd::Send {
        bytes: Bytes::from(frame::room_code_frame(&code)),
        ack: None,
    });

    let Some(joiner) = wait_for_joiner(&code, &a_event_rx, join_rx, &registry).await else {
        return;
    };

    let (b_cmd_tx, b_cmd_rx) = flume::unbounded();
    let (b_event_tx, b_event_rx) = flume::unbounded();
    compio::runtime::spawn(PeerActor::new(joiner, b_event_tx, b_cmd_rx).run()).detach();

    let _ = b_cmd_tx.send(PeerCmd::Send {
        bytes: Bytes::copy_from_slice(&frame::JOIN_ACK),
        ack: None,
    });
    tracing::debug!(room = %code, "joiner accepted, starting game");

    rendezvous_game_start(&a_cmd_tx, &b_cmd_tx).await;

    let mut state = RoomState::Playing;
    let mut board = Board::initial();
    let mut turn: u8 = 0;
    let cmd_tx = [&a_cmd_tx, &b_cmd_tx];

    let first_push = board::first_state_push(&board);
    let _ = cmd_tx[turn as usize].send(PeerCmd::Send {
        bytes: Bytes::copy_from_slice(&first_push),
        ack: None,
    });
    tracing::trace!(room = %code, turn, "sent first state push");

    let mut alive = [true, true];
    loop {
        let (side, event) = if alive[0] && alive[1] {
            select! {
                ev = a_event_rx.recv_async().fuse() => (CREATOR, ev),
                ev = b_event_rx.recv_async().fuse() => (JOINER, ev),
            }
        } else if alive[CREATOR] {
            (CREATOR, a_event_rx.recv_async().await)
        } else if alive[JOINER] {
            (JOINER, b_event_rx.recv_async().await)
        } else {
            break;
        };

        if state == RoomState::Broken {
            let _ = cmd_tx[side].send(PeerCmd::Close);
            alive[side] = false;
            tracing::debug!(room = %code, side, "room torn down after last peer's completion");
            break;
        }

        match event {
            Ok(PeerEvent::Disconnected) | Err(_) => {
                alive[side] = false;
                state = RoomState::Broken;
                let other = 1 - side;
                tracing::info!(room = %code, side, "peer disconnected mid-game");
                let _ = cmd_tx[other].send(PeerCmd::Send {
                    bytes: Bytes::copy_from_slice(&frame::PEER_GONE),
                    ack: None,
                });
            }
            Ok(PeerEvent::Frame(incoming)) if side == turn as usize => {
                match board::relay_frame(turn, &incoming, &mut board) {
                    Ok((outgoing, new_turn)) => {
                        turn = new_turn;
                        let _ = cmd_tx[turn as usize].send(PeerCmd::Send {
                            bytes: Bytes::copy_from_slice(&outgoing),
                            ack: None,
                        });
                        tracing::trace!(room = %code, turn, "relayed state push");
                    }
                    Err(err) => {
                        tracing::warn!(room = %code, side, %err, "dropped malformed state push");
                    }
                }
            }
            Ok(PeerEvent::Frame(_)) => {
                tracing::trace!(room = %code, side, "dropped out-of-turn frame");
            }
        }
    }
}

/// Phase 1: wait for either a joiner to arrive on `join_rx`, or the
/// creator to give up first. Returns the joiner's stream on success;
/// on creator disconnect, removes the room from the registry and
/// returns `None`.
async fn wait_for_joiner(
    code: &str,
    a_event_rx: &Receiver<PeerEvent>,
    join_rx: Receiver<TcpStream>,
    registry: &RoomRegistry,
) -> Option<TcpStream> {
    loop {
        select! {
            ev = a_event_rx.recv_async().fuse() => {
                match ev {
                    Ok(PeerEvent::Frame(_)) => continue,
                    Ok(PeerEvent::Disconnected) | Err(_) => {
                        registry.remove(code);
                        tracing::info!(room = %code, "creator disconnected before a joiner arrived; room removed");
                        return None;
                    }
                }
            }
            joiner = join_rx.recv_async().fuse() => {
                return joiner.ok();
            }
        }
    }
}

/// Game-start rendezvous: submit the `"2\n"` write to both peers and
/// wait until both have completed, mirroring the original's
/// `EVENT_TYPE_WRITE_GAMESTART` pair and the `WaitAll(2)` barrier
/// `SPEC_FULL.md` calls for.
async fn rendezvous_game_start(
    a_cmd_tx: &flume::Sender<PeerCmd>,
    b_cmd_tx: &flume::Sender<PeerCmd>,
) {
    let barrier = Arc::new(WaitAll::new(2, ()));
    let (done_tx, done_rx) = flume::bounded::<()>(2);

    for cmd_tx in [a_cmd_tx, b_cmd_tx] {
        let (ack_tx, ack_rx) = flume::bounded(1);
        let _ = cmd_tx.send(PeerCmd::Send {
            bytes: Bytes::copy_from_slice(&frame::GAME_START),
            ack: Some(ack_tx),
        });

        let barrier = barrier.clone();
        let done_tx = done_tx.clone();
        compio::runtime::spawn(async move {
            let _ = ack_rx.recv_async().await;
            if barrier.arrive().is_some() {
                let _ = done_tx.send(());
            }
        })
        .detach();
    }

    let _ = done_rx.recv_async().await;
}
