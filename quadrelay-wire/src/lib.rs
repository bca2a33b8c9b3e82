//! # quadrelay-wire
//!
//! Sans-IO protocol layer for the relay server: opcode parsing, the fixed
//! 8-byte frame layout, room lifecycle states, and the board rotation math
//! that turns one peer's move into the other peer's state push.
//!
//! Nothing in this crate touches a socket. Every type here is plain data
//! and every function is a pure transform, so it's tested without any
//! async runtime at all.
//!
//! ## Design
//!
//! - **Testable**: No I/O dependencies, runtime-agnostic
//! - **Type-safe**: Illegal states (e.g. a room `Playing` with no second
//!   peer) are unrepresentable where practical

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod frame;
pub mod opcode;
pub mod room_state;

pub mod prelude {
    pub use crate::board::{persist_move, relay_frame, BadFrame, Board};
    pub use crate::frame::{FRAME_LEN, NEWLINE};
    pub use crate::opcode::Opcode;
    pub use crate::room_state::RoomState;
}
