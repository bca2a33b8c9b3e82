//! quadrelay-core
//!
//! Runtime-agnostic building blocks for the relay server's I/O kernel:
//! - Continuation-passing wrappers over `compio`'s completion-based I/O (`op`)
//! - An N-shot completion barrier used to rendezvous sibling operations (`waitall`)
//! - A fixed-frame peer actor: one task per TCP connection (`peer`)
//! - TCP socket tuning (`tcp`)
//! - Unbiased room-code digit generation (`rng`)
//! - Error types (`error`)

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod op;
pub mod peer;
pub mod rng;
pub mod tcp;
pub mod waitall;

pub mod prelude {
    pub use crate::error::RelayError;
    pub use crate::op::{submit_accept, submit_recv, submit_send};
    pub use crate::peer::{PeerActor, PeerCmd, PeerEvent};
    pub use crate::waitall::WaitAll;
}
