//! # quadrelay
//!
//! A small, stateful TCP game-relay server. Two clients connect, one
//! `CREATE`s a room and gets back a 4-digit code, the other `JOIN`s it,
//! and from then on the server relays a rotated 2x2 board state between
//! them — each turn flowing through a `STATE_PUSH` frame — until one
//! side disconnects.
//!
//! ## Layering
//!
//! - **`quadrelay-wire`**: sans-IO protocol layer — opcodes, the fixed
//!   frame layout, room states, and the board rotation math. No socket
//!   types anywhere in this crate.
//! - **`quadrelay-core`**: the I/O kernel — `compio`-backed submit
//!   wrappers, the `WaitAll` completion barrier, the per-connection
//!   peer actor, TCP tuning, room-code RNG, and the error taxonomy.
//! - **`quadrelay`** (this crate): the listener, the room registry, and
//!   the room coordinator that ties the two together into the actual
//!   protocol described above.
//!
//! ## Running
//!
//! ```rust,no_run
//! # async fn example() -> quadrelay_core::error::Result<()> {
//! let config = quadrelay::config::ServerConfig::from_env();
//! quadrelay::server::run(config).await
//! # }
//! ```
//!
//! Listens on `QUADRELAY_PORT` (default `7557`); `RUST_LOG` controls the
//! `tracing` filter. Neither is required.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::future_not_send)]

pub mod config;
pub mod registry;
pub mod room;
pub mod server;

/// Development helpers (benches/tests).
pub mod dev_tracing;
