//! Room registry: maps 4-digit codes to the channel a pending room is
//! listening on for its one joiner.
//!
//! The original server keeps every `struct room *` in a `tz_table` for
//! its whole life and only detaches it on teardown. This port only ever
//! needs to resolve a code while a room is still `Pending` — once a
//! joiner arrives no further `JOIN` can ever target that code again, so
//! the entry is removed the instant a join is attempted (successful or
//! not) rather than carried until the room's eventual teardown. See
//! `DESIGN.md` for the reasoning; externally this is unobservable: a
//! `JOIN` against a started, full, or never-existed room all produce
//! the same `"-1\n"`.

use std::collections::HashMap;
use std::sync::Mutex;

use compio::net::TcpStream;
use flume::{Receiver, Sender};
use rand::Rng;

use quadrelay_core::rng::room_code;

/// Process-lifetime table of in-progress room codes. Cheap to clone;
/// every clone shares the same underlying map.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    pending: std::sync::Arc<Mutex<HashMap<String, Sender<TcpStream>>>>,
}

impl RoomRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a unique 4-digit code and register a one-shot join channel
    /// for it. Redraws on collision, matching `room_init()`'s
    /// store-or-retry loop.
    pub fn create(&self, rng: &mut impl Rng) -> (String, Receiver<TcpStream>) {
        loop {
            let code = room_code(rng);
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            if pending.contains_key(&code) {
                continue;
            }
            let (tx, rx) = flume::bounded(1);
            pending.insert(code.clone(), tx);
            return (code, rx);
        }
    }

    /// Attempt to deliver `stream` to the room waiting on `code`.
    ///
    /// Removes the code from the registry regardless of outcome — once
    /// attempted, a code never accepts a second `JOIN`. Returns `stream`
    /// back to the caller if the code is unknown or its room has already
    /// given up (e.g. the creator disconnected first).
    pub fn join(&self, code: &str, stream: TcpStream) -> Result<(), TcpStream> {
        let tx = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            pending.remove(code)
        };
        match tx {
            Some(tx) => tx.send(stream).map_err(|e| e.into_inner()),
            None => Err(stream),
        }
    }

    /// Drop a code without anyone ever joining it (the creator gave up
    /// first).
    pub fn remove(&self, code: &str) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(code);
    }
}
