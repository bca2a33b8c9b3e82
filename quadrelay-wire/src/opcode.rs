//! Client-to-server opcode parsing.
//!
//! The first byte of a brand-new connection's first frame selects
//! `CREATE_ROOM` or `JOIN_ROOM`. The client may send either the raw
//! numeric opcode or its ASCII-digit form; `Opcode::parse` normalizes
//! both the same way `main.c`'s `handle_conn()` does with
//! `buffer[0] = buffer[0] - '0'` before the `switch`. That normalization
//! is applied only here, to the very first byte of a connection — later
//! `STATE_PUSH` frames are matched on the literal ASCII byte `'3'` and
//! are never routed through this parser (see `crate::board`).

use thiserror::Error;

/// A recognized first-byte opcode on a brand-new connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `0` (or `'0'`) — start a new room.
    CreateRoom,
    /// `1` (or `'1'`) — join an existing room by its 4-digit code.
    JoinRoom,
    /// `3` (or `'3'`) — push a board move. Never valid as a *first* byte
    /// in this protocol (see `original_source`'s commented-out
    /// `OP_STATE_PUSH` case); kept so the opcode space matches the
    /// spec's table, and so `Opcode::parse` rejects it explicitly
    /// instead of lumping it in with truly unknown bytes.
    StatePush,
}

/// A first byte that normalizes to none of the known opcodes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unrecognized opcode byte: {0:#04x}")]
pub struct BadOpcode(pub u8);

impl Opcode {
    /// Normalize and classify a connection's first byte.
    ///
    /// # Errors
    ///
    /// Returns [`BadOpcode`] carrying the original (un-normalized) byte
    /// if it doesn't match any known opcode.
    pub fn parse(first_byte: u8) -> Result<Self, BadOpcode> {
        let normalized = if first_byte >= b'0' {
            first_byte - b'0'
        } else {
            first_byte
        };
        match normalized {
            0 => Ok(Self::CreateRoom),
            1 => Ok(Self::JoinRoom),
            3 => Ok(Self::StatePush),
            _ => Err(BadOpcode(first_byte)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_raw_and_ascii_forms() {
        assert_eq!(Opcode::parse(0x00), Ok(Opcode::CreateRoom));
        assert_eq!(Opcode::parse(b'0'), Ok(Opcode::CreateRoom));
        assert_eq!(Opcode::parse(0x01), Ok(Opcode::JoinRoom));
        assert_eq!(Opcode::parse(b'1'), Ok(Opcode::JoinRoom));
        assert_eq!(Opcode::parse(b'3'), Ok(Opcode::StatePush));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Opcode::parse(0xFF), Err(BadOpcode(0xFF)));
        assert_eq!(Opcode::parse(b'9'), Err(BadOpcode(b'9')));
    }
}
