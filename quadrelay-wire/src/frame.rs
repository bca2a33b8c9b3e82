//! Fixed-size frame layout shared by every direction of the wire protocol.
//!
//! Client -> server reads are always exactly [`FRAME_LEN`] bytes.
//! Server -> client writes vary in length (2, 3, 5 or 8 bytes) but
//! always end in [`NEWLINE`]. `main.c` builds each of these replies ad
//! hoc with a fresh `malloc` per write; here they're named constants
//! and one small builder for the one reply whose payload isn't fixed
//! (the room code).

/// Every inbound read, and the largest outbound write (`STATE_PUSH`), is
/// this many bytes.
pub const FRAME_LEN: usize = 8;

/// Every outbound frame ends with this byte.
pub const NEWLINE: u8 = b'\n';

/// `DDDD\n` sent to the creator once its room code is minted.
///
/// # Panics
///
/// Panics (via `debug_assert`) if `code` is not exactly 4 bytes.
#[must_use]
pub fn room_code_frame(code: &str) -> Vec<u8> {
    debug_assert_eq!(code.len(), 4, "room codes are always 4 digits");
    let mut out = Vec::with_capacity(5);
    out.extend_from_slice(code.as_bytes());
    out.push(NEWLINE);
    out
}

/// `0\n` — sent to a joiner once its `JOIN` succeeds.
pub const JOIN_ACK: [u8; 2] = [b'0', NEWLINE];

/// `2\n` — sent to both peers once the game-start rendezvous completes.
pub const GAME_START: [u8; 2] = [b'2', NEWLINE];

/// `-1\n` — sent to a joiner whose room code doesn't exist or is
/// already full, immediately before the socket is closed.
pub const JOIN_REFUSED: [u8; 3] = [b'-', b'1', NEWLINE];

/// `-2\n` — sent to the surviving peer when the other disconnects
/// mid-game.
pub const PEER_GONE: [u8; 3] = [b'-', b'2', NEWLINE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_code_frame_appends_newline() {
        assert_eq!(room_code_frame("0427"), b"0427\n".to_vec());
    }
}
