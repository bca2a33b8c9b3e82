//! 2x2 board state and the 180-degree relay rotation.
//!
//! Each client always renders itself on the bottom half of a shared 2x2
//! grid, so the server rotates the mover's view 180 degrees before
//! forwarding it to the other peer — which also means remapping the
//! `'1'..'4'` quadrant identifiers through the fixed permutation
//! `{1<->3, 2<->4}`. `original_source/src/main.c` declares `OP_STATE_PUSH`
//! but never implements it (the case is commented out); this module is
//! that relay logic, written from scratch against the spec.

use thiserror::Error;

use crate::frame::{FRAME_LEN, NEWLINE};

/// Sentinel quadrant digit meaning "no prior move" — used only in the
/// very first `STATE_PUSH` a room ever sends.
pub const NO_QUADRANT: u8 = b'0';

/// Quadrant remap applied on every relay: `'1'<->'3'`, `'2'<->'4'`.
/// Indexed by `digit - '1'`.
const QUADRANT_ROT: [u8; 4] = [b'3', b'4', b'1', b'2'];

/// A `STATE_PUSH` frame carried a byte outside the range its field
/// requires. These frames come straight from the peer, unvalidated by
/// `Opcode::parse` (see this module's doc comment), so this is the
/// wire crate's own typed rejection for them — mirroring
/// [`crate::opcode::BadOpcode`] rather than panicking on bad input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BadFrame {
    /// A quadrant field (bytes 1 or 2) wasn't in `'1'..='4'`.
    #[error("quadrant digit out of range: {0:#04x}")]
    Quadrant(u8),
    /// A cell field (bytes 3..7) wasn't an ASCII digit.
    #[error("cell digit out of range: {0:#04x}")]
    Cell(u8),
}

fn rotate_quadrant(digit: u8) -> Result<u8, BadFrame> {
    if !(b'1'..=b'4').contains(&digit) {
        return Err(BadFrame::Quadrant(digit));
    }
    Ok(QUADRANT_ROT[(digit - b'1') as usize])
}

/// The four cells of the shared board, each `0..=9`, in canonical
/// (creator, non-rotated) orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub cells: [u8; 4],
}

impl Board {
    /// The starting board every room is created with.
    #[must_use]
    pub const fn initial() -> Self {
        Self { cells: [1, 1, 1, 1] }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// Build the very first `STATE_PUSH` frame, sent to the creator
/// (`turn == 0`) once both peers have acknowledged `game-start`. No
/// prior move exists, so both quadrant fields carry the sentinel digit
/// and the cells are the untouched initial board, unrotated.
#[must_use]
pub fn first_state_push(board: &Board) -> [u8; FRAME_LEN] {
    let mut out = [0u8; FRAME_LEN];
    out[0] = b'3';
    out[1] = NO_QUADRANT;
    out[2] = NO_QUADRANT;
    for (i, &cell) in board.cells.iter().enumerate() {
        out[3 + i] = cell + b'0';
    }
    out[7] = NEWLINE;
    out
}

/// Fold an incoming move's cells into `board`, in the sender's
/// orientation.
///
/// `turn` is the index (0 or 1) of the peer the frame came from. When
/// `turn == 0` the cells are persisted straight through; when
/// `turn == 1` they're persisted pair-swapped, since the joiner's wire
/// order is already rotated relative to the creator's.
///
/// Rejects the frame (leaving `board` untouched) if any cell byte isn't
/// an ASCII digit.
pub fn persist_move(
    turn: u8,
    incoming: &[u8; FRAME_LEN],
    board: &mut Board,
) -> Result<(), BadFrame> {
    let digit = |i: usize| -> Result<u8, BadFrame> {
        let byte = incoming[i];
        if !byte.is_ascii_digit() {
            return Err(BadFrame::Cell(byte));
        }
        Ok(byte - b'0')
    };
    board.cells = if turn == 0 {
        [digit(3)?, digit(4)?, digit(5)?, digit(6)?]
    } else {
        [digit(5)?, digit(6)?, digit(3)?, digit(4)?]
    };
    Ok(())
}

/// Cells to emit toward the peer now at index `dest`, in that peer's
/// rotated orientation.
fn emit_cells(dest: u8, board: &Board) -> [u8; 4] {
    let c = board.cells;
    if dest == 1 {
        [c[2], c[3], c[0], c[1]]
    } else {
        c
    }
}

/// Persist an incoming move and build the frame to relay to the other
/// peer.
///
/// `turn` is the index of the peer the *incoming* frame came from — the
/// current turn-holder. Returns the outgoing frame and the new turn
/// index (always `1 - turn`), addressed to whichever peer now holds it.
///
/// Validates the quadrant and cell bytes before touching `board`, so a
/// malformed frame is rejected atomically — `board` is left exactly as
/// it was, and nothing is relayed or turn-advanced.
pub fn relay_frame(
    turn: u8,
    incoming: &[u8; FRAME_LEN],
    board: &mut Board,
) -> Result<([u8; FRAME_LEN], u8), BadFrame> {
    let quadrant_a = rotate_quadrant(incoming[1])?;
    let quadrant_b = rotate_quadrant(incoming[2])?;
    persist_move(turn, incoming, board)?;

    let new_turn = 1 - turn;
    let mut out = [0u8; FRAME_LEN];
    out[0] = b'3';
    out[1] = quadrant_a;
    out[2] = quadrant_b;
    let emitted = emit_cells(new_turn, board);
    for (i, &cell) in emitted.iter().enumerate() {
        out[3 + i] = cell + b'0';
    }
    out[7] = NEWLINE;

    Ok((out, new_turn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_carries_sentinel_quadrants_and_initial_board() {
        let frame = first_state_push(&Board::initial());
        assert_eq!(&frame, b"3001111\n");
    }

    /// Reproduces the spec's happy-path scenario byte-for-byte: A (turn
    /// 0) moves in quadrant 1 writing cells `2 2 1 1`; B should receive
    /// quadrant 3 with cells rotated to `1 1 2 2`.
    #[test]
    fn relay_from_creator_matches_spec_example() {
        let incoming = *b"3112211\n";
        let mut board = Board::initial();
        let (outgoing, new_turn) = relay_frame(0, &incoming, &mut board).unwrap();

        assert_eq!(board.cells, [2, 2, 1, 1]);
        assert_eq!(new_turn, 1);
        assert_eq!(&outgoing, b"3331122\n");
    }

    #[test]
    fn quadrant_remap_is_self_inverse() {
        for digit in [b'1', b'2', b'3', b'4'] {
            assert_eq!(rotate_quadrant(rotate_quadrant(digit).unwrap()).unwrap(), digit);
        }
    }

    /// If B echoes the exact frame it just received back as its own move,
    /// the persisted board returns to what it was before A's move —
    /// the relay transform applied twice is the identity on `game`.
    #[test]
    fn rotation_round_trips() {
        let mut board = Board::initial();
        let a_move = *b"3112211\n";
        let (to_b, turn_after_a) = relay_frame(0, &a_move, &mut board).unwrap();
        assert_eq!(board.cells, [2, 2, 1, 1]);

        let (_to_a, turn_after_b) = relay_frame(turn_after_a, &to_b, &mut board).unwrap();
        assert_eq!(board.cells, [2, 2, 1, 1]);
        assert_eq!(turn_after_b, 0);
    }

    #[test]
    fn out_of_range_quadrant_digit_is_rejected_without_mutating_board() {
        let mut board = Board::initial();
        let incoming = *b"3012211\n"; // quadrant byte '0' is not in '1'..='4'
        let err = relay_frame(0, &incoming, &mut board).unwrap_err();

        assert_eq!(err, BadFrame::Quadrant(b'0'));
        assert_eq!(board.cells, [1, 1, 1, 1]);
    }

    #[test]
    fn out_of_range_cell_digit_is_rejected_without_mutating_board() {
        let mut board = Board::initial();
        let incoming = *b"311221X\n"; // cell byte 'X' is not an ASCII digit
        let err = relay_frame(0, &incoming, &mut board).unwrap_err();

        assert_eq!(err, BadFrame::Cell(b'X'));
        assert_eq!(board.cells, [1, 1, 1, 1]);
    }
}
