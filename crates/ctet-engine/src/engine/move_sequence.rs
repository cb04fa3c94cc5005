use std::fmt;

use arrayvec::ArrayVec;

use crate::{BOARD_WIDTH, PieceKind, RotationState};

/// A single discrete input sent to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSymbol {
    RotateCounterclockwise,
    RotateClockwise,
    Rotate180,
    MoveLeft,
    MoveRight,
    HardDrop,
    Hold,
}

impl InputSymbol {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            InputSymbol::RotateCounterclockwise => 'j',
            InputSymbol::RotateClockwise => 'l',
            InputSymbol::Rotate180 => 'k',
            InputSymbol::MoveLeft => 'a',
            InputSymbol::MoveRight => 'd',
            InputSymbol::HardDrop => 'w',
            InputSymbol::Hold => 'c',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'j' => Some(InputSymbol::RotateCounterclockwise),
            'l' => Some(InputSymbol::RotateClockwise),
            'k' => Some(InputSymbol::Rotate180),
            'a' => Some(InputSymbol::MoveLeft),
            'd' => Some(InputSymbol::MoveRight),
            'w' => Some(InputSymbol::HardDrop),
            'c' => Some(InputSymbol::Hold),
            _ => None,
        }
    }
}

impl fmt::Display for InputSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// hold + rotation + lateral moves + drop
const MAX_SEQUENCE_LEN: usize = 12;

/// Inputs that bring a freshly spawned piece to a target placement and drop it.
///
/// Pieces spawn with their leftmost bounding-box column at a reference column
/// (3, or 4 for the O-piece). Rotating into some states shifts the bounding
/// box one column right, which moves the reference with it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveSequence {
    symbols: ArrayVec<InputSymbol, MAX_SEQUENCE_LEN>,
}

impl MoveSequence {
    /// Builds the canonical sequence for placing `kind` in `rotation` with its
    /// leftmost column at `column`.
    ///
    /// `kind` is the piece actually placed (the hold candidate when
    /// `use_hold` is set). Hold comes first, then the rotation, then lateral
    /// moves, and a hard drop always ends the sequence. Columns past the
    /// right wall are treated as the rightmost column.
    ///
    /// # Examples
    ///
    /// ```
    /// use ctet_engine::{MoveSequence, PieceKind, RotationState};
    ///
    /// let moves = MoveSequence::from_decision(PieceKind::O, RotationState::SPAWN, 0, false);
    /// assert_eq!(moves.to_string(), "aaaaw");
    ///
    /// let moves = MoveSequence::from_decision(PieceKind::T, RotationState::new(3), 8, true);
    /// assert_eq!(moves.to_string(), "clddddw");
    /// ```
    #[must_use]
    pub fn from_decision(
        kind: PieceKind,
        rotation: RotationState,
        column: usize,
        use_hold: bool,
    ) -> Self {
        let mut symbols = ArrayVec::new();
        if use_hold {
            symbols.push(InputSymbol::Hold);
        }

        match rotation.index() {
            1 => symbols.push(InputSymbol::RotateCounterclockwise),
            2 => symbols.push(InputSymbol::Rotate180),
            3 => symbols.push(InputSymbol::RotateClockwise),
            _ => {}
        }

        let reference = reference_column(kind, rotation);
        let column = column.min(BOARD_WIDTH - 1);
        let lateral = if reference > column {
            InputSymbol::MoveLeft
        } else {
            InputSymbol::MoveRight
        };
        for _ in 0..reference.abs_diff(column) {
            symbols.push(lateral);
        }
        symbols.push(InputSymbol::HardDrop);

        Self { symbols }
    }

    #[must_use]
    pub fn symbols(&self) -> &[InputSymbol] {
        &self.symbols
    }

    #[must_use]
    pub fn uses_hold(&self) -> bool {
        self.symbols.first() == Some(&InputSymbol::Hold)
    }

    /// Replays the sequence for `kind` (the piece active after any hold) and
    /// returns the rotation state and leftmost column it ends in.
    ///
    /// Moves past the left wall stop at column 0, as they do in the game.
    #[must_use]
    pub fn target(&self, kind: PieceKind) -> (RotationState, usize) {
        let mut rotation = RotationState::SPAWN;
        let mut offset = 0_isize;
        for symbol in &self.symbols {
            match symbol {
                InputSymbol::RotateCounterclockwise => rotation = RotationState::new(1),
                InputSymbol::Rotate180 => rotation = RotationState::new(2),
                InputSymbol::RotateClockwise => rotation = RotationState::new(3),
                InputSymbol::MoveLeft => offset -= 1,
                InputSymbol::MoveRight => offset += 1,
                InputSymbol::Hold | InputSymbol::HardDrop => {}
            }
        }
        let column = reference_column(kind, rotation).saturating_add_signed(offset);
        (rotation, column)
    }
}

/// Leftmost column of a freshly spawned piece in its spawn state.
pub(crate) fn spawn_column(kind: PieceKind) -> usize {
    match kind {
        PieceKind::O => 4,
        _ => 3,
    }
}

/// Leftmost column of a spawned piece right after rotating into `rotation`.
///
/// Vertical I and clockwise T, L, J sit one column right of the spawn
/// position.
fn reference_column(kind: PieceKind, rotation: RotationState) -> usize {
    let shifted = match rotation.index() {
        1 => kind == PieceKind::I,
        3 => matches!(kind, PieceKind::T | PieceKind::L | PieceKind::J),
        _ => false,
    };
    spawn_column(kind) + usize::from(shifted)
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(kind: PieceKind, rotation: u8, column: usize, use_hold: bool) -> String {
        MoveSequence::from_decision(kind, RotationState::new(rotation), column, use_hold)
            .to_string()
    }

    #[test]
    fn test_spawn_rotation_lateral_moves() {
        assert_eq!(moves(PieceKind::O, 0, 0, false), "aaaaw");
        assert_eq!(moves(PieceKind::O, 0, 4, false), "w");
        assert_eq!(moves(PieceKind::O, 0, 8, false), "ddddw");
        assert_eq!(moves(PieceKind::T, 0, 3, false), "w");
        assert_eq!(moves(PieceKind::T, 0, 0, false), "aaaw");
        assert_eq!(moves(PieceKind::I, 0, 6, false), "dddw");
    }

    #[test]
    fn test_rotation_symbols() {
        assert_eq!(moves(PieceKind::S, 1, 3, false), "jw");
        assert_eq!(moves(PieceKind::T, 2, 3, false), "kw");
        assert_eq!(moves(PieceKind::T, 3, 4, false), "lw");
    }

    #[test]
    fn test_rotation_shifts_reference_column() {
        // Vertical I sits one column right of the flat spawn position
        assert_eq!(moves(PieceKind::I, 1, 4, false), "jw");
        assert_eq!(moves(PieceKind::I, 1, 9, false), "jdddddw");
        assert_eq!(moves(PieceKind::I, 1, 0, false), "jaaaaw");
        // Other two-state pieces do not shift
        assert_eq!(moves(PieceKind::Z, 1, 0, false), "jaaaw");
        // Clockwise T, L, J shift right by one
        assert_eq!(moves(PieceKind::L, 3, 0, false), "laaaaw");
        assert_eq!(moves(PieceKind::J, 3, 8, false), "lddddw");
        // Rotate-180 never shifts
        assert_eq!(moves(PieceKind::J, 2, 0, false), "kaaaw");
    }

    #[test]
    fn test_hold_is_emitted_first() {
        let sequence =
            MoveSequence::from_decision(PieceKind::I, RotationState::new(1), 5, true);
        assert_eq!(sequence.to_string(), "cjdw");
        assert!(sequence.uses_hold());
        assert_eq!(sequence.symbols()[0], InputSymbol::Hold);
        assert_eq!(sequence.symbols().last(), Some(&InputSymbol::HardDrop));
    }

    #[test]
    fn test_longest_sequence_fits() {
        // Hold, rotate, 5 right moves, drop
        let sequence =
            MoveSequence::from_decision(PieceKind::I, RotationState::new(1), 9, true);
        assert_eq!(sequence.symbols().len(), 8);
    }

    #[test]
    fn test_target_replays_decision() {
        for kind in PieceKind::ALL {
            for (rotation, mask) in kind.rotations() {
                for column in 0..=BOARD_WIDTH - mask.width() {
                    let sequence = MoveSequence::from_decision(kind, rotation, column, false);
                    assert_eq!(sequence.target(kind), (rotation, column), "{kind} {sequence}");
                }
            }
        }
    }

    #[test]
    fn test_target_stops_at_left_wall() {
        let sequence = MoveSequence::from_decision(PieceKind::T, RotationState::SPAWN, 0, true);
        let mut symbols = sequence.symbols().to_vec();
        symbols.insert(1, InputSymbol::MoveLeft);
        let padded = MoveSequence {
            symbols: symbols.into_iter().collect(),
        };
        assert_eq!(padded.target(PieceKind::T), (RotationState::SPAWN, 0));
    }

    #[test]
    fn test_symbol_chars() {
        for c in ['j', 'l', 'k', 'a', 'd', 'w', 'c'] {
            assert_eq!(InputSymbol::from_char(c).map(InputSymbol::as_char), Some(c));
        }
        assert_eq!(InputSymbol::from_char('x'), None);
    }
}
