use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece (the long piece).
    I = 0,
    /// O-piece (the square piece).
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

/// Error returned when a character or string does not name a piece kind.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unrecognized piece kind: {input:?}")]
pub struct ParsePieceKindError {
    #[error(not(source))]
    input: String,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Number of distinct rotation states of this kind (1, 2 or 4).
    #[must_use]
    pub const fn num_rotations(self) -> usize {
        PIECE_MASKS[self as usize].len()
    }

    /// Returns the occupancy mask of this kind in the given rotation state.
    ///
    /// Returns `None` if `rotation` is not a valid state for this kind.
    #[must_use]
    pub fn mask(self, rotation: RotationState) -> Option<&'static PieceMask> {
        PIECE_MASKS[self as usize].get(rotation.index())
    }

    /// Iterates over every valid rotation state of this kind with its mask,
    /// in ascending state order.
    pub fn rotations(self) -> impl Iterator<Item = (RotationState, &'static PieceMask)> {
        PIECE_MASKS[self as usize]
            .iter()
            .enumerate()
            .map(|(i, mask)| (RotationState::from_index(i), mask))
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use ctet_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use ctet_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ParsePieceKindError {
            input: s.to_owned(),
        })
    }
}

/// Rotation state index of a piece.
///
/// State 0 is the spawn orientation. Higher states are the orientations
/// reached by rotating counterclockwise, so the meaning of a state depends on
/// the kind: the O-piece only has state 0, the I, S and Z pieces have states
/// 0 and 1, and the T, J and L pieces have states 0 to 3.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RotationState(u8);

impl RotationState {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[expect(clippy::cast_possible_truncation)]
    const fn from_index(index: usize) -> Self {
        Self(index as u8)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RotationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Occupancy mask of a piece in one rotation state.
///
/// Stored as up to 4 row bit masks (bit `dx` is column offset `dx`) plus the
/// tight bounding box of the shape, so a mask of width `w` placed at column
/// `c` covers columns `c..c + w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceMask {
    width: u8,
    height: u8,
    rows: [u16; 4],
}

impl PieceMask {
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Row bit masks from top to bottom.
    pub fn row_bits(&self) -> impl Iterator<Item = u16> + '_ {
        self.rows[..self.height()].iter().copied()
    }

    /// Checks if the cell at (`dy`, `dx`) inside the bounding box is occupied.
    #[must_use]
    pub const fn is_occupied(&self, dy: usize, dx: usize) -> bool {
        dy < self.height() && (self.rows[dy] & (1 << dx)) != 0
    }

    /// Returns an iterator of occupied `(dy, dx)` offsets, row by row.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height())
            .flat_map(move |dy| (0..self.width()).map(move |dx| (dy, dx)))
            .filter(|&(dy, dx)| self.is_occupied(dy, dx))
    }
}

impl fmt::Display for PieceMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dy in 0..self.height() {
            if dy > 0 {
                writeln!(f)?;
            }
            for dx in 0..self.width() {
                write!(f, "{}", if self.is_occupied(dy, dx) { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

/// Builds a mask from rows of `'#'` (occupied) and `'.'` (empty).
#[expect(clippy::cast_possible_truncation)]
const fn mask(art: &[&str]) -> PieceMask {
    assert!(!art.is_empty() && art.len() <= 4);
    let width = art[0].len();
    assert!(width > 0 && width <= 4);

    let mut rows = [0; 4];
    let mut y = 0;
    while y < art.len() {
        let bytes = art[y].as_bytes();
        assert!(bytes.len() == width);
        let mut x = 0;
        while x < width {
            if bytes[x] == b'#' {
                rows[y] |= 1 << x;
            }
            x += 1;
        }
        y += 1;
    }
    PieceMask {
        width: width as u8,
        height: art.len() as u8,
        rows,
    }
}

const PIECE_MASKS: [&[PieceMask]; PieceKind::LEN] = [
    // I-piece
    &[mask(&["####"]), mask(&["#", "#", "#", "#"])],
    // O-piece
    &[mask(&["##", "##"])],
    // T-piece
    &[
        mask(&[".#.", "###"]),
        mask(&[".#", "##", ".#"]),
        mask(&["###", ".#."]),
        mask(&["#.", "##", "#."]),
    ],
    // S-piece
    &[mask(&[".##", "##."]), mask(&["#.", "##", ".#"])],
    // Z-piece
    &[mask(&["##.", ".##"]), mask(&[".#", "##", "#."])],
    // J-piece
    &[
        mask(&["#..", "###"]),
        mask(&[".#", ".#", "##"]),
        mask(&["###", "..#"]),
        mask(&["##", "#.", "#."]),
    ],
    // L-piece
    &[
        mask(&["..#", "###"]),
        mask(&["##", ".#", ".#"]),
        mask(&["###", "#.."]),
        mask(&["#.", "#.", "##"]),
    ],
];
