use std::fmt;

/// A board coordinate: a file `a`-`h` crossed with a rank `1`-`8`.
///
/// Stored as zero-based file and rank indices; only the 64 on-board values
/// are constructible.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    const fn at(file: u8, rank: u8) -> Square {
        Square { file, rank }
    }

    // Named squares for convenience
    pub const A1: Square = Square::at(0, 0);
    pub const B1: Square = Square::at(1, 0);
    pub const C1: Square = Square::at(2, 0);
    pub const D1: Square = Square::at(3, 0);
    pub const E1: Square = Square::at(4, 0);
    pub const F1: Square = Square::at(5, 0);
    pub const G1: Square = Square::at(6, 0);
    pub const H1: Square = Square::at(7, 0);

    pub const A2: Square = Square::at(0, 1);
    pub const B2: Square = Square::at(1, 1);
    pub const C2: Square = Square::at(2, 1);
    pub const D2: Square = Square::at(3, 1);
    pub const E2: Square = Square::at(4, 1);
    pub const F2: Square = Square::at(5, 1);
    pub const G2: Square = Square::at(6, 1);
    pub const H2: Square = Square::at(7, 1);

    pub const A3: Square = Square::at(0, 2);
    pub const B3: Square = Square::at(1, 2);
    pub const C3: Square = Square::at(2, 2);
    pub const D3: Square = Square::at(3, 2);
    pub const E3: Square = Square::at(4, 2);
    pub const F3: Square = Square::at(5, 2);
    pub const G3: Square = Square::at(6, 2);
    pub const H3: Square = Square::at(7, 2);

    pub const A4: Square = Square::at(0, 3);
    pub const B4: Square = Square::at(1, 3);
    pub const C4: Square = Square::at(2, 3);
    pub const D4: Square = Square::at(3, 3);
    pub const E4: Square = Square::at(4, 3);
    pub const F4: Square = Square::at(5, 3);
    pub const G4: Square = Square::at(6, 3);
    pub const H4: Square = Square::at(7, 3);

    pub const A5: Square = Square::at(0, 4);
    pub const B5: Square = Square::at(1, 4);
    pub const C5: Square = Square::at(2, 4);
    pub const D5: Square = Square::at(3, 4);
    pub const E5: Square = Square::at(4, 4);
    pub const F5: Square = Square::at(5, 4);
    pub const G5: Square = Square::at(6, 4);
    pub const H5: Square = Square::at(7, 4);

    pub const A6: Square = Square::at(0, 5);
    pub const B6: Square = Square::at(1, 5);
    pub const C6: Square = Square::at(2, 5);
    pub const D6: Square = Square::at(3, 5);
    pub const E6: Square = Square::at(4, 5);
    pub const F6: Square = Square::at(5, 5);
    pub const G6: Square = Square::at(6, 5);
    pub const H6: Square = Square::at(7, 5);

    pub const A7: Square = Square::at(0, 6);
    pub const B7: Square = Square::at(1, 6);
    pub const C7: Square = Square::at(2, 6);
    pub const D7: Square = Square::at(3, 6);
    pub const E7: Square = Square::at(4, 6);
    pub const F7: Square = Square::at(5, 6);
    pub const G7: Square = Square::at(6, 6);
    pub const H7: Square = Square::at(7, 6);

    pub const A8: Square = Square::at(0, 7);
    pub const B8: Square = Square::at(1, 7);
    pub const C8: Square = Square::at(2, 7);
    pub const D8: Square = Square::at(3, 7);
    pub const E8: Square = Square::at(4, 7);
    pub const F8: Square = Square::at(5, 7);
    pub const G8: Square = Square::at(6, 7);
    pub const H8: Square = Square::at(7, 7);

    /// Creates a square from file (0-7) and rank (0-7) indices, returning
    /// None if either is off the board
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square::at(file, rank))
        } else {
            None
        }
    }

    /// Creates a square from a flat index (0-63, a1=0, h8=63)
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square::at(index % 8, index / 8))
        } else {
            None
        }
    }

    /// Returns the file index (0-7, where 0 = a-file)
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the rank index (0-7, where 0 = rank 1)
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the flat index (0-63), usable for array addressing
    #[inline]
    pub const fn index(self) -> usize {
        (self.rank * 8 + self.file) as usize
    }

    /// Returns the file letter (`'a'`-`'h'`)
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    /// Returns the rank number (1-8)
    #[inline]
    pub const fn rank_number(self) -> u8 {
        self.rank + 1
    }

    /// Offsets the square by (file_delta, rank_delta), returning None if the
    /// result leaves the board
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::at(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Iterator over all 64 squares, a1 first
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(|index| Square::at(index % 8, index / 8))
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}
