//! The eight compass directions and the terrain that deflects them.

use crate::vector::Vector2D;
use std::fmt;

/// Direction of travel of the instruction pointer.
///
/// Cardinal mode normally travels along the four orthogonal directions,
/// Ordinal mode along the four diagonals. Mirrors always swap between the
/// two families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// All directions, clockwise starting at north.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

/// A terrain glyph that deflects the instruction pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirror {
    /// `/` — two-sided mirror, toggles the mode.
    Slash,
    /// `\` — two-sided mirror, toggles the mode.
    Backslash,
    /// `_` — horizontal wall, flips vertical travel.
    Floor,
    /// `|` — vertical wall, flips horizontal travel.
    Pillar,
}

/// All terrain glyphs.
pub const ALL_MIRRORS: [Mirror; 4] = [Mirror::Slash, Mirror::Backslash, Mirror::Floor, Mirror::Pillar];

impl Mirror {
    /// Classify a grid cell. Returns `None` for anything that is not terrain.
    pub fn from_cell(cell: i64) -> Option<Mirror> {
        match cell {
            0x2F => Some(Mirror::Slash),
            0x5C => Some(Mirror::Backslash),
            0x5F => Some(Mirror::Floor),
            0x7C => Some(Mirror::Pillar),
            _ => None,
        }
    }

    /// The glyph for this terrain piece.
    pub fn glyph(self) -> char {
        match self {
            Mirror::Slash => '/',
            Mirror::Backslash => '\\',
            Mirror::Floor => '_',
            Mirror::Pillar => '|',
        }
    }

    /// Whether bouncing off this glyph swaps Cardinal and Ordinal mode.
    pub fn toggles_mode(self) -> bool {
        matches!(self, Mirror::Slash | Mirror::Backslash)
    }
}

impl Direction {
    /// Unit movement vector (y grows to the south).
    pub fn vec(self) -> Vector2D {
        match self {
            Direction::North => Vector2D::new(0, -1),
            Direction::NorthEast => Vector2D::new(1, -1),
            Direction::East => Vector2D::new(1, 0),
            Direction::SouthEast => Vector2D::new(1, 1),
            Direction::South => Vector2D::new(0, 1),
            Direction::SouthWest => Vector2D::new(-1, 1),
            Direction::West => Vector2D::new(-1, 0),
            Direction::NorthWest => Vector2D::new(-1, -1),
        }
    }

    /// Rotate 45° counter-clockwise.
    pub fn left(self) -> Direction {
        match self {
            Direction::North => Direction::NorthWest,
            Direction::NorthEast => Direction::North,
            Direction::East => Direction::NorthEast,
            Direction::SouthEast => Direction::East,
            Direction::South => Direction::SouthEast,
            Direction::SouthWest => Direction::South,
            Direction::West => Direction::SouthWest,
            Direction::NorthWest => Direction::West,
        }
    }

    /// Rotate 45° clockwise.
    pub fn right(self) -> Direction {
        match self {
            Direction::North => Direction::NorthEast,
            Direction::NorthEast => Direction::East,
            Direction::East => Direction::SouthEast,
            Direction::SouthEast => Direction::South,
            Direction::South => Direction::SouthWest,
            Direction::SouthWest => Direction::West,
            Direction::West => Direction::NorthWest,
            Direction::NorthWest => Direction::North,
        }
    }

    /// Rotate 90° counter-clockwise.
    pub fn left90(self) -> Direction {
        self.left().left()
    }

    /// Rotate 90° clockwise.
    pub fn right90(self) -> Direction {
        self.right().right()
    }

    /// Turn around.
    pub fn reverse(self) -> Direction {
        self.right90().right90()
    }

    /// Direction after bouncing off a terrain glyph.
    ///
    /// Mirrors reflect across a line 22.5° off the horizontal, so they always
    /// swap orthogonal and diagonal travel; walls negate one component.
    pub fn reflect(self, mirror: Mirror) -> Direction {
        use Direction::*;
        match mirror {
            Mirror::Slash => match self {
                East => SouthEast,
                SouthEast => East,
                North => SouthWest,
                SouthWest => North,
                NorthEast => South,
                South => NorthEast,
                West => NorthWest,
                NorthWest => West,
            },
            Mirror::Backslash => match self {
                East => NorthEast,
                NorthEast => East,
                North => SouthEast,
                NorthWest => South,
                West => SouthWest,
                SouthWest => West,
                South => NorthWest,
                SouthEast => North,
            },
            Mirror::Floor => match self {
                North => South,
                South => North,
                NorthEast => SouthEast,
                SouthEast => NorthEast,
                NorthWest => SouthWest,
                SouthWest => NorthWest,
                East => East,
                West => West,
            },
            Mirror::Pillar => match self {
                East => West,
                West => East,
                NorthEast => NorthWest,
                NorthWest => NorthEast,
                SouthEast => SouthWest,
                SouthWest => SouthEast,
                North => North,
                South => South,
            },
        }
    }

    /// Short compass name used by the debug dump.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
