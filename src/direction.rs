//! The six edge directions of a pointy-top hexagon

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction from a hex center towards one of its six edges
///
/// Variants are listed clockwise starting at north-east, so the discriminant
/// doubles as the index into neighbor arrays and the corner table.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order
    pub const ALL: [Direction; 6] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Index of this direction (0..6)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, wrapping modulo 6
    #[inline]
    pub fn from_index(index: usize) -> Direction {
        Self::ALL[index % 6]
    }

    /// The direction pointing through the opposite edge
    #[inline]
    pub fn opposite(self) -> Direction {
        Self::from_index(self.index() + 3)
    }

    /// The neighboring direction counter-clockwise
    #[inline]
    pub fn previous(self) -> Direction {
        Self::from_index(self.index() + 5)
    }

    /// The neighboring direction clockwise
    #[inline]
    pub fn next(self) -> Direction {
        Self::from_index(self.index() + 1)
    }

    /// Two steps counter-clockwise
    #[inline]
    pub fn previous2(self) -> Direction {
        Self::from_index(self.index() + 4)
    }

    /// Two steps clockwise
    #[inline]
    pub fn next2(self) -> Direction {
        Self::from_index(self.index() + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
        assert_eq!(Direction::NorthEast.opposite(), Direction::SouthWest);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::NorthWest.opposite(), Direction::SouthEast);
    }

    #[test]
    fn test_previous_next_wrap() {
        for d in Direction::ALL {
            assert_eq!(d.next().previous(), d);
            assert_eq!(d.previous().next(), d);
            assert_eq!(d.next2(), d.next().next());
            assert_eq!(d.previous2(), d.previous().previous());
        }
        assert_eq!(Direction::NorthEast.previous(), Direction::NorthWest);
        assert_eq!(Direction::NorthWest.next(), Direction::NorthEast);
    }

    #[test]
    fn test_index_round_trip() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(Direction::from_index(i), *d);
            assert_eq!(Direction::from_index(i + 6), *d);
        }
    }
}
