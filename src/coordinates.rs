//! Cube coordinates for the hex lattice
//!
//! Cells are stored row-major by offset coordinates (column, row) but
//! addressed by cube coordinates `(x, y, z)` with `x + y + z = 0`, which make
//! adjacency and distance symmetric. Only `x` and `z` are stored.

use std::fmt;

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::metrics::{INNER_RADIUS, OUTER_RADIUS};

/// Cube coordinates of a hex cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexCoordinates {
    x: i32,
    z: i32,
}

impl HexCoordinates {
    /// Create coordinates from the x and z cube axes
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Derived axis, always `-x - z`
    ///
    /// Wraps for coordinates at the limits of `i32`.
    #[inline]
    pub fn y(&self) -> i32 {
        self.x.wrapping_neg().wrapping_sub(self.z)
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Convert offset coordinates (column, row) to cube coordinates
    ///
    /// Odd rows are shifted half a hex to the right, so each pair of rows
    /// shears x back by one.
    ///
    /// ```
    /// use hex_terrain::HexCoordinates;
    ///
    /// let c = HexCoordinates::from_offset(3, 4);
    /// assert_eq!((c.x(), c.y(), c.z()), (1, -5, 4));
    /// ```
    #[inline]
    pub fn from_offset(column: i32, row: i32) -> Self {
        Self::new(column - row / 2, row)
    }

    /// Convert back to offset coordinates (column, row)
    #[inline]
    pub fn to_offset(&self) -> (i32, i32) {
        (self.x.wrapping_add(self.z / 2), self.z)
    }

    /// Find the cell containing a world position
    ///
    /// Projects onto fractional cube coordinates and rounds each axis. When
    /// the rounded triple does not sum to zero, the axis with the largest
    /// rounding error is rebuilt from the other two: x if its error is
    /// strictly largest, otherwise z if its error beats y's, otherwise y.
    /// Halfway values round to even.
    pub fn from_position(position: Vec3) -> Self {
        let mut x = position.x / (INNER_RADIUS * 2.0);
        let mut y = -x;
        let offset = position.z / (OUTER_RADIUS * 3.0);
        x -= offset;
        y -= offset;
        let z = -x - y;

        let mut ix = x.round_ties_even() as i32;
        let iy = y.round_ties_even() as i32;
        let mut iz = z.round_ties_even() as i32;

        if ix + iy + iz != 0 {
            let dx = (x - ix as f32).abs();
            let dy = (y - iy as f32).abs();
            let dz = (z - iz as f32).abs();
            if dx > dy && dx > dz {
                ix = -iy - iz;
            } else if dz > dy {
                iz = -ix - iy;
            }
            // Otherwise y absorbs the error; it is derived from x and z.
        }

        Self::new(ix, iz)
    }

    /// Coordinates of the adjacent cell in `direction`
    ///
    /// Wraps at the limits of `i32`; see [`Self::checked_neighbor`].
    pub fn neighbor(&self, direction: Direction) -> Self {
        let (dx, dz) = direction_offset(direction);
        Self::new(self.x.wrapping_add(dx), self.z.wrapping_add(dz))
    }

    /// Coordinates of the adjacent cell, or `None` if they overflow `i32`
    pub fn checked_neighbor(&self, direction: Direction) -> Option<Self> {
        let (dx, dz) = direction_offset(direction);
        Some(Self::new(self.x.checked_add(dx)?, self.z.checked_add(dz)?))
    }

    /// Number of steps between two cells, saturating at `u32::MAX`
    pub fn distance_to(&self, other: &HexCoordinates) -> u32 {
        let (x1, z1) = (self.x as i64, self.z as i64);
        let (x2, z2) = (other.x as i64, other.z as i64);
        let dx = (x1 - x2).abs();
        let dy = ((-x1 - z1) - (-x2 - z2)).abs();
        let dz = (z1 - z2).abs();
        u32::try_from(dx.max(dy).max(dz)).unwrap_or(u32::MAX)
    }

    /// World position of the center of this cell at height zero
    pub fn to_position(&self) -> Vec3 {
        let (column, row) = self.to_offset();
        Vec3::new(
            (column as f32 + row as f32 * 0.5 - (row / 2) as f32) * (INNER_RADIUS * 2.0),
            0.0,
            row as f32 * (OUTER_RADIUS * 1.5),
        )
    }
}

fn direction_offset(direction: Direction) -> (i32, i32) {
    match direction {
        Direction::NorthEast => (0, 1),
        Direction::East => (1, 0),
        Direction::SouthEast => (1, -1),
        Direction::SouthWest => (0, -1),
        Direction::West => (-1, 0),
        Direction::NorthWest => (-1, 1),
    }
}

impl fmt::Display for HexCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let y = -(self.x as i64) - self.z as i64;
        write!(f, "({}, {}, {})", self.x, y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_invariant() {
        for row in -4..8 {
            for column in -4..8 {
                let c = HexCoordinates::from_offset(column, row);
                assert_eq!(c.x() + c.y() + c.z(), 0);
            }
        }
    }

    #[test]
    fn test_offset_round_trip() {
        for row in 0..12 {
            for column in 0..12 {
                let c = HexCoordinates::from_offset(column, row);
                assert_eq!(c.to_offset(), (column, row));
            }
        }
    }

    #[test]
    fn test_from_position_of_centers() {
        for row in 0..10 {
            for column in 0..10 {
                let c = HexCoordinates::from_offset(column, row);
                assert_eq!(HexCoordinates::from_position(c.to_position()), c);
            }
        }
    }

    #[test]
    fn test_from_position_near_corners() {
        // Points just inside each corner of a hex still map to that hex.
        let c = HexCoordinates::from_offset(4, 4);
        let center = c.to_position();
        for d in Direction::ALL {
            let p = center + crate::metrics::first_corner(d) * 0.95;
            assert_eq!(HexCoordinates::from_position(p), c, "corner {:?}", d);
        }
    }

    #[test]
    fn test_from_position_across_edges() {
        let c = HexCoordinates::from_offset(4, 4);
        let center = c.to_position();
        for d in Direction::ALL {
            let p = center + crate::metrics::solid_edge_middle(d) * 1.5;
            assert_eq!(HexCoordinates::from_position(p), c.neighbor(d), "edge {:?}", d);
        }
    }

    #[test]
    fn test_neighbor_offsets_are_adjacent() {
        let c = HexCoordinates::new(2, 3);
        for d in Direction::ALL {
            let n = c.neighbor(d);
            assert_eq!(c.distance_to(&n), 1);
            assert_eq!(n.neighbor(d.opposite()), c);
            let gap = n.to_position() - c.to_position();
            assert!((gap.length() - 2.0 * INNER_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn test_distance() {
        let a = HexCoordinates::new(0, 0);
        assert_eq!(a.distance_to(&a), 0);
        assert_eq!(a.distance_to(&HexCoordinates::new(3, -1)), 3);
        assert_eq!(a.distance_to(&HexCoordinates::new(-2, 4)), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(HexCoordinates::new(1, 2).to_string(), "(1, -3, 2)");
        assert_eq!(
            HexCoordinates::new(i32::MAX, 3).to_string(),
            format!("({}, {}, 3)", i32::MAX, -(i32::MAX as i64) - 3)
        );
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let edge = HexCoordinates::new(i32::MAX, 3);
        assert_eq!(edge.checked_neighbor(Direction::East), None);
        assert_eq!(
            edge.checked_neighbor(Direction::West),
            Some(HexCoordinates::new(i32::MAX - 1, 3))
        );
        assert_eq!(HexCoordinates::new(0, i32::MIN).checked_neighbor(Direction::SouthWest), None);

        let origin = HexCoordinates::new(0, 0);
        assert_eq!(origin.distance_to(&HexCoordinates::new(i32::MIN, i32::MIN)), u32::MAX);
        assert_eq!(origin.distance_to(&HexCoordinates::new(i32::MAX, 0)), i32::MAX as u32);
    }
}
