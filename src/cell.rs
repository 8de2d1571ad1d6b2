//! Hex Cell Structure
//!
//! A single node of the hex grid: placement, elevation, color, adjacency
//! and river endpoints. Cells are read through the grid; every mutation
//! goes through [`HexGrid`](crate::HexGrid) so that both sides of a link
//! and the chunk dirty flags are always updated together.

use glam::Vec3;

use crate::coordinates::HexCoordinates;
use crate::direction::Direction;
use crate::mesh::CellColor;
use crate::metrics::{self, EdgeType};

/// Stable handle of a cell inside its grid
///
/// Handles are indices into the grid's cell arena, in row-major offset
/// order, and stay valid for the lifetime of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    /// Position of the cell in the grid's row-major cell array
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single hex cell
///
/// # Rivers
///
/// A river runs between exactly two adjacent cells: the upstream cell holds
/// an outgoing direction and the downstream cell holds the opposite
/// incoming direction. Water never flows uphill, so the upstream cell's
/// elevation is always at least the downstream one's. A cell has at most
/// one incoming and one outgoing river, and never through the same edge.
#[derive(Debug, Clone)]
pub struct HexCell {
    pub(crate) id: CellId,
    pub(crate) coordinates: HexCoordinates,
    pub(crate) chunk: usize,
    pub(crate) position: Vec3,
    pub(crate) elevation: i32,
    pub(crate) color: CellColor,
    pub(crate) neighbors: [Option<CellId>; 6],
    pub(crate) incoming_river: Option<Direction>,
    pub(crate) outgoing_river: Option<Direction>,
}

impl HexCell {
    /// Elevation of a cell that was never assigned one
    pub const UNSET_ELEVATION: i32 = i32::MIN;

    /// Create an unlinked cell at its lattice position
    ///
    /// This is called during grid construction, not by user code.
    pub(crate) fn new(
        id: CellId,
        coordinates: HexCoordinates,
        chunk: usize,
        color: CellColor,
    ) -> Self {
        Self {
            id,
            coordinates,
            chunk,
            position: coordinates.to_position(),
            elevation: Self::UNSET_ELEVATION,
            color,
            neighbors: [None; 6],
            incoming_river: None,
            outgoing_river: None,
        }
    }

    #[inline]
    pub fn id(&self) -> CellId {
        self.id
    }

    #[inline]
    pub fn coordinates(&self) -> HexCoordinates {
        self.coordinates
    }

    /// Index of the chunk that owns this cell
    #[inline]
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    /// World position of the cell center
    ///
    /// The height is `elevation * ELEVATION_STEP` plus a small noise offset.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    #[inline]
    pub fn color(&self) -> CellColor {
        self.color
    }

    /// Handle of the adjacent cell in `direction`, if any
    #[inline]
    pub fn neighbor(&self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    /// Iterate over existing neighbors with their directions
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(d).map(|id| (d, id)))
    }

    /// Number of adjacent cells (6 inside the grid, fewer on its border)
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().flatten().count()
    }

    /// Connection type between this cell and another
    #[inline]
    pub fn edge_type(&self, other: &HexCell) -> EdgeType {
        metrics::edge_type(self.elevation, other.elevation)
    }

    /// Height of the bottom of a river channel in this cell
    #[inline]
    pub fn stream_bed_y(&self) -> f32 {
        (self.elevation as f32 + metrics::STREAM_BED_ELEVATION_OFFSET) * metrics::ELEVATION_STEP
    }

    /// Direction through which a river enters, if any
    #[inline]
    pub fn incoming_river(&self) -> Option<Direction> {
        self.incoming_river
    }

    /// Direction through which a river leaves, if any
    #[inline]
    pub fn outgoing_river(&self) -> Option<Direction> {
        self.outgoing_river
    }

    #[inline]
    pub fn has_incoming_river(&self) -> bool {
        self.incoming_river.is_some()
    }

    #[inline]
    pub fn has_outgoing_river(&self) -> bool {
        self.outgoing_river.is_some()
    }

    /// Whether any river touches this cell
    #[inline]
    pub fn has_river(&self) -> bool {
        self.has_incoming_river() || self.has_outgoing_river()
    }

    /// Whether a river starts or ends here
    #[inline]
    pub fn has_river_begin_or_end(&self) -> bool {
        self.has_incoming_river() != self.has_outgoing_river()
    }

    /// Whether a river crosses the edge in `direction`
    #[inline]
    pub fn has_river_through_edge(&self, direction: Direction) -> bool {
        self.incoming_river == Some(direction) || self.outgoing_river == Some(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::colors;

    fn cell() -> HexCell {
        HexCell::new(CellId(0), HexCoordinates::from_offset(1, 1), 0, colors::WHITE)
    }

    #[test]
    fn test_cell_creation() {
        let cell = cell();
        assert_eq!(cell.id().index(), 0);
        assert_eq!(cell.elevation(), HexCell::UNSET_ELEVATION);
        assert_eq!(cell.neighbor_count(), 0);
        assert!(!cell.has_river());
        assert_eq!(cell.position(), HexCoordinates::from_offset(1, 1).to_position());
    }

    #[test]
    fn test_river_predicates() {
        let mut cell = cell();
        cell.incoming_river = Some(Direction::West);
        assert!(cell.has_river());
        assert!(cell.has_river_begin_or_end());
        assert!(cell.has_river_through_edge(Direction::West));
        assert!(!cell.has_river_through_edge(Direction::East));

        cell.outgoing_river = Some(Direction::East);
        assert!(!cell.has_river_begin_or_end());
        assert!(cell.has_river_through_edge(Direction::East));
    }

    #[test]
    fn test_stream_bed_below_surface() {
        let mut cell = cell();
        cell.elevation = 2;
        assert_eq!(cell.stream_bed_y(), metrics::ELEVATION_STEP);
    }

    #[test]
    fn test_neighbors_iterator() {
        let mut cell = cell();
        cell.neighbors[Direction::East.index()] = Some(CellId(1));
        cell.neighbors[Direction::SouthWest.index()] = Some(CellId(2));
        let found: Vec<_> = cell.neighbors().collect();
        assert_eq!(
            found,
            vec![(Direction::East, CellId(1)), (Direction::SouthWest, CellId(2))]
        );
        assert_eq!(cell.neighbor_count(), 2);
    }
}
