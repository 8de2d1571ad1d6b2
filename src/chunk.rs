//! Grid chunks: fixed rectangular groups of cells sharing one mesh

use glam::Vec3;

use crate::cell::CellId;
use crate::mesh::MeshData;

/// A rectangular block of cells rebuilt as a unit
///
/// Each cell belongs to exactly one chunk. Edits only flag the chunk dirty;
/// the grid's scheduler rebuilds it once per pass, however many edits
/// touched it in between.
#[derive(Debug, Clone)]
pub struct HexChunk {
    index: usize,
    cells: Vec<CellId>,
    mesh: MeshData,
    bounds: Option<(Vec3, Vec3)>,
    dirty: bool,
}

impl HexChunk {
    pub(crate) fn new(index: usize, capacity: usize) -> Self {
        Self {
            index,
            cells: Vec::with_capacity(capacity),
            mesh: MeshData::default(),
            bounds: None,
            dirty: false,
        }
    }

    /// Position of this chunk in the grid's row-major chunk array
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cells owned by this chunk, row-major within the chunk
    #[inline]
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Mesh from the most recent rebuild
    #[inline]
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Axis-aligned bounds `(min, max)` of the current mesh
    #[inline]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.bounds
    }

    /// Whether an edit has touched this chunk since its last rebuild
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn add_cell(&mut self, cell: CellId) {
        self.cells.push(cell);
    }

    /// Flag for rebuild; returns `true` if the chunk was clean before
    pub(crate) fn mark_dirty(&mut self) -> bool {
        !std::mem::replace(&mut self.dirty, true)
    }

    /// Replace the mesh wholesale and clear the dirty flag
    pub(crate) fn apply_mesh(&mut self, mesh: MeshData) {
        self.bounds = mesh_bounds(&mesh);
        self.mesh = mesh;
        self.dirty = false;
    }
}

fn mesh_bounds(mesh: &MeshData) -> Option<(Vec3, Vec3)> {
    let mut points = mesh.positions.iter().map(|p| Vec3::from(*p));
    let first = points.next()?;
    Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::colors;

    #[test]
    fn test_mark_dirty_reports_transition() {
        let mut chunk = HexChunk::new(0, 4);
        assert!(!chunk.is_dirty());
        assert!(chunk.mark_dirty());
        assert!(!chunk.mark_dirty());
        assert!(chunk.is_dirty());
    }

    #[test]
    fn test_apply_mesh_clears_dirty_and_sets_bounds() {
        let mut chunk = HexChunk::new(3, 4);
        chunk.mark_dirty();

        let mut mesh = MeshData::default();
        mesh.push_triangle(
            [Vec3::new(-1.0, 0.0, 2.0), Vec3::new(4.0, 1.0, 0.0), Vec3::ZERO],
            [colors::WHITE; 3],
        );
        chunk.apply_mesh(mesh);

        assert!(!chunk.is_dirty());
        assert_eq!(chunk.mesh().triangle_count(), 1);
        assert_eq!(
            chunk.bounds(),
            Some((Vec3::new(-1.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 2.0)))
        );
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        let mut chunk = HexChunk::new(0, 1);
        chunk.apply_mesh(MeshData::default());
        assert_eq!(chunk.bounds(), None);
    }
}
