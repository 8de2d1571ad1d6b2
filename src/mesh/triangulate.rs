//! Chunk triangulation
//!
//! Turns the current state of a set of cells into one triangle mesh:
//!
//! - a solid fan per hex edge in the cell's own color,
//! - a bridge from each solid edge to the neighbor's, blended, terraced on
//!   slopes and flat on cliffs,
//! - a corner wedge where three hexes meet, chosen by the three pairwise
//!   edge types,
//! - channel geometry on edges crossed by a river.
//!
//! Each undirected edge is owned by the cell for which it lies in direction
//! NE, E or SE, and each three-way corner by the cell for which it lies at
//! the end of NE or E, so nothing is emitted twice. Output depends only on
//! cell state and the noise source.

use glam::Vec3;

use super::colors::lerp_color;
use super::edge::EdgeVertices;
use super::{CellColor, MeshData};
use crate::cell::{CellId, HexCell};
use crate::direction::Direction;
use crate::metrics::{self, EdgeType, INNER_TO_OUTER, TERRACE_STEPS};
use crate::noise::NoiseSource;

/// A point at a three-hex junction together with the cell it belongs to
#[derive(Clone, Copy)]
struct Corner<'a> {
    point: Vec3,
    cell: &'a HexCell,
}

impl<'a> Corner<'a> {
    fn new(point: Vec3, cell: &'a HexCell) -> Self {
        Self { point, cell }
    }

    fn color(&self) -> CellColor {
        self.cell.color()
    }

    fn elevation(&self) -> i32 {
        self.cell.elevation()
    }
}

/// Builds the mesh for a group of cells
///
/// # Example
///
/// ```
/// use hex_terrain::*;
///
/// let config = GridConfigBuilder::new()
///     .chunk_counts(1, 1).unwrap()
///     .build().unwrap();
/// let grid = HexGrid::with_noise(config, FlatNoise::neutral()).unwrap();
///
/// let chunk = grid.chunk(0).unwrap();
/// let mesh = Triangulator::new(grid.cells(), grid.noise()).triangulate(chunk.cells());
/// assert!(mesh.triangle_count() > 0);
/// ```
pub struct Triangulator<'a, N: NoiseSource + ?Sized> {
    cells: &'a [HexCell],
    noise: &'a N,
    mesh: MeshData,
}

impl<'a, N: NoiseSource + ?Sized> Triangulator<'a, N> {
    /// Create a triangulator reading from the full cell arena of a grid
    pub fn new(cells: &'a [HexCell], noise: &'a N) -> Self {
        Self {
            cells,
            noise,
            mesh: MeshData::default(),
        }
    }

    /// Triangulate the given cells into a fresh mesh
    pub fn triangulate(mut self, cells: &[CellId]) -> MeshData {
        let arena = self.cells;
        for &id in cells {
            self.triangulate_cell(&arena[id.index()]);
        }
        self.mesh.recalculate_normals();
        self.mesh
    }

    fn cell(&self, id: CellId) -> &'a HexCell {
        &self.cells[id.index()]
    }

    fn triangulate_cell(&mut self, cell: &'a HexCell) {
        for direction in Direction::ALL {
            self.triangulate_direction(direction, cell);
        }
    }

    fn triangulate_direction(&mut self, direction: Direction, cell: &'a HexCell) {
        let center = cell.position();
        let mut e = EdgeVertices::new(
            center + metrics::first_solid_corner(direction),
            center + metrics::second_solid_corner(direction),
            cell.has_river_through_edge(direction),
        );

        if cell.has_river() {
            if cell.has_river_through_edge(direction) {
                e.v3.y = cell.stream_bed_y();
                if cell.has_river_begin_or_end() {
                    self.triangulate_with_river_begin_or_end(cell, center, &e);
                } else {
                    self.triangulate_with_river(direction, cell, center, &e);
                }
            } else {
                self.triangulate_adjacent_to_river(direction, cell, center, &e);
            }
        } else {
            self.triangulate_edge_fan(center, &e, cell.color());
        }

        if direction <= Direction::SouthEast {
            self.triangulate_connection(direction, cell, &e);
        }
    }

    // ------------------------------------------------------------------
    // Rivers
    // ------------------------------------------------------------------

    fn triangulate_with_river_begin_or_end(
        &mut self,
        cell: &HexCell,
        center: Vec3,
        e: &EdgeVertices,
    ) {
        let mut m = EdgeVertices::new(center.lerp(e.v1, 0.5), center.lerp(e.v5, 0.5), true);
        m.v3.y = e.v3.y;

        self.triangulate_edge_strip(&m, cell.color(), e, cell.color());
        self.triangulate_edge_fan(center, &m, cell.color());
    }

    fn triangulate_with_river(
        &mut self,
        direction: Direction,
        cell: &HexCell,
        center: Vec3,
        e: &EdgeVertices,
    ) {
        // Split the center into a left and right bank depending on where
        // the other end of the river leaves the cell.
        let (center_l, center_r) = if cell.has_river_through_edge(direction.opposite()) {
            (
                center + metrics::first_solid_corner(direction.previous()) * 0.25,
                center + metrics::second_solid_corner(direction.next()) * 0.25,
            )
        } else if cell.has_river_through_edge(direction.next()) {
            (center, center.lerp(e.v5, 2.0 / 3.0))
        } else if cell.has_river_through_edge(direction.previous()) {
            (center.lerp(e.v1, 2.0 / 3.0), center)
        } else if cell.has_river_through_edge(direction.next2()) {
            (
                center,
                center + metrics::solid_edge_middle(direction.next()) * (0.5 * INNER_TO_OUTER),
            )
        } else {
            (
                center + metrics::solid_edge_middle(direction.previous()) * (0.5 * INNER_TO_OUTER),
                center,
            )
        };

        let mut middle = center_l.lerp(center_r, 0.5);
        let mut m = EdgeVertices::with_outer_step(
            center_l.lerp(e.v1, 0.5),
            center_r.lerp(e.v5, 0.5),
            1.0 / 6.0,
            true,
        );
        m.v3.y = e.v3.y;
        middle.y = e.v3.y;

        let color = cell.color();
        self.triangulate_edge_strip(&m, color, e, color);
        self.add_triangle([center_l, m.v1, m.v2], [color; 3]);
        self.add_quad([center_l, middle, m.v2, m.v3], [color; 4]);
        self.add_quad([middle, center_r, m.v3, m.v4], [color; 4]);
        self.add_triangle([center_r, m.v4, m.v5], [color; 3]);
    }

    fn triangulate_adjacent_to_river(
        &mut self,
        direction: Direction,
        cell: &HexCell,
        mut center: Vec3,
        e: &EdgeVertices,
    ) {
        // Move the fan center off the channel so it lines up with the
        // banks computed for the river edges.
        if cell.has_river_through_edge(direction.next()) {
            if cell.has_river_through_edge(direction.previous()) {
                center += metrics::solid_edge_middle(direction) * (INNER_TO_OUTER * 0.5);
            } else if cell.has_river_through_edge(direction.previous2()) {
                center += metrics::first_solid_corner(direction) * 0.25;
            }
        } else if cell.has_river_through_edge(direction.previous())
            && cell.has_river_through_edge(direction.next2())
        {
            center += metrics::second_solid_corner(direction) * 0.25;
        }

        let m = EdgeVertices::new(center.lerp(e.v1, 0.5), center.lerp(e.v5, 0.5), e.channel);
        self.triangulate_edge_strip(&m, cell.color(), e, cell.color());
        self.triangulate_edge_fan(center, &m, cell.color());
    }

    // ------------------------------------------------------------------
    // Bridges
    // ------------------------------------------------------------------

    fn triangulate_connection(
        &mut self,
        direction: Direction,
        cell: &'a HexCell,
        e1: &EdgeVertices,
    ) {
        let Some(neighbor) = cell.neighbor(direction).map(|id| self.cell(id)) else {
            return;
        };

        let mut bridge = metrics::bridge(direction);
        bridge.y = neighbor.position().y - cell.position().y;
        let mut e2 = EdgeVertices::new(e1.v1 + bridge, e1.v5 + bridge, e1.channel);
        if cell.has_river_through_edge(direction) {
            e2.v3.y = neighbor.stream_bed_y();
        }

        match cell.edge_type(neighbor) {
            EdgeType::Slope => self.triangulate_edge_terraces(e1, cell, &e2, neighbor),
            EdgeType::Flat | EdgeType::Cliff => {
                self.triangulate_edge_strip(e1, cell.color(), &e2, neighbor.color())
            }
        }

        if direction > Direction::East {
            return;
        }
        let Some(next_neighbor) = cell.neighbor(direction.next()).map(|id| self.cell(id)) else {
            return;
        };

        let mut v5 = e1.v5 + metrics::bridge(direction.next());
        v5.y = next_neighbor.position().y;

        let here = Corner::new(e1.v5, cell);
        let across = Corner::new(e2.v5, neighbor);
        let next = Corner::new(v5, next_neighbor);

        // Rotate the three corners so the lowest cell comes first while
        // keeping clockwise order.
        if cell.elevation() <= neighbor.elevation() {
            if cell.elevation() <= next_neighbor.elevation() {
                self.triangulate_corner(here, across, next);
            } else {
                self.triangulate_corner(next, here, across);
            }
        } else if neighbor.elevation() <= next_neighbor.elevation() {
            self.triangulate_corner(across, next, here);
        } else {
            self.triangulate_corner(next, here, across);
        }
    }

    fn triangulate_edge_terraces(
        &mut self,
        begin: &EdgeVertices,
        begin_cell: &HexCell,
        end: &EdgeVertices,
        end_cell: &HexCell,
    ) {
        if begin_cell.elevation() > end_cell.elevation() {
            // Always climb from the lower side. Reversing both edges keeps
            // the winding of every quad.
            self.terrace_strip(
                &end.reversed(),
                end_cell.color(),
                &begin.reversed(),
                begin_cell.color(),
            );
        } else {
            self.terrace_strip(begin, begin_cell.color(), end, end_cell.color());
        }
    }

    fn terrace_strip(
        &mut self,
        begin: &EdgeVertices,
        begin_color: CellColor,
        end: &EdgeVertices,
        end_color: CellColor,
    ) {
        let mut e2 = EdgeVertices::terrace_lerp(begin, end, 1);
        let mut c2 = metrics::terrace_lerp_color(begin_color, end_color, 1);
        self.triangulate_edge_strip(begin, begin_color, &e2, c2);

        for step in 2..TERRACE_STEPS {
            let e1 = e2;
            let c1 = c2;
            e2 = EdgeVertices::terrace_lerp(begin, end, step);
            c2 = metrics::terrace_lerp_color(begin_color, end_color, step);
            self.triangulate_edge_strip(&e1, c1, &e2, c2);
        }

        self.triangulate_edge_strip(&e2, c2, end, end_color);
    }

    // ------------------------------------------------------------------
    // Corners
    // ------------------------------------------------------------------

    /// Fill the gap where three cells meet; `bottom` is the lowest
    fn triangulate_corner(&mut self, bottom: Corner<'a>, left: Corner<'a>, right: Corner<'a>) {
        let left_edge = bottom.cell.edge_type(left.cell);
        let right_edge = bottom.cell.edge_type(right.cell);

        match (left_edge, right_edge) {
            (EdgeType::Slope, EdgeType::Slope) => {
                self.triangulate_corner_terraces(bottom, left, right)
            }
            (EdgeType::Slope, EdgeType::Flat) => {
                self.triangulate_corner_terraces(left, right, bottom)
            }
            (EdgeType::Slope, EdgeType::Cliff) => {
                self.triangulate_corner_terraces_cliff(bottom, left, right)
            }
            (EdgeType::Flat, EdgeType::Slope) => {
                self.triangulate_corner_terraces(right, bottom, left)
            }
            (EdgeType::Cliff, EdgeType::Slope) => {
                self.triangulate_corner_cliff_terraces(bottom, left, right)
            }
            _ if left.cell.edge_type(right.cell) == EdgeType::Slope => {
                if left.elevation() < right.elevation() {
                    self.triangulate_corner_cliff_terraces(right, bottom, left);
                } else {
                    self.triangulate_corner_terraces_cliff(left, right, bottom);
                }
            }
            _ => self.add_triangle(
                [bottom.point, left.point, right.point],
                [bottom.color(), left.color(), right.color()],
            ),
        }
    }

    /// Two terraced edges meeting: stack terrace quads up from `begin`
    fn triangulate_corner_terraces(
        &mut self,
        begin: Corner<'a>,
        left: Corner<'a>,
        right: Corner<'a>,
    ) {
        let mut v3 = metrics::terrace_lerp(begin.point, left.point, 1);
        let mut v4 = metrics::terrace_lerp(begin.point, right.point, 1);
        let mut c3 = metrics::terrace_lerp_color(begin.color(), left.color(), 1);
        let mut c4 = metrics::terrace_lerp_color(begin.color(), right.color(), 1);

        self.add_triangle([begin.point, v3, v4], [begin.color(), c3, c4]);

        for step in 2..TERRACE_STEPS {
            let (v1, v2, c1, c2) = (v3, v4, c3, c4);
            v3 = metrics::terrace_lerp(begin.point, left.point, step);
            v4 = metrics::terrace_lerp(begin.point, right.point, step);
            c3 = metrics::terrace_lerp_color(begin.color(), left.color(), step);
            c4 = metrics::terrace_lerp_color(begin.color(), right.color(), step);
            self.add_quad([v1, v2, v3, v4], [c1, c2, c3, c4]);
        }

        self.add_quad([v3, v4, left.point, right.point], [c3, c4, left.color(), right.color()]);
    }

    /// Terraces on the left collapse onto a point on the cliff to the right
    fn triangulate_corner_terraces_cliff(
        &mut self,
        begin: Corner<'a>,
        left: Corner<'a>,
        right: Corner<'a>,
    ) {
        let b = boundary_fraction(begin.elevation(), right.elevation());
        let boundary = self.perturb(begin.point).lerp(self.perturb(right.point), b);
        let boundary_color = lerp_color(begin.color(), right.color(), b);

        self.triangulate_boundary_triangle(begin, left, boundary, boundary_color);
        self.close_boundary(left, right, boundary, boundary_color);
    }

    /// Mirror of [`Self::triangulate_corner_terraces_cliff`]: cliff on the left
    fn triangulate_corner_cliff_terraces(
        &mut self,
        begin: Corner<'a>,
        left: Corner<'a>,
        right: Corner<'a>,
    ) {
        let b = boundary_fraction(begin.elevation(), left.elevation());
        let boundary = self.perturb(begin.point).lerp(self.perturb(left.point), b);
        let boundary_color = lerp_color(begin.color(), left.color(), b);

        self.triangulate_boundary_triangle(right, begin, boundary, boundary_color);
        self.close_boundary(left, right, boundary, boundary_color);
    }

    /// Fill between the top two corners and the cliff boundary point
    fn close_boundary(
        &mut self,
        left: Corner<'a>,
        right: Corner<'a>,
        boundary: Vec3,
        boundary_color: CellColor,
    ) {
        if left.cell.edge_type(right.cell) == EdgeType::Slope {
            self.triangulate_boundary_triangle(left, right, boundary, boundary_color);
        } else {
            let (l, r) = (self.perturb(left.point), self.perturb(right.point));
            self.add_triangle_unperturbed(
                [l, r, boundary],
                [left.color(), right.color(), boundary_color],
            );
        }
    }

    /// Fan from every terrace step between `begin` and `left` to `boundary`
    ///
    /// `boundary` is already perturbed; it was interpolated between perturbed
    /// points so that it lies exactly on the cliff face.
    fn triangulate_boundary_triangle(
        &mut self,
        begin: Corner<'a>,
        left: Corner<'a>,
        boundary: Vec3,
        boundary_color: CellColor,
    ) {
        let mut v2 = self.perturb(metrics::terrace_lerp(begin.point, left.point, 1));
        let mut c2 = metrics::terrace_lerp_color(begin.color(), left.color(), 1);

        let start = self.perturb(begin.point);
        self.add_triangle_unperturbed([start, v2, boundary], [begin.color(), c2, boundary_color]);

        for step in 2..TERRACE_STEPS {
            let (v1, c1) = (v2, c2);
            v2 = self.perturb(metrics::terrace_lerp(begin.point, left.point, step));
            c2 = metrics::terrace_lerp_color(begin.color(), left.color(), step);
            self.add_triangle_unperturbed([v1, v2, boundary], [c1, c2, boundary_color]);
        }

        let end = self.perturb(left.point);
        self.add_triangle_unperturbed([v2, end, boundary], [c2, left.color(), boundary_color]);
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    fn triangulate_edge_fan(&mut self, center: Vec3, edge: &EdgeVertices, color: CellColor) {
        for (a, b) in edge.segments() {
            self.add_triangle([center, a, b], [color; 3]);
        }
    }

    fn triangulate_edge_strip(
        &mut self,
        e1: &EdgeVertices,
        c1: CellColor,
        e2: &EdgeVertices,
        c2: CellColor,
    ) {
        debug_assert_eq!(e1.channel, e2.channel, "strip between mismatched edges");
        for ((a1, b1), (a2, b2)) in e1.segments().into_iter().zip(e2.segments()) {
            self.add_quad([a1, b1, a2, b2], [c1, c1, c2, c2]);
        }
    }

    #[inline]
    fn perturb(&self, position: Vec3) -> Vec3 {
        metrics::perturb(self.noise, position)
    }

    fn add_triangle(&mut self, vertices: [Vec3; 3], colors: [CellColor; 3]) {
        let perturbed = vertices.map(|v| self.perturb(v));
        self.mesh.push_triangle(perturbed, colors);
    }

    fn add_triangle_unperturbed(&mut self, vertices: [Vec3; 3], colors: [CellColor; 3]) {
        self.mesh.push_triangle(vertices, colors);
    }

    fn add_quad(&mut self, vertices: [Vec3; 4], colors: [CellColor; 4]) {
        let perturbed = vertices.map(|v| self.perturb(v));
        self.mesh.push_quad(perturbed, colors);
    }
}

/// Fraction along a cliff edge where the terrace fan meets it
fn boundary_fraction(from: i32, to: i32) -> f32 {
    let delta = (to as i64 - from as i64).unsigned_abs().max(1);
    1.0 / delta as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfigBuilder;
    use crate::coordinates::HexCoordinates;
    use crate::grid::HexGrid;
    use crate::noise::{FlatNoise, NoiseTexture};

    fn flat_grid(size_x: usize, size_z: usize) -> HexGrid<FlatNoise> {
        let config = GridConfigBuilder::new()
            .chunk_counts(1, 1)
            .unwrap()
            .chunk_size(size_x, size_z)
            .unwrap()
            .noise_seed(1)
            .build()
            .unwrap();
        HexGrid::with_noise(config, FlatNoise::neutral()).unwrap()
    }

    fn id(grid: &HexGrid<FlatNoise>, column: i32, row: i32) -> CellId {
        grid.cell_at(HexCoordinates::from_offset(column, row)).unwrap().id()
    }

    fn triangulate_all<N: NoiseSource>(grid: &HexGrid<N>) -> MeshData {
        let ids: Vec<CellId> = grid.cells().iter().map(|c| c.id()).collect();
        Triangulator::new(grid.cells(), grid.noise()).triangulate(&ids)
    }

    #[test]
    fn test_interior_flat_cell() {
        let grid = flat_grid(3, 3);
        let center = id(&grid, 1, 1);
        assert_eq!(grid.get_cell(center).unwrap().neighbor_count(), 6);

        let mesh = Triangulator::new(grid.cells(), grid.noise()).triangulate(&[center]);

        // 6 solid triangles, 3 owned bridges, 2 owned corners
        assert_eq!(mesh.triangle_count(), 6 + 3 * 2 + 2);
        assert_eq!(mesh.vertex_count(), 6 * 3 + 3 * 4 + 2 * 3);
    }

    #[test]
    fn test_flat_grid_counts() {
        let grid = flat_grid(2, 2);
        let mesh = triangulate_all(&grid);
        // 4 cells, 5 shared edges, 2 three-way corners
        assert_eq!(mesh.triangle_count(), 4 * 6 + 5 * 2 + 2);
    }

    #[test]
    fn test_flat_counts_match_topology() {
        let grid = flat_grid(5, 4);
        let mesh = triangulate_all(&grid);

        let edges: usize = grid.cells().iter().map(|c| c.neighbor_count()).sum::<usize>() / 2;
        let corners = grid
            .cells()
            .iter()
            .flat_map(|c| [Direction::NorthEast, Direction::East].map(move |d| (c, d)))
            .filter(|(c, d)| c.neighbor(*d).is_some() && c.neighbor(d.next()).is_some())
            .count();

        assert_eq!(
            mesh.triangle_count(),
            grid.cell_count() * 6 + edges * 2 + corners
        );
    }

    #[test]
    fn test_slope_bridge_is_terraced() {
        let mut grid = flat_grid(2, 1);
        let flat = triangulate_all(&grid).triangle_count();
        assert_eq!(flat, 2 * 6 + 2);

        let a = id(&grid, 0, 0);
        grid.set_elevation(a, 1);
        let sloped = triangulate_all(&grid).triangle_count();
        assert_eq!(sloped, 2 * 6 + TERRACE_STEPS as usize * 2);
    }

    #[test]
    fn test_cliff_bridge_is_single_quad() {
        let mut grid = flat_grid(2, 1);
        let a = id(&grid, 0, 0);
        grid.set_elevation(a, 3);
        assert_eq!(triangulate_all(&grid).triangle_count(), 2 * 6 + 2);
    }

    #[test]
    fn test_terrace_heights_climb_monotonically() {
        let mut grid = flat_grid(2, 1);
        let a = id(&grid, 0, 0);
        grid.set_elevation(a, 1);
        let mesh = triangulate_all(&grid);

        let low = grid.get_cell(id(&grid, 1, 0)).unwrap().position().y;
        let high = grid.get_cell(a).unwrap().position().y;
        for p in &mesh.positions {
            assert!(p[1] >= low - 1e-4 && p[1] <= high + 1e-4);
        }
        // low side, one tread per terrace, high side
        let mut levels: Vec<i32> =
            mesh.positions.iter().map(|p| (p[1] * 1000.0).round() as i32).collect();
        levels.sort_unstable();
        levels.dedup();
        assert_eq!(levels.len(), metrics::TERRACES_PER_SLOPE as usize + 2);
    }

    fn corner_triangles(bottom: i32, left: i32, right: i32) -> usize {
        let mut grid = flat_grid(2, 2);
        // (0,0) NE -> (0,1), E -> (1,0): one corner owned by (0,0)
        let b = id(&grid, 0, 0);
        let l = id(&grid, 0, 1);
        let r = id(&grid, 1, 0);
        grid.set_elevation(b, bottom);
        grid.set_elevation(l, left);
        grid.set_elevation(r, right);

        let cells = grid.cells();
        let noise = FlatNoise::neutral();
        let mut t = Triangulator::new(cells, &noise);
        let (bc, lc, rc) = (&cells[b.index()], &cells[l.index()], &cells[r.index()]);
        t.triangulate_corner(
            Corner::new(bc.position(), bc),
            Corner::new(lc.position(), lc),
            Corner::new(rc.position(), rc),
        );
        assert!(t.mesh.positions.iter().all(|p| p.iter().all(|c| c.is_finite())));
        t.mesh.triangle_count()
    }

    #[test]
    fn test_corner_flat() {
        assert_eq!(corner_triangles(0, 0, 0), 1);
    }

    #[test]
    fn test_corner_slope_slope() {
        // triangle + 3 quads
        assert_eq!(corner_triangles(0, 1, 1), 1 + 2 * 4);
    }

    #[test]
    fn test_corner_slope_flat() {
        assert_eq!(corner_triangles(0, 1, 0), 1 + 2 * 4);
        assert_eq!(corner_triangles(0, 0, 1), 1 + 2 * 4);
    }

    #[test]
    fn test_corner_terraces_against_cliff() {
        // one boundary fan plus a closing triangle
        assert_eq!(corner_triangles(0, 1, 3), TERRACE_STEPS as usize + 1);
        assert_eq!(corner_triangles(0, 3, 1), TERRACE_STEPS as usize + 1);
    }

    #[test]
    fn test_corner_terraces_against_cliff_with_sloped_top() {
        // two boundary fans
        assert_eq!(corner_triangles(0, 1, 2), 2 * TERRACE_STEPS as usize);
        assert_eq!(corner_triangles(0, 2, 1), 2 * TERRACE_STEPS as usize);
    }

    #[test]
    fn test_corner_cliff_cliff_with_slope_on_top() {
        // the top slope fans onto the cliff, one triangle closes the bottom
        assert_eq!(corner_triangles(0, 3, 4), TERRACE_STEPS as usize + 1);
        assert_eq!(corner_triangles(0, 4, 3), TERRACE_STEPS as usize + 1);
    }

    #[test]
    fn test_corner_cliffs_only() {
        assert_eq!(corner_triangles(0, 2, 2), 1);
        assert_eq!(corner_triangles(0, 2, 5), 1);
    }

    #[test]
    fn test_triangulation_is_idempotent() {
        let config = GridConfigBuilder::new()
            .chunk_counts(1, 1)
            .unwrap()
            .noise_texture_size(32)
            .unwrap()
            .noise_seed(11)
            .build()
            .unwrap();
        let noise = NoiseTexture::perlin(config.noise_seed, config.noise_texture_size);
        let mut grid = HexGrid::with_noise(config, noise).unwrap();
        let ids: Vec<CellId> = grid.cells().iter().map(|c| c.id()).collect();
        for (i, &cell) in ids.iter().enumerate() {
            grid.set_elevation(cell, (i % 4) as i32);
        }
        grid.set_outgoing_river(ids[12], Direction::West);

        let first = triangulate_all(&grid);
        let second = triangulate_all(&grid);
        assert_eq!(first, second);
    }

    #[test]
    fn test_river_channel_reaches_stream_bed() {
        let mut grid = flat_grid(3, 3);
        let upstream = id(&grid, 1, 1);
        assert!(grid.set_outgoing_river(upstream, Direction::East));

        let bed = grid.get_cell(upstream).unwrap().stream_bed_y();
        let mesh = triangulate_all(&grid);
        assert!(mesh.positions.iter().any(|p| (p[1] - bed).abs() < 1e-5));

        let dry = flat_grid(3, 3);
        let dry_mesh = triangulate_all(&dry);
        assert!(dry_mesh.positions.iter().all(|p| p[1] > bed + 1.0));
        assert!(mesh.triangle_count() > dry_mesh.triangle_count());
    }

    #[test]
    fn test_river_shapes_triangulate() {
        // Straight, sharp and gentle turns through the center cell.
        let exits = [
            Direction::East,
            Direction::NorthWest,
            Direction::SouthWest,
            Direction::NorthEast,
        ];
        for exit in exits {
            let mut grid = flat_grid(3, 3);
            let center = id(&grid, 1, 1);
            let west = grid.get_cell(center).unwrap().neighbor(Direction::West).unwrap();
            assert!(grid.set_outgoing_river(west, Direction::East));
            assert!(grid.set_outgoing_river(center, exit));
            let cell = grid.get_cell(center).unwrap();
            assert!(cell.has_river() && !cell.has_river_begin_or_end());

            let mesh = Triangulator::new(grid.cells(), grid.noise()).triangulate(&[center]);
            assert!(mesh.positions.iter().all(|p| p.iter().all(|c| c.is_finite())));
            assert!(mesh.normals.iter().all(|n| n.iter().all(|c| c.is_finite())));
        }
    }

    #[test]
    fn test_river_across_slope_is_terraced_channel() {
        let mut grid = flat_grid(2, 1);
        let a = id(&grid, 0, 0);
        grid.set_elevation(a, 1);
        assert!(grid.set_outgoing_river(a, Direction::East));

        let mesh = triangulate_all(&grid);
        // Each terrace step is a 4-quad channel strip.
        let bridge = TERRACE_STEPS as usize * 4 * 2;
        // Two begin/end fans: strip (4 quads) + fan (4 triangles) on the
        // river edge, strip + fan per land edge for the other five.
        let per_cell = (4 * 2 + 4) + 5 * (2 + 1);
        assert_eq!(mesh.triangle_count(), bridge + 2 * per_cell);
    }
}
