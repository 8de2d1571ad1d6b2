//! HexGrid main structure
//!
//! The grid owns every cell and chunk. All edits go through it so that
//! linked state (neighbor pairs, both ends of a river, chunk dirty flags)
//! is always updated inside one call. Edits never rebuild geometry
//! directly: they queue the affected chunks, and
//! [`HexGrid::rebuild_dirty_chunks`] re-triangulates each queued chunk once.

use glam::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::cell::{CellId, HexCell};
use crate::chunk::HexChunk;
use crate::config::GridConfig;
use crate::coordinates::HexCoordinates;
use crate::direction::Direction;
use crate::error::{HexError, Result};
use crate::mesh::{CellColor, MeshData, Triangulator};
use crate::metrics::{self, ELEVATION_PERTURB_STRENGTH, ELEVATION_STEP};
use crate::noise::{NoiseSource, NoiseTexture};

/// A rectangular hex terrain grid split into chunks
///
/// Cells are stored row-major by offset coordinates and addressed by
/// [`CellId`] handles or [`HexCoordinates`]. Generic over the noise source
/// used to perturb geometry; [`HexGrid::new`] generates a Perlin
/// [`NoiseTexture`] from the configured seed.
///
/// # Examples
///
/// ```
/// use hex_terrain::*;
///
/// let config = GridConfigBuilder::new()
///     .chunk_counts(2, 2)
///     .unwrap()
///     .noise_seed(42)
///     .noise_texture_size(32)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let mut grid = HexGrid::new(config).unwrap();
/// assert_eq!(grid.cell_count(), 100);
///
/// // Every chunk starts dirty; the first pass builds them all.
/// assert_eq!(grid.rebuild_dirty_chunks(), 4);
///
/// let id = grid.cell_at(HexCoordinates::from_offset(3, 3)).unwrap().id();
/// grid.set_elevation(id, 2);
/// assert!(grid.rebuild_dirty_chunks() >= 1);
/// ```
#[derive(Clone)]
pub struct HexGrid<N = NoiseTexture> {
    /// Configuration used to build this grid
    config: GridConfig,

    /// Cell arena, indexed by `CellId`
    cells: Vec<HexCell>,

    /// Chunks in row-major order
    chunks: Vec<HexChunk>,

    /// Perturbation noise shared by every rebuild
    noise: N,

    /// Chunks waiting for a rebuild, each listed once
    dirty: Vec<usize>,
}

impl HexGrid<NoiseTexture> {
    /// Build a grid perturbed by a generated Perlin noise texture
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration is out of range.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let noise = NoiseTexture::perlin(config.noise_seed, config.noise_texture_size);
        Self::with_noise(config, noise)
    }
}

impl<N: NoiseSource> HexGrid<N> {
    /// Build a grid with a caller-supplied noise source
    ///
    /// Creates every cell, wires all neighbor links and assigns cells to
    /// chunks. Each cell then gets elevation 0, so every chunk starts dirty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use hex_terrain::*;
    ///
    /// let config = GridConfigBuilder::new().noise_seed(1).build().unwrap();
    /// let grid = HexGrid::with_noise(config, FlatNoise::neutral()).unwrap();
    /// assert_eq!(grid.chunk_count(), 12);
    /// ```
    pub fn with_noise(config: GridConfig, noise: N) -> Result<Self> {
        config.validate()?;

        let width = config.cell_count_x();
        let height = config.cell_count_z();
        let chunk_capacity = config.chunk_size_x * config.chunk_size_z;

        let mut chunks: Vec<HexChunk> = (0..config.chunk_count())
            .map(|index| HexChunk::new(index, chunk_capacity))
            .collect();

        let mut cells = Vec::with_capacity(width * height);
        for z in 0..height {
            for x in 0..width {
                let id = CellId(cells.len());
                let chunk =
                    x / config.chunk_size_x + (z / config.chunk_size_z) * config.chunk_count_x;
                let coordinates = HexCoordinates::from_offset(x as i32, z as i32);
                cells.push(HexCell::new(id, coordinates, chunk, config.default_color));
                chunks[chunk].add_cell(id);
            }
        }

        let mut grid = Self {
            config,
            cells,
            chunks,
            noise,
            dirty: Vec::new(),
        };

        for z in 0..height {
            for x in 0..width {
                let i = x + z * width;
                if x > 0 {
                    grid.link_neighbors(CellId(i), Direction::West, CellId(i - 1));
                }
                if z == 0 {
                    continue;
                }
                // Odd rows are shifted right, so the row below sits
                // half a cell further left or right depending on parity.
                if z % 2 == 0 {
                    grid.link_neighbors(CellId(i), Direction::SouthEast, CellId(i - width));
                    if x > 0 {
                        grid.link_neighbors(CellId(i), Direction::SouthWest, CellId(i - width - 1));
                    }
                } else {
                    grid.link_neighbors(CellId(i), Direction::SouthWest, CellId(i - width));
                    if x + 1 < width {
                        grid.link_neighbors(CellId(i), Direction::SouthEast, CellId(i - width + 1));
                    }
                }
            }
        }

        for i in 0..grid.cells.len() {
            grid.set_elevation(CellId(i), 0);
        }

        info!(
            "Built hex grid: {}x{} cells in {} chunks",
            width,
            height,
            grid.chunks.len()
        );

        Ok(grid)
    }

    /// Link two cells in both directions
    fn link_neighbors(&mut self, cell: CellId, direction: Direction, other: CellId) {
        debug_assert_eq!(
            self.cells[cell.index()].coordinates.neighbor(direction),
            self.cells[other.index()].coordinates,
            "linked cells are not adjacent"
        );
        self.cells[cell.index()].neighbors[direction.index()] = Some(other);
        self.cells[other.index()].neighbors[direction.opposite().index()] = Some(cell);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Noise source used to perturb geometry
    #[inline]
    pub fn noise(&self) -> &N {
        &self.noise
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Get a cell by handle
    #[inline]
    pub fn get_cell(&self, id: CellId) -> Option<&HexCell> {
        self.cells.get(id.index())
    }

    /// Get a cell by handle, failing with `CellNotFound` for a foreign handle
    pub fn cell(&self, id: CellId) -> Result<&HexCell> {
        self.get_cell(id).ok_or(HexError::CellNotFound(id.index()))
    }

    /// All cells in row-major offset order
    #[inline]
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    /// All chunks in row-major order
    #[inline]
    pub fn chunks(&self) -> &[HexChunk] {
        &self.chunks
    }

    #[inline]
    pub fn chunk(&self, index: usize) -> Option<&HexChunk> {
        self.chunks.get(index)
    }

    /// The neighbor of a cell in `direction`, if inside the grid
    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<&HexCell> {
        self.get_cell(id)?
            .neighbor(direction)
            .map(|n| &self.cells[n.index()])
    }

    /// Look up a cell by cube coordinates
    ///
    /// Returns `None` outside the grid.
    ///
    /// # Example
    ///
    /// ```
    /// # use hex_terrain::*;
    /// # let config = GridConfigBuilder::new().noise_seed(1).build().unwrap();
    /// # let grid = HexGrid::with_noise(config, FlatNoise::neutral()).unwrap();
    /// let coords = HexCoordinates::from_offset(4, 7);
    /// assert_eq!(grid.cell_at(coords).unwrap().coordinates(), coords);
    /// assert!(grid.cell_at(HexCoordinates::new(-1, 0)).is_none());
    /// ```
    pub fn cell_at(&self, coordinates: HexCoordinates) -> Option<&HexCell> {
        let z = coordinates.z();
        if z < 0 || z as usize >= self.config.cell_count_z() {
            return None;
        }
        let x = coordinates.x().checked_add(z / 2)?;
        if x < 0 || x as usize >= self.config.cell_count_x() {
            return None;
        }
        self.cells
            .get(x as usize + z as usize * self.config.cell_count_x())
    }

    /// Look up the cell whose hex contains a world position
    ///
    /// Only x and z are used. Returns `None` outside the grid.
    pub fn cell_at_position(&self, position: Vec3) -> Option<&HexCell> {
        self.cell_at(HexCoordinates::from_position(position))
    }

    /// All cells within `radius` steps of `center`, clipped to the grid
    pub fn cells_within_radius(&self, center: HexCoordinates, radius: u32) -> Vec<CellId> {
        let limit = (self.config.cell_count_x() + self.config.cell_count_z()) as u32;
        let r = radius.min(limit) as i32;

        let mut found = Vec::new();
        for dz in -r..=r {
            for dx in (-r).max(-dz - r)..=r.min(-dz + r) {
                let (Some(x), Some(z)) = (center.x().checked_add(dx), center.z().checked_add(dz))
                else {
                    continue;
                };
                if let Some(cell) = self.cell_at(HexCoordinates::new(x, z)) {
                    found.push(cell.id());
                }
            }
        }
        found
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    /// Change the elevation of a cell
    ///
    /// Recomputes the cell's height, then retracts any river the new
    /// elevation would make flow uphill. Marks this cell's chunk dirty and
    /// every neighboring chunk that shares an edge with it.
    ///
    /// Returns `false` if the elevation was already `elevation`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this grid.
    pub fn set_elevation(&mut self, id: CellId, elevation: i32) -> bool {
        let cell = &self.cells[id.index()];
        if cell.elevation == elevation {
            return false;
        }

        let mut position = cell.position;
        let sample = metrics::sample_noise(&self.noise, position);
        position.y =
            elevation as f32 * ELEVATION_STEP + (sample.y * 2.0 - 1.0) * ELEVATION_PERTURB_STRENGTH;

        let cell = &mut self.cells[id.index()];
        cell.elevation = elevation;
        cell.position = position;

        if let Some(direction) = cell.outgoing_river {
            if let Some(downstream) = self.neighbor(id, direction) {
                if elevation < downstream.elevation {
                    trace!(
                        "Cell {} now below its river target, retracting",
                        self.cells[id.index()].coordinates
                    );
                    self.remove_outgoing_river(id);
                }
            }
        }
        if let Some(direction) = self.cells[id.index()].incoming_river {
            if let Some(upstream) = self.neighbor(id, direction) {
                if elevation > upstream.elevation {
                    trace!(
                        "Cell {} now above its river source, retracting",
                        self.cells[id.index()].coordinates
                    );
                    self.remove_incoming_river(id);
                }
            }
        }

        self.refresh(id);
        true
    }

    /// Change the color of a cell
    ///
    /// Returns `false` if the color was already `color`.
    pub fn set_color(&mut self, id: CellId, color: CellColor) -> bool {
        let cell = &mut self.cells[id.index()];
        if cell.color == color {
            return false;
        }
        cell.color = color;
        self.refresh(id);
        true
    }

    /// Start a river flowing out of a cell in `direction`
    ///
    /// The neighbor in `direction` receives the matching incoming river.
    /// Any river previously leaving this cell, or entering the neighbor, is
    /// retracted first. Refused without changes if there is no neighbor in
    /// that direction or if the neighbor is higher.
    ///
    /// Returns `true` if the river was set.
    ///
    /// # Example
    ///
    /// ```
    /// # use hex_terrain::*;
    /// # let config = GridConfigBuilder::new().noise_seed(1).build().unwrap();
    /// # let mut grid = HexGrid::with_noise(config, FlatNoise::neutral()).unwrap();
    /// let a = grid.cell_at(HexCoordinates::from_offset(2, 2)).unwrap().id();
    /// assert!(grid.set_outgoing_river(a, Direction::East));
    ///
    /// let b = grid.neighbor(a, Direction::East).unwrap();
    /// assert_eq!(b.incoming_river(), Some(Direction::West));
    /// ```
    pub fn set_outgoing_river(&mut self, id: CellId, direction: Direction) -> bool {
        let cell = &self.cells[id.index()];
        if cell.outgoing_river == Some(direction) {
            return false;
        }

        let Some(target) = cell.neighbor(direction) else {
            trace!(
                "Refused river from {} toward {:?}: no neighbor",
                cell.coordinates, direction
            );
            return false;
        };
        if cell.elevation < self.cells[target.index()].elevation {
            trace!("Refused river from {} toward {:?}: uphill", cell.coordinates, direction);
            return false;
        }

        self.remove_outgoing_river(id);
        if self.cells[id.index()].incoming_river == Some(direction) {
            self.remove_incoming_river(id);
        }
        self.cells[id.index()].outgoing_river = Some(direction);
        self.refresh_self_only(id);

        self.remove_incoming_river(target);
        self.cells[target.index()].incoming_river = Some(direction.opposite());
        self.refresh_self_only(target);

        true
    }

    /// Remove the river leaving a cell, and its other end
    ///
    /// Returns `false` if there was none.
    pub fn remove_outgoing_river(&mut self, id: CellId) -> bool {
        let Some(direction) = self.cells[id.index()].outgoing_river.take() else {
            return false;
        };
        self.refresh_self_only(id);

        if let Some(target) = self.cells[id.index()].neighbor(direction) {
            let target_cell = &mut self.cells[target.index()];
            debug_assert_eq!(target_cell.incoming_river, Some(direction.opposite()));
            target_cell.incoming_river = None;
            self.refresh_self_only(target);
        }
        true
    }

    /// Remove the river entering a cell, and its other end
    ///
    /// Returns `false` if there was none.
    pub fn remove_incoming_river(&mut self, id: CellId) -> bool {
        let Some(direction) = self.cells[id.index()].incoming_river.take() else {
            return false;
        };
        self.refresh_self_only(id);

        if let Some(source) = self.cells[id.index()].neighbor(direction) {
            let source_cell = &mut self.cells[source.index()];
            debug_assert_eq!(source_cell.outgoing_river, Some(direction.opposite()));
            source_cell.outgoing_river = None;
            self.refresh_self_only(source);
        }
        true
    }

    /// Remove both rivers of a cell
    ///
    /// Returns `true` if either existed.
    pub fn remove_river(&mut self, id: CellId) -> bool {
        let outgoing = self.remove_outgoing_river(id);
        let incoming = self.remove_incoming_river(id);
        outgoing || incoming
    }

    // ------------------------------------------------------------------
    // Dirty chunk scheduling
    // ------------------------------------------------------------------

    /// Queue a cell's chunk and every other chunk holding one of its neighbors
    fn refresh(&mut self, id: CellId) {
        let cell = &self.cells[id.index()];
        let own = cell.chunk;
        let mut touched = [own; 7];
        for (slot, (_, neighbor)) in touched[1..].iter_mut().zip(cell.neighbors()) {
            *slot = self.cells[neighbor.index()].chunk;
        }
        for chunk in touched {
            self.queue_chunk(chunk);
        }
    }

    fn refresh_self_only(&mut self, id: CellId) {
        self.queue_chunk(self.cells[id.index()].chunk);
    }

    fn queue_chunk(&mut self, index: usize) {
        if self.chunks[index].mark_dirty() {
            self.dirty.push(index);
        }
    }

    /// Number of chunks waiting for a rebuild
    #[inline]
    pub fn dirty_chunk_count(&self) -> usize {
        self.dirty.len()
    }

    /// Whether any chunk is waiting for a rebuild
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Re-triangulate every dirty chunk exactly once
    ///
    /// Call once per frame or tick. However many edits touched a chunk
    /// since the last pass, it is rebuilt a single time from the current
    /// state. With the `parallel` feature, chunks are triangulated
    /// concurrently from a shared read-only view and written back afterwards.
    ///
    /// Returns the number of chunks rebuilt.
    pub fn rebuild_dirty_chunks(&mut self) -> usize {
        if self.dirty.is_empty() {
            return 0;
        }

        let queued = std::mem::take(&mut self.dirty);
        let meshes = self.triangulate_chunks(&queued);

        for (index, mesh) in queued.iter().zip(meshes) {
            debug!(
                "Chunk {}: {} triangles, {} vertices",
                index,
                mesh.triangle_count(),
                mesh.vertex_count()
            );
            self.chunks[*index].apply_mesh(mesh);
        }

        debug!("Rebuilt {} dirty chunks", queued.len());
        queued.len()
    }

    #[cfg(feature = "parallel")]
    fn triangulate_chunks(&self, indices: &[usize]) -> Vec<MeshData> {
        indices
            .par_iter()
            .map(|&index| self.triangulate_chunk(index))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn triangulate_chunks(&self, indices: &[usize]) -> Vec<MeshData> {
        indices
            .iter()
            .map(|&index| self.triangulate_chunk(index))
            .collect()
    }

    fn triangulate_chunk(&self, index: usize) -> MeshData {
        Triangulator::new(&self.cells, &self.noise).triangulate(self.chunks[index].cells())
    }
}
