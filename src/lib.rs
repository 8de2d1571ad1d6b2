//! Editable hex-tile terrain meshes
//!
//! A standalone library for hex-grid terrain with elevation, terraced
//! slopes, cliffs and rivers, producing engine-agnostic triangle meshes
//! suitable for any game engine (Bevy, Godot, wgpu, etc.)
//!
//! Cells live in a rectangular grid split into chunks. Edits only mark
//! chunks dirty; call [`HexGrid::rebuild_dirty_chunks`] once per frame to
//! re-triangulate every chunk that changed.
//!
//! # Quick Start
//!
//! ```rust
//! use hex_terrain::*;
//!
//! let config = GridConfigBuilder::new()
//!     .chunk_counts(2, 2).unwrap()
//!     .noise_seed(42)
//!     .noise_texture_size(64).unwrap()
//!     .build().unwrap();
//!
//! let mut grid = HexGrid::new(config).unwrap();
//!
//! // Raise a hill and run a river off it
//! let peak = grid.cell_at(HexCoordinates::from_offset(4, 4)).unwrap().id();
//! for id in grid.cells_within_radius(HexCoordinates::from_offset(4, 4), 1) {
//!     grid.set_elevation(id, 1);
//! }
//! grid.set_elevation(peak, 2);
//! grid.set_outgoing_river(peak, Direction::East);
//!
//! grid.rebuild_dirty_chunks();
//! for chunk in grid.chunks() {
//!     println!("chunk {}: {} triangles", chunk.index(), chunk.mesh().triangle_count());
//! }
//! ```
//!
//! # Features
//!
//! - `parallel` (default): Rebuilds dirty chunks on the rayon thread pool
//! - `serde`: Enables serialization support for configuration and coordinates

// Modules
pub mod error;
pub mod config;
pub mod metrics;
pub mod direction;
pub mod coordinates;
pub mod cell;
pub mod chunk;
pub mod grid;
pub mod mesh;
pub mod noise;
pub mod picking;

// Re-export core types for convenience
pub use error::{HexError, Result};
pub use config::{GridConfig, GridConfigBuilder};
pub use metrics::EdgeType;
pub use direction::Direction;
pub use coordinates::HexCoordinates;
pub use cell::{CellId, HexCell};
pub use chunk::HexChunk;
pub use grid::HexGrid;
pub use mesh::{colors, CellColor, MeshData, Triangulator};
pub use noise::{FlatNoise, NoiseSource, NoiseTexture, PerlinConfig};
pub use picking::RayHit;

// Re-export glam types for convenience
pub use glam::{Vec3, Vec4};
