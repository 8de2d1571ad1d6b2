//! Hex Grid Configuration and Builder
//!
//! This module provides configuration types for building a hex terrain grid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{HexError, Result};
use crate::mesh::{colors, CellColor};

/// Largest number of chunks allowed along either axis
pub const MAX_CHUNK_COUNT: usize = 256;

/// Largest number of cells per chunk along either axis
pub const MAX_CHUNK_SIZE: usize = 64;

/// Configuration for a hex terrain grid
///
/// The grid is a rectangle of `chunk_count_x * chunk_count_z` chunks, each
/// owning `chunk_size_x * chunk_size_z` cells. The size is fixed for the
/// lifetime of a grid; build a new grid to resize.
///
/// # Example
///
/// ```rust
/// use hex_terrain::*;
///
/// let config = GridConfigBuilder::new()
///     .chunk_counts(2, 2)
///     .unwrap()
///     .noise_seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.cell_count_x(), 10);
/// assert_eq!(config.cell_count(), 100);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Number of chunks along the x (column) axis
    pub chunk_count_x: usize,

    /// Number of chunks along the z (row) axis
    pub chunk_count_z: usize,

    /// Cells per chunk along the x axis
    pub chunk_size_x: usize,

    /// Cells per chunk along the z axis
    pub chunk_size_z: usize,

    /// Color every cell starts with
    pub default_color: CellColor,

    /// Seed for the generated perturbation noise texture
    ///
    /// Only used when the grid builds its own noise source.
    pub noise_seed: u32,

    /// Edge length in texels of the generated noise texture
    pub noise_texture_size: usize,
}

impl GridConfig {
    /// Check every field against the ranges the builder enforces
    ///
    /// Fields are public, so a config assembled by hand or deserialized is
    /// validated again when a grid is built from it.
    pub fn validate(&self) -> Result<()> {
        check_range("chunk_count_x", self.chunk_count_x, MAX_CHUNK_COUNT)?;
        check_range("chunk_count_z", self.chunk_count_z, MAX_CHUNK_COUNT)?;
        check_range("chunk_size_x", self.chunk_size_x, MAX_CHUNK_SIZE)?;
        check_range("chunk_size_z", self.chunk_size_z, MAX_CHUNK_SIZE)?;
        check_texture_size(self.noise_texture_size)
    }

    /// Number of cell columns in the whole grid
    #[inline]
    pub fn cell_count_x(&self) -> usize {
        self.chunk_count_x * self.chunk_size_x
    }

    /// Number of cell rows in the whole grid
    #[inline]
    pub fn cell_count_z(&self) -> usize {
        self.chunk_count_z * self.chunk_size_z
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_count_x() * self.cell_count_z()
    }

    /// Total number of chunks
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunk_count_x * self.chunk_count_z
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating GridConfig with validation
///
/// # Example
///
/// ```rust
/// use hex_terrain::*;
///
/// let config = GridConfigBuilder::new()
///     .chunk_counts(1, 1)
///     .unwrap()
///     .chunk_size(3, 3)
///     .unwrap()
///     .default_color([0.2, 0.6, 0.2, 1.0])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.cell_count(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct GridConfigBuilder {
    chunk_count_x: usize,
    chunk_count_z: usize,
    chunk_size_x: usize,
    chunk_size_z: usize,
    default_color: CellColor,
    noise_seed: Option<u32>,
    noise_texture_size: usize,
}

impl GridConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - chunk counts: 4 x 3
    /// - chunk size: 5 x 5 cells
    /// - default_color: white
    /// - noise_seed: Random (generated from thread_rng)
    /// - noise_texture_size: 256
    pub fn new() -> Self {
        Self {
            chunk_count_x: 4,
            chunk_count_z: 3,
            chunk_size_x: 5,
            chunk_size_z: 5,
            default_color: colors::WHITE,
            noise_seed: None,
            noise_texture_size: 256,
        }
    }

    /// Set the number of chunks along x and z
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either count is 0 or above [`MAX_CHUNK_COUNT`]
    pub fn chunk_counts(mut self, x: usize, z: usize) -> Result<Self> {
        check_range("chunk_count_x", x, MAX_CHUNK_COUNT)?;
        check_range("chunk_count_z", z, MAX_CHUNK_COUNT)?;
        self.chunk_count_x = x;
        self.chunk_count_z = z;
        Ok(self)
    }

    /// Set the number of cells per chunk along x and z
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either size is 0 or above [`MAX_CHUNK_SIZE`]
    pub fn chunk_size(mut self, x: usize, z: usize) -> Result<Self> {
        check_range("chunk_size_x", x, MAX_CHUNK_SIZE)?;
        check_range("chunk_size_z", z, MAX_CHUNK_SIZE)?;
        self.chunk_size_x = x;
        self.chunk_size_z = z;
        Ok(self)
    }

    /// Set the color new cells start with
    pub fn default_color(mut self, color: CellColor) -> Self {
        self.default_color = color;
        self
    }

    /// Set the seed of the generated noise texture
    pub fn noise_seed(mut self, seed: u32) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    /// Set the edge length of the generated noise texture
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless size is a power of two of at least 8
    pub fn noise_texture_size(mut self, size: usize) -> Result<Self> {
        check_texture_size(size)?;
        self.noise_texture_size = size;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no noise seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<GridConfig> {
        let noise_seed = self.noise_seed.unwrap_or_else(rand::random);

        Ok(GridConfig {
            chunk_count_x: self.chunk_count_x,
            chunk_count_z: self.chunk_count_z,
            chunk_size_x: self.chunk_size_x,
            chunk_size_z: self.chunk_size_z,
            default_color: self.default_color,
            noise_seed,
            noise_texture_size: self.noise_texture_size,
        })
    }
}

impl Default for GridConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_texture_size(size: usize) -> Result<()> {
    if size < 8 || !size.is_power_of_two() {
        return Err(HexError::InvalidConfig(format!(
            "noise texture size must be a power of two >= 8 (got {})",
            size
        )));
    }
    Ok(())
}

fn check_range(name: &str, value: usize, max: usize) -> Result<()> {
    if value == 0 || value > max {
        return Err(HexError::InvalidConfig(format!(
            "{} must be in 1..={} (got {})",
            name, max, value
        )));
    }
    Ok(())
}
