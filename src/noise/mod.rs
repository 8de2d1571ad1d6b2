//! Noise sources used to perturb terrain geometry
//!
//! The grid only ever asks for a 4-channel sample at a texture coordinate.
//! Where that sample comes from is up to the caller: a baked texture, a
//! procedural function, or a constant for tests.

mod perlin;
mod texture;

pub use perlin::{sample_periodic_fbm, PerlinConfig};
pub use texture::NoiseTexture;

use glam::Vec4;

/// Trait for sampling 4-channel noise at texture coordinates
///
/// Implementations must be deterministic: the same coordinates always give
/// the same sample, otherwise rebuilding an unchanged chunk would not
/// reproduce its mesh. Every channel must lie in [0, 1].
pub trait NoiseSource: Send + Sync {
    /// Sample the noise at texture coordinates `(u, v)`
    fn sample(&self, u: f32, v: f32) -> Vec4;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    fn sample(&self, u: f32, v: f32) -> Vec4 {
        (**self).sample(u, v)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample(&self, u: f32, v: f32) -> Vec4 {
        (**self).sample(u, v)
    }
}

/// Noise source returning the same sample everywhere
///
/// [`FlatNoise::neutral`] yields 0.5 on every channel, which maps to zero
/// displacement, so geometry comes out exactly on the hex lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatNoise {
    value: Vec4,
}

impl FlatNoise {
    /// Create a constant source, clamping each channel into [0, 1]
    pub fn new(value: Vec4) -> Self {
        Self {
            value: value.clamp(Vec4::ZERO, Vec4::ONE),
        }
    }

    /// Constant source that produces no perturbation
    pub fn neutral() -> Self {
        Self::new(Vec4::splat(0.5))
    }
}

impl Default for FlatNoise {
    fn default() -> Self {
        Self::neutral()
    }
}

impl NoiseSource for FlatNoise {
    #[inline]
    fn sample(&self, _u: f32, _v: f32) -> Vec4 {
        self.value
    }
}
