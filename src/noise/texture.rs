//! Bilinearly sampled RGBA noise texture

use glam::Vec4;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::perlin::{sample_periodic_fbm, PerlinConfig};
use super::NoiseSource;
use crate::error::{HexError, Result};

/// A repeating 4-channel noise texture
///
/// Sampling follows the usual GPU convention: texel centers sit at half-texel
/// offsets, coordinates wrap, and the four nearest texels are blended
/// bilinearly.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseTexture {
    width: usize,
    height: usize,
    texels: Vec<Vec4>,
}

impl NoiseTexture {
    /// Wrap raw RGBA texels in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidNoiseTexture` if a dimension is zero, the texel count
    /// does not match, or any channel lies outside [0, 1].
    pub fn from_texels(width: usize, height: usize, texels: Vec<[f32; 4]>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HexError::InvalidNoiseTexture(format!(
                "dimensions must be non-zero (got {}x{})",
                width, height
            )));
        }
        if texels.len() != width * height {
            return Err(HexError::InvalidNoiseTexture(format!(
                "expected {} texels for {}x{}, got {}",
                width * height,
                width,
                height,
                texels.len()
            )));
        }
        if let Some(i) = texels
            .iter()
            .position(|t| t.iter().any(|c| !(0.0..=1.0).contains(c)))
        {
            return Err(HexError::InvalidNoiseTexture(format!(
                "texel {} has a channel outside [0, 1]",
                i
            )));
        }

        Ok(Self {
            width,
            height,
            texels: texels.into_iter().map(Vec4::from).collect(),
        })
    }

    /// Generate a square tileable Perlin texture
    ///
    /// Each channel gets its own noise seed, drawn from a ChaCha stream keyed
    /// by `seed`, so the channels are uncorrelated.
    pub fn perlin(seed: u32, size: usize) -> Self {
        Self::perlin_with_config(seed, size, &PerlinConfig::default())
    }

    /// Generate a square tileable Perlin texture with custom noise settings
    pub fn perlin_with_config(seed: u32, size: usize, config: &PerlinConfig) -> Self {
        let size = size.max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let channel_seeds: [u32; 4] = [rng.gen(), rng.gen(), rng.gen(), rng.gen()];

        let mut texels = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let u = x as f32 / size as f32;
                let v = y as f32 / size as f32;
                texels.push(Vec4::new(
                    sample_periodic_fbm(u, v, channel_seeds[0], config),
                    sample_periodic_fbm(u, v, channel_seeds[1], config),
                    sample_periodic_fbm(u, v, channel_seeds[2], config),
                    sample_periodic_fbm(u, v, channel_seeds[3], config),
                ));
            }
        }

        Self {
            width: size,
            height: size,
            texels,
        }
    }

    /// Texture width in texels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Texture height in texels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Texel at wrapped integer coordinates
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> Vec4 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.texels[y * self.width + x]
    }
}

impl NoiseSource for NoiseTexture {
    fn sample(&self, u: f32, v: f32) -> Vec4 {
        let x = u * self.width as f32 - 0.5;
        let y = v * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let bottom = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), tx);
        let top = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), tx);
        bottom.lerp(top, ty)
    }
}
