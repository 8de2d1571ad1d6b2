//! Tileable Perlin noise
//!
//! Classic improved Perlin noise with lattice coordinates wrapped to a
//! period, so a texture baked from it repeats without seams. Used to
//! generate the default perturbation texture.

use glam::Vec3;

/// Configuration for tileable fractal Perlin noise
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerlinConfig {
    /// Lattice cells across one texture repeat at the first octave
    pub base_cells: u32,
    /// Number of octaves for fractal detail layers
    pub octaves: usize,
    /// Amplitude decay per octave (controls roughness)
    pub persistence: f32,
    /// Lattice multiplier per octave; integral so every octave still tiles
    pub lacunarity: u32,
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            base_cells: 4,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2,
        }
    }
}

// ============================================================================
// PERMUTATION TABLE
// ============================================================================
// Standard 256-element permutation table from Ken Perlin's reference implementation.
const PERM: [u32; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Hash a lattice point with a seed through three permutation lookups
#[inline]
fn hash(x: i32, y: i32, z: i32, seed: u32) -> u32 {
    let seed_hash = (seed.wrapping_mul(1103515245).wrapping_add(12345)) >> 16;
    let ix = ((x as u32) ^ seed_hash) & 255;
    let iy = ((y as u32) ^ (seed_hash >> 8)) & 255;
    let iz = ((z as u32) ^ (seed_hash >> 16)) & 255;
    let a = PERM[ix as usize];
    let b = PERM[((a + iy) & 255) as usize];
    PERM[((b + iz) & 255) as usize]
}

/// Dot product with one of the 12 cube-edge gradients selected by `hash_value`
#[inline]
fn gradient(hash_value: u32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash_value & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        z
    } else {
        x
    };

    let sign_u = if (h & 1) == 0 { -u } else { u };
    let sign_v = if (h & 2) == 0 { -v } else { v };

    sign_u + sign_v
}

/// Quintic smoothstep: 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// 3D Perlin noise whose x and y lattice wrap every `period` cells
///
/// Returns a value in roughly [-1, 1].
fn perlin_3d_periodic(pos: Vec3, seed: u32, period: i32) -> f32 {
    let period = period.max(1);
    let fx = pos.x.floor();
    let fy = pos.y.floor();
    let fz = pos.z.floor();

    let x0 = (fx as i32).rem_euclid(period);
    let y0 = (fy as i32).rem_euclid(period);
    let z0 = fz as i32;
    let x1 = (x0 + 1).rem_euclid(period);
    let y1 = (y0 + 1).rem_euclid(period);
    let z1 = z0 + 1;

    let xf = pos.x - fx;
    let yf = pos.y - fy;
    let zf = pos.z - fz;

    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    let g_aaa = gradient(hash(x0, y0, z0, seed), xf, yf, zf);
    let g_baa = gradient(hash(x1, y0, z0, seed), xf - 1.0, yf, zf);
    let g_aba = gradient(hash(x0, y1, z0, seed), xf, yf - 1.0, zf);
    let g_bba = gradient(hash(x1, y1, z0, seed), xf - 1.0, yf - 1.0, zf);
    let g_aab = gradient(hash(x0, y0, z1, seed), xf, yf, zf - 1.0);
    let g_bab = gradient(hash(x1, y0, z1, seed), xf - 1.0, yf, zf - 1.0);
    let g_abb = gradient(hash(x0, y1, z1, seed), xf, yf - 1.0, zf - 1.0);
    let g_bbb = gradient(hash(x1, y1, z1, seed), xf - 1.0, yf - 1.0, zf - 1.0);

    let x00 = lerp(g_aaa, g_baa, u);
    let x10 = lerp(g_aba, g_bba, u);
    let x01 = lerp(g_aab, g_bab, u);
    let x11 = lerp(g_abb, g_bbb, u);
    let y0_val = lerp(x00, x10, v);
    let y1_val = lerp(x01, x11, v);

    lerp(y0_val, y1_val, w)
}

/// Sample tileable fractal Perlin noise at texture coordinates
///
/// `u` and `v` repeat with period 1. Returns a value in [0.0, 1.0].
pub fn sample_periodic_fbm(u: f32, v: f32, seed: u32, config: &PerlinConfig) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;
    let mut cells = config.base_cells.max(1);

    for octave in 0..config.octaves.max(1) {
        // Offset z per octave so octaves don't share a lattice plane.
        let pos = Vec3::new(u * cells as f32, v * cells as f32, 0.5 + octave as f32 * 1.7);
        value += perlin_3d_periodic(pos, seed, cells as i32) * amplitude;
        max_value += amplitude;

        amplitude *= config.persistence;
        cells = cells.saturating_mul(config.lacunarity.max(1));
    }

    (((value / max_value) + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let config = PerlinConfig::default();
        let a = sample_periodic_fbm(0.31, 0.77, 42, &config);
        let b = sample_periodic_fbm(0.31, 0.77, 42, &config);
        assert_eq!(a, b, "Same seed and position must produce identical results");
    }

    #[test]
    fn test_range() {
        let config = PerlinConfig::default();
        for i in 0..50 {
            let u = i as f32 * 0.037;
            let v = i as f32 * 0.061;
            let value = sample_periodic_fbm(u, v, 12345, &config);
            assert!(
                (0.0..=1.0).contains(&value),
                "Value {} at ({}, {}) is outside [0.0, 1.0] range",
                value,
                u,
                v
            );
        }
    }

    #[test]
    fn test_tiles_with_period_one() {
        let config = PerlinConfig::default();
        for &(u, v) in &[(0.1, 0.2), (0.5, 0.9), (0.73, 0.01)] {
            let base = sample_periodic_fbm(u, v, 7, &config);
            let shifted = sample_periodic_fbm(u + 1.0, v, 7, &config);
            let shifted_v = sample_periodic_fbm(u, v + 1.0, 7, &config);
            assert!((base - shifted).abs() < 1e-4);
            assert!((base - shifted_v).abs() < 1e-4);
        }
    }

    #[test]
    fn test_different_seeds() {
        let config = PerlinConfig::default();
        let values: Vec<f32> = (0..8)
            .map(|seed| sample_periodic_fbm(0.37, 0.41, seed * 7919, &config))
            .collect();
        assert!(
            values.windows(2).any(|w| w[0] != w[1]),
            "Different seeds should produce different values"
        );
    }

    #[test]
    fn test_perlin_core_range() {
        let v = perlin_3d_periodic(Vec3::new(1.5, 2.3, 0.7), 42, 8);
        assert!((-1.5..=1.5).contains(&v));
        assert_eq!(v, perlin_3d_periodic(Vec3::new(1.5, 2.3, 0.7), 42, 8));
    }
}
