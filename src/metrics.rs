//! Hex geometry constants and pure helper functions
//!
//! Hexes are pointy-top and lie in the xz plane with y up. Everything here
//! is stateless; the only outside input is the noise source handed to
//! [`sample_noise`] and [`perturb`].

use glam::{Vec3, Vec4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::mesh::{lerp_color, CellColor};
use crate::noise::NoiseSource;

/// Ratio of the inner radius (apothem) to the outer radius
pub const OUTER_TO_INNER: f32 = 0.866_025_4;

/// Ratio of the outer radius to the inner radius
pub const INNER_TO_OUTER: f32 = 1.0 / OUTER_TO_INNER;

/// Hex circumradius
pub const OUTER_RADIUS: f32 = 10.0;

/// Hex apothem; adjacent hex centers are `2 * INNER_RADIUS` apart
pub const INNER_RADIUS: f32 = OUTER_RADIUS * OUTER_TO_INNER;

/// Fraction of a hex rendered in its own unblended color
pub const SOLID_FACTOR: f32 = 0.8;

/// Fraction of a hex given over to the bridge towards a neighbor
pub const BLEND_FACTOR: f32 = 1.0 - SOLID_FACTOR;

/// World height of one elevation level
pub const ELEVATION_STEP: f32 = 3.0;

/// Terraces on a single-level slope
pub const TERRACES_PER_SLOPE: i32 = 2;

/// Interpolation steps across a slope: treads plus risers
pub const TERRACE_STEPS: i32 = TERRACES_PER_SLOPE * 2 + 1;

/// Horizontal advance per terrace step
pub const HORIZONTAL_TERRACE_STEP_SIZE: f32 = 1.0 / TERRACE_STEPS as f32;

/// Vertical rise per terrace riser
pub const VERTICAL_TERRACE_STEP_SIZE: f32 = 1.0 / (TERRACES_PER_SLOPE + 1) as f32;

/// Maximum horizontal vertex displacement
pub const CELL_PERTURB_STRENGTH: f32 = 4.0;

/// Maximum vertical displacement of a cell center
pub const ELEVATION_PERTURB_STRENGTH: f32 = 1.5;

/// World to noise texture coordinate scale
pub const NOISE_SCALE: f32 = 0.003;

/// Stream beds sit this many elevation levels below their cell
pub const STREAM_BED_ELEVATION_OFFSET: f32 = -1.0;

// Corner 0 is repeated at the end so `direction + 1` never wraps.
const CORNERS: [Vec3; 7] = [
    Vec3::new(0.0, 0.0, OUTER_RADIUS),
    Vec3::new(INNER_RADIUS, 0.0, 0.5 * OUTER_RADIUS),
    Vec3::new(INNER_RADIUS, 0.0, -0.5 * OUTER_RADIUS),
    Vec3::new(0.0, 0.0, -OUTER_RADIUS),
    Vec3::new(-INNER_RADIUS, 0.0, -0.5 * OUTER_RADIUS),
    Vec3::new(-INNER_RADIUS, 0.0, 0.5 * OUTER_RADIUS),
    Vec3::new(0.0, 0.0, OUTER_RADIUS),
];

/// Classification of the connection between two cells
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// Same elevation
    Flat,
    /// One level apart; rendered as terraces
    Slope,
    /// Two or more levels apart; rendered as a steep wall
    Cliff,
}

/// Classify the connection between two elevations
///
/// ```
/// use hex_terrain::metrics::{edge_type, EdgeType};
///
/// assert_eq!(edge_type(3, 3), EdgeType::Flat);
/// assert_eq!(edge_type(3, 2), EdgeType::Slope);
/// assert_eq!(edge_type(0, 5), EdgeType::Cliff);
/// ```
pub fn edge_type(elevation1: i32, elevation2: i32) -> EdgeType {
    match (elevation2 as i64 - elevation1 as i64).abs() {
        0 => EdgeType::Flat,
        1 => EdgeType::Slope,
        _ => EdgeType::Cliff,
    }
}

/// First corner (clockwise) of the edge in `direction`, relative to the center
#[inline]
pub fn first_corner(direction: Direction) -> Vec3 {
    CORNERS[direction.index()]
}

/// Second corner (clockwise) of the edge in `direction`
#[inline]
pub fn second_corner(direction: Direction) -> Vec3 {
    CORNERS[direction.index() + 1]
}

/// First corner of the solid region's edge in `direction`
#[inline]
pub fn first_solid_corner(direction: Direction) -> Vec3 {
    CORNERS[direction.index()] * SOLID_FACTOR
}

/// Second corner of the solid region's edge in `direction`
#[inline]
pub fn second_solid_corner(direction: Direction) -> Vec3 {
    CORNERS[direction.index() + 1] * SOLID_FACTOR
}

/// Midpoint of the solid region's edge in `direction`
#[inline]
pub fn solid_edge_middle(direction: Direction) -> Vec3 {
    (CORNERS[direction.index()] + CORNERS[direction.index() + 1]) * (0.5 * SOLID_FACTOR)
}

/// Offset from a solid edge to the matching solid edge of the neighbor
///
/// Both hexes contribute their blend fraction, so one quad spans the gap.
#[inline]
pub fn bridge(direction: Direction) -> Vec3 {
    (CORNERS[direction.index()] + CORNERS[direction.index() + 1]) * BLEND_FACTOR
}

/// Interpolate a terrace step between two points
///
/// x and z advance evenly; y only rises on odd steps, which yields flat
/// treads separated by sloped risers.
pub fn terrace_lerp(a: Vec3, b: Vec3, step: i32) -> Vec3 {
    let h = step as f32 * HORIZONTAL_TERRACE_STEP_SIZE;
    let v = ((step + 1) / 2) as f32 * VERTICAL_TERRACE_STEP_SIZE;
    Vec3::new(
        a.x + (b.x - a.x) * h,
        a.y + (b.y - a.y) * v,
        a.z + (b.z - a.z) * h,
    )
}

/// Interpolate a terrace step between two colors
pub fn terrace_lerp_color(a: CellColor, b: CellColor, step: i32) -> CellColor {
    let h = step as f32 * HORIZONTAL_TERRACE_STEP_SIZE;
    lerp_color(a, b, h)
}

/// Sample the noise source at a world position
///
/// Only x and z are used. Every channel is in [0, 1]; remap with `v * 2 - 1`
/// for signed noise.
#[inline]
pub fn sample_noise<N: NoiseSource + ?Sized>(noise: &N, position: Vec3) -> Vec4 {
    noise.sample(position.x * NOISE_SCALE, position.z * NOISE_SCALE)
}

/// Displace a vertex horizontally by the noise at its position
pub fn perturb<N: NoiseSource + ?Sized>(noise: &N, position: Vec3) -> Vec3 {
    let sample = sample_noise(noise, position);
    Vec3::new(
        position.x + (sample.x * 2.0 - 1.0) * CELL_PERTURB_STRENGTH,
        position.y,
        position.z + (sample.z * 2.0 - 1.0) * CELL_PERTURB_STRENGTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FlatNoise;

    #[test]
    fn test_edge_type_classification() {
        for e in [-3, 0, 1, 6] {
            assert_eq!(edge_type(e, e), EdgeType::Flat);
            assert_eq!(edge_type(e, e + 1), EdgeType::Slope);
            assert_eq!(edge_type(e + 1, e), EdgeType::Slope);
            assert_eq!(edge_type(e, e + 2), EdgeType::Cliff);
            assert_eq!(edge_type(e + 5, e), EdgeType::Cliff);
        }
    }

    #[test]
    fn test_edge_type_extreme_elevations() {
        assert_eq!(edge_type(i32::MIN, i32::MAX), EdgeType::Cliff);
    }

    #[test]
    fn test_corner_table() {
        for d in Direction::ALL {
            let corner = first_corner(d);
            assert!((corner.length() - OUTER_RADIUS).abs() < 1e-4);
            assert_eq!(second_corner(d), first_corner(d.next()));
            assert_eq!(first_solid_corner(d), first_corner(d) * SOLID_FACTOR);
        }
    }

    #[test]
    fn test_bridges_meet_in_the_middle() {
        // A bridge plus its opposite's solid edge middle lands on the
        // neighbor's solid edge: centers are 2 * inner radius apart.
        for d in Direction::ALL {
            let neighbor_offset =
                solid_edge_middle(d) + bridge(d) - solid_edge_middle(d.opposite());
            assert!((neighbor_offset.length() - 2.0 * INNER_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn test_terrace_lerp_endpoints() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, 3.0, -5.0);
        assert_eq!(terrace_lerp(a, b, 0), a);
        let end = terrace_lerp(a, b, TERRACE_STEPS);
        assert!((end - b).length() < 1e-5);
    }

    #[test]
    fn test_terrace_lerp_treads_and_risers() {
        let a = Vec3::ZERO;
        let b = Vec3::new(5.0, 3.0, 0.0);
        let heights: Vec<f32> = (0..=TERRACE_STEPS).map(|s| terrace_lerp(a, b, s).y).collect();
        // steps 1 and 2 share a tread, as do 3 and 4
        assert!((heights[1] - 1.0).abs() < 1e-5);
        assert_eq!(heights[1], heights[2]);
        assert!((heights[3] - 2.0).abs() < 1e-5);
        assert_eq!(heights[3], heights[4]);
        // horizontal advance is uniform
        for s in 0..=TERRACE_STEPS {
            assert!((terrace_lerp(a, b, s).x - s as f32).abs() < 1e-5);
        }
    }

    #[test]
    fn test_terrace_lerp_color() {
        let black = [0.0, 0.0, 0.0, 1.0];
        let white = [1.0, 1.0, 1.0, 1.0];
        let mid = terrace_lerp_color(black, white, 2);
        assert!((mid[0] - 0.4).abs() < 1e-5);
        assert_eq!(mid[3], 1.0);
    }

    #[test]
    fn test_perturb_keeps_height() {
        let noise = FlatNoise::new(Vec4::new(1.0, 0.3, 0.0, 0.5));
        let p = perturb(&noise, Vec3::new(10.0, 7.0, 20.0));
        assert_eq!(p.y, 7.0);
        assert!((p.x - (10.0 + CELL_PERTURB_STRENGTH)).abs() < 1e-5);
        assert!((p.z - (20.0 - CELL_PERTURB_STRENGTH)).abs() < 1e-5);
    }

    #[test]
    fn test_neutral_noise_does_not_perturb() {
        let noise = FlatNoise::neutral();
        let p = Vec3::new(3.0, 4.0, 5.0);
        assert_eq!(perturb(&noise, p), p);
    }
}
