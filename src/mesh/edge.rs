//! Subdivided hex edges

use glam::Vec3;

use crate::metrics;

/// The five points along one hex edge
///
/// `v1` and `v5` are the corners. Land edges only emit geometry between the
/// corners; channel edges use all five points so the middle vertex `v3` can
/// drop into a stream bed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeVertices {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
    pub v4: Vec3,
    pub v5: Vec3,
    /// Whether geometry follows all five points
    pub channel: bool,
}

impl EdgeVertices {
    /// Edge between two corners, inner points at quarter steps
    pub fn new(corner1: Vec3, corner2: Vec3, channel: bool) -> Self {
        Self::with_outer_step(corner1, corner2, 0.25, channel)
    }

    /// Edge whose second and fourth points sit `outer_step` in from the corners
    pub fn with_outer_step(corner1: Vec3, corner2: Vec3, outer_step: f32, channel: bool) -> Self {
        Self {
            v1: corner1,
            v2: corner1.lerp(corner2, outer_step),
            v3: corner1.lerp(corner2, 0.5),
            v4: corner1.lerp(corner2, 1.0 - outer_step),
            v5: corner2,
            channel,
        }
    }

    /// The same edge traversed from the other end
    pub fn reversed(&self) -> Self {
        Self {
            v1: self.v5,
            v2: self.v4,
            v3: self.v3,
            v4: self.v2,
            v5: self.v1,
            channel: self.channel,
        }
    }

    /// Terrace interpolation applied point by point
    pub fn terrace_lerp(a: &EdgeVertices, b: &EdgeVertices, step: i32) -> Self {
        Self {
            v1: metrics::terrace_lerp(a.v1, b.v1, step),
            v2: metrics::terrace_lerp(a.v2, b.v2, step),
            v3: metrics::terrace_lerp(a.v3, b.v3, step),
            v4: metrics::terrace_lerp(a.v4, b.v4, step),
            v5: metrics::terrace_lerp(a.v5, b.v5, step),
            channel: a.channel && b.channel,
        }
    }

    /// Consecutive point pairs that carry geometry
    pub fn segments(&self) -> Vec<(Vec3, Vec3)> {
        if self.channel {
            vec![
                (self.v1, self.v2),
                (self.v2, self.v3),
                (self.v3, self.v4),
                (self.v4, self.v5),
            ]
        } else {
            vec![(self.v1, self.v5)]
        }
    }
}
