//! Ray picking against built chunk meshes
//!
//! Rays are tested against each chunk's bounding box first and then against
//! its triangles with parry3d's ray casting. Only geometry from the most
//! recent [`HexGrid::rebuild_dirty_chunks`] pass is hit.

use glam::Vec3;
use parry3d::bounding_volume::Aabb;
use parry3d::math::{Point, Vector};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::Triangle;

use crate::cell::HexCell;
use crate::grid::HexGrid;
use crate::mesh::MeshData;
use crate::noise::NoiseSource;

/// Nearest intersection of a ray with the terrain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World position of the hit
    pub point: Vec3,
    /// Distance along the normalized ray direction
    pub distance: f32,
    /// Chunk whose mesh was hit
    pub chunk: usize,
}

const BOUNDS_MARGIN: Vec3 = Vec3::splat(1e-2);

fn to_point(v: Vec3) -> Point<f32> {
    Point::new(v.x, v.y, v.z)
}

fn cast_mesh(mesh: &MeshData, ray: &Ray, max_distance: f32) -> Option<f32> {
    mesh.triangles()
        .filter_map(|[a, b, c]| {
            Triangle::new(to_point(a), to_point(b), to_point(c))
                .cast_local_ray(ray, max_distance, true)
        })
        .min_by(|a, b| a.total_cmp(b))
}

impl<N: NoiseSource> HexGrid<N> {
    /// Cast a ray against the terrain and return the nearest hit
    ///
    /// `direction` does not need to be normalized. Returns `None` for a zero
    /// direction or when nothing is hit.
    ///
    /// # Example
    ///
    /// ```
    /// use hex_terrain::*;
    ///
    /// let config = GridConfigBuilder::new().noise_seed(1).build().unwrap();
    /// let mut grid = HexGrid::with_noise(config, FlatNoise::neutral()).unwrap();
    /// grid.rebuild_dirty_chunks();
    ///
    /// let target = grid.cells()[7].position() + Vec3::new(1.0, 0.0, 0.5);
    /// let hit = grid.raycast(target + Vec3::Y * 50.0, -Vec3::Y).unwrap();
    /// assert!((hit.distance - 50.0).abs() < 1e-3);
    /// ```
    pub fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        let ray = Ray::new(to_point(origin), Vector::new(direction.x, direction.y, direction.z));

        let mut nearest: Option<RayHit> = None;
        for chunk in self.chunks() {
            let Some((min, max)) = chunk.bounds() else {
                continue;
            };
            let limit = nearest.map_or(f32::MAX, |hit| hit.distance);
            // Flat chunks have zero-height boxes.
            let aabb = Aabb::new(to_point(min - BOUNDS_MARGIN), to_point(max + BOUNDS_MARGIN));
            if aabb.cast_local_ray(&ray, limit, true).is_none() {
                continue;
            }

            if let Some(distance) = cast_mesh(chunk.mesh(), &ray, limit) {
                if nearest.map_or(true, |hit| distance < hit.distance) {
                    nearest = Some(RayHit {
                        point: origin + direction * distance,
                        distance,
                        chunk: chunk.index(),
                    });
                }
            }
        }
        nearest
    }

    /// Cast a ray and return the cell under the hit point
    ///
    /// This is what an editor uses to turn a mouse click into a cell.
    pub fn pick_cell(&self, origin: Vec3, direction: Vec3) -> Option<&HexCell> {
        let hit = self.raycast(origin, direction)?;
        self.cell_at_position(hit.point)
    }
}
