// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::aabb::Aabb;
use crate::math::Vec3;

/// Non-hierarchy collision-geometry metadata shared by every model.
///
/// These are the base-layer fields the mesh codec delegates to their own
/// record, ahead of any mesh or hierarchy data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMeta {
    /// Bounds of the geometry in its local frame.
    pub aabb_local: Aabb,
    /// Center of the local bounds.
    pub aabb_center: Vec3,
    /// Radius of the bounding sphere around `aabb_center`.
    pub aabb_radius: f32,
    /// Collision cost density for cost-based queries.
    pub cost_density: f32,
    /// Occupancy threshold above which space counts as occupied.
    pub threshold_occupied: f32,
    /// Occupancy threshold below which space counts as free.
    pub threshold_free: f32,
}

impl GeometryMeta {
    /// Recomputes the local bounds, center, and radius from `points`.
    ///
    /// Leaves the bounds untouched when `points` is empty.
    pub fn refresh_bounds(&mut self, points: &[Vec3]) {
        if points.is_empty() {
            return;
        }
        self.aabb_local = Aabb::from_points(points);
        self.aabb_center = self.aabb_local.center();
        self.aabb_radius = self.aabb_local.max().sub(&self.aabb_center).length();
    }
}

impl Default for GeometryMeta {
    fn default() -> Self {
        Self {
            aabb_local: Aabb::at_point(Vec3::ZERO),
            aabb_center: Vec3::ZERO,
            aabb_radius: 0.0,
            cost_density: 1.0,
            threshold_occupied: 1.0,
            threshold_free: 0.0,
        }
    }
}
