// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::Vec3;
use crate::triangle::Triangle;

/// Convex companion object for a mesh model.
///
/// Holds a snapshot of the mesh's points and faces for callers that want a
/// convex stand-in. The serialization protocol records only its *presence*
/// (`has_convex`): no hull payload is written and none is rebuilt on load.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    points: Vec<Vec3>,
    triangles: Vec<Triangle>,
}

impl ConvexHull {
    /// Snapshots a mesh's buffers into a companion hull.
    pub fn from_mesh(points: &[Vec3], triangles: &[Triangle]) -> Self {
        Self {
            points: points.to_vec(),
            triangles: triangles.to_vec(),
        }
    }

    /// Returns the hull points.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the hull faces.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}
