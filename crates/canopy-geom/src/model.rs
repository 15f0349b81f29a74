// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mesh and hierarchy model containers.

use thiserror::Error;

use crate::convex::ConvexHull;
use crate::math::Vec3;
use crate::meta::GeometryMeta;
use crate::node::BvNode;
use crate::triangle::Triangle;

/// Lifecycle tag for a model's hierarchy.
///
/// Only `Processed` and `Updated` models are serializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum BuildState {
    /// Nothing has been built yet.
    #[default]
    Empty = 0,
    /// A begin/add/end build sequence is underway.
    Begun = 1,
    /// A full build has completed.
    Processed = 2,
    /// Vertices were replaced (refit-style) since the last full build.
    Updated = 3,
}

/// Semantic kind of the model's primitives, derived from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Triangles over a vertex buffer.
    Triangles,
    /// Vertices only.
    PointCloud,
    /// Neither; the model has no primitives to index.
    Unknown,
}

/// Error raised by the build lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The operation is not legal in the model's current state.
    #[error("`{op}` is not valid in build state {state:?}")]
    InvalidTransition {
        /// Operation that was attempted.
        op: &'static str,
        /// State the model was in.
        state: BuildState,
    },
    /// A replacement vertex buffer had the wrong length.
    #[error("vertex buffer length mismatch: expected {expected}, got {got}")]
    VertexCount {
        /// The model's vertex count.
        expected: usize,
        /// Length of the buffer offered.
        got: usize,
    },
    /// A primitive-index permutation had the wrong length for the model kind.
    #[error("primitive permutation length mismatch: kind requires {expected}, got {got}")]
    PrimitiveCount {
        /// Count derived from the model kind.
        expected: usize,
        /// Length of the permutation offered.
        got: usize,
    },
}

/// Mesh-level model state shared by every hierarchy kind.
///
/// Owns its buffers exclusively. The capacity counters track reserved
/// headroom independently of the logical counts; the serialization layer
/// collapses them to the logical counts on every round trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshModel {
    meta: GeometryMeta,
    triangles: Vec<Triangle>,
    vertices: Vec<Vec3>,
    prev_vertices: Option<Vec<Vec3>>,
    build_state: BuildState,
    tris_allocated: usize,
    verts_allocated: usize,
    convex: Option<ConvexHull>,
}

impl MeshModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collision-geometry metadata.
    pub fn meta(&self) -> &GeometryMeta {
        &self.meta
    }

    /// Mutable access to the collision-geometry metadata.
    pub fn meta_mut(&mut self) -> &mut GeometryMeta {
        &mut self.meta
    }

    /// Returns the triangle buffer.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns the vertex buffer.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Returns the previous-frame vertex buffer, when one exists.
    ///
    /// When present it always holds exactly [`Self::num_vertices`] entries.
    pub fn prev_vertices(&self) -> Option<&[Vec3]> {
        self.prev_vertices.as_deref()
    }

    /// Number of triangles.
    pub fn num_tris(&self) -> usize {
        self.triangles.len()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Current lifecycle state.
    pub fn build_state(&self) -> BuildState {
        self.build_state
    }

    /// Reserved triangle headroom (≥ the logical count on a live build).
    pub fn tris_allocated(&self) -> usize {
        self.tris_allocated
    }

    /// Reserved vertex headroom (≥ the logical count on a live build).
    pub fn verts_allocated(&self) -> usize {
        self.verts_allocated
    }

    /// Kind of primitive this model indexes, derived from content.
    pub fn model_kind(&self) -> ModelKind {
        if !self.triangles.is_empty() && !self.vertices.is_empty() {
            ModelKind::Triangles
        } else if !self.vertices.is_empty() {
            ModelKind::PointCloud
        } else {
            ModelKind::Unknown
        }
    }

    /// Returns the convex companion, when one has been built.
    pub fn convex(&self) -> Option<&ConvexHull> {
        self.convex.as_ref()
    }

    /// Whether a convex companion is attached.
    pub fn has_convex(&self) -> bool {
        self.convex.is_some()
    }

    /// Starts a build, reserving buffer headroom.
    ///
    /// The reservations become the capacity counters; adding past them grows
    /// by doubling. Only legal on an `Empty` model — [`Self::clear`] first to
    /// rebuild.
    pub fn begin(&mut self, reserve_tris: usize, reserve_verts: usize) -> Result<(), BuildError> {
        if self.build_state != BuildState::Empty {
            return Err(BuildError::InvalidTransition {
                op: "begin",
                state: self.build_state,
            });
        }
        self.triangles.reserve(reserve_tris);
        self.vertices.reserve(reserve_verts);
        self.tris_allocated = reserve_tris;
        self.verts_allocated = reserve_verts;
        self.build_state = BuildState::Begun;
        Ok(())
    }

    /// Appends a vertex to a build in progress.
    pub fn add_vertex(&mut self, v: Vec3) -> Result<(), BuildError> {
        if self.build_state != BuildState::Begun {
            return Err(BuildError::InvalidTransition {
                op: "add_vertex",
                state: self.build_state,
            });
        }
        if self.vertices.len() == self.verts_allocated {
            self.verts_allocated = (self.verts_allocated * 2).max(1);
            self.vertices.reserve(self.verts_allocated - self.vertices.len());
        }
        self.vertices.push(v);
        Ok(())
    }

    /// Appends a triangle to a build in progress.
    pub fn add_triangle(&mut self, t: Triangle) -> Result<(), BuildError> {
        if self.build_state != BuildState::Begun {
            return Err(BuildError::InvalidTransition {
                op: "add_triangle",
                state: self.build_state,
            });
        }
        if self.triangles.len() == self.tris_allocated {
            self.tris_allocated = (self.tris_allocated * 2).max(1);
            self.triangles.reserve(self.tris_allocated - self.triangles.len());
        }
        self.triangles.push(t);
        Ok(())
    }

    /// Finishes a build: `Begun → Processed`.
    ///
    /// Logical counts freeze; reservation slack stays on the live model. Only
    /// the persisted form normalizes capacity down to the logical counts.
    pub fn end(&mut self) -> Result<(), BuildError> {
        if self.build_state != BuildState::Begun {
            return Err(BuildError::InvalidTransition {
                op: "end",
                state: self.build_state,
            });
        }
        self.build_state = BuildState::Processed;
        Ok(())
    }

    /// Replaces the vertex buffer with a same-length one: `→ Updated`.
    ///
    /// The outgoing vertices become the previous-frame buffer.
    pub fn update_vertices(&mut self, new_vertices: Vec<Vec3>) -> Result<(), BuildError> {
        if !matches!(self.build_state, BuildState::Processed | BuildState::Updated) {
            return Err(BuildError::InvalidTransition {
                op: "update_vertices",
                state: self.build_state,
            });
        }
        if new_vertices.len() != self.vertices.len() {
            return Err(BuildError::VertexCount {
                expected: self.vertices.len(),
                got: new_vertices.len(),
            });
        }
        let old = core::mem::replace(&mut self.vertices, new_vertices);
        self.prev_vertices = Some(old);
        self.build_state = BuildState::Updated;
        Ok(())
    }

    /// Recomputes the metadata bounds from the current vertices.
    pub fn compute_local_bounds(&mut self) {
        self.meta.refresh_bounds(&self.vertices);
    }

    /// Attaches a convex companion snapshotting the current mesh.
    pub fn build_convex_representation(&mut self) -> Result<(), BuildError> {
        if !matches!(self.build_state, BuildState::Processed | BuildState::Updated) {
            return Err(BuildError::InvalidTransition {
                op: "build_convex_representation",
                state: self.build_state,
            });
        }
        self.convex = Some(ConvexHull::from_mesh(&self.vertices, &self.triangles));
        Ok(())
    }

    /// Drops all buffers and companions and returns to `Empty`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Hierarchy model: a mesh plus the BVH layer, generic over the
/// bounding-volume representation stored in its nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct BvhModel<BV> {
    base: MeshModel,
    primitive_indices: Option<Vec<u32>>,
    nodes: Option<Vec<BvNode<BV>>>,
}

// Manual impl: an empty model needs no BV value, so no `BV: Default` bound.
impl<BV> Default for BvhModel<BV> {
    fn default() -> Self {
        Self {
            base: MeshModel::new(),
            primitive_indices: None,
            nodes: None,
        }
    }
}

impl<BV> BvhModel<BV> {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mesh-level state.
    pub fn base(&self) -> &MeshModel {
        &self.base
    }

    /// Mutable access to the mesh-level state (build lifecycle).
    pub fn base_mut(&mut self) -> &mut MeshModel {
        &mut self.base
    }

    /// Returns the primitive-index permutation, when present.
    pub fn primitive_indices(&self) -> Option<&[u32]> {
        self.primitive_indices.as_deref()
    }

    /// Returns the hierarchy nodes, when present.
    pub fn nodes(&self) -> Option<&[BvNode<BV>]> {
        self.nodes.as_deref()
    }

    /// Number of hierarchy nodes (zero when absent).
    pub fn num_bvs(&self) -> usize {
        self.nodes.as_ref().map_or(0, Vec::len)
    }

    /// Installs hierarchy data produced by an external builder.
    ///
    /// A present permutation must hold exactly one entry per primitive of the
    /// current model kind (triangle count for `Triangles`, vertex count for
    /// `PointCloud`, zero otherwise).
    pub fn install_hierarchy(
        &mut self,
        primitive_indices: Option<Vec<u32>>,
        nodes: Option<Vec<BvNode<BV>>>,
    ) -> Result<(), BuildError> {
        if let Some(indices) = &primitive_indices {
            let expected = kind_primitive_count(&self.base);
            if indices.len() != expected {
                return Err(BuildError::PrimitiveCount {
                    expected,
                    got: indices.len(),
                });
            }
        }
        self.primitive_indices = primitive_indices;
        self.nodes = nodes;
        Ok(())
    }
}

/// Primitive count implied by a mesh's model kind.
pub(crate) fn kind_primitive_count(mesh: &MeshModel) -> usize {
    match mesh.model_kind() {
        ModelKind::Triangles => mesh.num_tris(),
        ModelKind::PointCloud => mesh.num_vertices(),
        ModelKind::Unknown => 0,
    }
}

// ---------------------------------------------------------------------------
// Bookkeeping access reserved for the serialization layer.
//
// Decode reconstructs final state wholesale; routing it through the build
// lifecycle would re-derive capacity under incremental-growth rules. These
// setters stay `pub(crate)` so no application code can reach them.
// ---------------------------------------------------------------------------

impl MeshModel {
    pub(crate) fn replace_triangles(&mut self, triangles: Vec<Triangle>) {
        self.triangles = triangles;
    }

    pub(crate) fn replace_vertices(&mut self, vertices: Vec<Vec3>) {
        self.vertices = vertices;
    }

    pub(crate) fn replace_prev_vertices(&mut self, prev: Option<Vec<Vec3>>) {
        self.prev_vertices = prev;
    }

    pub(crate) fn set_build_state(&mut self, state: BuildState) {
        self.build_state = state;
    }

    pub(crate) fn set_allocated(&mut self, tris: usize, verts: usize) {
        self.tris_allocated = tris;
        self.verts_allocated = verts;
    }
}

impl<BV> BvhModel<BV> {
    pub(crate) fn replace_primitive_indices(&mut self, indices: Option<Vec<u32>>) {
        self.primitive_indices = indices;
    }

    pub(crate) fn replace_nodes(&mut self, nodes: Option<Vec<BvNode<BV>>>) {
        self.nodes = nodes;
    }
}
