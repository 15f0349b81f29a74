// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hierarchical collision-geometry models and their archive codecs.
//!
//! A [`MeshModel`] owns the mesh-level buffers shared by every hierarchy
//! kind: triangle indices, vertex positions, and the optional previous-frame
//! vertices used by refit-style updates. A [`BvhModel`] wraps a mesh model
//! and adds the hierarchy layer, generic over the bounding-volume
//! representation stored in its nodes.
//!
//! # Design
//!
//! - Models are containers: hierarchy construction and geometric queries
//!   live with the callers that need them. [`BvhModel::install_hierarchy`]
//!   is the seam through which a builder hands over its results.
//! - Serialization is a faithful container round-trip, not a geometry
//!   validator. The [`serial`] module holds the codecs and is the only code
//!   path that may replace a model's buffers during decode.
//! - The archive a codec talks to is abstract; see `canopy-archive` for the
//!   contract and the reference adapters.

mod aabb;
mod convex;
pub mod math;
mod meta;
mod model;
mod node;
pub mod serial;
mod triangle;

pub use aabb::Aabb;
pub use convex::ConvexHull;
pub use meta::GeometryMeta;
pub use model::{BuildError, BuildState, BvhModel, MeshModel, ModelKind};
pub use node::BvNode;
pub use triangle::Triangle;
