// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Archive codecs for mesh and hierarchy models.
//!
//! Field names and write order are the persisted layout; save and load walk
//! the identical sequence so the protocol works over order-only archives
//! (the wire adapter) and name-checked ones (the tape adapter) alike.
//!
//! Save never mutates and refuses models outside a serializable build
//! state before writing anything. Load is the only buffer mutator: each
//! owned buffer is replaced by an exact-size decoded one, dropping the
//! prior allocation exactly once. A load that fails partway leaves the
//! target partially overwritten; the byte-level helpers below sidestep
//! that by decoding into a fresh model.
//!
//! Counts read from a stream are trusted as-is — no bounds are imposed
//! before allocating. Hardening against adversarial counts is a deliberate
//! non-feature for now.

mod bvh;
mod mesh;
mod records;
mod volume;

pub use bvh::{decode_bvh_into, encode_bvh};
pub use mesh::{decode_mesh_into, encode_mesh};

use canopy_archive::{Record, WireError, WireReader, WireWriter};
use thiserror::Error;

use crate::model::{BuildState, BvhModel, MeshModel};

/// Error raised while saving a model.
///
/// Archive stream errors pass through unwrapped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError<E> {
    /// The model has no completed hierarchy to persist.
    #[error("build state {0:?} is not serializable")]
    InvalidState(BuildState),
    /// A buffer is too large for the wire's 32-bit counts.
    #[error("`{field}` exceeds the wire count range")]
    CountOverflow {
        /// Count field that overflowed.
        field: &'static str,
    },
    /// The primitive permutation is shorter than the kind-derived count.
    #[error("primitive permutation holds {actual} entries, model kind requires {expected}")]
    PrimitiveCount {
        /// Count derived from the model kind.
        expected: usize,
        /// Entries actually present.
        actual: usize,
    },
    /// The archive failed to accept a field.
    #[error(transparent)]
    Archive(#[from] E),
}

/// Error raised while loading a model.
///
/// Archive stream errors pass through unwrapped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError<E> {
    /// An enum field carried a tag outside its domain.
    #[error("invalid `{field}` tag {value}")]
    InvalidTag {
        /// Field whose tag was out of domain.
        field: &'static str,
        /// The tag value read.
        value: u32,
    },
    /// The archive failed to produce a field.
    #[error(transparent)]
    Archive(#[from] E),
}

pub(crate) fn wire_count<E>(field: &'static str, len: usize) -> Result<u32, SaveError<E>> {
    u32::try_from(len).map_err(|_| SaveError::CountOverflow { field })
}

/// Saves a mesh model to wire bytes.
pub fn mesh_to_bytes(model: &MeshModel) -> Result<Vec<u8>, SaveError<WireError>> {
    let mut w = WireWriter::new();
    encode_mesh(&mut w, model)?;
    Ok(w.into_bytes())
}

/// Loads a fresh mesh model from wire bytes.
pub fn mesh_from_bytes(bytes: &[u8]) -> Result<MeshModel, LoadError<WireError>> {
    let mut r = WireReader::new(bytes);
    let mut model = MeshModel::new();
    decode_mesh_into(&mut r, &mut model)?;
    Ok(model)
}

/// Saves a hierarchy model to wire bytes.
pub fn bvh_to_bytes<BV: Record>(model: &BvhModel<BV>) -> Result<Vec<u8>, SaveError<WireError>> {
    let mut w = WireWriter::new();
    encode_bvh(&mut w, model)?;
    Ok(w.into_bytes())
}

/// Loads a fresh hierarchy model from wire bytes.
pub fn bvh_from_bytes<BV: Record>(bytes: &[u8]) -> Result<BvhModel<BV>, LoadError<WireError>> {
    let mut r = WireReader::new(bytes);
    let mut model = BvhModel::new();
    decode_bvh_into(&mut r, &mut model)?;
    Ok(model)
}
