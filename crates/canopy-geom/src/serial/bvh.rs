// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hierarchy-layer codec, generic over the bounding-volume representation.

use canopy_archive::{ArchiveRead, ArchiveWrite, Record};

use crate::model::{kind_primitive_count, BvhModel};
use crate::serial::{decode_mesh_into, encode_mesh, wire_count, LoadError, SaveError};

/// Saves a hierarchy model: mesh-level state first, then the BVH layer.
///
/// The permutation's persisted length is derived from the model kind, not
/// from the buffer; a permutation shorter than the kind-derived count is a
/// construction defect reported as [`SaveError::PrimitiveCount`]. No
/// capacity mirrors exist at this layer — hierarchy buffers always
/// round-trip to exact-fit allocations.
pub fn encode_bvh<W: ArchiveWrite, BV: Record>(
    w: &mut W,
    model: &BvhModel<BV>,
) -> Result<(), SaveError<W::Error>> {
    encode_mesh(w, model.base())?;

    match model.primitive_indices() {
        Some(indices) => {
            w.put_bool("with_primitive_indices", true)?;
            let num_primitives = kind_primitive_count(model.base());
            w.put_u32("num_primitives", wire_count("num_primitives", num_primitives)?)?;
            if num_primitives > 0 {
                let covered = indices.get(..num_primitives).ok_or_else(|| {
                    SaveError::PrimitiveCount {
                        expected: num_primitives,
                        actual: indices.len(),
                    }
                })?;
                w.put_array("primitive_indices", covered)?;
            }
        }
        None => {
            w.put_bool("with_primitive_indices", false)?;
        }
    }

    match model.nodes() {
        Some(nodes) => {
            w.put_bool("with_bvs", true)?;
            w.put_u32("num_bvs", wire_count("num_bvs", nodes.len())?)?;
            w.put_array("bvs", nodes)?;
        }
        None => {
            w.put_bool("with_bvs", false)?;
        }
    }
    Ok(())
}

/// Loads a hierarchy model into `model`: mesh-level state first, then the
/// BVH layer.
///
/// A zero decoded count yields an absent buffer, never an empty allocation
/// with payload reads. A false presence flag leaves the corresponding slot
/// untouched.
pub fn decode_bvh_into<R: ArchiveRead, BV: Record>(
    r: &mut R,
    model: &mut BvhModel<BV>,
) -> Result<(), LoadError<R::Error>> {
    decode_mesh_into(r, model.base_mut())?;

    if r.get_bool("with_primitive_indices")? {
        let num_primitives = r.get_u32("num_primitives")? as usize;
        if num_primitives > 0 {
            model.replace_primitive_indices(Some(r.get_array("primitive_indices", num_primitives)?));
        } else {
            model.replace_primitive_indices(None);
        }
    }

    if r.get_bool("with_bvs")? {
        let num_bvs = r.get_u32("num_bvs")? as usize;
        if num_bvs > 0 {
            model.replace_nodes(Some(r.get_array("bvs", num_bvs)?));
        } else {
            model.replace_nodes(None);
        }
    }
    Ok(())
}
