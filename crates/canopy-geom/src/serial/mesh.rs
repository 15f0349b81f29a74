// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mesh-level codec shared by every hierarchy kind.

use canopy_archive::{ArchiveRead, ArchiveWrite};

use crate::model::{BuildState, MeshModel};
use crate::serial::{wire_count, LoadError, SaveError};

/// Saves mesh-level state.
///
/// Refuses models outside `{Processed, Updated}` with
/// [`SaveError::InvalidState`] before writing anything. The two capacity
/// fields are written as the logical counts: reserved headroom on the live
/// model is intentionally dropped from the persisted form.
pub fn encode_mesh<W: ArchiveWrite>(w: &mut W, model: &MeshModel) -> Result<(), SaveError<W::Error>> {
    if !matches!(
        model.build_state(),
        BuildState::Processed | BuildState::Updated
    ) {
        return Err(SaveError::InvalidState(model.build_state()));
    }

    w.put_base("base", model.meta())?;
    let num_tris = wire_count("num_tris", model.num_tris())?;
    let num_vertices = wire_count("num_vertices", model.num_vertices())?;
    w.put_u32("num_tris", num_tris)?;
    w.put_u32("num_vertices", num_vertices)?;
    w.put_array("tri_indices", model.triangles())?;
    w.put_array("vertices", model.vertices())?;
    w.put_u32("build_state", model.build_state() as u32)?;

    w.put_u32("num_tris_allocated", num_tris)?;
    w.put_u32("num_vertices_allocated", num_vertices)?;

    match model.prev_vertices() {
        Some(prev) => {
            w.put_bool("has_prev_vertices", true)?;
            w.put_array("prev_vertices", prev)?;
        }
        None => {
            w.put_bool("has_prev_vertices", false)?;
        }
    }

    w.put_bool("has_convex", model.has_convex())?;
    Ok(())
}

/// Loads mesh-level state into `model`, replacing its buffers.
///
/// Each buffer is rebuilt exact-size from the decoded counts; the prior
/// allocation is dropped when the new one is installed. Capacity counters
/// come straight off the stream rather than through the build lifecycle.
pub fn decode_mesh_into<R: ArchiveRead>(
    r: &mut R,
    model: &mut MeshModel,
) -> Result<(), LoadError<R::Error>> {
    *model.meta_mut() = r.get_base("base")?;

    let num_tris = r.get_u32("num_tris")? as usize;
    let num_vertices = r.get_u32("num_vertices")? as usize;
    model.replace_triangles(r.get_array("tri_indices", num_tris)?);
    model.replace_vertices(r.get_array("vertices", num_vertices)?);
    model.set_build_state(decode_build_state(r.get_u32("build_state")?)?);

    let tris_allocated = r.get_u32("num_tris_allocated")? as usize;
    let verts_allocated = r.get_u32("num_vertices_allocated")? as usize;
    model.set_allocated(tris_allocated, verts_allocated);

    if r.get_bool("has_prev_vertices")? {
        model.replace_prev_vertices(Some(r.get_array("prev_vertices", num_vertices)?));
    } else {
        model.replace_prev_vertices(None);
    }

    // Presence only; the convex companion is never rebuilt from a stream.
    let _has_convex = r.get_bool("has_convex")?;
    Ok(())
}

fn decode_build_state<E>(value: u32) -> Result<BuildState, LoadError<E>> {
    match value {
        0 => Ok(BuildState::Empty),
        1 => Ok(BuildState::Begun),
        2 => Ok(BuildState::Processed),
        3 => Ok(BuildState::Updated),
        _ => Err(LoadError::InvalidTag {
            field: "build_state",
            value,
        }),
    }
}
