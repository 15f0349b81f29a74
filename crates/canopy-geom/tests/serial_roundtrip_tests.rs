// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Round-trip tests over the little-endian wire adapter.

use canopy_archive::{WireError, WireReader};
use canopy_geom::math::Vec3;
use canopy_geom::serial::{
    bvh_from_bytes, bvh_to_bytes, decode_mesh_into, mesh_from_bytes, mesh_to_bytes, LoadError,
    SaveError,
};
use canopy_geom::{Aabb, BuildState, BvNode, BvhModel, MeshModel, ModelKind, Triangle};

fn quad_mesh() -> MeshModel {
    let mut mesh = MeshModel::new();
    mesh.begin(2, 4).unwrap();
    mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0)).unwrap();
    mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0)).unwrap();
    mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0)).unwrap();
    mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0)).unwrap();
    mesh.add_triangle(Triangle::new(0, 1, 2)).unwrap();
    mesh.add_triangle(Triangle::new(0, 2, 3)).unwrap();
    mesh.end().unwrap();
    mesh.compute_local_bounds();
    mesh
}

#[test]
fn mesh_roundtrip_preserves_buffers_and_state() {
    let mesh = quad_mesh();
    let bytes = mesh_to_bytes(&mesh).unwrap();
    let decoded = mesh_from_bytes(&bytes).unwrap();

    assert_eq!(decoded.triangles(), mesh.triangles());
    assert_eq!(decoded.vertices(), mesh.vertices());
    assert_eq!(decoded.prev_vertices(), None);
    assert_eq!(decoded.build_state(), BuildState::Processed);
    assert_eq!(decoded.meta(), mesh.meta());
}

#[test]
fn resave_after_roundtrip_is_byte_identical() {
    let mesh = quad_mesh();
    let bytes = mesh_to_bytes(&mesh).unwrap();
    let decoded = mesh_from_bytes(&bytes).unwrap();
    assert_eq!(mesh_to_bytes(&decoded).unwrap(), bytes);
}

#[test]
fn capacity_slack_normalizes_to_logical_counts() {
    let mut mesh = MeshModel::new();
    mesh.begin(32, 64).unwrap();
    mesh.add_vertex(Vec3::ZERO).unwrap();
    mesh.add_vertex(Vec3::new(1.0, 1.0, 1.0)).unwrap();
    mesh.add_triangle(Triangle::new(0, 1, 0)).unwrap();
    mesh.end().unwrap();
    assert_eq!(mesh.tris_allocated(), 32);
    assert_eq!(mesh.verts_allocated(), 64);

    let decoded = mesh_from_bytes(&mesh_to_bytes(&mesh).unwrap()).unwrap();
    assert_eq!(decoded.tris_allocated(), decoded.num_tris());
    assert_eq!(decoded.verts_allocated(), decoded.num_vertices());
}

#[test]
fn save_refuses_unbuilt_models() {
    let empty = MeshModel::new();
    assert!(matches!(
        mesh_to_bytes(&empty),
        Err(SaveError::InvalidState(BuildState::Empty))
    ));

    let mut begun = MeshModel::new();
    begun.begin(0, 1).unwrap();
    begun.add_vertex(Vec3::ZERO).unwrap();
    assert!(matches!(
        mesh_to_bytes(&begun),
        Err(SaveError::InvalidState(BuildState::Begun))
    ));
}

#[test]
fn prev_vertices_roundtrip_exactly() {
    let mut mesh = MeshModel::new();
    mesh.begin(0, 2).unwrap();
    mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0)).unwrap();
    mesh.add_vertex(Vec3::new(1.0, 1.0, 1.0)).unwrap();
    mesh.end().unwrap();
    let next = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)];
    mesh.update_vertices(next).unwrap();

    let decoded = mesh_from_bytes(&mesh_to_bytes(&mesh).unwrap()).unwrap();
    assert_eq!(decoded.build_state(), BuildState::Updated);
    assert_eq!(
        decoded.vertices(),
        &[Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)]
    );
    assert_eq!(
        decoded.prev_vertices().unwrap(),
        &[Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)]
    );
}

#[test]
fn absent_prev_vertices_stay_absent() {
    let mesh = quad_mesh();
    let decoded = mesh_from_bytes(&mesh_to_bytes(&mesh).unwrap()).unwrap();
    assert!(decoded.prev_vertices().is_none());
}

#[test]
fn load_replaces_populated_buffers_without_residue() {
    let source = quad_mesh();
    let bytes = mesh_to_bytes(&source).unwrap();

    // Start from a larger, updated model; the load must fully supplant it.
    let mut target = MeshModel::new();
    target.begin(8, 8).unwrap();
    for i in 0..8 {
        target.add_vertex(Vec3::new(i as f32, 9.0, 9.0)).unwrap();
    }
    for i in 0..6 {
        target.add_triangle(Triangle::new(i, i + 1, i + 2)).unwrap();
    }
    target.end().unwrap();
    let copy: Vec<Vec3> = target.vertices().to_vec();
    target.update_vertices(copy).unwrap();

    let mut r = WireReader::new(&bytes);
    decode_mesh_into(&mut r, &mut target).unwrap();
    assert_eq!(target, source);
    assert!(target.prev_vertices().is_none());
}

#[test]
fn zero_length_model_roundtrips_to_empty_buffers() {
    let mut mesh = MeshModel::new();
    mesh.begin(0, 0).unwrap();
    mesh.end().unwrap();

    let bytes = mesh_to_bytes(&mesh).unwrap();
    let decoded = mesh_from_bytes(&bytes).unwrap();
    assert_eq!(decoded.num_tris(), 0);
    assert_eq!(decoded.num_vertices(), 0);
    assert_eq!(decoded.model_kind(), ModelKind::Unknown);
    assert_eq!(mesh_to_bytes(&decoded).unwrap(), bytes);
}

#[test]
fn convex_presence_is_flag_only() {
    let mut mesh = quad_mesh();
    mesh.build_convex_representation().unwrap();
    let bytes = mesh_to_bytes(&mesh).unwrap();

    // Same model without the companion: the streams differ by one byte.
    let plain = quad_mesh();
    let plain_bytes = mesh_to_bytes(&plain).unwrap();
    assert_eq!(bytes.len(), plain_bytes.len());

    // The companion is never rebuilt from the stream.
    let decoded = mesh_from_bytes(&bytes).unwrap();
    assert!(!decoded.has_convex());
}

#[test]
fn triangles_kind_permutation_uses_triangle_count() {
    let mut model: BvhModel<Aabb> = BvhModel::new();
    *model.base_mut() = quad_mesh();
    let root = BvNode::leaf(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)), 0, 2);
    model.install_hierarchy(Some(vec![0, 1]), Some(vec![root])).unwrap();

    let bytes = bvh_to_bytes(&model).unwrap();
    let decoded: BvhModel<Aabb> = bvh_from_bytes(&bytes).unwrap();
    assert_eq!(decoded.primitive_indices().unwrap(), &[0, 1]);
    assert_eq!(bvh_to_bytes(&decoded).unwrap(), bytes);
}

#[test]
fn point_cloud_kind_permutation_uses_vertex_count() {
    let mut model: BvhModel<Aabb> = BvhModel::new();
    model.base_mut().begin(0, 3).unwrap();
    model.base_mut().add_vertex(Vec3::new(0.0, 0.0, 0.0)).unwrap();
    model.base_mut().add_vertex(Vec3::new(1.0, 0.0, 0.0)).unwrap();
    model.base_mut().add_vertex(Vec3::new(0.0, 1.0, 0.0)).unwrap();
    model.base_mut().end().unwrap();
    model.install_hierarchy(Some(vec![2, 0, 1]), None).unwrap();

    let decoded: BvhModel<Aabb> = bvh_from_bytes(&bvh_to_bytes(&model).unwrap()).unwrap();
    assert_eq!(decoded.base().model_kind(), ModelKind::PointCloud);
    assert_eq!(decoded.primitive_indices().unwrap(), &[2, 0, 1]);
}

#[test]
fn hierarchy_nodes_roundtrip_through_the_node_codec() {
    let mut model: BvhModel<Aabb> = BvhModel::new();
    *model.base_mut() = quad_mesh();
    let bounds = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));
    let nodes = vec![
        BvNode::interior(bounds, 1, 0, 2),
        BvNode::leaf(bounds, 0, 1),
        BvNode::leaf(bounds, 1, 1),
    ];
    model.install_hierarchy(Some(vec![0, 1]), Some(nodes.clone())).unwrap();

    let decoded: BvhModel<Aabb> = bvh_from_bytes(&bvh_to_bytes(&model).unwrap()).unwrap();
    assert_eq!(decoded.nodes().unwrap(), nodes.as_slice());
    assert_eq!(decoded.num_bvs(), 3);
}

#[test]
fn absent_hierarchy_roundtrips_absent() {
    let mut model: BvhModel<Aabb> = BvhModel::new();
    *model.base_mut() = quad_mesh();

    let bytes = bvh_to_bytes(&model).unwrap();
    let decoded: BvhModel<Aabb> = bvh_from_bytes(&bytes).unwrap();
    assert!(decoded.primitive_indices().is_none());
    assert!(decoded.nodes().is_none());
    assert_eq!(bvh_to_bytes(&decoded).unwrap(), bytes);
}

#[test]
fn truncated_stream_surfaces_the_archive_error() {
    let bytes = mesh_to_bytes(&quad_mesh()).unwrap();
    let err = mesh_from_bytes(&bytes[..bytes.len() - 3]).unwrap_err();
    assert!(matches!(err, LoadError::Archive(WireError::ShortRead { .. })));
}

#[test]
fn out_of_domain_build_state_is_rejected() {
    let mut bytes = mesh_to_bytes(&quad_mesh()).unwrap();
    // Layout: 52-byte metadata block, two u32 counts, then the triangle and
    // vertex arrays (2 triangles, 4 vertices), then build_state.
    let offset = 52 + 8 + 2 * 12 + 4 * 12;
    bytes[offset..offset + 4].copy_from_slice(&9u32.to_le_bytes());
    let err = mesh_from_bytes(&bytes).unwrap_err();
    assert_eq!(
        err,
        LoadError::InvalidTag {
            field: "build_state",
            value: 9,
        }
    );
}
