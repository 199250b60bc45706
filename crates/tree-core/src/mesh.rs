//! Static geometry and material descriptors handed to the renderer.

use crate::curve::CatmullRomCurve;
use glam::{Quat, Vec3};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    #[inline]
    fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Geometry descriptors used by the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Needle,
    Ornament,
    Bead,
    Panel,
    Garland,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDesc {
    pub color: [f32; 3],
    /// Added on top of lit colour, 0 = none.
    pub emissive: f32,
}

impl MaterialDesc {
    pub const fn new(color: [f32; 3], emissive: f32) -> Self {
        Self { color, emissive }
    }
}

/// Axis-aligned box with per-face normals.
pub fn cuboid(half: Vec3) -> MeshData {
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::NEG_Z),
        (Vec3::NEG_X, Vec3::Y, Vec3::Z),
        (Vec3::Y, Vec3::NEG_Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::Z, Vec3::X),
        (Vec3::Z, Vec3::Y, Vec3::X),
        (Vec3::NEG_Z, Vec3::Y, Vec3::NEG_X),
    ];
    let mut mesh = MeshData::default();
    for (normal, up, right) in faces {
        let base = mesh.vertices.len() as u32;
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (sx, sy) in corners {
            let p = (normal + right * sx + up * sy) * half;
            mesh.vertices.push(Vertex::new(p, normal, [(sx + 1.0) * 0.5, (1.0 - sy) * 0.5]));
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Latitude/longitude sphere.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = MeshData::default();
    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let phi = v * PI;
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let theta = u * TAU;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.vertices.push(Vertex::new(n * radius, n, [u, v]));
        }
    }
    let stride = segments + 1;
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Quad in the local XY plane facing +Z; uv (0,0) is the top-left corner.
pub fn panel_quad(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let vertices = vec![
        Vertex::new(Vec3::new(-hw, -hh, 0.0), Vec3::Z, [0.0, 1.0]),
        Vertex::new(Vec3::new(hw, -hh, 0.0), Vec3::Z, [1.0, 1.0]),
        Vertex::new(Vec3::new(hw, hh, 0.0), Vec3::Z, [1.0, 0.0]),
        Vertex::new(Vec3::new(-hw, hh, 0.0), Vec3::Z, [0.0, 0.0]),
    ];
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Tube swept along `curve` with parallel-transport frames (no twisting at inflections).
pub fn tube(
    curve: &CatmullRomCurve,
    tubular_segments: u32,
    radius: f32,
    radial_segments: u32,
) -> MeshData {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);

    let mut tangent = curve.tangent_at(0.0);
    let seed_axis = if tangent.x.abs() < 0.9 { Vec3::X } else { Vec3::Z };
    let mut normal = tangent.cross(seed_axis).normalize();

    let mut mesh = MeshData::default();
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32;
        let center = curve.point_at(u);
        let next_tangent = curve.tangent_at(u);
        let axis = tangent.cross(next_tangent);
        if axis.length_squared() > 1e-12 {
            let angle = tangent.dot(next_tangent).clamp(-1.0, 1.0).acos();
            normal = (Quat::from_axis_angle(axis.normalize(), angle) * normal).normalize();
        }
        tangent = next_tangent;
        let binormal = tangent.cross(normal);

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32;
            let a = v * TAU;
            let n = (normal * a.cos() + binormal * a.sin()).normalize();
            mesh.vertices.push(Vertex::new(center + n * radius, n, [u, v]));
        }
    }
    let stride = radial_segments + 1;
    for i in 0..tubular_segments {
        for j in 0..radial_segments {
            let a = i * stride + j;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    mesh
}
