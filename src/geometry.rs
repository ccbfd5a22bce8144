//! Unit cube shared by every renderer and the fracture step.

use cgmath::{Point3, Vector3};

use crate::math::Orientation;

pub struct CubeGeometry;

impl CubeGeometry {
    const VERTICES: [[f32; 3]; 8] = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];

    pub const EDGES: [(usize, usize); 12] = [
        // back face
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        // front face
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        // connectors
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];

    pub const VERTEX_COUNT: usize = Self::VERTICES.len();

    pub fn vertices() -> impl Iterator<Item = Vector3<f32>> {
        Self::VERTICES.into_iter().map(Vector3::from)
    }

    /// Corners of the cube rotated by `orientation` and centred on `center`.
    pub fn placed(center: Point3<f32>, orientation: &Orientation) -> [Point3<f32>; CubeGeometry::VERTEX_COUNT] {
        let mut out = [center; CubeGeometry::VERTEX_COUNT];
        for (slot, v) in out.iter_mut().zip(Self::vertices()) {
            *slot = center + orientation.rotate(v);
        }
        out
    }
}
