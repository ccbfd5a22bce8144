use cgmath::{Point3, Vector3};

use crate::config::{PhysicsParams, SpawnState};
use crate::geometry::CubeGeometry;
use crate::math::Orientation;

/// The intact cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    // Linear
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,

    // Angular
    pub orientation: Orientation,
    pub angular_velocity: Vector3<f32>,
}

/// Floor contact reported by [`RigidBody::advanced`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Vertical speed just before the bounce
    pub speed: f32,
}

impl RigidBody {
    pub fn new(position: Point3<f32>, velocity: Vector3<f32>, angular_velocity: Vector3<f32>) -> RigidBody {
        RigidBody {
            position,
            velocity,
            orientation: Orientation::default(),
            angular_velocity,
        }
    }

    pub fn from_spawn(spawn: &SpawnState) -> RigidBody {
        RigidBody::new(spawn.position(), spawn.velocity(), spawn.angular_velocity())
    }

    /// The body `dt` seconds later, plus the floor impact if one happened.
    ///
    /// Spin is constant, gravity acts on velocity before position is
    /// integrated. On contact the body is pushed back onto the floor, its
    /// vertical speed is reflected and scaled by the restitution and its
    /// lateral speed is damped.
    pub fn advanced(&self, dt: f32, params: &PhysicsParams) -> (RigidBody, Option<Impact>) {
        let orientation = self.orientation.advanced(self.angular_velocity, dt);
        let velocity = self.velocity + Vector3::new(0.0, params.gravity * dt, 0.0);
        let position = self.position + velocity * dt;

        let next = RigidBody {
            position,
            velocity,
            orientation,
            angular_velocity: self.angular_velocity,
        };

        if position.y - params.half_extent > params.floor_y {
            return (next, None);
        }

        let impact = Impact {
            speed: velocity.y.abs(),
        };
        let bounced = RigidBody {
            position: Point3::new(position.x, params.floor_y + params.half_extent, position.z),
            velocity: Vector3::new(
                velocity.x * params.lateral_damping,
                -velocity.y * params.restitution,
                velocity.z * params.lateral_damping,
            ),
            ..next
        };
        (bounced, Some(impact))
    }

    /// Cube corners in world space, pushed `depth_offset` away from the camera.
    pub fn world_vertices(&self, depth_offset: f32) -> [Point3<f32>; CubeGeometry::VERTEX_COUNT] {
        let center = self.position + Vector3::new(0.0, 0.0, depth_offset);
        CubeGeometry::placed(center, &self.orientation)
    }
}
