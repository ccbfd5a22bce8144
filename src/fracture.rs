use cgmath::Vector3;
use rand::Rng;

use crate::config::PhysicsParams;
use crate::debris::DebrisSegment;
use crate::geometry::CubeGeometry;
use crate::rigid_body::RigidBody;

/// Shatter `body` into one debris segment per cube edge.
///
/// Endpoints are the body's world-space corners at this instant. Every
/// segment inherits the body's lateral velocity plus jitter and is thrown
/// upward at least `min_upward_speed`, however soft the impact was.
pub fn fracture<R: Rng>(body: &RigidBody, params: &PhysicsParams, rng: &mut R) -> Vec<DebrisSegment> {
    let corners = body.world_vertices(params.depth_offset);
    let d = &params.debris;
    let upward = d.min_upward_speed.max(body.velocity.y.abs());

    CubeGeometry::EDGES
        .iter()
        .map(|&(a, b)| {
            let vx = body.velocity.x + rng.gen_range(-d.lateral_jitter..d.lateral_jitter);
            let vy = upward + rng.gen_range(0.0..d.vertical_bonus);
            let vz = body.velocity.z + rng.gen_range(-d.lateral_jitter..d.lateral_jitter);
            let life = rng.gen_range(d.life_min..d.life_max);
            DebrisSegment::new(corners[a], corners[b], Vector3::new(vx, vy, vz), life)
        })
        .collect()
}
