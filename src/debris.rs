use cgmath::{Point3, Vector3};

/// One cube edge flying free after the fracture.
///
/// Both endpoints share a velocity but are clamped to the floor on their own,
/// so a segment can squash against the floor. It is not a rigid rod.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebrisSegment {
    pub p0: Point3<f32>,
    pub p1: Point3<f32>,
    pub velocity: Vector3<f32>,
    /// Seconds left before the segment disappears
    pub life: f32,
}

impl DebrisSegment {
    pub fn new(p0: Point3<f32>, p1: Point3<f32>, velocity: Vector3<f32>, life: f32) -> DebrisSegment {
        DebrisSegment {
            p0,
            p1,
            velocity,
            life,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// The segment `dt` seconds later.
    pub fn advanced(&self, dt: f32, gravity: f32, floor_y: f32) -> DebrisSegment {
        let velocity = self.velocity + Vector3::new(0.0, gravity * dt, 0.0);
        DebrisSegment {
            p0: clamp_to_floor(self.p0 + velocity * dt, floor_y),
            p1: clamp_to_floor(self.p1 + velocity * dt, floor_y),
            velocity,
            life: self.life - dt,
        }
    }
}

fn clamp_to_floor(p: Point3<f32>, floor_y: f32) -> Point3<f32> {
    if p.y < floor_y {
        Point3::new(p.x, floor_y, p.z)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GRAVITY: f32 = -9.8;
    const FLOOR: f32 = -3.0;

    #[test]
    fn test_endpoints_share_velocity() {
        let seg = DebrisSegment::new(
            Point3::new(0.0, 0.0, 8.0),
            Point3::new(1.0, 1.0, 8.0),
            Vector3::new(2.0, 5.0, -1.0),
            4.0,
        );
        let next = seg.advanced(0.1, GRAVITY, FLOOR);

        assert_relative_eq!(next.velocity.y, 4.02, epsilon = 1e-5);
        assert_relative_eq!(next.p0.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(next.p0.y, 0.402, epsilon = 1e-5);
        assert_relative_eq!(next.p1.y, 1.402, epsilon = 1e-5);
        assert_relative_eq!(next.p1.z, 7.9, epsilon = 1e-5);
        assert_relative_eq!(next.life, 3.9, epsilon = 1e-6);
    }

    #[test]
    fn test_endpoints_clamp_independently() {
        let seg = DebrisSegment::new(
            Point3::new(0.0, -2.95, 8.0),
            Point3::new(0.0, -1.0, 8.0),
            Vector3::new(0.0, -2.0, 0.0),
            4.0,
        );
        let next = seg.advanced(0.1, GRAVITY, FLOOR);

        assert_eq!(next.p0.y, FLOOR);
        assert!(next.p1.y > FLOOR);
        // The segment got shorter.
        assert!(next.p1.y - next.p0.y < seg.p1.y - seg.p0.y);
    }

    #[test]
    fn test_short_life_expires_after_one_tick() {
        let seg = DebrisSegment::new(
            Point3::new(0.0, 0.0, 8.0),
            Point3::new(1.0, 0.0, 8.0),
            Vector3::new(0.0, 0.0, 0.0),
            0.001,
        );
        assert!(seg.is_alive());
        assert!(!seg.advanced(0.1, GRAVITY, FLOOR).is_alive());
    }
}
