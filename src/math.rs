use cgmath::Vector3;

/// Rotate `v` about X, then Y, then Z.
///
/// Each stage uses the output of the previous one, so the order matters.
pub fn rotate(v: Vector3<f32>, ax: f32, ay: f32, az: f32) -> Vector3<f32> {
    let (sx, cx) = ax.sin_cos();
    let (sy, cy) = ay.sin_cos();
    let (sz, cz) = az.sin_cos();

    // About X
    let y1 = v.y * cx - v.z * sx;
    let z1 = v.y * sx + v.z * cx;
    let x1 = v.x;

    // About Y
    let x2 = x1 * cy + z1 * sy;
    let z2 = -x1 * sy + z1 * cy;
    let y2 = y1;

    // About Z
    let x3 = x2 * cz - y2 * sz;
    let y3 = x2 * sz + y2 * cz;

    Vector3::new(x3, y3, z2)
}

/// Three accumulated Euler angles in radians.
///
/// The angles grow without bound; they are only ever used through sine and
/// cosine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Orientation after spinning at `rates` (rad/s) for `dt` seconds.
    pub fn advanced(self, rates: Vector3<f32>, dt: f32) -> Self {
        Self::new(
            self.x + rates.x * dt,
            self.y + rates.y * dt,
            self.z + rates.z * dt,
        )
    }

    pub fn rotate(&self, v: Vector3<f32>) -> Vector3<f32> {
        rotate(v, self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_zero_vector_stays_zero() {
        for &(ax, ay, az) in &[(0.0, 0.0, 0.0), (1.0, 2.0, 3.0), (-7.5, 100.0, 0.25)] {
            let r = rotate(Vector3::new(0.0, 0.0, 0.0), ax, ay, az);
            assert_eq!(r, Vector3::new(0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_quarter_turn_about_x() {
        let r = rotate(Vector3::new(0.0, 1.0, 0.0), FRAC_PI_2, 0.0, 0.0);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let r = rotate(Vector3::new(1.0, 0.0, 0.0), 0.0, FRAC_PI_2, 0.0);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let r = rotate(Vector3::new(1.0, 0.0, 0.0), 0.0, 0.0, FRAC_PI_2);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_x_is_applied_before_y() {
        // X then Y sends +Y to +Z and then to +X.
        let r = rotate(Vector3::new(0.0, 1.0, 0.0), FRAC_PI_2, FRAC_PI_2, 0.0);
        assert_relative_eq!(r.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(r.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = Vector3::new(1.0, -1.0, 1.0);
        let r = rotate(v, 0.3, 1.7, -2.2);
        let len = |a: Vector3<f32>| (a.x * a.x + a.y * a.y + a.z * a.z).sqrt();
        assert_relative_eq!(len(r), len(v), epsilon = 1e-5);
    }

    #[test]
    fn test_orientation_advances_linearly() {
        let o = Orientation::default().advanced(Vector3::new(1.5, 0.9, 1.1), 0.5);
        assert_relative_eq!(o.x, 0.75);
        assert_relative_eq!(o.y, 0.45);
        assert_relative_eq!(o.z, 0.55);
    }
}
