use cgmath::Point3;

use crate::config::{CameraParams, ViewportParams};
use crate::error::SceneError;

/// Size of the character grid in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    /// Clamp `width`/`height` up to the configured minimums.
    ///
    /// Fails only when a dimension is still zero afterwards, which can happen
    /// when the minimums themselves are configured as zero.
    pub fn clamped(width: usize, height: usize, limits: &ViewportParams) -> Result<Self, SceneError> {
        let width = width.max(limits.min_width);
        let height = height.max(limits.min_height);
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
}

/// A cell position on screen, column then row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// Pinhole camera on the Z axis looking along +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub proj_k: f32,
    pub camera_z: f32,
    pub near_plane: f32,
}

impl From<CameraParams> for Camera {
    fn from(params: CameraParams) -> Self {
        Self {
            proj_k: params.proj_k,
            camera_z: params.camera_z,
            near_plane: params.near_plane,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        CameraParams::default().into()
    }
}

impl Camera {
    /// Project a world point to a cell of `viewport`.
    ///
    /// Returns `None` for points at or inside the near plane and for points
    /// that land outside the grid. No other clipping is done.
    pub fn project(&self, p: Point3<f32>, viewport: Viewport) -> Option<ScreenPoint> {
        let z_cam = p.z - self.camera_z;
        if !z_cam.is_finite() || z_cam <= self.near_plane {
            return None;
        }

        let cx = viewport.width as f32 / 2.0;
        let cy = viewport.height as f32 / 2.0;

        // Screen rows grow downward, so Y flips.
        let sx = (cx + p.x / z_cam * self.proj_k).round();
        let sy = (cy - p.y / z_cam * self.proj_k).round();

        if !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        if sx < 0.0 || sy < 0.0 || sx >= viewport.width as f32 || sy >= viewport.height as f32 {
            return None;
        }
        Some(ScreenPoint {
            x: sx as i32,
            y: sy as i32,
        })
    }
}
