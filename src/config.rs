//! Configuration system
//!
//! Every tunable of a scene lives here and is owned by that scene, so any
//! number of independent scenes can run side by side. All tables are
//! optional in the TOML file; missing keys fall back to the defaults below.

use std::path::Path;

use cgmath::{Point3, Vector3};
use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level scene configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub viewport: ViewportParams,
    pub camera: CameraParams,
    pub physics: PhysicsParams,
    pub spawn: SpawnState,
    pub rotation: RotationParams,
    pub render: RenderParams,
    /// Fixed seed for the fracture RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl SceneConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the integrator or the projection cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("camera.proj_k", self.camera.proj_k)?;
        positive("camera.near_plane", self.camera.near_plane)?;
        finite("camera.camera_z", self.camera.camera_z)?;

        let p = &self.physics;
        finite("physics.gravity", p.gravity)?;
        finite("physics.floor_y", p.floor_y)?;
        finite("physics.depth_offset", p.depth_offset)?;
        positive("physics.half_extent", p.half_extent)?;
        positive("physics.break_speed", p.break_speed)?;
        unit_interval("physics.restitution", p.restitution)?;
        unit_interval("physics.lateral_damping", p.lateral_damping)?;

        let d = &self.physics.debris;
        if !(d.life_min.is_finite() && d.life_max.is_finite() && 0.0 < d.life_min && d.life_min < d.life_max) {
            return Err(ConfigError::Invalid(format!(
                "physics.debris life range [{}, {}) is empty",
                d.life_min, d.life_max
            )));
        }
        positive("physics.debris.lateral_jitter", d.lateral_jitter)?;
        positive("physics.debris.vertical_bonus", d.vertical_bonus)?;
        finite("physics.debris.min_upward_speed", d.min_upward_speed)?;

        finite_all("spawn.position", &self.spawn.position)?;
        finite_all("spawn.velocity", &self.spawn.velocity)?;
        finite_all("spawn.angular_velocity", &self.spawn.angular_velocity)?;
        finite_all("rotation.rates", &self.rotation.rates)?;
        finite_all("rotation.center", &self.rotation.center)?;
        finite("render.floor_near_gap", self.render.floor_near_gap)?;
        finite("render.floor_spacing", self.render.floor_spacing)?;

        Ok(())
    }
}

fn finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")))
    }
}

fn finite_all(name: &str, values: &[f32]) -> Result<(), ConfigError> {
    values.iter().try_for_each(|&v| finite(name, v))
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

fn unit_interval(name: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must lie in [0, 1], got {value}")))
    }
}

/// Character grid size and the minimums it is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewportParams {
    pub width: usize,
    pub height: usize,
    pub min_width: usize,
    pub min_height: usize,
}

impl Default for ViewportParams {
    fn default() -> Self {
        Self {
            width: 100,
            height: 30,
            min_width: 40,
            min_height: 20,
        }
    }
}

/// Pinhole camera fixed on the Z axis, looking along +Z
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Perspective scale (focal length analog)
    pub proj_k: f32,
    pub camera_z: f32,
    /// Points this close to the camera or behind it are invisible
    pub near_plane: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            proj_k: 35.0,
            camera_z: 0.0,
            near_plane: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    pub gravity: f32,
    /// Fraction of vertical speed kept (sign reversed) after a bounce
    pub restitution: f32,
    /// Multiplier on lateral speed at each bounce
    pub lateral_damping: f32,
    pub half_extent: f32,
    /// Vertical impact speed above which the cube shatters
    pub break_speed: f32,
    pub floor_y: f32,
    /// Depth added to the body position to place it in front of the camera
    pub depth_offset: f32,
    pub debris: DebrisParams,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            restitution: 0.35,
            lateral_damping: 0.9,
            half_extent: 1.0,
            break_speed: 8.0,
            floor_y: -3.0,
            depth_offset: 8.0,
            debris: DebrisParams::default(),
        }
    }
}

/// Random ranges used when the cube shatters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebrisParams {
    /// Lateral velocity jitter is uniform in `[-lateral_jitter, lateral_jitter)`
    pub lateral_jitter: f32,
    /// Floor on the upward launch speed
    pub min_upward_speed: f32,
    /// Extra upward speed, uniform in `[0, vertical_bonus)`
    pub vertical_bonus: f32,
    pub life_min: f32,
    pub life_max: f32,
}

impl Default for DebrisParams {
    fn default() -> Self {
        Self {
            lateral_jitter: 5.0,
            min_upward_speed: 3.0,
            vertical_bonus: 5.0,
            life_min: 3.0,
            life_max: 5.0,
        }
    }
}

/// Pose and motion the body is reset to when physics mode is entered
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnState {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub angular_velocity: [f32; 3],
}

impl SpawnState {
    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }

    pub fn velocity(&self) -> Vector3<f32> {
        Vector3::from(self.velocity)
    }

    pub fn angular_velocity(&self) -> Vector3<f32> {
        Vector3::from(self.angular_velocity)
    }

    /// Same spin, dropped from `height` with no initial velocity.
    pub fn dropped_from(height: f32) -> Self {
        Self {
            position: [0.0, height, 0.0],
            ..Self::default()
        }
    }
}

impl Default for SpawnState {
    fn default() -> Self {
        Self {
            position: [0.0, 1.2, 0.0],
            velocity: [0.0, 0.0, 0.0],
            angular_velocity: [1.5, 0.9, 1.1],
        }
    }
}

/// Free spin shown in rotating mode
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RotationParams {
    /// Angular rates about X, Y, Z in rad/s
    pub rates: [f32; 3],
    pub center: [f32; 3],
}

impl RotationParams {
    pub fn rates(&self) -> Vector3<f32> {
        Vector3::from(self.rates)
    }

    pub fn center(&self) -> Point3<f32> {
        Point3::from(self.center)
    }
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            rates: [0.9, 1.2, 0.6],
            center: [0.0, 0.5, 8.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    pub background: char,
    pub cube: char,
    pub debris: char,
    pub floor: char,
    /// Number of floor guide lines
    pub floor_stripes: usize,
    /// Depth of the nearest guide line beyond `physics.depth_offset`
    pub floor_near_gap: f32,
    pub floor_spacing: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            background: ' ',
            cube: '#',
            debris: '*',
            floor: '.',
            floor_stripes: 2,
            floor_near_gap: 6.0,
            floor_spacing: 4.0,
        }
    }
}
