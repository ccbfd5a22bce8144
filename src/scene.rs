//! Per-frame composition of the cube, its debris and the floor guides.

use std::fmt;

use cgmath::Point3;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::{Camera, Viewport};
use crate::config::{SceneConfig, SpawnState};
use crate::error::SceneError;
use crate::geometry::CubeGeometry;
use crate::math::Orientation;
use crate::physics::{PhysicsEvent, PhysicsState, PhysicsWorld};
use crate::raster::FrameBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMode {
    /// Free spin at a fixed spot, no physics
    Rotating,
    /// Drop, bounce and possibly shatter
    Physics,
}

impl fmt::Display for SceneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneMode::Rotating => f.write_str("Rotating"),
            SceneMode::Physics => f.write_str("Physics"),
        }
    }
}

/// One rendered frame, borrowed from the scene until the next step.
#[derive(Debug)]
pub struct Frame<'a> {
    pub buffer: &'a FrameBuffer,
    pub status: String,
}

pub struct Scene<R = StdRng> {
    config: SceneConfig,
    camera: Camera,
    buffer: FrameBuffer,
    mode: SceneMode,
    spin: Orientation,
    physics: PhysicsWorld,
    rng: R,
}

impl Scene<StdRng> {
    /// Scene whose fracture RNG is seeded from `config.seed`, or from
    /// entropy when no seed is configured.
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Scene::with_rng(config, rng)
    }
}

impl<R: Rng> Scene<R> {
    pub fn with_rng(config: SceneConfig, rng: R) -> Result<Self, SceneError> {
        config.validate()?;
        let viewport = Viewport::clamped(config.viewport.width, config.viewport.height, &config.viewport)?;
        info!("Scene created with a {}x{} viewport", viewport.width, viewport.height);

        Ok(Scene {
            camera: Camera::from(config.camera),
            buffer: FrameBuffer::new(viewport, config.render.background),
            mode: SceneMode::Rotating,
            spin: Orientation::default(),
            physics: PhysicsWorld::new(config.physics, config.spawn),
            config,
            rng,
        })
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn viewport(&self) -> Viewport {
        self.buffer.viewport()
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Resize the grid. Simulation state is left alone.
    pub fn configure(&mut self, width: usize, height: usize) -> Result<(), SceneError> {
        let viewport = Viewport::clamped(width, height, &self.config.viewport)?;
        info!(
            "Viewport {}x{} (requested {}x{})",
            viewport.width, viewport.height, width, height
        );
        self.buffer = FrameBuffer::new(viewport, self.config.render.background);
        Ok(())
    }

    /// Switch modes. Entering physics always starts a fresh drop and leaving
    /// it discards any fracture.
    pub fn set_mode(&mut self, mode: SceneMode) {
        info!("Mode {} -> {}", self.mode, mode);
        if mode == SceneMode::Physics || self.physics.is_broken() {
            self.physics.reset();
        }
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            SceneMode::Rotating => SceneMode::Physics,
            SceneMode::Physics => SceneMode::Rotating,
        };
        self.set_mode(next);
    }

    /// Enter physics mode dropping from `spawn` instead of the configured pose.
    pub fn drop_from(&mut self, spawn: SpawnState) {
        info!("Mode {} -> {} (custom drop)", self.mode, SceneMode::Physics);
        self.mode = SceneMode::Physics;
        self.physics.reset_with(spawn);
    }

    /// Advance by `dt` seconds and render the result.
    ///
    /// `dt` is expected to be clamped by the caller.
    pub fn step(&mut self, dt: f32) -> Frame<'_> {
        match self.mode {
            SceneMode::Rotating => {
                self.spin = self.spin.advanced(self.config.rotation.rates(), dt);
            }
            SceneMode::Physics => {
                if let Some(PhysicsEvent::DebrisCleared) = self.physics.tick(dt, &mut self.rng) {
                    debug!("Nothing left to draw but the floor");
                }
            }
        }

        self.compose();
        Frame {
            buffer: &self.buffer,
            status: format!("Mode: {}", self.mode),
        }
    }

    fn compose(&mut self) {
        let render = &self.config.render;
        self.buffer.clear(render.background);

        match (self.mode, self.physics.state()) {
            (SceneMode::Rotating, _) => {
                let corners = CubeGeometry::placed(self.config.rotation.center(), &self.spin);
                draw_cube(&mut self.buffer, &self.camera, &corners, render.cube);
            }
            (SceneMode::Physics, PhysicsState::Intact(body)) => {
                let corners = body.world_vertices(self.config.physics.depth_offset);
                draw_cube(&mut self.buffer, &self.camera, &corners, render.cube);
            }
            (SceneMode::Physics, PhysicsState::Broken { debris, .. }) => {
                for segment in debris {
                    draw_segment(&mut self.buffer, &self.camera, segment.p0, segment.p1, render.debris);
                }
            }
        }

        // Drawn last, so the floor wins any shared cell.
        self.draw_floor();
    }

    fn draw_floor(&mut self) {
        let render = &self.config.render;
        let physics = &self.config.physics;
        let width = self.buffer.width();
        let viewport = self.buffer.viewport();

        for stripe in 0..render.floor_stripes {
            let z = physics.depth_offset + render.floor_near_gap + stripe as f32 * render.floor_spacing;
            let z_cam = z - self.camera.camera_z;
            for x in 0..width {
                let nx = (x as f32 - width as f32 / 2.0) / self.camera.proj_k * z_cam;
                if let Some(p) = self.camera.project(Point3::new(nx, physics.floor_y, z), viewport) {
                    self.buffer.put(p.x, p.y, render.floor);
                }
            }
        }
    }
}

fn draw_cube(buffer: &mut FrameBuffer, camera: &Camera, corners: &[Point3<f32>], ch: char) {
    for &(a, b) in CubeGeometry::EDGES.iter() {
        draw_segment(buffer, camera, corners[a], corners[b], ch);
    }
}

/// Project both ends and draw the line; skipped if either end is not visible.
fn draw_segment(buffer: &mut FrameBuffer, camera: &Camera, a: Point3<f32>, b: Point3<f32>, ch: char) {
    let viewport = buffer.viewport();
    let (Some(a), Some(b)) = (camera.project(a, viewport), camera.project(b, viewport)) else {
        return;
    };
    buffer.draw_line(a, b, ch);
}
