//! Wireframe cube rendered onto a character grid, either spinning in place
//! or dropped onto a floor where a hard enough landing shatters it.

pub mod camera;
pub mod config;
pub mod debris;
pub mod error;
pub mod fracture;
pub mod geometry;
pub mod math;
pub mod physics;
pub mod raster;
pub mod rigid_body;
pub mod scene;
pub mod terminal;

pub use config::SceneConfig;
pub use error::{ConfigError, SceneError};
pub use raster::FrameBuffer;
pub use scene::{Frame, Scene, SceneMode};
