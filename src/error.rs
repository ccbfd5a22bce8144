//! Error types

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value parsed fine but cannot drive the simulation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by [`crate::scene::Scene`]
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Viewport is still empty after clamping to the minimums
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport { width: usize, height: usize },

    /// Configuration could not be used
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal I/O failed while driving the scene
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
