//! Error types for the controller
//!
//! Only construction and configuration loading can fail. The per-frame update
//! path is best-effort and never returns an error: ray misses, blocked stand-up
//! attempts and unknown surfaces are normal states, not failures.

use thiserror::Error;

/// Result type alias for controller operations.
pub type Result<T> = std::result::Result<T, ControllerError>;

/// Failure modes surfaced while building or configuring a controller.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// A collaborator the controller cannot run without was never supplied.
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// Configuration values outside their accepted ranges.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
