//! Error type shared by every directions module.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DirectionsError>;

#[derive(Debug, Error)]
pub enum DirectionsError {
    /// The pathfinder could not connect the two locations.
    #[error("no path found between '{from}' and '{to}'")]
    NoPath { from: String, to: String },

    /// A departure or destination has no center coordinate to route from.
    #[error("location '{0}' has no coordinate")]
    MissingCoordinate(String),

    #[error("unknown location '{0}'")]
    UnknownLocation(String),

    /// A cursor operation was requested from a phase that does not allow it.
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    /// Failure reported by the external map renderer.
    #[error("renderer error: {0}")]
    Renderer(String),

    /// Failure reported by the external pathfinding service.
    #[error("pathfinder error: {0}")]
    Pathfinder(String),

    #[error("analytics error: {0}")]
    Analytics(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
