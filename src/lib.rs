//! Venue Directions
//!
//! Turns the raw output of an indoor pathfinding service into turn-by-turn
//! venue directions and drives step-by-step navigation on a map.
//!
//! ## Architecture
//!
//! ```text
//! NavigationController  (controller.rs)  ← route lifecycle, camera, markers
//!   ├── NavigationCursor  (cursor.rs)    ← idle / summary / stepping
//!   ├── Directions        (directions.rs) ← one processed route
//!   │     ├── instructions.rs  synthesis + landmark/floor phrasing
//!   │     ├── grouping.rs      straight-step merge, display groups
//!   │     └── timing.rs        walking time estimate
//!   ├── bearing.rs        camera heading + per-step camera moves
//!   └── collaborators.rs  Pathfinder / MapRenderer / ArrivalLogger seams
//! ```
//!
//! Everything below the controller is synchronous and pure. The controller
//! and the in-process collaborators require the `runtime` feature.

// Processing pipeline is always available (no runtime feature needed).
pub mod bearing;
pub mod config;
pub mod cursor;
pub mod directions;
pub mod error;
pub mod grouping;
pub mod instructions;
pub mod protocol;
pub mod timing;
pub mod types;
pub mod venue;

// Async navigation requires the `runtime` feature.
#[cfg(feature = "runtime")]
pub mod collaborators;
#[cfg(feature = "runtime")]
pub mod controller;
#[cfg(feature = "runtime")]
pub mod recording;

// Convenience re-exports (runtime only)
#[cfg(feature = "runtime")]
pub use collaborators::{ArrivalLogger, FloorSwitch, MapRenderer, Pathfinder};
#[cfg(feature = "runtime")]
pub use controller::{NavigationController, NavigationView, RouteStatus, StepView};
#[cfg(feature = "runtime")]
pub use recording::{LogArrivalLogger, RecordedPathfinder, RecordingRenderer};

pub use crate::config::{DirectionsConfig, Surface};
pub use cursor::{NavigationCursor, NavigationPhase};
pub use directions::Directions;
pub use error::{DirectionsError, Result};
pub use instructions::RouteContext;
pub use types::{
    Coordinate, DirectionGroup, ProcessedStep, RawPathResult, RawStep, StepAction, StepKind,
};
pub use venue::VenueDirectory;
