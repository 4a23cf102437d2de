//! Collaborator wire protocol.
//!
//! This module owns **every record that crosses a collaborator boundary**
//! between the directions feature and the outside world: the pathfinding
//! request options, draw/camera/marker commands for the map renderer, and
//! the arrival event for the analytics logger.
//!
//! ## Design rules
//!
//! 1. Every struct is `Serialize + Deserialize` with snake_case JSON.
//! 2. Commands carry plain data only; no SDK handles leak out.
//! 3. Durations are milliseconds, angles are degrees, zoom is the SDK level.

use crate::types::{Coordinate, RawPathResult};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pathfinding request
// ---------------------------------------------------------------------------

/// Connection types the pathfinder may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    /// Restrict the route to step-free connections.
    pub accessible: bool,
    pub stairs: bool,
    pub elevators: bool,
    pub escalators: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            accessible: false,
            stairs: true,
            elevators: true,
            escalators: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Path drawing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    pub smoothing: bool,
    pub resolution: u32,
    pub near_radius: f64,
    pub far_radius: f64,
    pub display_arrows_on_path: bool,
    pub animate_arrows_on_path: bool,
    /// Clearance the pathfinder keeps from walls, in metres.
    pub distance_from_wall: f64,
    pub smoothing_iterations: u32,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            smoothing: true,
            resolution: 10,
            near_radius: 0.4,
            far_radius: 0.8,
            display_arrows_on_path: true,
            animate_arrows_on_path: true,
            distance_from_wall: 0.5,
            smoothing_iterations: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawPath {
    pub path: RawPathResult,
    pub style: PathStyle,
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

/// Insets kept clear around the framed region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenOffsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ScreenOffsets {
    pub fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

/// Fit the camera around a set of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraFocus {
    pub targets: Vec<Coordinate>,
    pub bearing: f64,
    pub pitch: f64,
    pub screen_offsets: ScreenOffsets,
}

/// Absolute camera pose, as captured before navigation starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub center: Coordinate,
    pub zoom_level: f64,
    pub bearing: f64,
    pub pitch: f64,
}

/// Fire-and-forget camera animation. A later animation supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraAnimation {
    pub center: Coordinate,
    pub zoom_level: f64,
    pub bearing: f64,
    pub pitch: f64,
    pub duration_ms: u64,
    pub easing: Easing,
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Renderer-assigned marker handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Pulsing "you are here" dot.
    Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacement {
    pub kind: MarkerKind,
    pub coordinate: Coordinate,
    /// Never hidden by label collision.
    pub always_visible: bool,
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Identity fields sourced from the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub date_of_birth: Option<String>,
}

/// Fired once per completed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalEvent {
    pub user: UserProfile,
    pub destination: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

// ---------------------------------------------------------------------------
// Command log
// ---------------------------------------------------------------------------

/// Every renderer call, as a single tagged record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RenderCommand {
    DrawPath(DrawPath),
    ClearPath,
    Focus(CameraFocus),
    Animate(CameraAnimation),
    SetFloor { floor_id: String },
    AddMarker { id: MarkerId, placement: MarkerPlacement },
    RemoveMarker { id: MarkerId },
}
