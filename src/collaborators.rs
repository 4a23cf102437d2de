//! Seams to the external services the directions feature drives.
//!
//! | Trait           | Backed by (in the app)          | Used for                       |
//! |-----------------|---------------------------------|--------------------------------|
//! | `Pathfinder`    | mapping SDK `getDirections`     | raw path between two spaces    |
//! | `MapRenderer`   | mapping SDK map view            | path, camera, floors, markers  |
//! | `ArrivalLogger` | profile / analytics backend     | one event per completed route  |

use crate::error::Result;
use crate::protocol::{
    ArrivalEvent, CameraAnimation, CameraFocus, CameraState, DrawPath, MarkerId, MarkerPlacement,
    RouteOptions,
};
use crate::types::{RawPathResult, Space};
use async_trait::async_trait;

#[async_trait]
pub trait Pathfinder: Send + Sync {
    /// Compute a path between two spaces.
    ///
    /// `Ok(None)` means the venue graph has no route between them.
    async fn get_directions(
        &self,
        from: &Space,
        to: &Space,
        options: &RouteOptions,
    ) -> Result<Option<RawPathResult>>;
}

/// Outcome of a floor switch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorSwitch {
    /// The renderer confirmed the new floor is on screen.
    Ready,
    /// Switch requested; no completion signal available.
    Pending,
}

/// Commands are fire-and-forget: a later camera call supersedes an
/// in-flight one.
pub trait MapRenderer: Send + Sync + 'static {
    fn draw_path(&self, cmd: &DrawPath) -> Result<()>;
    fn clear_path(&self) -> Result<()>;
    fn focus_on(&self, cmd: &CameraFocus) -> Result<()>;
    fn animate_camera(&self, cmd: &CameraAnimation) -> Result<()>;
    fn camera_state(&self) -> Option<CameraState>;
    fn current_floor(&self) -> Option<String>;
    fn set_floor(&self, floor_id: &str) -> Result<FloorSwitch>;
    fn add_marker(&self, placement: &MarkerPlacement) -> Result<MarkerId>;
    fn remove_marker(&self, id: MarkerId) -> Result<()>;
}

pub trait ArrivalLogger: Send + Sync {
    fn user_reached_destination(&self, event: &ArrivalEvent) -> Result<()>;
}
