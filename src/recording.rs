//! In-process collaborators: a replaying pathfinder, a renderer that records
//! every command, and an arrival logger that writes to the log.
//!
//! The CLI uses these to run a recorded route end to end; tests use them to
//! assert on what the controller asked the map to do.

use crate::collaborators::{ArrivalLogger, FloorSwitch, MapRenderer, Pathfinder};
use crate::error::{DirectionsError, Result};
use crate::protocol::{
    ArrivalEvent, CameraAnimation, CameraFocus, CameraState, DrawPath, MarkerId, MarkerPlacement,
    RenderCommand, RouteOptions,
};
use crate::types::{RawPathResult, Space};
use async_trait::async_trait;
use log::info;
use parking_lot::Mutex;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Serves one recorded path result for any pair of endpoints.
pub struct RecordedPathfinder {
    result: Option<RawPathResult>,
    requests: Mutex<Vec<(String, String, RouteOptions)>>,
}

impl RecordedPathfinder {
    pub fn new(result: RawPathResult) -> Self {
        Self {
            result: Some(result),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A pathfinder that never finds a route.
    pub fn unreachable() -> Self {
        Self {
            result: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// `(from_id, to_id, options)` of every request so far.
    pub fn requests(&self) -> Vec<(String, String, RouteOptions)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Pathfinder for RecordedPathfinder {
    async fn get_directions(
        &self,
        from: &Space,
        to: &Space,
        options: &RouteOptions,
    ) -> Result<Option<RawPathResult>> {
        self.requests
            .lock()
            .push((from.id.clone(), to.id.clone(), *options));
        Ok(self.result.clone())
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RendererState {
    commands: Vec<RenderCommand>,
    camera: Option<CameraState>,
    floor: Option<String>,
    markers: HashSet<MarkerId>,
    next_marker: u64,
}

/// Records every command and tracks camera pose, floor and live markers.
#[derive(Default)]
pub struct RecordingRenderer {
    state: Mutex<RendererState>,
    floors_settle_immediately: bool,
    fail_draws: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a known camera pose and floor.
    pub fn with_camera(camera: CameraState, floor: Option<String>) -> Self {
        let renderer = Self::new();
        {
            let mut state = renderer.state.lock();
            state.camera = Some(camera);
            state.floor = floor;
        }
        renderer
    }

    /// Report floor switches as [`FloorSwitch::Ready`].
    pub fn settling_floors(mut self) -> Self {
        self.floors_settle_immediately = true;
        self
    }

    /// Fail every `draw_path` call, as a renderer with a broken style might.
    pub fn failing_draws(mut self) -> Self {
        self.fail_draws = true;
        self
    }

    pub fn commands(&self) -> Vec<RenderCommand> {
        self.state.lock().commands.clone()
    }

    pub fn animations(&self) -> Vec<CameraAnimation> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                RenderCommand::Animate(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    pub fn live_markers(&self) -> usize {
        self.state.lock().markers.len()
    }

    pub fn to_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for cmd in self.state.lock().commands.iter() {
            out.push_str(&serde_json::to_string(cmd)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl MapRenderer for RecordingRenderer {
    fn draw_path(&self, cmd: &DrawPath) -> Result<()> {
        if self.fail_draws {
            return Err(DirectionsError::Renderer("path layer unavailable".into()));
        }
        self.state
            .lock()
            .commands
            .push(RenderCommand::DrawPath(cmd.clone()));
        Ok(())
    }

    fn clear_path(&self) -> Result<()> {
        self.state.lock().commands.push(RenderCommand::ClearPath);
        Ok(())
    }

    fn focus_on(&self, cmd: &CameraFocus) -> Result<()> {
        self.state.lock().commands.push(RenderCommand::Focus(cmd.clone()));
        Ok(())
    }

    fn animate_camera(&self, cmd: &CameraAnimation) -> Result<()> {
        let mut state = self.state.lock();
        state.camera = Some(CameraState {
            center: cmd.center.clone(),
            zoom_level: cmd.zoom_level,
            bearing: cmd.bearing,
            pitch: cmd.pitch,
        });
        state.commands.push(RenderCommand::Animate(cmd.clone()));
        Ok(())
    }

    fn camera_state(&self) -> Option<CameraState> {
        self.state.lock().camera.clone()
    }

    fn current_floor(&self) -> Option<String> {
        self.state.lock().floor.clone()
    }

    fn set_floor(&self, floor_id: &str) -> Result<FloorSwitch> {
        let mut state = self.state.lock();
        state.floor = Some(floor_id.to_string());
        state.commands.push(RenderCommand::SetFloor {
            floor_id: floor_id.to_string(),
        });
        Ok(if self.floors_settle_immediately {
            FloorSwitch::Ready
        } else {
            FloorSwitch::Pending
        })
    }

    fn add_marker(&self, placement: &MarkerPlacement) -> Result<MarkerId> {
        let mut state = self.state.lock();
        state.next_marker += 1;
        let id = MarkerId(state.next_marker);
        state.markers.insert(id);
        state.commands.push(RenderCommand::AddMarker {
            id,
            placement: placement.clone(),
        });
        Ok(id)
    }

    fn remove_marker(&self, id: MarkerId) -> Result<()> {
        let mut state = self.state.lock();
        if !state.markers.remove(&id) {
            return Err(DirectionsError::Renderer(format!("{} is not on the map", id)));
        }
        state.commands.push(RenderCommand::RemoveMarker { id });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Arrival logger
// ---------------------------------------------------------------------------

/// Logs arrivals and keeps them for inspection.
#[derive(Default)]
pub struct LogArrivalLogger {
    events: Mutex<Vec<ArrivalEvent>>,
}

impl LogArrivalLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ArrivalEvent> {
        self.events.lock().clone()
    }
}

impl ArrivalLogger for LogArrivalLogger {
    fn user_reached_destination(&self, event: &ArrivalEvent) -> Result<()> {
        info!(
            "User {} reached '{}'",
            event.user.email.as_deref().unwrap_or("<anonymous>"),
            event.destination
        );
        self.events.lock().push(event.clone());
        Ok(())
    }
}
