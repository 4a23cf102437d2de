//! NavigationController – route lifecycle, step navigation and map choreography.
//!
//! The controller owns all mutable directions state (endpoints, processed
//! route, cursor, camera snapshot, position marker) and is driven only by
//! explicit user actions plus the awaited pathfinder response. View
//! adapters read it through [`NavigationController::view`].
//!
//! Renderer and analytics failures are logged and swallowed: a broken
//! camera call must never leave the directions UI stuck.

use crate::bearing::plan_camera_move;
use crate::collaborators::{ArrivalLogger, FloorSwitch, MapRenderer, Pathfinder};
use crate::config::{DirectionsConfig, Surface};
use crate::cursor::{NavigationCursor, NavigationPhase};
use crate::directions::Directions;
use crate::error::{DirectionsError, Result};
use crate::instructions::{format_distance, RouteContext};
use crate::protocol::{
    ArrivalEvent, CameraAnimation, CameraFocus, DrawPath, Easing, MarkerId, MarkerKind,
    MarkerPlacement, ScreenOffsets, UserProfile,
};
use crate::types::{Coordinate, ProcessedStep, Space};
use crate::venue::VenueDirectory;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// ---------------------------------------------------------------------------
// Route status & view projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// Departure or destination not chosen yet.
    Unresolved,
    /// The pathfinder could not connect the endpoints.
    NoPath,
    Ready,
}

/// One entry of the step list.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub index: usize,
    pub instruction: String,
    /// e.g. `"30 meters then,"`; empty for zero-length steps.
    pub distance_label: String,
    pub active: bool,
}

/// Everything a view adapter needs to render the directions card.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationView {
    pub phase: NavigationPhase,
    pub status: RouteStatus,
    pub departure: Option<String>,
    pub destination: Option<String>,
    pub estimated_minutes: Option<u32>,
    pub total_distance: Option<String>,
    /// 1-based, as shown in "Step 2 of 5".
    pub step_number: Option<usize>,
    pub step_count: usize,
    pub current: Option<StepView>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct NavigationController<P, R, A> {
    config: DirectionsConfig,
    venue: Arc<VenueDirectory>,
    pathfinder: P,
    renderer: Arc<R>,
    analytics: A,
    user: Option<UserProfile>,
    departure: Option<Space>,
    destination: Option<Space>,
    directions: Option<Directions>,
    status: RouteStatus,
    cursor: NavigationCursor,
    camera_snapshot: Option<crate::protocol::CameraState>,
    position_marker: Option<MarkerId>,
}

impl<P, R, A> NavigationController<P, R, A>
where
    P: Pathfinder,
    R: MapRenderer,
    A: ArrivalLogger,
{
    pub fn new(
        config: DirectionsConfig,
        venue: Arc<VenueDirectory>,
        pathfinder: P,
        renderer: Arc<R>,
        analytics: A,
    ) -> Self {
        Self {
            config,
            venue,
            pathfinder,
            renderer,
            analytics,
            user: None,
            departure: None,
            destination: None,
            directions: None,
            status: RouteStatus::Unresolved,
            cursor: NavigationCursor::new(),
            camera_snapshot: None,
            position_marker: None,
        }
    }

    /// Signed-in user, reported with the arrival event.
    pub fn set_user(&mut self, user: Option<UserProfile>) {
        self.user = user;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn status(&self) -> RouteStatus {
        self.status
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    pub fn directions(&self) -> Option<&Directions> {
        self.directions.as_ref()
    }

    pub fn departure(&self) -> Option<&Space> {
        self.departure.as_ref()
    }

    pub fn destination(&self) -> Option<&Space> {
        self.destination.as_ref()
    }

    pub fn config(&self) -> &DirectionsConfig {
        &self.config
    }

    pub fn venue(&self) -> &VenueDirectory {
        &self.venue
    }

    pub fn pathfinder(&self) -> &P {
        &self.pathfinder
    }

    pub fn analytics(&self) -> &A {
        &self.analytics
    }

    // -----------------------------------------------------------------------
    // Endpoint selection
    // -----------------------------------------------------------------------

    /// Choose the departure by id or name; routes once both ends are set.
    pub async fn set_departure(&mut self, key: &str) -> Result<RouteStatus> {
        self.departure = Some(self.resolve(key)?);
        self.compute_route().await
    }

    /// Choose the destination by id or name; routes once both ends are set.
    pub async fn set_destination(&mut self, key: &str) -> Result<RouteStatus> {
        self.destination = Some(self.resolve(key)?);
        self.compute_route().await
    }

    /// Swap departure and destination and re-route.
    ///
    /// The camera snapshot is kept: navigation is still in progress.
    pub async fn swap(&mut self) -> Result<RouteStatus> {
        std::mem::swap(&mut self.departure, &mut self.destination);
        self.compute_route().await
    }

    fn resolve(&self, key: &str) -> Result<Space> {
        self.venue
            .resolve(key)
            .cloned()
            .ok_or_else(|| DirectionsError::UnknownLocation(key.to_string()))
    }

    // -----------------------------------------------------------------------
    // Route computation
    // -----------------------------------------------------------------------

    /// Ask the pathfinder for a route between the chosen endpoints, draw it
    /// and process it. Idle → Summary on success.
    #[tracing::instrument(skip_all)]
    pub async fn compute_route(&mut self) -> Result<RouteStatus> {
        let (Some(from), Some(to)) = (self.departure.clone(), self.destination.clone()) else {
            self.status = RouteStatus::Unresolved;
            return Ok(self.status);
        };

        if from.center.is_none() || to.center.is_none() {
            let missing = if from.center.is_none() { &from } else { &to };
            warn!("{}", DirectionsError::MissingCoordinate(missing.name.clone()));
            self.drop_route();
            self.status = RouteStatus::NoPath;
            return Ok(self.status);
        }

        if self.camera_snapshot.is_none() {
            self.camera_snapshot = self.renderer.camera_state();
        }

        let raw = match self
            .pathfinder
            .get_directions(&from, &to, &self.config.route_options)
            .await
        {
            Ok(Some(raw)) if !raw.steps.is_empty() => raw,
            Ok(_) => {
                let err = DirectionsError::NoPath {
                    from: from.name.clone(),
                    to: to.name.clone(),
                };
                warn!("{}", err);
                self.drop_route();
                self.status = RouteStatus::NoPath;
                return Ok(self.status);
            }
            Err(e) => {
                error!("Error getting directions: {}", e);
                self.drop_route();
                self.status = RouteStatus::NoPath;
                return Ok(self.status);
            }
        };

        info!(
            "Route '{}' → '{}': {} raw steps",
            from.name,
            to.name,
            raw.steps.len()
        );

        self.remove_position_marker();
        self.frame_route_start(&raw.coordinates, &raw.steps);

        let draw = DrawPath {
            path: raw.clone(),
            style: self.config.path_style.clone(),
        };
        if let Err(e) = self.renderer.draw_path(&draw) {
            error!("Error drawing navigation path: {}", e);
        }

        let ctx = RouteContext::new(from.name.as_str(), to.name.as_str());
        let directions = Directions::process(raw, &ctx, Some(&self.venue), &self.config);
        self.cursor.route_computed(directions.len())?;
        self.directions = Some(directions);
        self.status = RouteStatus::Ready;
        Ok(self.status)
    }

    /// Top-down, north-up framing of the first stretch of the path.
    fn frame_route_start(&self, coordinates: &[Coordinate], steps: &[crate::types::RawStep]) {
        let limit = self.config.focus_coordinate_limit.max(1);
        let targets: Vec<Coordinate> = if coordinates.is_empty() {
            steps
                .iter()
                .filter_map(|s| s.coordinate.clone())
                .take(limit)
                .collect()
        } else {
            coordinates.iter().take(limit).cloned().collect()
        };
        if targets.is_empty() {
            return;
        }

        let focus = CameraFocus {
            targets,
            bearing: 0.0,
            pitch: 0.0,
            screen_offsets: ScreenOffsets::uniform(self.config.focus_padding_px),
        };
        if let Err(e) = self.renderer.focus_on(&focus) {
            warn!("Error framing route: {}", e);
        }
    }

    fn drop_route(&mut self) {
        if self.directions.take().is_some() {
            if let Err(e) = self.renderer.clear_path() {
                warn!("Error clearing previous path: {}", e);
            }
        }
        self.remove_position_marker();
        self.cursor.clear();
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Summary → Stepping, showing the first step.
    pub fn view_steps(&mut self, surface: Surface) -> Result<()> {
        self.cursor.start_stepping(surface)?;
        self.show_step(self.cursor.index());
        Ok(())
    }

    /// Advance one step. Returns the new index, or `None` at the last step.
    pub fn next_step(&mut self) -> Option<usize> {
        let index = self.cursor.next()?;
        self.show_step(index);
        Some(index)
    }

    /// Go back one step. Returns the new index, or `None` at the first step.
    pub fn previous_step(&mut self) -> Option<usize> {
        let index = self.cursor.previous()?;
        self.show_step(index);
        Some(index)
    }

    /// Jump to a step from the step list.
    pub fn select_step(&mut self, index: usize) -> Option<usize> {
        let index = self.cursor.select(index)?;
        self.show_step(index);
        Some(index)
    }

    fn show_step(&mut self, index: usize) {
        let Some(directions) = self.directions.as_ref() else {
            return;
        };
        let Some(step) = directions.step(index).cloned() else {
            return;
        };
        let is_destination = step.is_arrival() || index + 1 == directions.len();
        let surface = self.cursor.surface().unwrap_or(Surface::Desktop);

        let displayed_floor = self
            .renderer
            .current_floor()
            .or_else(|| self.cursor.floor().map(str::to_string));
        let plan = plan_camera_move(
            &directions.steps,
            index,
            displayed_floor.as_deref(),
            surface,
            &self.config,
        );

        if is_destination && self.cursor.mark_arrival() {
            self.notify_arrival();
        }

        self.place_position_marker(&step);

        let Some(plan) = plan else {
            debug!("Step {} has no coordinate; camera unchanged", index);
            return;
        };

        let mut delay = plan.delay;
        if let Some(floor_id) = &plan.switch_floor {
            if self.venue.floor(floor_id).is_some() {
                match self.renderer.set_floor(floor_id) {
                    Ok(FloorSwitch::Ready) => delay = Duration::ZERO,
                    Ok(FloorSwitch::Pending) => {}
                    Err(e) => warn!("Error switching to floor {}: {}", floor_id, e),
                }
            } else {
                warn!("Step {} is on unknown floor '{}'", index, floor_id);
            }
            self.cursor.set_floor(Some(floor_id.clone()));
        }

        self.cursor.set_bearing(plan.animation.bearing);
        self.animate_after(plan.animation, delay);
    }

    /// Animate now, or after `delay` on the runtime without blocking the caller.
    fn animate_after(&self, animation: CameraAnimation, delay: Duration) {
        if delay.is_zero() {
            if let Err(e) = self.renderer.animate_camera(&animation) {
                warn!("Error focusing camera on step: {}", e);
            }
            return;
        }

        let renderer = Arc::clone(&self.renderer);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Err(e) = renderer.animate_camera(&animation) {
                        warn!("Error focusing camera on step: {}", e);
                    }
                });
            }
            Err(_) => {
                warn!("No async runtime; animating without floor-switch delay");
                if let Err(e) = renderer.animate_camera(&animation) {
                    warn!("Error focusing camera on step: {}", e);
                }
            }
        }
    }

    fn place_position_marker(&mut self, step: &ProcessedStep) {
        let Some(coordinate) = step.coordinate.clone() else {
            return;
        };
        self.remove_position_marker();

        let placement = MarkerPlacement {
            kind: MarkerKind::Position,
            coordinate,
            always_visible: true,
        };
        match self.renderer.add_marker(&placement) {
            Ok(id) => self.position_marker = Some(id),
            Err(e) => error!("Error updating position marker: {}", e),
        }
    }

    fn remove_position_marker(&mut self) {
        if let Some(id) = self.position_marker.take() {
            if let Err(e) = self.renderer.remove_marker(id) {
                error!("Error clearing position marker: {}", e);
            }
        }
    }

    fn notify_arrival(&self) {
        let destination = self
            .destination
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default();

        let Some(user) = self.user.clone() else {
            info!("Reached '{}' without a signed-in user; nothing logged", destination);
            return;
        };

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let event = ArrivalEvent {
            user,
            destination,
            timestamp_ms,
        };
        if let Err(e) = self.analytics.user_reached_destination(&event) {
            error!("Error logging arrival: {}", e);
        }
    }

    // -----------------------------------------------------------------------
    // Back / clear
    // -----------------------------------------------------------------------

    /// Context-dependent back action. Returns the resulting phase.
    ///
    /// Desktop stepping returns to the summary; mobile stepping and the
    /// summary clear navigation entirely.
    pub async fn back(&mut self) -> NavigationPhase {
        match self.cursor.phase() {
            NavigationPhase::Stepping(Surface::Desktop) => {
                self.remove_position_marker();
                self.cursor.back()
            }
            NavigationPhase::Stepping(Surface::Mobile) | NavigationPhase::Summary => {
                self.clear().await;
                NavigationPhase::Idle
            }
            NavigationPhase::Idle => NavigationPhase::Idle,
        }
    }

    /// Restore the pre-navigation camera, remove the marker and the path,
    /// and forget both endpoints.
    pub async fn clear(&mut self) {
        if let Some(snapshot) = self.camera_snapshot.take() {
            let restore = CameraAnimation {
                center: snapshot.center,
                zoom_level: snapshot.zoom_level,
                bearing: snapshot.bearing,
                pitch: snapshot.pitch,
                duration_ms: self.config.restore_duration_ms,
                easing: Easing::EaseOut,
            };
            if let Err(e) = self.renderer.animate_camera(&restore) {
                error!("Error restoring original view: {}", e);
            }
        }

        self.remove_position_marker();
        if let Err(e) = self.renderer.clear_path() {
            error!("Error clearing navigation: {}", e);
        }

        self.directions = None;
        self.departure = None;
        self.destination = None;
        self.status = RouteStatus::Unresolved;
        self.cursor.clear();
        debug!("Navigation cleared");
    }

    // -----------------------------------------------------------------------
    // View projection
    // -----------------------------------------------------------------------

    /// Every step with its surface-specific text.
    pub fn step_list(&self, surface: Surface) -> Vec<StepView> {
        let Some(directions) = self.directions.as_ref() else {
            return Vec::new();
        };
        (0..directions.len())
            .map(|i| self.step_view(directions, i, surface))
            .collect()
    }

    fn step_view(&self, directions: &Directions, index: usize, surface: Surface) -> StepView {
        let distance = directions.steps[index].distance;
        StepView {
            index,
            instruction: directions.describe(index, &self.venue, surface, &self.config),
            distance_label: if distance > 0.0 {
                format!("{} then,", format_distance(distance))
            } else {
                String::new()
            },
            active: self.cursor.is_stepping() && self.cursor.index() == index,
        }
    }

    pub fn view(&self) -> NavigationView {
        let stepping = self.cursor.is_stepping();
        let current = match (&self.directions, stepping) {
            (Some(d), true) => Some(self.step_view(
                d,
                self.cursor.index(),
                self.cursor.surface().unwrap_or(Surface::Desktop),
            )),
            _ => None,
        };

        NavigationView {
            phase: self.cursor.phase(),
            status: self.status,
            departure: self.departure.as_ref().map(|s| s.name.clone()),
            destination: self.destination.as_ref().map(|s| s.name.clone()),
            estimated_minutes: self.directions.as_ref().map(|d| d.estimated_minutes),
            total_distance: self.directions.as_ref().map(Directions::distance_label),
            step_number: stepping.then(|| self.cursor.index() + 1),
            step_count: self.directions.as_ref().map_or(0, Directions::len),
            current,
            can_go_previous: stepping && !self.cursor.at_first(),
            can_go_next: stepping && !self.cursor.at_last(),
        }
    }
}
