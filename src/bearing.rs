//! Camera bearing targets and per-step camera moves.

use crate::config::{DirectionsConfig, Surface};
use crate::protocol::{CameraAnimation, Easing};
use crate::types::{ActionType, Coordinate, ProcessedStep, TurnBearing};
use std::time::Duration;

pub const NORTH: f64 = 0.0;
pub const EAST: f64 = 90.0;
pub const WEST: f64 = 270.0;

/// Initial great-circle bearing from `from` to `to`, in `[0, 360)`.
pub fn initial_bearing(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    normalize(y.atan2(x).to_degrees())
}

fn normalize(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return NORTH;
    }
    let d = (degrees + 360.0) % 360.0;
    // (-ε + 360) can round up to exactly 360.
    if (0.0..360.0).contains(&d) {
        d
    } else {
        NORTH
    }
}

/// Heading the camera should face when showing `steps[index]`.
///
/// Turns look towards the next step (or a fixed east/west fallback); other
/// steps look along the approach from the previous step; otherwise north.
pub fn step_bearing(steps: &[ProcessedStep], index: usize) -> f64 {
    let Some(step) = steps.get(index) else {
        return NORTH;
    };

    if step.action_type() == Some(ActionType::Turn) {
        let next = steps.get(index + 1).and_then(|s| s.coordinate.as_ref());
        return match (step.coordinate.as_ref(), next) {
            (Some(here), Some(next)) => initial_bearing(here, next),
            _ => match step.action.and_then(|a| a.bearing) {
                Some(TurnBearing::Left) => WEST,
                Some(TurnBearing::Right) => EAST,
                _ => NORTH,
            },
        };
    }

    if index == 0 {
        return NORTH;
    }
    match (steps[index - 1].coordinate.as_ref(), step.coordinate.as_ref()) {
        (Some(prev), Some(here)) => initial_bearing(prev, here),
        _ => NORTH,
    }
}

// ---------------------------------------------------------------------------
// Camera choreography
// ---------------------------------------------------------------------------

/// What the map has to do to show one step.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraMove {
    /// Floor to switch to before animating.
    pub switch_floor: Option<String>,
    /// Wait between the floor switch and the animation.
    pub delay: Duration,
    pub animation: CameraAnimation,
}

/// Plan the camera move for `steps[index]`.
///
/// Returns `None` when the step has no coordinate to look at.
pub fn plan_camera_move(
    steps: &[ProcessedStep],
    index: usize,
    displayed_floor: Option<&str>,
    surface: Surface,
    cfg: &DirectionsConfig,
) -> Option<CameraMove> {
    let step = steps.get(index)?;
    let center = step.coordinate.clone()?;
    let preset = cfg.surface(surface);

    let switch_floor = step
        .floor_id()
        .filter(|floor| Some(*floor) != displayed_floor)
        .map(str::to_string);
    let delay = if switch_floor.is_some() {
        cfg.floor_switch_delay()
    } else {
        Duration::ZERO
    };

    Some(CameraMove {
        switch_floor,
        delay,
        animation: CameraAnimation {
            center,
            zoom_level: preset.zoom_level,
            bearing: step_bearing(steps, index),
            pitch: preset.pitch,
            duration_ms: preset.animation_ms,
            easing: Easing::EaseInOut,
        },
    })
}
