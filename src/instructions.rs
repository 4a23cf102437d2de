//! Instruction synthesis: raw pathfinder steps → human-readable text.
//!
//! [`synthesize`] produces the base instruction of every step. The step list
//! and the mobile overlay render [`describe_step`] on top of that, which adds
//! landmark context ("near …") and floor-change phrasing.

use crate::config::SurfaceConfig;
use crate::types::{ActionType, ProcessedStep, RawStep, StepKind, TurnBearing};
use crate::venue::VenueDirectory;

pub const CONTINUE_STRAIGHT: &str = "Continue straight";
pub const WALK_TO_DESTINATION: &str = "Walk straight to your destination";

/// Names used in departure/arrival phrasing.
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    pub departure_name: String,
    pub destination_name: String,
}

impl RouteContext {
    pub fn new(departure: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            departure_name: departure.into(),
            destination_name: destination.into(),
        }
    }

    fn departure(&self) -> &str {
        non_empty_or(&self.departure_name, "starting location")
    }

    fn destination(&self) -> &str {
        non_empty_or(&self.destination_name, "destination")
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Base synthesis
// ---------------------------------------------------------------------------

/// Synthesize the instruction of every raw step, in order.
pub fn synthesize(
    steps: &[RawStep],
    ctx: &RouteContext,
    venue: Option<&VenueDirectory>,
) -> Vec<ProcessedStep> {
    steps
        .iter()
        .map(|step| ProcessedStep::from_raw(step, instruction_for(step, ctx, venue)))
        .collect()
}

pub fn instruction_for(step: &RawStep, ctx: &RouteContext, venue: Option<&VenueDirectory>) -> String {
    let distance = step.distance();

    match step.action_type() {
        Some(ActionType::Departure) => {
            format!("Leave {}{}", ctx.departure(), floor_suffix(step.floor_id(), venue))
        }
        Some(ActionType::Arrival) => {
            format!("Arrive at {}{}", ctx.destination(), floor_suffix(step.floor_id(), venue))
        }
        Some(ActionType::Turn) => turn_instruction(step.turn_bearing(), distance),
        Some(ActionType::Other) | None => {
            if distance > 0.0 {
                format!("Continue for {} meters", meters(distance))
            } else {
                CONTINUE_STRAIGHT.to_string()
            }
        }
    }
}

fn turn_instruction(bearing: Option<TurnBearing>, distance: f64) -> String {
    let base = turn_phrase(bearing);

    if bearing == Some(TurnBearing::Straight) {
        return if distance < 10.0 {
            CONTINUE_STRAIGHT.to_string()
        } else {
            format!("Head straight for {} meters", meters(distance))
        };
    }

    if distance <= 0.0 {
        base.to_string()
    } else if distance < 10.0 {
        format!("{} and continue", base)
    } else if distance < 50.0 {
        format!("{} and walk {} meters", base, meters(distance))
    } else {
        format!("{} and continue for {} meters", base, meters(distance))
    }
}

fn turn_phrase(bearing: Option<TurnBearing>) -> &'static str {
    match bearing {
        Some(TurnBearing::Left) => "Turn left",
        Some(TurnBearing::Right) => "Turn right",
        _ => CONTINUE_STRAIGHT,
    }
}

fn floor_suffix(floor_id: Option<&str>, venue: Option<&VenueDirectory>) -> String {
    floor_id
        .and_then(|id| venue?.floor_name(id))
        .map(|name| format!(" on {}", name))
        .unwrap_or_default()
}

fn meters(distance: f64) -> i64 {
    distance.round() as i64
}

// ---------------------------------------------------------------------------
// Short routes
// ---------------------------------------------------------------------------

/// Collapse routes under `threshold_m` into one synthetic step; otherwise
/// merge redundant straight steps.
pub fn simplify(steps: Vec<ProcessedStep>, total_distance: f64, threshold_m: f64) -> Vec<ProcessedStep> {
    if steps.is_empty() || total_distance < threshold_m {
        return vec![ProcessedStep::synthetic(WALK_TO_DESTINATION, total_distance)];
    }
    crate::grouping::merge_straight_steps(steps)
}

// ---------------------------------------------------------------------------
// Rich description (step list / mobile overlay)
// ---------------------------------------------------------------------------

/// Instruction text for `steps[index]` with landmark and floor context.
///
/// Returns an empty string for an out-of-range index.
pub fn describe_step(
    steps: &[ProcessedStep],
    index: usize,
    ctx: &RouteContext,
    venue: &VenueDirectory,
    preset: &SurfaceConfig,
) -> String {
    let Some(step) = steps.get(index) else {
        return String::new();
    };
    let prev = index.checked_sub(1).and_then(|i| steps.get(i));

    let floor_id = step.floor_id();
    let prev_floor_id = prev.and_then(ProcessedStep::floor_id);
    let floor_name = floor_id.and_then(|id| venue.floor_name(id));
    let prev_floor_name = prev_floor_id.and_then(|id| venue.floor_name(id));
    let floor_changed = matches!((floor_id, prev_floor_id), (Some(a), Some(b)) if a != b);

    let on_floor = floor_name.map(|n| format!(" on {}", n)).unwrap_or_default();
    match step.action_type() {
        Some(ActionType::Departure) => return format!("Leave {}{}", ctx.departure(), on_floor),
        Some(ActionType::Arrival) => return format!("Arrive at {}{}", ctx.destination(), on_floor),
        _ => {}
    }

    let near = step
        .coordinate
        .as_ref()
        .map(|c| near_clause(&venue.nearby_spaces(c, preset.near_radius_m, preset.near_limit)))
        .unwrap_or_default();
    let to_floor = match floor_name {
        Some(name) if floor_changed => format!(" to {}", name),
        _ => String::new(),
    };

    if step.action_type() == Some(ActionType::Turn) {
        let bearing = step.action.and_then(|a| a.bearing);
        return format!("{}{}{}", turn_phrase(bearing), near, to_floor);
    }

    if let (Some(current), Some(previous)) = (floor_name, prev_floor_name) {
        if current != previous {
            if step.kind.is_floor_change() {
                return format!("Take {} to {}", step.kind.label(), current);
            }
            if floor_changed {
                return format!("Go to {}", current);
            }
        }
    }

    let base = if step.instruction.is_empty() {
        CONTINUE_STRAIGHT
    } else {
        step.instruction.as_str()
    };
    if step.kind == StepKind::Path {
        format!("{}{}{}", base, near, to_floor)
    } else {
        base.to_string()
    }
}

fn near_clause(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [one] => format!(" near {}", one),
        [first, second, ..] => format!(" near {} and {}", first, second),
    }
}

// ---------------------------------------------------------------------------
// Distance display
// ---------------------------------------------------------------------------

/// `"30 meters"` below a kilometre, `"1.2 km"` above.
pub fn format_distance(distance: f64) -> String {
    let d = crate::types::clamp_distance(distance);
    if d < 1000.0 {
        format!("{} meters", meters(d))
    } else {
        format!("{:.1} km", d / 1000.0)
    }
}
