//! Walking time estimation.

use crate::config::DirectionsConfig;
use crate::types::{ProcessedStep, RawPathResult, StepKind};

/// Total route distance, by precedence: aggregate → processed steps → raw steps.
///
/// Returns `None` when no source yields a positive finite distance.
pub fn resolve_total_distance(
    aggregate: Option<f64>,
    steps: &[ProcessedStep],
    raw: Option<&RawPathResult>,
) -> Option<f64> {
    let positive = |d: f64| (d.is_finite() && d > 0.0).then_some(d);

    aggregate
        .and_then(positive)
        .or_else(|| positive(steps.iter().map(|s| s.distance.max(0.0)).sum()))
        .or_else(|| raw.and_then(|r| positive(r.summed_step_distance())))
}

/// Estimated walking time in seconds, before rounding to minutes.
pub fn estimate_seconds(distance: f64, steps: &[ProcessedStep], cfg: &DirectionsConfig) -> f64 {
    let mut seconds = distance / cfg.walking_speed_mps;

    let turns = steps.iter().filter(|s| s.as_raw().is_turn()).count();
    seconds += turns as f64 * cfg.turn_penalty_secs;

    for step in steps {
        seconds += match step.kind {
            StepKind::Elevator => cfg.elevator_secs,
            StepKind::Escalator => cfg.escalator_secs,
            StepKind::Stairs => cfg.stairs_secs,
            _ => 0.0,
        };
    }

    seconds * cfg.buffer_multiplier
}

/// Whole minutes, never below 1.
pub fn estimate_minutes(
    aggregate: Option<f64>,
    steps: &[ProcessedStep],
    raw: Option<&RawPathResult>,
    cfg: &DirectionsConfig,
) -> u32 {
    let Some(distance) = resolve_total_distance(aggregate, steps, raw) else {
        log::debug!("No route distance resolvable, defaulting to 1 minute");
        return 1;
    };

    let seconds = estimate_seconds(distance, steps, cfg);
    if !seconds.is_finite() || seconds <= 0.0 {
        return 1;
    }
    let minutes = (seconds / 60.0).ceil().max(1.0);
    log::debug!(
        "Estimated {:.1}s ({} min) for {:.1}m",
        seconds,
        minutes,
        distance
    );
    minutes.min(u32::MAX as f64) as u32
}
