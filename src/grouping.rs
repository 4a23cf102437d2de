//! Step merging and coarse display grouping.

use crate::instructions::CONTINUE_STRAIGHT;
use crate::types::{DirectionGroup, GroupKind, ProcessedStep, StepKind};

/// Turns sharper than this (degrees) start a `turn` group.
pub const SIGNIFICANT_TURN_DEG: f64 = 20.0;

/// Fold runs of plain "Continue straight" steps into their first step.
///
/// Distances are summed, so the route total is unchanged.
pub fn merge_straight_steps(steps: Vec<ProcessedStep>) -> Vec<ProcessedStep> {
    let mut merged: Vec<ProcessedStep> = Vec::with_capacity(steps.len());

    for step in steps {
        match merged.last_mut() {
            Some(prev)
                if prev.instruction == CONTINUE_STRAIGHT && step.instruction == CONTINUE_STRAIGHT =>
            {
                prev.distance += step.distance;
            }
            _ => merged.push(step),
        }
    }

    merged
}

pub fn classify(step: &ProcessedStep) -> GroupKind {
    if step.kind.is_floor_change() {
        return GroupKind::LevelChange;
    }
    let significant = step
        .angle
        .filter(|a| a.is_finite())
        .is_some_and(|a| a.abs().to_degrees() > SIGNIFICANT_TURN_DEG);
    if step.kind == StepKind::Path && significant {
        GroupKind::Turn
    } else {
        GroupKind::Straight
    }
}

/// Group adjacent steps of the same class, summing their distances.
pub fn group_directions(steps: &[ProcessedStep]) -> Vec<DirectionGroup> {
    let mut groups: Vec<DirectionGroup> = Vec::new();

    for step in steps {
        let kind = classify(step);
        match groups.last_mut() {
            Some(group) if group.kind == kind => {
                group.total_distance += step.distance;
                group.steps.push(step.clone());
            }
            _ => groups.push(DirectionGroup {
                kind,
                steps: vec![step.clone()],
                total_distance: step.distance,
            }),
        }
    }

    groups
}
