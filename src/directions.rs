//! `Directions` – one processed route, shared by every view adapter.
//!
//! ```text
//! RawPathResult ──synthesize──▶ ProcessedStep[] ──simplify──▶ steps
//!                                      │
//!                  resolve_total_distance / estimate_minutes
//! ```

use crate::config::{DirectionsConfig, Surface};
use crate::grouping::group_directions;
use crate::instructions::{describe_step, format_distance, simplify, synthesize, RouteContext};
use crate::timing::{estimate_minutes, resolve_total_distance};
use crate::types::{DirectionGroup, ProcessedStep, RawPathResult};
use crate::venue::VenueDirectory;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Directions {
    /// Display steps; never empty.
    pub steps: Vec<ProcessedStep>,
    /// Resolved route length in metres (0 when unresolvable).
    pub total_distance: f64,
    pub estimated_minutes: u32,
    pub context: RouteSummaryNames,
    #[serde(skip)]
    pub raw: RawPathResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteSummaryNames {
    pub departure: String,
    pub destination: String,
}

impl Directions {
    /// Run the full processing pipeline over a pathfinder result.
    pub fn process(
        raw: RawPathResult,
        ctx: &RouteContext,
        venue: Option<&VenueDirectory>,
        cfg: &DirectionsConfig,
    ) -> Self {
        let synthesized = synthesize(&raw.steps, ctx, venue);

        let total_distance =
            resolve_total_distance(raw.total_distance, &synthesized, Some(&raw)).unwrap_or(0.0);
        let steps = simplify(synthesized, total_distance, cfg.short_route_threshold_m);
        let estimated_minutes = estimate_minutes(Some(total_distance), &steps, Some(&raw), cfg);

        log::debug!(
            "Processed {} raw steps into {} ({:.1}m, {} min)",
            raw.steps.len(),
            steps.len(),
            total_distance,
            estimated_minutes
        );

        Self {
            steps,
            total_distance,
            estimated_minutes,
            context: RouteSummaryNames {
                departure: ctx.departure_name.clone(),
                destination: ctx.destination_name.clone(),
            },
            raw,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&ProcessedStep> {
        self.steps.get(index)
    }

    pub fn instructions(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.instruction.as_str()).collect()
    }

    pub fn groups(&self) -> Vec<DirectionGroup> {
        group_directions(&self.steps)
    }

    pub fn route_context(&self) -> RouteContext {
        RouteContext::new(&self.context.departure, &self.context.destination)
    }

    /// Landmark/floor-aware text for one step on the given surface.
    pub fn describe(
        &self,
        index: usize,
        venue: &VenueDirectory,
        surface: Surface,
        cfg: &DirectionsConfig,
    ) -> String {
        describe_step(
            &self.steps,
            index,
            &self.route_context(),
            venue,
            cfg.surface(surface),
        )
    }

    /// e.g. `"400 meters"`, for the route summary header.
    pub fn distance_label(&self) -> String {
        format_distance(self.total_distance)
    }
}
