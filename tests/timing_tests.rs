//! Walking time and route distance tests

#[cfg(test)]
mod tests {
    use venue_directions::config::DirectionsConfig;
    use venue_directions::timing::{estimate_minutes, estimate_seconds, resolve_total_distance};
    use venue_directions::types::{
        ProcessedStep, RawPathResult, RawStep, StepAction, StepKind, TurnBearing,
    };

    fn walk(distance: f64) -> ProcessedStep {
        ProcessedStep::synthetic("Continue straight", distance)
    }

    fn elevator() -> ProcessedStep {
        let mut step = ProcessedStep::synthetic("Continue straight", 0.0);
        step.kind = StepKind::Elevator;
        step
    }

    fn right_turn(distance: f64) -> ProcessedStep {
        let mut step = ProcessedStep::synthetic("Turn right", distance);
        step.action = Some(StepAction::turn(TurnBearing::Right));
        step
    }

    // -----------------------------------------------------------------------
    // Estimates
    // -----------------------------------------------------------------------

    #[test]
    fn elevator_and_turn_add_overheads() {
        let cfg = DirectionsConfig::default();
        let steps = vec![elevator(), right_turn(0.0)];

        // (400 / 1.4 + 2 + 30) * 1.1 ≈ 349.5 s
        let seconds = estimate_seconds(400.0, &steps, &cfg);
        assert!((seconds - 349.486).abs() < 0.01, "got {}", seconds);
        assert_eq!(estimate_minutes(Some(400.0), &steps, None, &cfg), 6);
    }

    #[test]
    fn straight_steps_carry_no_turn_penalty() {
        let cfg = DirectionsConfig::default();
        let plain = estimate_seconds(100.0, &[walk(100.0)], &cfg);
        assert!((plain - 100.0 / 1.4 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn vertical_connections_use_their_own_overhead() {
        let cfg = DirectionsConfig::default();
        let mut stairs = walk(0.0);
        stairs.kind = StepKind::Stairs;
        let mut escalator = walk(0.0);
        escalator.kind = StepKind::Escalator;

        let s = estimate_seconds(0.0, &[stairs], &cfg);
        let e = estimate_seconds(0.0, &[escalator], &cfg);
        assert!((s - 45.0 * 1.1).abs() < 1e-9);
        assert!((e - 20.0 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn never_below_one_minute() {
        let cfg = DirectionsConfig::default();
        assert_eq!(estimate_minutes(Some(3.0), &[walk(3.0)], None, &cfg), 1);
        assert_eq!(estimate_minutes(None, &[], None, &cfg), 1);
        assert_eq!(estimate_minutes(Some(f64::NAN), &[walk(0.0)], None, &cfg), 1);
    }

    #[test]
    fn longer_routes_never_estimate_less() {
        let cfg = DirectionsConfig::default();
        let short = estimate_minutes(None, &[walk(100.0), walk(200.0)], None, &cfg);
        let long = estimate_minutes(None, &[walk(200.0), walk(400.0)], None, &cfg);
        assert_eq!(short, 4);
        assert_eq!(long, 8);
        assert!(long >= short);
    }

    // -----------------------------------------------------------------------
    // Distance resolution
    // -----------------------------------------------------------------------

    #[test]
    fn positive_aggregate_wins() {
        let d = resolve_total_distance(Some(250.0), &[walk(10.0)], None);
        assert_eq!(d, Some(250.0));
    }

    #[test]
    fn zero_or_missing_aggregate_falls_back_to_steps() {
        let steps = vec![walk(100.0), walk(200.0)];
        assert_eq!(resolve_total_distance(Some(0.0), &steps, None), Some(300.0));
        assert_eq!(resolve_total_distance(None, &steps, None), Some(300.0));
        assert_eq!(resolve_total_distance(Some(-7.0), &steps, None), Some(300.0));
    }

    #[test]
    fn raw_steps_are_the_last_resort() {
        let raw = RawPathResult {
            steps: vec![RawStep {
                distance: Some(84.0),
                ..Default::default()
            }],
            ..Default::default()
        };
        let cfg = DirectionsConfig::default();

        assert_eq!(resolve_total_distance(None, &[walk(0.0)], Some(&raw)), Some(84.0));
        // 84 / 1.4 * 1.1 = 66 s
        assert_eq!(estimate_minutes(None, &[walk(0.0)], Some(&raw), &cfg), 2);
    }

    #[test]
    fn nothing_resolvable_is_none() {
        assert_eq!(resolve_total_distance(None, &[], None), None);
        assert_eq!(resolve_total_distance(Some(f64::INFINITY), &[walk(0.0)], None), None);
    }

    #[test]
    fn custom_walking_speed_changes_estimate() {
        let cfg = DirectionsConfig {
            walking_speed_mps: 0.7,
            ..Default::default()
        };
        // 400 / 0.7 * 1.1 ≈ 628.6 s
        assert_eq!(estimate_minutes(Some(400.0), &[walk(400.0)], None, &cfg), 11);
    }
}
