//! Navigation cursor state machine tests

#[cfg(test)]
mod tests {
    use venue_directions::config::Surface;
    use venue_directions::cursor::{NavigationCursor, NavigationPhase};
    use venue_directions::DirectionsError;

    fn stepping(len: usize, surface: Surface) -> NavigationCursor {
        let mut cursor = NavigationCursor::new();
        cursor.route_computed(len).unwrap();
        cursor.start_stepping(surface).unwrap();
        cursor
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    #[test]
    fn starts_idle() {
        let cursor = NavigationCursor::new();
        assert_eq!(cursor.phase(), NavigationPhase::Idle);
        assert!(cursor.is_empty());
        assert_eq!(cursor.surface(), None);
    }

    #[test]
    fn empty_route_is_rejected() {
        let mut cursor = NavigationCursor::new();
        let err = cursor.route_computed(0).unwrap_err();
        assert!(matches!(err, DirectionsError::InvalidTransition { .. }));
        assert_eq!(cursor.phase(), NavigationPhase::Idle);
    }

    #[test]
    fn stepping_requires_summary() {
        let mut cursor = NavigationCursor::new();
        assert!(cursor.start_stepping(Surface::Desktop).is_err());

        cursor.route_computed(3).unwrap();
        assert_eq!(cursor.phase(), NavigationPhase::Summary);
        cursor.start_stepping(Surface::Desktop).unwrap();
        assert_eq!(cursor.phase(), NavigationPhase::Stepping(Surface::Desktop));

        // Re-entering the same surface is a no-op, switching is not allowed.
        assert!(cursor.start_stepping(Surface::Desktop).is_ok());
        assert!(cursor.start_stepping(Surface::Mobile).is_err());
    }

    #[test]
    fn moves_only_while_stepping() {
        let mut cursor = NavigationCursor::new();
        cursor.route_computed(3).unwrap();
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.select(1), None);
        assert_eq!(cursor.index(), 0);
    }

    // -----------------------------------------------------------------------
    // Index bounds
    // -----------------------------------------------------------------------

    #[test]
    fn index_clamped_at_both_ends() {
        let mut cursor = stepping(3, Surface::Mobile);

        assert_eq!(cursor.previous(), None);
        assert!(cursor.at_first());
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(cursor.next(), Some(2));
        assert!(cursor.at_last());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.previous(), Some(1));
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut cursor = stepping(4, Surface::Desktop);
        assert_eq!(cursor.select(3), Some(3));
        assert_eq!(cursor.select(4), None);
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn single_step_route_is_first_and_last() {
        let mut cursor = stepping(1, Surface::Desktop);
        assert!(cursor.at_first());
        assert!(cursor.at_last());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.previous(), None);
    }

    // -----------------------------------------------------------------------
    // Back / clear
    // -----------------------------------------------------------------------

    #[test]
    fn desktop_back_returns_to_summary() {
        let mut cursor = stepping(3, Surface::Desktop);
        cursor.next();
        assert_eq!(cursor.back(), NavigationPhase::Summary);
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.len(), 3);

        assert_eq!(cursor.back(), NavigationPhase::Idle);
        assert!(cursor.is_empty());
    }

    #[test]
    fn mobile_back_goes_idle() {
        let mut cursor = stepping(3, Surface::Mobile);
        cursor.next();
        assert_eq!(cursor.back(), NavigationPhase::Idle);
        assert!(cursor.is_empty());
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn clear_resets_everything_but_floor() {
        let mut cursor = stepping(3, Surface::Desktop);
        cursor.set_floor(Some("f2".into()));
        cursor.set_bearing(90.0);
        cursor.clear();
        assert_eq!(cursor.phase(), NavigationPhase::Idle);
        assert_eq!(cursor.bearing(), 0.0);
        assert_eq!(cursor.floor(), Some("f2"));
    }

    // -----------------------------------------------------------------------
    // Arrival
    // -----------------------------------------------------------------------

    #[test]
    fn arrival_marked_once_per_route() {
        let mut cursor = stepping(2, Surface::Desktop);
        assert!(cursor.mark_arrival());
        assert!(!cursor.mark_arrival());

        cursor.route_computed(2).unwrap();
        assert!(cursor.mark_arrival());
    }

    #[test]
    fn phase_serializes_with_surface() {
        let json = serde_json::to_string(&NavigationPhase::Stepping(Surface::Mobile)).unwrap();
        assert_eq!(json, r#"{"phase":"stepping","surface":"mobile"}"#);
        let idle = serde_json::to_string(&NavigationPhase::Idle).unwrap();
        assert_eq!(idle, r#"{"phase":"idle"}"#);
    }
}
