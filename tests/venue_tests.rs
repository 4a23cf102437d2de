//! Venue directory and config tests

#[cfg(test)]
mod tests {
    use std::io::Write;
    use venue_directions::config::{DirectionsConfig, Surface};
    use venue_directions::types::{Coordinate, Floor, Space};
    use venue_directions::venue::{VenueDirectory, UNKNOWN_LEVEL};
    use venue_directions::DirectionsError;

    fn space(id: &str, name: &str, center: Option<Coordinate>, categories: &[&str]) -> Space {
        Space {
            id: id.into(),
            name: name.into(),
            center,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            logo: None,
        }
    }

    fn make_venue() -> VenueDirectory {
        let mut v = VenueDirectory::new();
        v.insert_floor(Floor { id: "f1".into(), name: "Level 1".into() });
        v.insert_floor(Floor { id: "f2".into(), name: "Level 2".into() });
        let f1 = |lat, lon| Some(Coordinate::new(lat, lon).on_floor("f1"));
        v.insert_space(space("zara", "Zara", f1(10.0001, 10.0), &["Fashion"]));
        v.insert_space(space("apple", "apple", f1(10.00005, 10.0), &["Electronics"]));
        v.insert_space(space("gap", "Gap", f1(10.0, 10.00015), &["Fashion", "Kids"]));
        v.insert_space(space("unnamed", "", f1(10.0, 10.0), &[]));
        v.insert_space(space(
            "food",
            "Food Court",
            Some(Coordinate::new(10.0, 10.0).on_floor("f2")),
            &["Dining"],
        ));
        v.insert_space(space("kiosk", "Kiosk", None, &[]));
        v
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    #[test]
    fn resolves_by_id_then_name() {
        let v = make_venue();
        assert_eq!(v.resolve("gap").map(|s| s.name.as_str()), Some("Gap"));
        assert_eq!(v.resolve("FOOD COURT").map(|s| s.id.as_str()), Some("food"));
        assert!(v.resolve("Nowhere").is_none());
    }

    #[test]
    fn insert_replaces_existing_space() {
        let mut v = make_venue();
        let before = v.space_count();
        v.insert_space(space("gap", "Gap Kids", None, &[]));
        assert_eq!(v.space_count(), before);
        assert_eq!(v.space("gap").map(|s| s.name.as_str()), Some("Gap Kids"));
    }

    #[test]
    fn nearby_spaces_sorted_by_distance_on_same_floor() {
        let v = make_venue();
        let here = Coordinate::new(10.0, 10.0).on_floor("f1");

        assert_eq!(v.nearby_spaces(&here, 20.0, 5), vec!["apple", "Zara", "Gap"]);
        assert_eq!(v.nearby_spaces(&here, 12.0, 5), vec!["apple", "Zara"]);
        assert_eq!(v.nearby_spaces(&here, 20.0, 1), vec!["apple"]);

        let upstairs = Coordinate::new(10.0, 10.0).on_floor("f2");
        assert_eq!(v.nearby_spaces(&upstairs, 20.0, 5), vec!["Food Court"]);
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    #[test]
    fn locations_sorted_case_insensitively() {
        let names: Vec<_> = make_venue().locations().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["", "apple", "Food Court", "Gap", "Kiosk", "Zara"]);
    }

    #[test]
    fn locations_carry_level_names() {
        let v = make_venue();
        let locations = v.locations();
        let level = |id: &str| {
            locations
                .iter()
                .find(|l| l.id == id)
                .map(|l| l.level.clone())
                .unwrap()
        };
        assert_eq!(level("food"), "Level 2");
        assert_eq!(level("kiosk"), UNKNOWN_LEVEL);
    }

    #[test]
    fn search_matches_name_level_and_category() {
        let v = make_venue();
        let ids = |term: &str| -> Vec<String> { v.search(term).into_iter().map(|l| l.id).collect() };

        assert_eq!(ids("fashion"), vec!["gap", "zara"]);
        assert_eq!(ids("COURT"), vec!["food"]);
        assert_eq!(ids("level 2"), vec!["food"]);
        assert_eq!(ids("  "), v.locations().into_iter().map(|l| l.id).collect::<Vec<_>>());
        assert!(ids("xyz").is_empty());
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "floors": [{ "id": "f1", "name": "Ground" }],
            "spaces": [
                { "id": "s1", "name": "Lobby", "center": { "latitude": 1.0, "longitude": 2.0, "floorId": "f1" } },
                { "id": "s2" }
            ]
        }"#;
        let v = VenueDirectory::from_json(json).unwrap();
        assert_eq!(v.floor_count(), 1);
        assert_eq!(v.space_count(), 2);
        assert_eq!(v.floor_name("f1"), Some("Ground"));
        assert_eq!(
            v.space("s1").and_then(|s| s.center.as_ref()).and_then(|c| c.floor_id.as_deref()),
            Some("f1")
        );
        assert!(VenueDirectory::from_json("not json").is_err());
    }

    // -----------------------------------------------------------------------
    // Config
    // -----------------------------------------------------------------------

    #[test]
    fn default_config_is_valid() {
        let cfg = DirectionsConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.surface(Surface::Mobile).pitch, 60.0);
        assert_eq!(cfg.floor_switch_delay().as_millis(), 800);
        assert!(!cfg.route_options.accessible);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let slow = DirectionsConfig {
            walking_speed_mps: 0.0,
            ..Default::default()
        };
        assert!(matches!(slow.validate(), Err(DirectionsError::InvalidConfig(_))));

        let shrink = DirectionsConfig {
            buffer_multiplier: 0.5,
            ..Default::default()
        };
        assert!(shrink.validate().is_err());

        let negative = DirectionsConfig {
            elevator_secs: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn file_overrides_keep_other_defaults() {
        let path = std::env::temp_dir().join(format!(
            "venue-directions-config-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "walking_speed_mps = 1.2").unwrap();
        writeln!(file, "[mobile]").unwrap();
        writeln!(file, "pitch = 55.0").unwrap();
        drop(file);

        let cfg = DirectionsConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.walking_speed_mps, 1.2);
        assert_eq!(cfg.mobile.pitch, 55.0);
        assert_eq!(cfg.mobile.zoom_level, 20.0);
        assert_eq!(cfg.mobile.near_limit, 1);
        assert_eq!(cfg.desktop.zoom_level, 19.0);
    }

    #[test]
    fn cli_env_vars_do_not_leak_into_config() {
        // The binary reads these through clap with the same prefix.
        std::env::set_var("DIRECTIONS_ROUTE", "demos/route.json");
        std::env::set_var("DIRECTIONS_VENUE", "demos/venue.json");
        std::env::set_var("DIRECTIONS_SURFACE", "mobile");
        std::env::set_var("DIRECTIONS_FLOOR_SWITCH_DELAY_MS", "650");

        let loaded = DirectionsConfig::load(None);

        for key in [
            "DIRECTIONS_ROUTE",
            "DIRECTIONS_VENUE",
            "DIRECTIONS_SURFACE",
            "DIRECTIONS_FLOOR_SWITCH_DELAY_MS",
        ] {
            std::env::remove_var(key);
        }

        let cfg = loaded.expect("config loads alongside CLI variables");
        assert_eq!(cfg.floor_switch_delay_ms, 650);
        assert_eq!(cfg.route_options, venue_directions::protocol::RouteOptions::default());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let path = std::env::temp_dir().join("venue-directions-does-not-exist.toml");
        assert!(DirectionsConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn surface_parses_case_insensitively() {
        assert_eq!("Mobile".parse::<Surface>().unwrap(), Surface::Mobile);
        assert_eq!("desktop".parse::<Surface>().unwrap(), Surface::Desktop);
        assert!("watch".parse::<Surface>().is_err());
    }
}
