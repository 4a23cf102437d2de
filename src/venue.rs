//! Venue directory: floors, named spaces and the lookups built on them.

use crate::types::{Coordinate, Floor, Location, Space};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const UNKNOWN_LEVEL: &str = "Unknown Level";

/// On-disk / SDK export shape of a venue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueData {
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub spaces: Vec<Space>,
}

/// Holds every floor and space of a venue.
#[derive(Debug, Clone, Default)]
pub struct VenueDirectory {
    floors: HashMap<String, Floor>,
    spaces: Vec<Space>,
    by_id: HashMap<String, usize>,
}

impl VenueDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: VenueData) -> Self {
        let mut dir = Self::new();
        for floor in data.floors {
            dir.insert_floor(floor);
        }
        for space in data.spaces {
            dir.insert_space(space);
        }
        dir
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        let data: VenueData = serde_json::from_str(json)?;
        Ok(Self::from_data(data))
    }

    pub fn insert_floor(&mut self, floor: Floor) {
        self.floors.insert(floor.id.clone(), floor);
    }

    pub fn insert_space(&mut self, space: Space) {
        match self.by_id.get(&space.id) {
            Some(&idx) => self.spaces[idx] = space,
            None => {
                self.by_id.insert(space.id.clone(), self.spaces.len());
                self.spaces.push(space);
            }
        }
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn space_count(&self) -> usize {
        self.spaces.len()
    }

    pub fn floor(&self, id: &str) -> Option<&Floor> {
        self.floors.get(id)
    }

    /// Display name of a floor, if the floor is known and named.
    pub fn floor_name(&self, id: &str) -> Option<&str> {
        self.floors
            .get(id)
            .map(|f| f.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn space(&self, id: &str) -> Option<&Space> {
        self.by_id.get(id).map(|&idx| &self.spaces[idx])
    }

    /// First space whose name matches exactly (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Space> {
        self.spaces
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Resolve either an id or a name.
    pub fn resolve(&self, key: &str) -> Option<&Space> {
        self.space(key).or_else(|| self.find_by_name(key))
    }

    // -----------------------------------------------------------------------
    // Nearby lookups
    // -----------------------------------------------------------------------

    /// Names of the closest named spaces within `radius_m` on the same floor.
    pub fn nearby_spaces(&self, at: &Coordinate, radius_m: f64, limit: usize) -> Vec<&str> {
        let mut hits: Vec<(f64, &str)> = self
            .spaces
            .iter()
            .filter(|s| !s.name.is_empty())
            .filter_map(|s| {
                let center = s.center.as_ref()?;
                if !center.same_floor(at) {
                    return None;
                }
                let d = center.approx_distance_m(at);
                (d <= radius_m).then_some((d, s.name.as_str()))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().take(limit).map(|(_, name)| name).collect()
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Every space as a search-list entry, sorted by name.
    pub fn locations(&self) -> Vec<Location> {
        let mut list: Vec<Location> = self.spaces.iter().map(|s| self.to_location(s)).collect();
        list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        list
    }

    /// Case-insensitive match on name, level or any category.
    ///
    /// An empty term returns every location.
    pub fn search(&self, term: &str) -> Vec<Location> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.locations();
        }
        self.locations()
            .into_iter()
            .filter(|loc| {
                loc.name.to_lowercase().contains(&needle)
                    || loc.level.to_lowercase().contains(&needle)
                    || loc
                        .categories
                        .iter()
                        .any(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }

    fn to_location(&self, space: &Space) -> Location {
        let level = space
            .center
            .as_ref()
            .and_then(|c| c.floor_id.as_deref())
            .and_then(|id| self.floor_name(id))
            .unwrap_or(UNKNOWN_LEVEL)
            .to_string();

        Location {
            id: space.id.clone(),
            name: space.name.clone(),
            level,
            logo: space.logo.clone(),
            categories: space.categories.clone(),
        }
    }
}
