//! Core directions types shared across all modules.
//!
//! Input records (`RawStep`, `RawPathResult`, venue records) mirror the
//! mapping SDK's camelCase JSON. Unknown enum tags deserialize to `Other`
//! so a newer SDK never breaks instruction synthesis.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<String>,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            floor_id: None,
        }
    }

    pub fn on_floor(mut self, floor_id: impl Into<String>) -> Self {
        self.floor_id = Some(floor_id.into());
        self
    }

    /// Planar distance in metres (1 degree ≈ 111 000 m).
    ///
    /// Only meaningful over a few dozen metres; used for nearby lookups.
    pub fn approx_distance_m(&self, other: &Coordinate) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        (dlat * dlat + dlon * dlon).sqrt() * METERS_PER_DEGREE
    }

    pub fn same_floor(&self, other: &Coordinate) -> bool {
        self.floor_id == other.floor_id
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.floor_id {
            Some(floor) => write!(f, "({:.6}, {:.6} @ {})", self.latitude, self.longitude, floor),
            None => write!(f, "({:.6}, {:.6})", self.latitude, self.longitude),
        }
    }
}

pub const METERS_PER_DEGREE: f64 = 111_000.0;

// ---------------------------------------------------------------------------
// Step classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Departure,
    Turn,
    Arrival,
    #[serde(other)]
    Other,
}

/// Turn label attached to a `Turn` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnBearing {
    Left,
    Right,
    Straight,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<TurnBearing>,
}

impl StepAction {
    pub fn departure() -> Self {
        Self {
            action_type: ActionType::Departure,
            bearing: None,
        }
    }

    pub fn arrival() -> Self {
        Self {
            action_type: ActionType::Arrival,
            bearing: None,
        }
    }

    pub fn turn(bearing: TurnBearing) -> Self {
        Self {
            action_type: ActionType::Turn,
            bearing: Some(bearing),
        }
    }
}

/// The step's `type`: plain walking or a vertical connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    #[default]
    Path,
    Elevator,
    Escalator,
    Stairs,
    #[serde(other)]
    Other,
}

impl StepKind {
    pub fn is_floor_change(self) -> bool {
        matches!(self, Self::Elevator | Self::Escalator | Self::Stairs)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Elevator => "elevator",
            Self::Escalator => "escalator",
            Self::Stairs => "stairs",
            Self::Other => "other",
        }
    }
}

/// Direction of travel at a step, relative to the approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    Straight,
    SlightlyLeft,
    Left,
    SharpLeft,
    SlightlyRight,
    Right,
    SharpRight,
    Around,
}

impl TurnDirection {
    /// Classify a relative angle given in radians.
    pub fn from_angle(radians: f64) -> Self {
        if !radians.is_finite() {
            return Self::Straight;
        }
        let mut degrees = (radians * 180.0 / PI + 360.0) % 360.0;
        if degrees > 180.0 {
            degrees -= 360.0;
        }

        match degrees {
            d if (-15.0..=15.0).contains(&d) => Self::Straight,
            d if d > 135.0 || d < -135.0 => Self::Around,
            d if d > 90.0 => Self::SharpRight,
            d if d > 45.0 => Self::Right,
            d if d > 15.0 => Self::SlightlyRight,
            d if d < -90.0 => Self::SharpLeft,
            d if d < -45.0 => Self::Left,
            _ => Self::SlightlyLeft,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw path result (pathfinder output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStep {
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub action: Option<StepAction>,
    #[serde(default, rename = "type")]
    pub kind: StepKind,
    /// Relative turn angle in radians, when the SDK provides one.
    #[serde(default)]
    pub angle: Option<f64>,
}

impl RawStep {
    /// Distance from the previous step, clamped to a finite value ≥ 0.
    pub fn distance(&self) -> f64 {
        clamp_distance(self.distance.unwrap_or(0.0))
    }

    pub fn action_type(&self) -> Option<ActionType> {
        self.action.map(|a| a.action_type)
    }

    pub fn turn_bearing(&self) -> Option<TurnBearing> {
        self.action.and_then(|a| a.bearing)
    }

    pub fn floor_id(&self) -> Option<&str> {
        self.coordinate.as_ref().and_then(|c| c.floor_id.as_deref())
    }

    /// Direction of travel: the turn label when present, else the angle.
    pub fn direction(&self) -> TurnDirection {
        match self.action {
            Some(StepAction {
                action_type: ActionType::Turn,
                bearing: Some(TurnBearing::Left),
            }) => TurnDirection::Left,
            Some(StepAction {
                action_type: ActionType::Turn,
                bearing: Some(TurnBearing::Right),
            }) => TurnDirection::Right,
            Some(StepAction {
                action_type: ActionType::Departure | ActionType::Arrival,
                ..
            }) => TurnDirection::Straight,
            _ => self
                .angle
                .map(TurnDirection::from_angle)
                .unwrap_or(TurnDirection::Straight),
        }
    }

    /// A walking step that changes heading. Costs extra time.
    pub fn is_turn(&self) -> bool {
        self.kind == StepKind::Path && self.direction() != TurnDirection::Straight
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPathResult {
    #[serde(default, alias = "instructions")]
    pub steps: Vec<RawStep>,
    /// Aggregate distance. Unreliable: may be missing or zero.
    #[serde(default)]
    pub total_distance: Option<f64>,
    /// Full path polyline used for initial camera framing.
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
}

impl RawPathResult {
    pub fn summed_step_distance(&self) -> f64 {
        self.steps.iter().map(RawStep::distance).sum()
    }
}

// ---------------------------------------------------------------------------
// Processed directions
// ---------------------------------------------------------------------------

/// A raw step with its synthesized instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedStep {
    pub instruction: String,
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<StepAction>,
    #[serde(default)]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl ProcessedStep {
    pub fn from_raw(raw: &RawStep, instruction: String) -> Self {
        Self {
            instruction,
            distance: raw.distance(),
            coordinate: raw.coordinate.clone(),
            action: raw.action,
            kind: raw.kind,
            angle: raw.angle,
        }
    }

    /// The synthetic single step used for very short routes.
    pub fn synthetic(instruction: impl Into<String>, distance: f64) -> Self {
        Self {
            instruction: instruction.into(),
            distance: clamp_distance(distance),
            coordinate: None,
            action: None,
            kind: StepKind::Path,
            angle: None,
        }
    }

    /// View of this step as a raw step, for direction/turn helpers.
    pub fn as_raw(&self) -> RawStep {
        RawStep {
            coordinate: self.coordinate.clone(),
            distance: Some(self.distance),
            action: self.action,
            kind: self.kind,
            angle: self.angle,
        }
    }

    pub fn action_type(&self) -> Option<ActionType> {
        self.action.map(|a| a.action_type)
    }

    pub fn is_arrival(&self) -> bool {
        self.action_type() == Some(ActionType::Arrival)
    }

    pub fn floor_id(&self) -> Option<&str> {
        self.coordinate.as_ref().and_then(|c| c.floor_id.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    Straight,
    Turn,
    LevelChange,
}

impl GroupKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Turn => "turn",
            Self::LevelChange => "level change",
        }
    }
}

/// Consecutive steps sharing a classification. Display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionGroup {
    pub kind: GroupKind,
    pub steps: Vec<ProcessedStep>,
    pub total_distance: f64,
}

// ---------------------------------------------------------------------------
// Venue records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
}

/// A named point of interest (shop, booth, room …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub center: Option<Coordinate>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Search-list projection of a [`Space`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    /// Floor name, or `"Unknown Level"`.
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

pub(crate) fn clamp_distance(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
