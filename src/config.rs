//! Tunables for instruction synthesis, time estimation and camera choreography.
//!
//! `DirectionsConfig::default()` carries the stock venue values. Deployments
//! override them through an optional TOML file layered under `DIRECTIONS_*`
//! environment variables (nested keys use `__`, e.g.
//! `DIRECTIONS_MOBILE__ZOOM_LEVEL=19`).

use crate::error::{DirectionsError, Result};
use crate::protocol::{PathStyle, RouteOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "DIRECTIONS";

// ---------------------------------------------------------------------------
// Presentation surfaces
// ---------------------------------------------------------------------------

/// Where the step navigation is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Side card with a tappable step list.
    Desktop,
    /// Full-screen overlay with previous/next buttons.
    Mobile,
}

impl Surface {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

impl std::str::FromStr for Surface {
    type Err = DirectionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "mobile" => Ok(Self::Mobile),
            other => Err(DirectionsError::InvalidConfig(format!(
                "unknown surface '{}'",
                other
            ))),
        }
    }
}

/// Camera and nearby-lookup preset for one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub zoom_level: f64,
    pub pitch: f64,
    pub animation_ms: u64,
    /// Radius for "near …" landmarks, in metres.
    pub near_radius_m: f64,
    /// Maximum landmarks named per instruction.
    pub near_limit: usize,
}

impl SurfaceConfig {
    pub fn desktop() -> Self {
        Self {
            zoom_level: 19.0,
            pitch: 15.0,
            animation_ms: 1500,
            near_radius_m: 20.0,
            near_limit: 2,
        }
    }

    pub fn mobile() -> Self {
        Self {
            zoom_level: 20.0,
            pitch: 60.0,
            animation_ms: 1000,
            near_radius_m: 15.0,
            near_limit: 1,
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

// ---------------------------------------------------------------------------
// Directions config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionsConfig {
    /// Average walking speed in metres per second.
    pub walking_speed_mps: f64,
    /// Extra seconds per turn.
    pub turn_penalty_secs: f64,
    pub elevator_secs: f64,
    pub escalator_secs: f64,
    pub stairs_secs: f64,
    /// Multiplier for doors, crowds and the like.
    pub buffer_multiplier: f64,
    /// Routes shorter than this collapse to a single step.
    pub short_route_threshold_m: f64,
    /// Wait after a floor switch before animating the camera.
    pub floor_switch_delay_ms: u64,
    /// Path coordinates framed when a route is first shown.
    pub focus_coordinate_limit: usize,
    pub focus_padding_px: f64,
    /// Duration of the camera restore when navigation is cleared.
    pub restore_duration_ms: u64,
    pub desktop: SurfaceConfig,
    pub mobile: SurfaceConfig,
    pub route_options: RouteOptions,
    pub path_style: PathStyle,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            walking_speed_mps: 1.4,
            turn_penalty_secs: 2.0,
            elevator_secs: 30.0,
            escalator_secs: 20.0,
            stairs_secs: 45.0,
            buffer_multiplier: 1.1,
            short_route_threshold_m: 5.0,
            floor_switch_delay_ms: 800,
            focus_coordinate_limit: 20,
            focus_padding_px: 50.0,
            restore_duration_ms: 2000,
            desktop: SurfaceConfig::desktop(),
            mobile: SurfaceConfig::mobile(),
            route_options: RouteOptions::default(),
            path_style: PathStyle::default(),
        }
    }
}

impl DirectionsConfig {
    /// Load from an optional TOML file, then `DIRECTIONS_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Seed with the full defaults so partial nested tables keep their
        // own surface's values.
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Self::default())?);
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let cfg: DirectionsConfig = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        log::debug!("Loaded directions config: {:?}", cfg);
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.walking_speed_mps.is_finite() && self.walking_speed_mps > 0.0) {
            return Err(DirectionsError::InvalidConfig(format!(
                "walking_speed_mps must be positive, got {}",
                self.walking_speed_mps
            )));
        }
        if !(self.buffer_multiplier.is_finite() && self.buffer_multiplier >= 1.0) {
            return Err(DirectionsError::InvalidConfig(format!(
                "buffer_multiplier must be at least 1.0, got {}",
                self.buffer_multiplier
            )));
        }
        let penalties = [
            ("turn_penalty_secs", self.turn_penalty_secs),
            ("elevator_secs", self.elevator_secs),
            ("escalator_secs", self.escalator_secs),
            ("stairs_secs", self.stairs_secs),
            ("short_route_threshold_m", self.short_route_threshold_m),
        ];
        for (name, value) in penalties {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DirectionsError::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn surface(&self, surface: Surface) -> &SurfaceConfig {
        match surface {
            Surface::Desktop => &self.desktop,
            Surface::Mobile => &self.mobile,
        }
    }

    pub fn floor_switch_delay(&self) -> Duration {
        Duration::from_millis(self.floor_switch_delay_ms)
    }
}
