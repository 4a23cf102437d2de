//! Navigation cursor state machine.
//!
//! ```text
//!   Idle ──route_computed──▶ Summary ──start_stepping──▶ Stepping(surface)
//!    ▲                        ▲   │                          │
//!    │                        │   └──back──▶ Idle            │
//!    │                        └────────back (desktop)────────┤
//!    └───────────────────────────back (mobile) / clear───────┘
//! ```
//!
//! The cursor only moves on explicit user actions; it never ticks.

use crate::config::Surface;
use crate::error::{DirectionsError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "surface", rename_all = "snake_case")]
pub enum NavigationPhase {
    /// No active route.
    Idle,
    /// Route computed, summary shown.
    Summary,
    /// Step-by-step view active.
    Stepping(Surface),
}

impl NavigationPhase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Summary => "showing the summary",
            Self::Stepping(_) => "stepping",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationCursor {
    phase: NavigationPhase,
    index: usize,
    len: usize,
    /// Floor currently displayed by the map.
    floor: Option<String>,
    /// Last camera bearing applied, degrees.
    bearing: f64,
    arrival_notified: bool,
}

impl Default for NavigationCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationCursor {
    pub fn new() -> Self {
        Self {
            phase: NavigationPhase::Idle,
            index: 0,
            len: 0,
            floor: None,
            bearing: 0.0,
            arrival_notified: false,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> NavigationPhase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn floor(&self) -> Option<&str> {
        self.floor.as_deref()
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    pub fn is_stepping(&self) -> bool {
        matches!(self.phase, NavigationPhase::Stepping(_))
    }

    pub fn surface(&self) -> Option<Surface> {
        match self.phase {
            NavigationPhase::Stepping(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn at_first(&self) -> bool {
        self.index == 0
    }

    pub fn at_last(&self) -> bool {
        self.len == 0 || self.index + 1 >= self.len
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// A route with `len` steps is ready. Recomputing resets the cursor.
    pub fn route_computed(&mut self, len: usize) -> Result<()> {
        if len == 0 {
            return Err(DirectionsError::InvalidTransition {
                action: "show an empty route",
                phase: self.phase.name(),
            });
        }
        self.phase = NavigationPhase::Summary;
        self.len = len;
        self.index = 0;
        self.arrival_notified = false;
        Ok(())
    }

    pub fn start_stepping(&mut self, surface: Surface) -> Result<()> {
        match self.phase {
            NavigationPhase::Summary => {
                self.phase = NavigationPhase::Stepping(surface);
                self.index = 0;
                Ok(())
            }
            NavigationPhase::Stepping(current) if current == surface => Ok(()),
            phase => Err(DirectionsError::InvalidTransition {
                action: "start stepping",
                phase: phase.name(),
            }),
        }
    }

    /// Advance one step. `None` when not stepping or already at the end.
    pub fn next(&mut self) -> Option<usize> {
        if !self.is_stepping() || self.at_last() {
            return None;
        }
        self.index += 1;
        Some(self.index)
    }

    /// Go back one step. `None` when not stepping or already at the start.
    pub fn previous(&mut self) -> Option<usize> {
        if !self.is_stepping() || self.at_first() {
            return None;
        }
        self.index -= 1;
        Some(self.index)
    }

    /// Jump to a step (step list tap). Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if !self.is_stepping() || index >= self.len {
            return None;
        }
        self.index = index;
        Some(index)
    }

    /// Leave the current view. Returns the new phase.
    pub fn back(&mut self) -> NavigationPhase {
        self.phase = match self.phase {
            NavigationPhase::Stepping(Surface::Desktop) => NavigationPhase::Summary,
            NavigationPhase::Stepping(Surface::Mobile) => {
                self.reset();
                NavigationPhase::Idle
            }
            NavigationPhase::Summary | NavigationPhase::Idle => {
                self.reset();
                NavigationPhase::Idle
            }
        };
        self.index = 0;
        self.phase
    }

    /// Drop the route entirely.
    pub fn clear(&mut self) {
        self.reset();
        self.phase = NavigationPhase::Idle;
    }

    fn reset(&mut self) {
        self.index = 0;
        self.len = 0;
        self.bearing = 0.0;
        self.arrival_notified = false;
    }

    // -----------------------------------------------------------------------
    // Derived state
    // -----------------------------------------------------------------------

    pub fn set_floor(&mut self, floor: Option<String>) {
        self.floor = floor;
    }

    pub fn set_bearing(&mut self, bearing: f64) {
        self.bearing = bearing;
    }

    /// `true` the first time it is called for the current route.
    pub fn mark_arrival(&mut self) -> bool {
        if self.arrival_notified {
            return false;
        }
        self.arrival_notified = true;
        true
    }
}
