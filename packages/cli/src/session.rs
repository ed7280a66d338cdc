//! Scripted pointer sessions.
//!
//! A session file is a TOML list of pointer events replayed against a
//! [`Dashboard`] in order:
//!
//! ```toml
//! [[events]]
//! kind = "move"
//! x = 400.0
//! y = 350.0
//!
//! [[events]]
//! kind = "release"
//! x = 776.0
//! y = 606.0
//! ```

use gun_map_dashboard::Dashboard;
use gun_map_interaction::{DrillState, ProjectedHitTest, YearChange};
use gun_map_marker::MarkerKind;
use gun_map_render::{Projection, ScreenPoint, recording::RecordingSurface};
use serde::Deserialize;

/// One pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Pointer moved with no button pressed.
    Move {
        /// Screen x.
        x: f32,
        /// Screen y.
        y: f32,
    },
    /// Pointer clicked.
    Click {
        /// Screen x.
        x: f32,
        /// Screen y.
        y: f32,
    },
    /// Pointer button released.
    Release {
        /// Screen x.
        x: f32,
        /// Screen y.
        y: f32,
    },
}

impl SessionEvent {
    const fn point(self) -> ScreenPoint {
        match self {
            Self::Move { x, y } | Self::Click { x, y } | Self::Release { x, y } => {
                ScreenPoint::new(x, y)
            }
        }
    }
}

/// A parsed session file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    /// Events in replay order.
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

impl Session {
    /// Parses a session document.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if `toml_str` is not a valid session.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::de::from_str(toml_str)
    }
}

/// What the dashboard looked like after one event.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// The event just applied.
    pub event: SessionEvent,
    /// Outcome of a release over a year button.
    pub year_change: Option<YearChange>,
    /// Selected year afterwards.
    pub year: String,
    /// Drill-down state afterwards.
    pub drill: DrillState,
    /// Kind of the marker under the pointer, if any.
    pub hovered: Option<MarkerKind>,
    /// Region markers drawn in the frame.
    pub regions_drawn: usize,
    /// Incident pins drawn in the frame.
    pub incidents_drawn: usize,
    /// Info panel text, if a visible marker is selected.
    pub info: Option<String>,
}

/// Applies every event in order, drawing a frame after each one.
pub fn replay(
    dashboard: &mut Dashboard,
    projection: &dyn Projection,
    session: &Session,
) -> Vec<StepReport> {
    let hit = ProjectedHitTest::new(projection);
    let mut surface = RecordingSurface::new();

    session
        .events
        .iter()
        .map(|&event| {
            let at = event.point();
            let year_change = match event {
                SessionEvent::Move { .. } => {
                    dashboard.pointer_moved(at, &hit);
                    None
                }
                SessionEvent::Click { .. } => {
                    dashboard.pointer_clicked(at, &hit);
                    None
                }
                SessionEvent::Release { .. } => dashboard.pointer_released(at),
            };

            surface.reset();
            dashboard.draw_frame(&mut surface, projection);

            let controller = dashboard.controller();
            let markers = controller.markers();
            StepReport {
                event,
                year_change,
                year: controller.selected_year().to_string(),
                drill: controller.drill_state(),
                hovered: controller
                    .selection()
                    .hovered
                    .and_then(|r| markers.get(r))
                    .map(|m| m.kind()),
                regions_drawn: markers
                    .visible()
                    .filter(|(_, m)| m.kind() == MarkerKind::Region)
                    .count(),
                incidents_drawn: surface.icon_count(),
                info: controller.info_text(),
            }
        })
        .collect()
}
