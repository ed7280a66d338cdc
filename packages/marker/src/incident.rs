//! Individual incident markers.

use gun_map_incident_models::IncidentRecord;
use gun_map_render::{Icon, ScreenPoint, Surface};

use crate::{HitShape, Marker, MarkerId, MarkerKind, MarkerState};

/// The pin's tip sits this far right of and below the icon's top-left corner.
const ICON_ANCHOR: (f32, f32) = (20.0, 39.0);
const ICON_SIZE: (f32, f32) = (40.0, 40.0);

/// Marker for a single incident. Hidden until its region is drilled into.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentMarker {
    state: MarkerState,
    region: String,
    county: String,
    address: String,
    date: String,
    killed: u32,
    injured: u32,
}

impl IncidentMarker {
    /// Creates a hidden marker for `record`, which sits at position `index`
    /// of the full input list.
    #[must_use]
    pub fn new(index: usize, record: &IncidentRecord) -> Self {
        let mut state = MarkerState::new(MarkerId::Incident(index), record.location);
        state.hidden = true;
        Self {
            state,
            region: record.region.clone(),
            county: record.county.clone(),
            address: record.address.clone(),
            date: record.date.clone(),
            killed: record.killed,
            injured: record.injured,
        }
    }

    /// Region the incident belongs to.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Date with surrounding quote characters removed.
    #[must_use]
    pub fn date(&self) -> &str {
        let date = self.date.strip_prefix('"').unwrap_or(&self.date);
        date.strip_suffix('"').unwrap_or(date)
    }

    fn icon_origin(at: ScreenPoint) -> ScreenPoint {
        at.offset(-ICON_ANCHOR.0, -ICON_ANCHOR.1)
    }
}

impl Marker for IncidentMarker {
    fn kind(&self) -> MarkerKind {
        MarkerKind::Incident
    }

    fn state(&self) -> &MarkerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut MarkerState {
        &mut self.state
    }

    fn title(&self) -> &str {
        &self.address
    }

    fn detail_text(&self) -> String {
        format!(
            "{}\n\n{}, {}\n\n{}\n\n# People killed: {}\n\n# People injured: {}",
            self.address,
            self.county,
            self.region,
            self.date(),
            self.killed,
            self.injured
        )
    }

    fn draw(&self, surface: &mut dyn Surface, at: ScreenPoint) {
        if self.state.hidden {
            return;
        }
        surface.draw_icon(Icon::IncidentPin, Self::icon_origin(at));
    }

    fn hit_shape(&self, at: ScreenPoint) -> HitShape {
        HitShape::Rect {
            top_left: Self::icon_origin(at),
            width: ICON_SIZE.0,
            height: ICON_SIZE.1,
        }
    }
}
