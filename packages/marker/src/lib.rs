#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map markers.
//!
//! Two kinds of marker share the [`Marker`] capability set:
//!
//! * [`RegionMarker`]: one per region, sized and colored by the region's
//!   incident count for the selected year ([`Tier`]).
//! * [`IncidentMarker`]: one per incident in the selected year, drawn as a
//!   pin and hidden until its region is drilled into.
//!
//! Markers only describe themselves; the renderer decides where they land on
//! screen and the interaction controller flips their `hidden` / `selected`
//! flags. [`MarkerFactory`] builds a fresh [`MarkerSet`] for a given year.

pub mod factory;
pub mod incident;
pub mod region;
pub mod set;

use gun_map_incident_models::GeoLocation;
use gun_map_render::{ScreenPoint, Surface};
use strum_macros::{AsRefStr, Display};

pub use factory::{MarkerFactory, build_incident_markers, build_region_markers};
pub use incident::IncidentMarker;
pub use region::{RegionMarker, Tier};
pub use set::{MarkerRef, MarkerSet};

/// Stable identity of a marker.
///
/// Identities survive a rebuild: the same region or the same input record
/// produces the same id in every year it appears.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerId {
    /// A region summary marker, keyed by region name.
    Region(String),
    /// An incident marker, keyed by the record's position in the input list.
    Incident(usize),
}

/// Which concrete marker a [`Marker`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MarkerKind {
    /// [`RegionMarker`].
    Region,
    /// [`IncidentMarker`].
    Incident,
}

/// Identity and flags common to every marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    /// Stable identity.
    pub id: MarkerId,
    /// Geographic anchor the renderer projects.
    pub anchor: GeoLocation,
    /// Hidden markers are not drawn and not reported by the info panel.
    pub hidden: bool,
    /// Selected markers have their detail text shown in the info panel.
    pub selected: bool,
}

impl MarkerState {
    /// A visible, unselected marker.
    #[must_use]
    pub const fn new(id: MarkerId, anchor: GeoLocation) -> Self {
        Self {
            id,
            anchor,
            hidden: false,
            selected: false,
        }
    }
}

/// Screen-space area a marker occupies, used for pointer hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    /// A disc.
    Circle {
        /// Disc center.
        center: ScreenPoint,
        /// Disc radius.
        radius: f32,
    },
    /// An axis-aligned box.
    Rect {
        /// Top-left corner.
        top_left: ScreenPoint,
        /// Box width.
        width: f32,
        /// Box height.
        height: f32,
    },
}

impl HitShape {
    /// `true` if `point` lies inside the shape (edges included).
    #[must_use]
    pub fn contains(&self, point: ScreenPoint) -> bool {
        match *self {
            Self::Circle { center, radius } => center.distance(point) <= radius,
            Self::Rect {
                top_left,
                width,
                height,
            } => {
                point.x >= top_left.x
                    && point.x <= top_left.x + width
                    && point.y >= top_left.y
                    && point.y <= top_left.y + height
            }
        }
    }
}

/// The capability set every marker provides.
pub trait Marker {
    /// Which concrete marker this is.
    fn kind(&self) -> MarkerKind;

    /// Identity and flags.
    fn state(&self) -> &MarkerState;

    /// Mutable identity and flags.
    fn state_mut(&mut self) -> &mut MarkerState;

    /// Short label: the region name or the incident address.
    fn title(&self) -> &str;

    /// Multi-line block shown in the info panel while selected.
    fn detail_text(&self) -> String;

    /// Draws the marker at its projected position. Does nothing when hidden.
    fn draw(&self, surface: &mut dyn Surface, at: ScreenPoint);

    /// Area the marker covers when drawn at `at`.
    fn hit_shape(&self, at: ScreenPoint) -> HitShape;

    /// Stable identity.
    fn id(&self) -> &MarkerId {
        &self.state().id
    }

    /// Geographic anchor.
    fn anchor(&self) -> &GeoLocation {
        &self.state().anchor
    }

    /// `true` if the marker is not drawn.
    fn is_hidden(&self) -> bool {
        self.state().hidden
    }

    /// Shows or hides the marker.
    fn set_hidden(&mut self, hidden: bool) {
        self.state_mut().hidden = hidden;
    }

    /// `true` if the marker's detail text should be shown.
    fn is_selected(&self) -> bool {
        self.state().selected
    }

    /// Selects or deselects the marker.
    fn set_selected(&mut self, selected: bool) {
        self.state_mut().selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_contains_its_edge() {
        let shape = HitShape::Circle {
            center: ScreenPoint::new(0.0, 0.0),
            radius: 5.0,
        };
        assert!(shape.contains(ScreenPoint::new(3.0, 4.0)));
        assert!(!shape.contains(ScreenPoint::new(4.0, 4.0)));
    }

    #[test]
    fn rect_contains_points_inside_only() {
        let shape = HitShape::Rect {
            top_left: ScreenPoint::new(10.0, 10.0),
            width: 40.0,
            height: 40.0,
        };
        assert!(shape.contains(ScreenPoint::new(10.0, 50.0)));
        assert!(!shape.contains(ScreenPoint::new(9.0, 20.0)));
        assert!(!shape.contains(ScreenPoint::new(20.0, 51.0)));
    }
}
