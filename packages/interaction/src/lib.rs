#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interaction state machine for the map.
//!
//! [`InteractionController`] owns the current [`MarkerSet`] and the
//! [`SelectionState`], and is the only thing that mutates marker flags:
//!
//! * **hover** selects at most one marker, regions taking priority over
//!   incidents;
//! * **click** on a region drills into it: the region marker is hidden and
//!   its incidents are revealed, restoring whichever region was drilled into
//!   before;
//! * **year change** discards every marker and rebuilds the set for the new
//!   year from the already-aggregated table, back in overview.
//!
//! Everything runs synchronously on the event thread; each handler completes
//! before the next frame is drawn.


use gun_map_marker::{Marker, MarkerFactory, MarkerRef, MarkerSet};
use gun_map_render::ScreenPoint;
use thiserror::Error;

pub use hit_test::{HitTest, ProjectedHitTest};

/// Errors raised when setting up a controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    /// No selectable years were configured.
    #[error("no selectable years configured")]
    NoYears,

    /// The starting year is not one of the selectable years.
    #[error("default year '{year}' is not one of the selectable years")]
    UnknownYear {
        /// The rejected year.
        year: String,
    },
}

/// Selection bookkeeping. Marker refs index into the controller's current
/// [`MarkerSet`] and are cleared whenever it is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Year the markers were built for.
    pub selected_year: String,
    /// Marker currently under the pointer.
    pub hovered: Option<MarkerRef>,
    /// Region currently drilled into.
    pub clicked: Option<MarkerRef>,
    /// Region drilled into before the current one.
    pub previously_clicked: Option<MarkerRef>,
}

impl SelectionState {
    /// Fresh state for `year`: nothing hovered, nothing drilled into.
    #[must_use]
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            selected_year: year.into(),
            hovered: None,
            clicked: None,
            previously_clicked: None,
        }
    }
}

/// Coarse drill-down state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillState {
    /// No region drilled into; incident markers are hidden.
    Overview,
    /// One region's incident markers are visible.
    Drilled {
        /// The drilled-into region.
        region: String,
    },
}

/// Outcome of a year-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearChange {
    /// Markers were rebuilt for the new year.
    Switched,
    /// The year was already selected; nothing changed.
    Unchanged,
    /// The year is not selectable; nothing changed.
    Ignored,
}

/// Owns the markers and the selection, and applies pointer and year events.
#[derive(Debug, Clone)]
pub struct InteractionController {
    factory: MarkerFactory,
    valid_years: Vec<String>,
    markers: MarkerSet,
    selection: SelectionState,
}

impl InteractionController {
    /// Builds the initial overview for `default_year`.
    ///
    /// # Errors
    ///
    /// * [`InteractionError::NoYears`] if `valid_years` is empty
    /// * [`InteractionError::UnknownYear`] if `default_year` is not in
    ///   `valid_years`
    pub fn new(
        factory: MarkerFactory,
        valid_years: Vec<String>,
        default_year: &str,
    ) -> Result<Self, InteractionError> {
        if valid_years.is_empty() {
            return Err(InteractionError::NoYears);
        }
        if !valid_years.iter().any(|y| y == default_year) {
            return Err(InteractionError::UnknownYear {
                year: default_year.to_string(),
            });
        }

        let mut markers = factory.build(default_year);
        markers.hide_all_incidents();

        Ok(Self {
            factory,
            valid_years,
            markers,
            selection: SelectionState::new(default_year),
        })
    }

    /// Current markers.
    #[must_use]
    pub const fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Current selection bookkeeping.
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Year the markers were built for.
    #[must_use]
    pub fn selected_year(&self) -> &str {
        &self.selection.selected_year
    }

    /// Whether a region is drilled into.
    #[must_use]
    pub fn drill_state(&self) -> DrillState {
        match self.selection.clicked {
            Some(MarkerRef::Region(i)) => self.markers.regions.get(i).map_or(
                DrillState::Overview,
                |marker| DrillState::Drilled {
                    region: marker.region().to_string(),
                },
            ),
            _ => DrillState::Overview,
        }
    }

    /// Detail text of the visible, selected marker, if any.
    #[must_use]
    pub fn info_text(&self) -> Option<String> {
        self.markers.selected_visible().map(|m| m.detail_text())
    }

    /// Pointer moved to `at` with no button pressed.
    ///
    /// Deselects the previously hovered marker, then selects the first region
    /// marker under the pointer or, failing that, the first incident marker.
    /// Returns the newly hovered marker.
    pub fn hover(&mut self, at: ScreenPoint, hit: &dyn HitTest) -> Option<MarkerRef> {
        let previous = self.selection.hovered.take();
        if let Some(marker) = previous.and_then(|r| self.markers.get_mut(r)) {
            marker.set_selected(false);
        }

        let target = self
            .markers
            .regions
            .iter()
            .position(|m| hit.is_inside(m, at))
            .map(MarkerRef::Region)
            .or_else(|| {
                self.markers
                    .incidents
                    .iter()
                    .position(|m| hit.is_inside(m, at))
                    .map(MarkerRef::Incident)
            });

        if let Some(marker) = target.and_then(|r| self.markers.get_mut(r)) {
            marker.set_selected(true);
        }
        self.selection.hovered = target;

        if target != previous {
            log::debug!(
                "hover: {:?} -> {:?}",
                previous,
                target.and_then(|r| self.markers.get(r)).map(|m| m.title())
            );
        }

        target
    }

    /// Pointer clicked at `at`.
    ///
    /// If a region marker is under the pointer it is drilled into; when
    /// several overlap, the last one in collection order wins. Clicks that
    /// miss every region marker do nothing. Returns the clicked region.
    pub fn click(&mut self, at: ScreenPoint, hit: &dyn HitTest) -> Option<MarkerRef> {
        let index = self
            .markers
            .regions
            .iter()
            .rposition(|m| hit.is_inside(m, at))?;
        self.drill_into(index);
        Some(MarkerRef::Region(index))
    }

    /// Drills into the region marker at `index`.
    ///
    /// The previously drilled region, if it is a different one, is shown
    /// again and every incident hidden before this region's incidents are
    /// revealed. Drilling into the region that is already drilled into leaves
    /// the markers as they are. Out-of-range indices are ignored.
    pub fn drill_into(&mut self, index: usize) {
        let Some(region) = self.markers.regions.get(index).map(|m| m.region().to_string()) else {
            log::warn!("Ignoring drill-down into unknown region marker #{index}");
            return;
        };

        let previous = self.selection.clicked;
        if let Some(MarkerRef::Region(prev)) = previous
            && let Some(prev_marker) = self.markers.regions.get_mut(prev)
            && prev_marker.region() != region
        {
            prev_marker.set_hidden(false);
            self.markers.hide_all_incidents();
        }

        self.markers.regions[index].set_hidden(true);
        let shown = self.markers.show_incidents_in(&region);

        self.selection.previously_clicked = previous;
        self.selection.clicked = Some(MarkerRef::Region(index));

        log::debug!("drill-down: {region} ({shown} incidents shown)");
    }

    /// Switches the selected year.
    ///
    /// A year outside the selectable set is ignored, as is the year already
    /// selected. Otherwise every marker is discarded and rebuilt for `year`
    /// from the existing table, and the selection returns to overview.
    pub fn select_year(&mut self, year: &str) -> YearChange {
        if !self.valid_years.iter().any(|y| y == year) {
            log::warn!("Ignoring request for unselectable year '{year}'");
            return YearChange::Ignored;
        }
        if year == self.selection.selected_year {
            return YearChange::Unchanged;
        }

        self.markers = self.factory.build(year);
        self.markers.hide_all_incidents();
        self.selection = SelectionState::new(year);

        log::debug!(
            "year: switched to {year} ({} regions, {} incidents)",
            self.markers.regions.len(),
            self.markers.incidents.len()
        );

        YearChange::Switched
    }
}
