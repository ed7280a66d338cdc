//! The marker collections for one selected year.

use crate::{IncidentMarker, Marker, RegionMarker};

/// Index of a marker inside a [`MarkerSet`].
///
/// Refs are only meaningful for the set they came from. After a rebuild a
/// stale ref either points past the end (and resolves to `None`) or at
/// whichever marker now occupies the slot, so holders must drop their refs
/// whenever the set is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRef {
    /// Position in [`MarkerSet::regions`].
    Region(usize),
    /// Position in [`MarkerSet::incidents`].
    Incident(usize),
}

/// Region and incident markers built for one year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    /// Region summary markers, in anchor order.
    pub regions: Vec<RegionMarker>,
    /// Incident markers, in input record order.
    pub incidents: Vec<IncidentMarker>,
}

impl MarkerSet {
    /// Resolves a ref.
    #[must_use]
    pub fn get(&self, marker: MarkerRef) -> Option<&dyn Marker> {
        match marker {
            MarkerRef::Region(i) => self.regions.get(i).map(|m| m as &dyn Marker),
            MarkerRef::Incident(i) => self.incidents.get(i).map(|m| m as &dyn Marker),
        }
    }

    /// Resolves a ref mutably.
    pub fn get_mut(&mut self, marker: MarkerRef) -> Option<&mut dyn Marker> {
        match marker {
            MarkerRef::Region(i) => self.regions.get_mut(i).map(|m| m as &mut dyn Marker),
            MarkerRef::Incident(i) => self.incidents.get_mut(i).map(|m| m as &mut dyn Marker),
        }
    }

    /// Every marker with its ref: regions first, then incidents.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerRef, &dyn Marker)> {
        let regions = self
            .regions
            .iter()
            .enumerate()
            .map(|(i, m)| (MarkerRef::Region(i), m as &dyn Marker));
        let incidents = self
            .incidents
            .iter()
            .enumerate()
            .map(|(i, m)| (MarkerRef::Incident(i), m as &dyn Marker));
        regions.chain(incidents)
    }

    /// Markers that are currently drawn.
    pub fn visible(&self) -> impl Iterator<Item = (MarkerRef, &dyn Marker)> {
        self.iter().filter(|(_, m)| !m.is_hidden())
    }

    /// The marker that is both visible and selected, if any.
    #[must_use]
    pub fn selected_visible(&self) -> Option<&dyn Marker> {
        self.visible().map(|(_, m)| m).find(|m| m.is_selected())
    }

    /// Hides every incident marker.
    pub fn hide_all_incidents(&mut self) {
        for marker in &mut self.incidents {
            marker.set_hidden(true);
        }
    }

    /// Reveals every incident marker belonging to `region`.
    pub fn show_incidents_in(&mut self, region: &str) -> usize {
        let mut shown = 0;
        for marker in self.incidents.iter_mut().filter(|m| m.region() == region) {
            marker.set_hidden(false);
            shown += 1;
        }
        shown
    }
}

#[cfg(test)]
mod tests {
    use gun_map_analytics_models::RegionStat;
    use gun_map_incident_models::{GeoLocation, IncidentRecord};

    use super::*;

    fn set() -> MarkerSet {
        let stat = RegionStat {
            shooting_count: 2,
            killed: 0,
            injured: 0,
        };
        let record = |region: &str| IncidentRecord {
            location: GeoLocation::new(0.0, 0.0),
            region: region.to_string(),
            year: "2020".to_string(),
            killed: 0,
            injured: 1,
            address: String::new(),
            date: String::new(),
            county: String::new(),
        };
        MarkerSet {
            regions: vec![
                RegionMarker::new("Utah", GeoLocation::new(40.7, -111.9), stat),
                RegionMarker::new("Idaho", GeoLocation::new(43.6, -116.2), stat),
            ],
            incidents: vec![
                IncidentMarker::new(0, &record("Utah")),
                IncidentMarker::new(1, &record("Idaho")),
                IncidentMarker::new(2, &record("Utah")),
            ],
        }
    }

    #[test]
    fn iterates_regions_before_incidents() {
        let refs: Vec<_> = set().iter().map(|(r, _)| r).collect();
        assert_eq!(
            refs,
            [
                MarkerRef::Region(0),
                MarkerRef::Region(1),
                MarkerRef::Incident(0),
                MarkerRef::Incident(1),
                MarkerRef::Incident(2),
            ]
        );
    }

    #[test]
    fn stale_refs_resolve_to_none() {
        let set = set();
        assert!(set.get(MarkerRef::Region(2)).is_none());
        assert!(set.get(MarkerRef::Incident(7)).is_none());
        assert_eq!(set.get(MarkerRef::Region(1)).map(|m| m.title()), Some("Idaho"));
    }

    #[test]
    fn shows_only_the_requested_region() {
        let mut set = set();
        assert_eq!(set.show_incidents_in("Utah"), 2);
        let visible: Vec<_> = set.visible().map(|(r, _)| r).collect();
        assert_eq!(
            visible,
            [
                MarkerRef::Region(0),
                MarkerRef::Region(1),
                MarkerRef::Incident(0),
                MarkerRef::Incident(2),
            ]
        );

        set.hide_all_incidents();
        assert_eq!(set.visible().count(), 2);
    }

    #[test]
    fn selected_marker_must_be_visible() {
        let mut set = set();
        set.incidents[1].set_selected(true);
        assert!(set.selected_visible().is_none());

        set.incidents[1].set_hidden(false);
        assert_eq!(
            set.selected_visible().map(|m| m.id().clone()),
            Some(crate::MarkerId::Incident(1))
        );
    }
}
