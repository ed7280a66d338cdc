//! Builds marker collections for a selected year.
//!
//! The factory owns the loaded inputs (region anchors, validated records and
//! the aggregated [`StatTable`]) so a year switch can rebuild every marker
//! without touching the parser or re-running aggregation.

use gun_map_analytics_models::{RegionStats, StatTable};
use gun_map_incident_models::{IncidentRecord, RegionAnchor};

use crate::{IncidentMarker, MarkerSet, RegionMarker};

/// Builds one region marker per anchor, in anchor order.
///
/// Anchors without a matching entry in `stats` get a zero-valued marker,
/// which starts hidden. A nameless anchor can never match, so it always ends
/// up hidden.
#[must_use]
pub fn build_region_markers(anchors: &[RegionAnchor], stats: &RegionStats) -> Vec<RegionMarker> {
    anchors
        .iter()
        .map(|anchor| {
            if anchor.region.trim().is_empty() {
                log::warn!("Region anchor without a name at {:?}", anchor.location);
            }
            let stat = stats.get(&anchor.region).copied().unwrap_or_default();
            RegionMarker::new(anchor.region.clone(), anchor.location, stat)
        })
        .collect()
}

/// Builds one hidden incident marker per record whose year is `year`, in
/// input order.
#[must_use]
pub fn build_incident_markers(records: &[IncidentRecord], year: &str) -> Vec<IncidentMarker> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.year == year)
        .map(|(index, record)| IncidentMarker::new(index, record))
        .collect()
}

/// Loaded inputs plus the aggregated table, ready to build markers for any
/// year.
#[derive(Debug, Clone, Default)]
pub struct MarkerFactory {
    anchors: Vec<RegionAnchor>,
    records: Vec<IncidentRecord>,
    stats: StatTable,
}

impl MarkerFactory {
    /// Wraps already-aggregated inputs.
    #[must_use]
    pub const fn new(anchors: Vec<RegionAnchor>, records: Vec<IncidentRecord>, stats: StatTable) -> Self {
        Self {
            anchors,
            records,
            stats,
        }
    }

    /// Builds the full marker set for `year`.
    #[must_use]
    pub fn build(&self, year: &str) -> MarkerSet {
        let empty = RegionStats::new();
        let stats = self.stats.for_year(year).unwrap_or(&empty);

        let set = MarkerSet {
            regions: build_region_markers(&self.anchors, stats),
            incidents: build_incident_markers(&self.records, year),
        };

        log::debug!(
            "Built {} region and {} incident markers for {year}",
            set.regions.len(),
            set.incidents.len()
        );

        set
    }
}

#[cfg(test)]
mod tests {
    use gun_map_analytics::tally;
    use gun_map_analytics_models::RegionStat;
    use gun_map_incident_models::GeoLocation;

    use super::*;
    use crate::{Marker, MarkerId};

    fn record(year: &str, region: &str) -> IncidentRecord {
        IncidentRecord {
            location: GeoLocation::new(35.0, -90.0),
            region: region.to_string(),
            year: year.to_string(),
            killed: 1,
            injured: 2,
            address: format!("{region} {year}"),
            date: String::new(),
            county: String::new(),
        }
    }

    fn records() -> Vec<IncidentRecord> {
        vec![
            record("2019", "Ohio"),
            record("2020", "Ohio"),
            record("2019", "Iowa"),
            record("2019", "Ohio"),
        ]
    }

    fn factory() -> MarkerFactory {
        let records = records();
        let stats = tally(&records).unwrap();
        let anchors = vec![
            RegionAnchor::new("Ohio", GeoLocation::new(39.96, -83.0)),
            RegionAnchor::new("Iowa", GeoLocation::new(41.59, -93.6)),
            RegionAnchor::new("Maine", GeoLocation::new(44.31, -69.78)),
        ];
        MarkerFactory::new(anchors, records, stats)
    }

    #[test]
    fn region_markers_follow_anchor_order() {
        let set = factory().build("2019");
        let regions: Vec<_> = set.regions.iter().map(RegionMarker::region).collect();
        assert_eq!(regions, ["Ohio", "Iowa", "Maine"]);
        assert_eq!(set.regions[0].shooting_count(), 2);
        assert_eq!(set.regions[0].stat().killed, 2);
        assert_eq!(set.regions[1].shooting_count(), 1);
    }

    #[test]
    fn anchor_without_stats_yields_hidden_zero_marker() {
        let set = factory().build("2020");
        let iowa = &set.regions[1];
        assert_eq!(iowa.shooting_count(), 0);
        assert!(iowa.is_hidden());
        assert!(!set.regions[0].is_hidden());
    }

    #[test]
    fn unknown_year_yields_all_hidden_regions_and_no_incidents() {
        let set = factory().build("1999");
        assert_eq!(set.regions.len(), 3);
        assert!(set.regions.iter().all(Marker::is_hidden));
        assert!(set.incidents.is_empty());
    }

    #[test]
    fn incident_markers_filter_by_year_and_start_hidden() {
        let markers = build_incident_markers(&records(), "2019");
        let ids: Vec<_> = markers.iter().map(|m| m.id().clone()).collect();
        assert_eq!(
            ids,
            [
                MarkerId::Incident(0),
                MarkerId::Incident(2),
                MarkerId::Incident(3)
            ]
        );
        assert!(markers.iter().all(Marker::is_hidden));
    }

    #[test]
    fn nameless_anchor_still_gets_a_hidden_marker() {
        let anchors = vec![
            RegionAnchor::new(" ", GeoLocation::new(0.0, 0.0)),
            RegionAnchor::new("Utah", GeoLocation::new(40.7, -111.9)),
        ];
        let mut stats = RegionStats::new();
        stats.insert(
            "Utah".to_string(),
            RegionStat::default().checked_record(1, 0).unwrap(),
        );

        let markers = build_region_markers(&anchors, &stats);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].shooting_count(), 0);
        assert!(markers[0].is_hidden());
        assert_eq!(markers[1].region(), "Utah");
        assert!(!markers[1].is_hidden());
    }
}
