#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statistics types produced by the incident aggregator.
//!
//! A [`StatTable`] maps year → region → [`RegionStat`]. Both levels are
//! `BTreeMap`s so iteration (and therefore any printed summary) is
//! deterministic regardless of input order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Totals for one region in one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStat {
    /// Number of incidents.
    pub shooting_count: u32,
    /// Sum of people killed over those incidents.
    pub killed: u32,
    /// Sum of people injured over those incidents.
    pub injured: u32,
}

impl RegionStat {
    /// Totals with one more incident folded in, or `None` if any counter
    /// would overflow.
    #[must_use]
    pub const fn checked_record(self, killed: u32, injured: u32) -> Option<Self> {
        let Some(shooting_count) = self.shooting_count.checked_add(1) else {
            return None;
        };
        let Some(killed) = self.killed.checked_add(killed) else {
            return None;
        };
        let Some(injured) = self.injured.checked_add(injured) else {
            return None;
        };
        Some(Self {
            shooting_count,
            killed,
            injured,
        })
    }
}

/// Region name → totals for a single year.
pub type RegionStats = BTreeMap<String, RegionStat>;

/// Year → region → totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatTable {
    years: BTreeMap<String, RegionStats>,
}

impl StatTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }

    /// Returns the bucket for `(year, region)`, creating it if needed.
    pub fn entry(&mut self, year: &str, region: &str) -> &mut RegionStat {
        self.years
            .entry(year.to_string())
            .or_default()
            .entry(region.to_string())
            .or_default()
    }

    /// All region totals recorded for `year`.
    #[must_use]
    pub fn for_year(&self, year: &str) -> Option<&RegionStats> {
        self.years.get(year)
    }

    /// Totals for one `(year, region)` pair.
    #[must_use]
    pub fn get(&self, year: &str, region: &str) -> Option<&RegionStat> {
        self.years.get(year)?.get(region)
    }

    /// Years present in the table, ascending.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.years.keys().map(String::as_str)
    }

    /// `true` if no incident has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Flattens one year into printable rows, sorted by region name.
    #[must_use]
    pub fn summary(&self, year: &str) -> Vec<RegionSummary> {
        self.for_year(year)
            .map(|stats| {
                stats
                    .iter()
                    .map(|(region, stat)| RegionSummary {
                        region: region.clone(),
                        stat: *stat,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One row of a per-year summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    /// Region name.
    pub region: String,
    /// Totals for the region.
    #[serde(flatten)]
    pub stat: RegionStat,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(table: &mut StatTable, year: &str, region: &str, killed: u32, injured: u32) {
        let entry = table.entry(year, region);
        *entry = entry.checked_record(killed, injured).unwrap();
    }

    #[test]
    fn entry_creates_buckets_lazily() {
        let mut table = StatTable::new();
        assert!(table.is_empty());

        record(&mut table, "2019", "Ohio", 1, 2);
        record(&mut table, "2019", "Ohio", 0, 3);

        assert_eq!(
            table.get("2019", "Ohio"),
            Some(&RegionStat {
                shooting_count: 2,
                killed: 1,
                injured: 5,
            })
        );
        assert!(table.get("2020", "Ohio").is_none());
        assert!(table.get("2019", "Utah").is_none());
    }

    #[test]
    fn summary_is_sorted_by_region() {
        let mut table = StatTable::new();
        record(&mut table, "2020", "Texas", 0, 1);
        record(&mut table, "2020", "Alabama", 2, 0);

        let regions: Vec<_> = table
            .summary("2020")
            .into_iter()
            .map(|row| row.region)
            .collect();
        assert_eq!(regions, ["Alabama", "Texas"]);
        assert!(table.summary("1999").is_empty());
    }

    #[test]
    fn checked_record_refuses_to_wrap() {
        let stat = RegionStat {
            shooting_count: 1,
            killed: u32::MAX,
            injured: 0,
        };
        assert_eq!(stat.checked_record(1, 0), None);
        assert_eq!(stat.checked_record(0, 0).map(|s| s.shooting_count), Some(2));
        assert_eq!(
            RegionStat {
                shooting_count: u32::MAX,
                ..RegionStat::default()
            }
            .checked_record(0, 0),
            None
        );
    }

    #[test]
    fn serializes_as_nested_maps() {
        let mut table = StatTable::new();
        record(&mut table, "2018", "Iowa", 1, 1);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["2018"]["Iowa"]["shootingCount"], 1);
    }
}
