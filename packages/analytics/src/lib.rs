#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident aggregation.
//!
//! Turns the flat list of incidents handed over by the record parser into a
//! [`StatTable`] of per-year, per-region totals. Runs once at startup, before
//! any marker exists; the table is never patched afterwards.

use gun_map_analytics_models::StatTable;
use gun_map_incident_models::{IncidentFeature, IncidentRecord, RecordError};
use thiserror::Error;

/// Errors that can occur while aggregating incidents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// A feature could not be validated into a record.
    #[error("incident #{index}: {source}")]
    Record {
        /// Position of the offending feature in the input.
        index: usize,
        /// What was wrong with it.
        #[source]
        source: RecordError,
    },

    /// A per-region total no longer fits its counter.
    #[error("totals for {region} in {year} overflow")]
    Overflow {
        /// Year of the overflowing bucket.
        year: String,
        /// Region of the overflowing bucket.
        region: String,
    },
}

/// Validates every feature into an [`IncidentRecord`].
///
/// # Errors
///
/// Returns [`AggregateError::Record`] for the first feature with a missing or
/// unparseable required property.
pub fn parse_records(features: &[IncidentFeature]) -> Result<Vec<IncidentRecord>, AggregateError> {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            IncidentRecord::try_from(feature).map_err(|source| AggregateError::Record { index, source })
        })
        .collect()
}

/// Aggregates raw parser output into per-year, per-region totals.
///
/// # Errors
///
/// * [`AggregateError::Record`] if any feature has a missing or unparseable
///   `year`, `nKilled` or `nInjured` property. Nothing is returned for the
///   valid features in that case.
/// * [`AggregateError::Overflow`] if a total does not fit
pub fn aggregate(features: &[IncidentFeature]) -> Result<StatTable, AggregateError> {
    let records = parse_records(features)?;
    tally(&records)
}

/// Aggregates already-validated records.
///
/// For each record the `(year, region)` bucket gains one shooting plus the
/// record's killed and injured counts. The result does not depend on input
/// order.
///
/// # Errors
///
/// Returns [`AggregateError::Overflow`] if a shooting count or a killed or
/// injured sum does not fit in a `u32`.
pub fn tally(records: &[IncidentRecord]) -> Result<StatTable, AggregateError> {
    let mut table = StatTable::new();

    for record in records {
        let stat = table.entry(&record.year, &record.region);
        *stat = stat
            .checked_record(record.killed, record.injured)
            .ok_or_else(|| AggregateError::Overflow {
                year: record.year.clone(),
                region: record.region.clone(),
            })?;
    }

    log::debug!(
        "Aggregated {} incidents into {} year(s)",
        records.len(),
        table.years().count()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use gun_map_analytics_models::RegionStat;
    use gun_map_incident_models::{GeoLocation, properties};

    use super::*;

    fn record(year: &str, region: &str, killed: u32, injured: u32) -> IncidentRecord {
        IncidentRecord {
            location: GeoLocation::new(0.0, 0.0),
            region: region.to_string(),
            year: year.to_string(),
            killed,
            injured,
            address: String::new(),
            date: String::new(),
            county: String::new(),
        }
    }

    fn sample() -> Vec<IncidentRecord> {
        vec![
            record("2019", "Texas", 1, 2),
            record("2019", "Texas", 0, 4),
            record("2019", "Ohio", 3, 0),
            record("2020", "Texas", 2, 2),
            record("2019", "Texas", 5, 1),
        ]
    }

    #[test]
    fn counts_and_sums_per_bucket() {
        let records = sample();
        let table = tally(&records).unwrap();

        for (year, region) in [("2019", "Texas"), ("2019", "Ohio"), ("2020", "Texas")] {
            let subset: Vec<_> = records
                .iter()
                .filter(|r| r.year == year && r.region == region)
                .collect();
            let expected = RegionStat {
                shooting_count: u32::try_from(subset.len()).unwrap(),
                killed: subset.iter().map(|r| r.killed).sum(),
                injured: subset.iter().map(|r| r.injured).sum(),
            };
            assert_eq!(table.get(year, region), Some(&expected), "{year}/{region}");
        }

        assert!(table.get("2020", "Ohio").is_none());
    }

    #[test]
    fn result_is_permutation_invariant() {
        let records = sample();
        let mut reversed = records.clone();
        reversed.reverse();
        let mut rotated = records.clone();
        rotated.rotate_left(2);

        let expected = tally(&records).unwrap();
        assert_eq!(tally(&reversed).unwrap(), expected);
        assert_eq!(tally(&rotated).unwrap(), expected);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        assert!(tally(&[]).unwrap().is_empty());
    }

    #[test]
    fn malformed_feature_fails_the_whole_aggregation() {
        let good = IncidentFeature::new(GeoLocation::new(1.0, 2.0))
            .with_property(properties::REGION, "Ohio")
            .with_property(properties::YEAR, "2018")
            .with_property(properties::KILLED, "1")
            .with_property(properties::INJURED, "0");
        let bad = good.clone().with_property(properties::INJURED, "n/a");

        let table = aggregate(std::slice::from_ref(&good)).unwrap();
        assert_eq!(table.get("2018", "Ohio").map(|s| s.shooting_count), Some(1));

        let err = aggregate(&[good, bad]).unwrap_err();
        assert_eq!(
            err,
            AggregateError::Record {
                index: 1,
                source: RecordError::InvalidNumber {
                    field: properties::INJURED,
                    value: "n/a".to_string(),
                },
            }
        );
    }

    #[test]
    fn overflowing_totals_fail_instead_of_wrapping() {
        let feature = |killed: &str| {
            IncidentFeature::new(GeoLocation::new(1.0, 2.0))
                .with_property(properties::REGION, "Ohio")
                .with_property(properties::YEAR, "2020")
                .with_property(properties::KILLED, killed)
                .with_property(properties::INJURED, "0")
        };

        let table = aggregate(&[feature("4294967295")]).unwrap();
        assert_eq!(table.get("2020", "Ohio").map(|s| s.killed), Some(u32::MAX));

        let err = aggregate(&[feature("4294967295"), feature("1")]).unwrap_err();
        assert_eq!(
            err,
            AggregateError::Overflow {
                year: "2020".to_string(),
                region: "Ohio".to_string(),
            }
        );
    }

    #[test]
    fn signed_year_is_not_a_year() {
        let feature = IncidentFeature::new(GeoLocation::new(1.0, 2.0))
            .with_property(properties::REGION, "Ohio")
            .with_property(properties::YEAR, "+201")
            .with_property(properties::KILLED, "1")
            .with_property(properties::INJURED, "0");

        assert_eq!(
            aggregate(&[feature]).unwrap_err(),
            AggregateError::Record {
                index: 0,
                source: RecordError::InvalidYear {
                    value: "+201".to_string(),
                },
            }
        );
    }
}
