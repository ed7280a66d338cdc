#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record types for the gun violence map.
//!
//! The external record parser hands the core a list of [`IncidentFeature`]s:
//! a geographic point plus a bag of string properties, exactly as they
//! appeared in the source file. [`IncidentRecord`] is the validated, typed
//! form every other crate works with. Validation is strict: a missing or
//! unparseable `year`, `nKilled` or `nInjured` property is an error, never a
//! silent zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Property keys used by the incident data set.
pub mod properties {
    /// Region (state) the incident happened in.
    pub const REGION: &str = "state";
    /// Four-digit year the incident happened in.
    pub const YEAR: &str = "year";
    /// Number of people killed.
    pub const KILLED: &str = "nKilled";
    /// Number of people injured.
    pub const INJURED: &str = "nInjured";
    /// Street address.
    pub const ADDRESS: &str = "address";
    /// Date string as written in the source (may be quoted).
    pub const DATE: &str = "date";
    /// County name.
    pub const COUNTY: &str = "county";
}

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

impl GeoLocation {
    /// Creates a location from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A raw point feature as produced by the record parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFeature {
    /// Where the incident happened.
    pub location: GeoLocation,
    /// Untyped source properties keyed by column name.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl IncidentFeature {
    /// Creates a feature with no properties.
    #[must_use]
    pub const fn new(location: GeoLocation) -> Self {
        Self {
            location,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Returns the trimmed value of a property, if present.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(|v| v.trim())
    }
}

/// Errors raised while turning an [`IncidentFeature`] into an [`IncidentRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required property was absent.
    #[error("missing required property '{field}'")]
    MissingField {
        /// Property key.
        field: &'static str,
    },

    /// A count property was not a non-negative integer.
    #[error("property '{field}' is not a non-negative integer: '{value}'")]
    InvalidNumber {
        /// Property key.
        field: &'static str,
        /// Offending raw value.
        value: String,
    },

    /// The year property was not a four-digit year.
    #[error("invalid year '{value}'")]
    InvalidYear {
        /// Offending raw value.
        value: String,
    },
}

/// A validated incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Where the incident happened.
    pub location: GeoLocation,
    /// Region (state) name, used as the aggregation key.
    pub region: String,
    /// Year as a four-digit string (e.g. `"2019"`).
    pub year: String,
    /// Number of people killed.
    pub killed: u32,
    /// Number of people injured.
    pub injured: u32,
    /// Street address.
    pub address: String,
    /// Date string as written in the source.
    pub date: String,
    /// County name.
    pub county: String,
}

impl TryFrom<&IncidentFeature> for IncidentRecord {
    type Error = RecordError;

    fn try_from(feature: &IncidentFeature) -> Result<Self, Self::Error> {
        let region = required(feature, properties::REGION)?.to_string();
        let year = parse_year(required(feature, properties::YEAR)?)?;
        let killed = parse_count(feature, properties::KILLED)?;
        let injured = parse_count(feature, properties::INJURED)?;

        Ok(Self {
            location: feature.location,
            region,
            year,
            killed,
            injured,
            address: optional(feature, properties::ADDRESS),
            date: optional(feature, properties::DATE),
            county: optional(feature, properties::COUNTY),
        })
    }
}

fn required<'a>(feature: &'a IncidentFeature, field: &'static str) -> Result<&'a str, RecordError> {
    match feature.property(field) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RecordError::MissingField { field }),
    }
}

fn optional(feature: &IncidentFeature, field: &str) -> String {
    feature.property(field).unwrap_or_default().to_string()
}

fn parse_count(feature: &IncidentFeature, field: &'static str) -> Result<u32, RecordError> {
    let raw = required(feature, field)?;
    let invalid = || RecordError::InvalidNumber {
        field,
        value: raw.to_string(),
    };

    // `u32::from_str` tolerates a leading '+'.
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map_err(|_| invalid())
}

fn parse_year(raw: &str) -> Result<String, RecordError> {
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        Ok(raw.to_string())
    } else {
        Err(RecordError::InvalidYear {
            value: raw.to_string(),
        })
    }
}

/// A region's anchor point (e.g. its capital), as produced by the geo-feature
/// loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAnchor {
    /// Region (state) name.
    pub region: String,
    /// Where the region's summary marker is placed.
    pub location: GeoLocation,
}

impl RegionAnchor {
    /// Creates an anchor.
    #[must_use]
    pub fn new(region: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            region: region.into(),
            location,
        }
    }
}
