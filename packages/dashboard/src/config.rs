//! Dashboard configuration.
//!
//! The layout and the selectable years live in a TOML file. The stock file is
//! embedded at compile time ([`DEFAULT_CONFIG_TOML`]); a user file only needs
//! the keys it wants to change, every missing key falls back to the stock
//! value.

use std::path::{Path, PathBuf};

use gun_map_incident_models::GeoLocation;
use gun_map_render::{Equirectangular, projection::Viewport};
use serde::Deserialize;
use thiserror::Error;

/// The stock configuration file.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Errors loading or validating a [`DashboardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `valid_years` is empty.
    #[error("valid_years must list at least one year")]
    EmptyYears,

    /// `default_year` is not one of `valid_years`.
    #[error("default_year '{year}' is not listed in valid_years")]
    UnknownDefaultYear {
        /// The configured default year.
        year: String,
    },
}

/// Where the map sits on screen and which part of the world it shows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Geographic center of the view.
    pub center: GeoLocation,
    /// Degrees of latitude shown top to bottom.
    pub lat_span: f64,
    /// Degrees of longitude shown left to right.
    pub lon_span: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: 700.0,
            height: 600.0,
            center: GeoLocation::new(31.79, -100.09),
            lat_span: 30.0,
            lon_span: 60.0,
        }
    }
}

impl MapConfig {
    /// The map's screen rectangle.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// A linear projection of the configured window onto the viewport.
    #[must_use]
    pub fn projection(&self) -> Equirectangular {
        Equirectangular::centered(self.center, self.lat_span, self.lon_span, self.viewport())
    }
}

/// Year button column layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct YearSelectorConfig {
    /// Left edge of every button.
    pub x: f32,
    /// Top edge of the first button.
    pub y_top: f32,
    /// Vertical distance between consecutive buttons.
    pub spacing: f32,
    /// Side length of each square button.
    pub button_size: f32,
    /// Horizontal distance from a button's left edge to its label.
    pub label_offset: f32,
}

impl Default for YearSelectorConfig {
    fn default() -> Self {
        Self {
            x: 770.0,
            y_top: 575.0,
            spacing: 25.0,
            button_size: 12.0,
            label_offset: 20.0,
        }
    }
}

/// Info panel position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InfoPanelConfig {
    /// Left edge of the text.
    pub x: f32,
    /// Top edge of the text.
    pub y: f32,
}

impl Default for InfoPanelConfig {
    fn default() -> Self {
        Self { x: 770.0, y: 55.0 }
    }
}

/// Everything the dashboard reads from its config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Selectable years, in button order.
    pub valid_years: Vec<String>,
    /// Year shown at startup.
    pub default_year: String,
    /// Map placement.
    pub map: MapConfig,
    /// Year button layout.
    pub year_selector: YearSelectorConfig,
    /// Info panel placement.
    pub info_panel: InfoPanelConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            valid_years: vec!["2020".to_string(), "2019".to_string(), "2018".to_string()],
            default_year: "2020".to_string(),
            map: MapConfig::default(),
            year_selector: YearSelectorConfig::default(),
            info_panel: InfoPanelConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Parse`] if `toml_str` does not match the schema
    /// * any error from [`Self::validate`]
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Io`] if the file cannot be read
    /// * any error from [`Self::from_toml_str`]
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&toml_str)?;

        log::info!("Loaded dashboard config from {}", path.display());

        Ok(config)
    }

    /// Checks the year settings.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::EmptyYears`] if no year is selectable
    /// * [`ConfigError::UnknownDefaultYear`] if the default year is not
    ///   selectable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.valid_years.is_empty() {
            return Err(ConfigError::EmptyYears);
        }
        if !self.valid_years.contains(&self.default_year) {
            return Err(ConfigError::UnknownDefaultYear {
                year: self.default_year.clone(),
            });
        }
        Ok(())
    }
}
