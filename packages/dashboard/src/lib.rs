#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The gun violence map dashboard.
//!
//! Ties the pieces together: parsed incidents are aggregated once at load,
//! the [`InteractionController`] owns the markers, and [`Dashboard`] routes
//! pointer events and composes each frame (background, visible markers, year
//! buttons, info panel) onto a [`Surface`].

pub mod config;
pub mod info_panel;
pub mod year_selector;

use gun_map_analytics::{AggregateError, parse_records, tally};
use gun_map_incident_models::{IncidentFeature, RegionAnchor};
use gun_map_interaction::{HitTest, InteractionController, InteractionError, YearChange};
use gun_map_marker::MarkerFactory;
use gun_map_render::{Projection, Rgba, ScreenPoint, Surface};
use thiserror::Error;

pub use config::{ConfigError, DEFAULT_CONFIG_TOML, DashboardConfig};
pub use year_selector::YearSelector;

const BACKGROUND: Rgba = Rgba::gray(200);

/// Errors that can occur while loading a dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An incident could not be aggregated.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// The controller rejected its starting state.
    #[error(transparent)]
    Interaction(#[from] InteractionError),
}

/// A loaded dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    controller: InteractionController,
    selector: YearSelector,
}

impl Dashboard {
    /// Validates `features`, aggregates them and builds the initial overview
    /// for the configured default year.
    ///
    /// # Errors
    ///
    /// * [`DashboardError::Config`] if `config` fails validation
    /// * [`DashboardError::Aggregate`] if any feature is malformed or a
    ///   region's totals overflow
    pub fn load(
        features: &[IncidentFeature],
        anchors: Vec<RegionAnchor>,
        config: DashboardConfig,
    ) -> Result<Self, DashboardError> {
        config.validate()?;

        let records = parse_records(features)?;
        let stats = tally(&records)?;

        log::info!(
            "Loaded {} incidents across {} year(s) for {} regions",
            records.len(),
            stats.years().count(),
            anchors.len()
        );

        let factory = MarkerFactory::new(anchors, records, stats);
        let controller =
            InteractionController::new(factory, config.valid_years.clone(), &config.default_year)?;
        let selector = YearSelector::new(config.year_selector.clone(), config.valid_years.clone());

        Ok(Self {
            config,
            controller,
            selector,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Marker and selection state.
    #[must_use]
    pub const fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// The year buttons.
    #[must_use]
    pub const fn selector(&self) -> &YearSelector {
        &self.selector
    }

    /// Pointer moved with no button pressed.
    pub fn pointer_moved(&mut self, at: ScreenPoint, hit: &dyn HitTest) {
        self.controller.hover(at, hit);
    }

    /// Pointer clicked on the map.
    pub fn pointer_clicked(&mut self, at: ScreenPoint, hit: &dyn HitTest) {
        self.controller.click(at, hit);
    }

    /// Pointer button released. Switches year when released over a year
    /// button; returns `None` when no button was hit.
    pub fn pointer_released(&mut self, at: ScreenPoint) -> Option<YearChange> {
        let year = self.selector.year_at(at)?.to_string();
        Some(self.controller.select_year(&year))
    }

    /// Draws one frame: background, visible markers (regions, then
    /// incidents), year buttons, then the info panel.
    pub fn draw_frame(&self, surface: &mut dyn Surface, projection: &dyn Projection) {
        surface.clear(BACKGROUND);

        for (_, marker) in self.controller.markers().visible() {
            marker.draw(surface, projection.project(marker.anchor()));
        }

        self.selector.draw(surface, self.controller.selected_year());

        info_panel::draw_info_panel(
            surface,
            &self.config.info_panel,
            self.controller.info_text().as_deref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use gun_map_incident_models::{GeoLocation, properties};
    use gun_map_interaction::{DrillState, ProjectedHitTest};
    use gun_map_render::{
        Equirectangular, TextAnchor,
        recording::{DrawCommand, RecordingSurface},
    };

    use super::*;

    // Under the default projection these land on whole pixels:
    // Texas (400, 350), Ohio (610, 170), the first Texas incident (435, 390).
    const TEXAS: ScreenPoint = ScreenPoint::new(400.0, 350.0);
    const OHIO: ScreenPoint = ScreenPoint::new(610.0, 170.0);
    const TEXAS_PIN: ScreenPoint = ScreenPoint::new(435.0, 380.0);
    const BUTTON_2019: ScreenPoint = ScreenPoint::new(776.0, 606.0);

    fn feature(lat: f64, lon: f64, region: &str, year: &str) -> IncidentFeature {
        IncidentFeature::new(GeoLocation::new(lat, lon))
            .with_property(properties::REGION, region)
            .with_property(properties::YEAR, year)
            .with_property(properties::KILLED, "1")
            .with_property(properties::INJURED, "2")
            .with_property(properties::ADDRESS, format!("{region} {year}"))
            .with_property(properties::DATE, "\"2020-01-01\"")
            .with_property(properties::COUNTY, "Some")
    }

    fn features() -> Vec<IncidentFeature> {
        vec![
            feature(29.79, -97.09, "Texas", "2020"),
            feature(32.79, -96.09, "Texas", "2020"),
            feature(40.0, -83.0, "Ohio", "2020"),
            feature(30.0, -95.0, "Texas", "2019"),
        ]
    }

    fn anchors() -> Vec<RegionAnchor> {
        vec![
            RegionAnchor::new("Texas", GeoLocation::new(31.79, -100.09)),
            RegionAnchor::new("Ohio", GeoLocation::new(40.79, -82.09)),
        ]
    }

    fn dashboard() -> Dashboard {
        Dashboard::load(&features(), anchors(), DashboardConfig::default()).unwrap()
    }

    fn projection() -> Equirectangular {
        DashboardConfig::default().map.projection()
    }

    fn frame(dashboard: &Dashboard) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        dashboard.draw_frame(&mut surface, &projection());
        surface
    }

    #[test]
    fn overview_frame_draws_regions_and_buttons() {
        let surface = frame(&dashboard());
        let commands = surface.commands();

        assert_eq!(commands[0], DrawCommand::Clear(BACKGROUND));
        let circles = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 4, "disc and halo per visible region");
        assert_eq!(surface.icon_count(), 0);
        assert_eq!(
            surface.texts().collect::<Vec<_>>(),
            ["2", "1", "2020", "2019", "2018"]
        );
    }

    #[test]
    fn hover_fills_the_info_panel() {
        let mut d = dashboard();
        let projection = projection();
        d.pointer_moved(TEXAS, &ProjectedHitTest::new(&projection));

        let surface = frame(&d);
        assert_eq!(
            surface.commands().last(),
            Some(&DrawCommand::Text {
                text: "Texas\n\n# Shootings: 2\n\n# People killed: 2\n\n# People injured: 4".to_string(),
                at: ScreenPoint::new(770.0, 55.0),
                anchor: TextAnchor::TopLeft,
                color: Rgba::gray(0),
            })
        );
    }

    #[test]
    fn click_reveals_region_incidents() {
        let mut d = dashboard();
        let projection = projection();
        let hit = ProjectedHitTest::new(&projection);

        d.pointer_clicked(TEXAS, &hit);
        assert_eq!(
            d.controller().drill_state(),
            DrillState::Drilled {
                region: "Texas".to_string()
            }
        );
        assert_eq!(frame(&d).icon_count(), 2);

        d.pointer_moved(TEXAS_PIN, &hit);
        assert_eq!(
            d.controller().info_text().as_deref(),
            Some("Texas 2020\n\nSome, Texas\n\n2020-01-01\n\n# People killed: 1\n\n# People injured: 2")
        );

        d.pointer_clicked(OHIO, &hit);
        assert_eq!(frame(&d).icon_count(), 1);
    }

    #[test]
    fn releasing_on_a_year_button_switches_year() {
        let mut d = dashboard();
        let projection = projection();
        d.pointer_clicked(TEXAS, &ProjectedHitTest::new(&projection));

        assert_eq!(d.pointer_released(BUTTON_2019), Some(YearChange::Switched));
        assert_eq!(d.controller().selected_year(), "2019");
        assert_eq!(d.controller().drill_state(), DrillState::Overview);

        let surface = frame(&d);
        assert_eq!(surface.icon_count(), 0);
        assert!(surface.commands().contains(&DrawCommand::Rect {
            top_left: ScreenPoint::new(770.0, 600.0),
            width: 12.0,
            height: 12.0,
            color: Rgba::gray(100),
        }));
        assert_eq!(surface.texts().next(), Some("1"), "only Texas is left");

        assert_eq!(d.pointer_released(BUTTON_2019), Some(YearChange::Unchanged));
    }

    #[test]
    fn releasing_elsewhere_does_nothing() {
        let mut d = dashboard();
        assert_eq!(d.pointer_released(TEXAS), None);
        assert_eq!(d.controller().selected_year(), "2020");
    }

    #[test]
    fn malformed_incident_fails_the_load() {
        let mut features = features();
        features[2] = features[2].clone().with_property(properties::KILLED, "many");

        let err = Dashboard::load(&features, anchors(), DashboardConfig::default()).unwrap_err();
        assert!(
            matches!(err, DashboardError::Aggregate(AggregateError::Record { index: 2, .. })),
            "got {err:?}"
        );
    }

    #[test]
    fn invalid_config_fails_the_load() {
        let config = DashboardConfig {
            default_year: "2021".to_string(),
            ..DashboardConfig::default()
        };
        let err = Dashboard::load(&features(), anchors(), config).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)), "got {err:?}");
    }
}
