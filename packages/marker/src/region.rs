//! Region summary markers.
//!
//! A region marker is a filled disc with a translucent halo, labelled with the
//! region's incident count. Size and color come from the count's [`Tier`]:
//!
//! | count      | tier   | color          | radius | halo |
//! |------------|--------|----------------|--------|------|
//! | 0          | hidden | -              | -      | -    |
//! | 1..=9      | small  | (120, 186, 73) | 17     | 27   |
//! | 10..=30    | medium | (237, 193, 50) | 21     | 31   |
//! | 31..       | large  | (222, 114, 102)| 25     | 35   |

use gun_map_analytics_models::RegionStat;
use gun_map_incident_models::GeoLocation;
use gun_map_render::{Rgba, ScreenPoint, Surface, TextAnchor};
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::{HitShape, Marker, MarkerId, MarkerKind, MarkerState};

const SMALL_RADIUS: f32 = 17.0;
const LARGE_RADIUS: f32 = 25.0;
const MEDIUM_RADIUS: f32 = (SMALL_RADIUS + LARGE_RADIUS) / 2.0;
const HALO_BUFFER: f32 = 10.0;
const HALO_ALPHA: u8 = 100;

/// Counts below this are small.
const SMALL_COUNT_THRESHOLD: u32 = 10;
/// Counts above this are large.
const LARGE_COUNT_THRESHOLD: u32 = 30;

const GREEN: Rgba = Rgba::rgb(120, 186, 73);
const YELLOW: Rgba = Rgba::rgb(237, 193, 50);
const RED: Rgba = Rgba::rgb(222, 114, 102);
const LABEL: Rgba = Rgba::gray(10);

/// Size/color class of a region marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Tier {
    /// Fewer than 10 incidents.
    Small,
    /// 10 to 30 incidents inclusive.
    Medium,
    /// More than 30 incidents.
    Large,
}

impl Tier {
    /// Tier for `count` incidents, or `None` when there are none.
    #[must_use]
    pub const fn for_count(count: u32) -> Option<Self> {
        if count == 0 {
            None
        } else if count < SMALL_COUNT_THRESHOLD {
            Some(Self::Small)
        } else if count > LARGE_COUNT_THRESHOLD {
            Some(Self::Large)
        } else {
            Some(Self::Medium)
        }
    }

    /// Fill color of the disc.
    #[must_use]
    pub const fn color(self) -> Rgba {
        match self {
            Self::Small => GREEN,
            Self::Medium => YELLOW,
            Self::Large => RED,
        }
    }

    /// Fill color of the halo.
    #[must_use]
    pub const fn halo_color(self) -> Rgba {
        self.color().with_alpha(HALO_ALPHA)
    }

    /// Disc radius in pixels.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Small => SMALL_RADIUS,
            Self::Medium => MEDIUM_RADIUS,
            Self::Large => LARGE_RADIUS,
        }
    }

    /// Halo radius in pixels.
    #[must_use]
    pub const fn halo_radius(self) -> f32 {
        self.radius() + HALO_BUFFER
    }
}

/// Summary marker for one region in the selected year.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMarker {
    state: MarkerState,
    region: String,
    stat: RegionStat,
}

impl RegionMarker {
    /// Creates a marker carrying `stat`. A marker with no incidents starts,
    /// and stays, hidden.
    #[must_use]
    pub fn new(region: impl Into<String>, anchor: GeoLocation, stat: RegionStat) -> Self {
        let region = region.into();
        let mut state = MarkerState::new(MarkerId::Region(region.clone()), anchor);
        state.hidden = stat.shooting_count == 0;
        Self {
            state,
            region,
            stat,
        }
    }

    /// Region name.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Totals for the region in the year the marker was built for.
    #[must_use]
    pub const fn stat(&self) -> &RegionStat {
        &self.stat
    }

    /// Number of incidents.
    #[must_use]
    pub const fn shooting_count(&self) -> u32 {
        self.stat.shooting_count
    }

    /// Size/color class, `None` when the region has no incidents.
    #[must_use]
    pub const fn tier(&self) -> Option<Tier> {
        Tier::for_count(self.stat.shooting_count)
    }
}

impl Marker for RegionMarker {
    fn kind(&self) -> MarkerKind {
        MarkerKind::Region
    }

    fn state(&self) -> &MarkerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut MarkerState {
        &mut self.state
    }

    fn title(&self) -> &str {
        &self.region
    }

    fn detail_text(&self) -> String {
        format!(
            "{}\n\n# Shootings: {}\n\n# People killed: {}\n\n# People injured: {}",
            self.region, self.stat.shooting_count, self.stat.killed, self.stat.injured
        )
    }

    fn draw(&self, surface: &mut dyn Surface, at: ScreenPoint) {
        if self.state.hidden {
            return;
        }
        let Some(tier) = self.tier() else {
            return;
        };

        surface.fill_circle(at, tier.radius(), tier.color());
        surface.fill_circle(at, tier.halo_radius(), tier.halo_color());
        surface.draw_text(
            &self.stat.shooting_count.to_string(),
            at,
            TextAnchor::Center,
            LABEL,
        );
    }

    fn hit_shape(&self, at: ScreenPoint) -> HitShape {
        HitShape::Circle {
            center: at,
            radius: self.tier().map_or(0.0, Tier::radius),
        }
    }

    /// An empty region cannot be revealed.
    fn set_hidden(&mut self, hidden: bool) {
        self.state.hidden = hidden || self.stat.shooting_count == 0;
    }
}
