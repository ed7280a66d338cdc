//! Geographic to screen projection.
//!
//! A real map engine owns projection (pan, zoom, tiles). The core only needs
//! the [`Projection`] trait; [`Equirectangular`] is a plain linear mapping
//! used by headless tools and tests.

use geo::{Coord, Rect, coord};
use gun_map_incident_models::GeoLocation;

use crate::ScreenPoint;

/// Maps geographic locations to screen pixels.
pub trait Projection {
    /// Screen position of `location`.
    fn project(&self, location: &GeoLocation) -> ScreenPoint;
}

/// Screen rectangle a map is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// `true` if `point` lies within the viewport.
    #[must_use]
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Linear longitude/latitude to x/y mapping over a fixed geographic window.
#[derive(Debug, Clone, PartialEq)]
pub struct Equirectangular {
    bounds: Rect<f64>,
    viewport: Viewport,
}

impl Equirectangular {
    /// Projects the geographic window `bounds` (x = longitude, y = latitude)
    /// onto `viewport`.
    #[must_use]
    pub const fn new(bounds: Rect<f64>, viewport: Viewport) -> Self {
        Self { bounds, viewport }
    }

    /// Builds the window from a center and a `(latitude, longitude)` span in
    /// degrees.
    #[must_use]
    pub fn centered(center: GeoLocation, lat_span: f64, lon_span: f64, viewport: Viewport) -> Self {
        let half = coord! { x: lon_span / 2.0, y: lat_span / 2.0 };
        let middle: Coord<f64> = coord! { x: center.longitude, y: center.latitude };
        Self::new(Rect::new(middle - half, middle + half), viewport)
    }

    /// The screen rectangle being projected onto.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

impl Projection for Equirectangular {
    #[allow(clippy::cast_possible_truncation)]
    fn project(&self, location: &GeoLocation) -> ScreenPoint {
        let min = self.bounds.min();
        let max = self.bounds.max();
        let fx = (location.longitude - min.x) / self.bounds.width();
        let fy = (max.y - location.latitude) / self.bounds.height();

        ScreenPoint::new(
            self.viewport.x + (fx * f64::from(self.viewport.width)) as f32,
            self.viewport.y + (fy * f64::from(self.viewport.height)) as f32,
        )
    }
}
