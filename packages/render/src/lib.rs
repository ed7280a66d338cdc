#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The drawing contract between the map core and whatever renders it.
//!
//! The core never rasterises anything itself. Markers, the year selector and
//! the info panel describe what they want through the [`Surface`] trait, and
//! the renderer projects geographic anchors to screen space through
//! [`Projection`]. [`recording::RecordingSurface`] captures draw calls so
//! frames can be inspected without a window.

pub mod projection;
pub mod recording;

use strum_macros::{AsRefStr, Display};

pub use projection::{Equirectangular, Projection};

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// An opaque gray level.
    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// The same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// A position in screen pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// Horizontal pixel offset.
    pub x: f32,
    /// Vertical pixel offset.
    pub y: f32,
}

impl ScreenPoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Where a string is anchored relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TextAnchor {
    /// Position is the text's top-left corner.
    TopLeft,
    /// Position is the text's center.
    Center,
}

/// Bitmap icons the renderer is expected to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Icon {
    /// Map pin used for individual incidents.
    IncidentPin,
}

/// Drawing primitives the core needs from a renderer.
pub trait Surface {
    /// Fills the whole surface.
    fn clear(&mut self, color: Rgba);

    /// Fills a circle of `radius` pixels centred on `center`.
    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Rgba);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, top_left: ScreenPoint, width: f32, height: f32, color: Rgba);

    /// Draws `text` anchored at `at`.
    fn draw_text(&mut self, text: &str, at: ScreenPoint, anchor: TextAnchor, color: Rgba);

    /// Draws an icon with its top-left corner at `top_left`.
    fn draw_icon(&mut self, icon: Icon, top_left: ScreenPoint);
}
