//! Column of year buttons beside the map.

use gun_map_render::{Rgba, ScreenPoint, Surface, TextAnchor};

use crate::config::YearSelectorConfig;

const BUTTON_FILL: Rgba = Rgba::gray(255);
const SELECTED_FILL: Rgba = Rgba::gray(100);
const LABEL_COLOR: Rgba = Rgba::gray(0);
/// Labels sit one pixel above their button's top edge.
const LABEL_RISE: f32 = 1.0;

/// Square buttons, one per selectable year, stacked top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSelector {
    layout: YearSelectorConfig,
    years: Vec<String>,
}

impl YearSelector {
    /// Lays out `years` in order using `layout`.
    #[must_use]
    pub const fn new(layout: YearSelectorConfig, years: Vec<String>) -> Self {
        Self { layout, years }
    }

    /// Years in button order.
    #[must_use]
    pub fn years(&self) -> &[String] {
        &self.years
    }

    /// Top-left corner of the `index`th button.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn button_origin(&self, index: usize) -> ScreenPoint {
        ScreenPoint::new(
            self.layout.x,
            self.layout.spacing.mul_add(index as f32, self.layout.y_top),
        )
    }

    /// The year whose button strictly contains `at`. Points on a button's
    /// edge, or between buttons, select nothing.
    #[must_use]
    pub fn year_at(&self, at: ScreenPoint) -> Option<&str> {
        let size = self.layout.button_size;
        self.years
            .iter()
            .enumerate()
            .find(|(i, _)| {
                let origin = self.button_origin(*i);
                at.x > origin.x
                    && at.x < origin.x + size
                    && at.y > origin.y
                    && at.y < origin.y + size
            })
            .map(|(_, year)| year.as_str())
    }

    /// Draws every button with its label, shading the `selected` one.
    pub fn draw(&self, surface: &mut dyn Surface, selected: &str) {
        let size = self.layout.button_size;

        for i in 0..self.years.len() {
            surface.fill_rect(self.button_origin(i), size, size, BUTTON_FILL);
        }

        for (i, year) in self.years.iter().enumerate() {
            let label = self
                .button_origin(i)
                .offset(self.layout.label_offset, -LABEL_RISE);
            surface.draw_text(year, label, TextAnchor::TopLeft, LABEL_COLOR);
        }

        if let Some(i) = self.years.iter().position(|y| y == selected) {
            surface.fill_rect(self.button_origin(i), size, size, SELECTED_FILL);
        }
    }
}
