//! Side panel showing the selected marker's detail text.

use gun_map_render::{Rgba, ScreenPoint, Surface, TextAnchor};

use crate::config::InfoPanelConfig;

const TEXT_COLOR: Rgba = Rgba::gray(0);

/// Draws `text` at the panel position. Draws nothing when no marker is
/// selected.
pub fn draw_info_panel(surface: &mut dyn Surface, config: &InfoPanelConfig, text: Option<&str>) {
    if let Some(text) = text {
        surface.draw_text(
            text,
            ScreenPoint::new(config.x, config.y),
            TextAnchor::TopLeft,
            TEXT_COLOR,
        );
    }
}
