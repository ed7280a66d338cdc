//! A [`Surface`] that records draw calls instead of rasterising them.

use crate::{Icon, Rgba, ScreenPoint, Surface, TextAnchor};

/// One captured draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// [`Surface::clear`].
    Clear(Rgba),
    /// [`Surface::fill_circle`].
    Circle {
        /// Circle center.
        center: ScreenPoint,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        color: Rgba,
    },
    /// [`Surface::fill_rect`].
    Rect {
        /// Top-left corner.
        top_left: ScreenPoint,
        /// Width in pixels.
        width: f32,
        /// Height in pixels.
        height: f32,
        /// Fill color.
        color: Rgba,
    },
    /// [`Surface::draw_text`].
    Text {
        /// The string drawn.
        text: String,
        /// Anchor position.
        at: ScreenPoint,
        /// How `at` relates to the text box.
        anchor: TextAnchor,
        /// Text color.
        color: Rgba,
    },
    /// [`Surface::draw_icon`].
    Icon {
        /// Which icon.
        icon: Icon,
        /// Top-left corner.
        top_left: ScreenPoint,
    },
}

/// Collects every draw call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Everything drawn so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All strings drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of icons drawn so far.
    #[must_use]
    pub fn icon_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Icon { .. }))
            .count()
    }

    /// Forgets everything recorded.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, top_left: ScreenPoint, width: f32, height: f32, color: Rgba) {
        self.commands.push(DrawCommand::Rect {
            top_left,
            width,
            height,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, at: ScreenPoint, anchor: TextAnchor, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            anchor,
            color,
        });
    }

    fn draw_icon(&mut self, icon: Icon, top_left: ScreenPoint) {
        self.commands.push(DrawCommand::Icon { icon, top_left });
    }
}
