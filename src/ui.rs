//! Menu widgets and text animation
//!
//! Both animations here are plain numbers moved with [`smooth_toward`];
//! drawing just reads the current scale.

use glam::Vec2;

use crate::consts::SMOOTHING;
use crate::input::InputSnapshot;
use crate::renderer::{Color, DrawSurface, Rect, Styles, palette};
use crate::smooth_toward;

/// Scale a hovered button grows toward
pub const HOVER_SCALE: f32 = 1.1;

/// Rough glyph advance as a fraction of font size (no font metrics in the core)
const GLYPH_WIDTH: f32 = 0.5;

/// A clickable text button
#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    /// Center anchor
    pub pos: Vec2,
    pub font_size: f32,
    pub base_color: Color,
    pub hover_color: Color,
    hovered: bool,
    scale: f32,
    target_scale: f32,
}

impl Button {
    pub fn new(label: impl Into<String>, pos: Vec2, font_size: f32) -> Self {
        Self {
            label: label.into(),
            pos,
            font_size,
            base_color: palette::LIGHT_GRAY,
            hover_color: palette::ACCENT,
            hovered: false,
            scale: 1.0,
            target_scale: 1.0,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn color(&self) -> Color {
        if self.hovered {
            self.hover_color
        } else {
            self.base_color
        }
    }

    /// Approximate on-screen bounds of the label at the current scale
    pub fn bounds(&self) -> Rect {
        let size = self.font_size * self.scale;
        let width = self.label.chars().count() as f32 * size * GLYPH_WIDTH;
        Rect::from_center(self.pos, Vec2::new(width, size))
    }

    /// Track hover state and ease the scale toward its target
    pub fn update(&mut self, pointer: Vec2) {
        self.hovered = self.bounds().contains(pointer);
        self.target_scale = if self.hovered { HOVER_SCALE } else { 1.0 };
        self.scale = smooth_toward(self.scale, self.target_scale, SMOOTHING);
    }

    pub fn is_clicked(&self, input: &InputSnapshot) -> bool {
        input.clicked && self.bounds().contains(input.pointer)
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, styles: &Styles) {
        if let Some(image) = styles.button {
            let bounds = self.bounds();
            let padded = Rect::from_center(bounds.center(), bounds.size * 1.2);
            surface.image(image, padded);
        }
        surface.text(&self.label, self.pos, self.font_size * self.scale, self.color());
    }
}

/// "Breathing" text scale for the win/lose screen
#[derive(Debug, Clone)]
pub struct Pulse {
    counter: u32,
    scale: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new()
    }
}

impl Pulse {
    pub fn new() -> Self {
        Self {
            counter: 0,
            scale: 1.0,
        }
    }

    /// Raw sine target for tick `counter`
    pub fn target(counter: u32) -> f32 {
        1.0 + 0.1 * (counter as f32 * 0.1).sin()
    }

    pub fn tick(&mut self) -> f32 {
        self.counter += 1;
        self.scale = smooth_toward(self.scale, Self::target(self.counter), SMOOTHING);
        self.scale
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}
