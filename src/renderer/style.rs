//! Visual styles: primitive shapes or images from the asset collaborator
//!
//! Each drawable picks its style once, when the styles are resolved. A
//! missing or broken image falls back to a flat shape and the simulation
//! never notices.

use glam::Vec2;

use super::draw::{Color, DrawSurface, Rect, palette};
use crate::error::AssetError;

/// Opaque handle to an image owned by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Images the game can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Paddle,
    Ball,
    Button,
    Background,
    Title,
}

impl AssetKind {
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Paddle,
        AssetKind::Ball,
        AssetKind::Button,
        AssetKind::Background,
        AssetKind::Title,
    ];
}

/// Supplies images. Implemented by the shell.
pub trait AssetSource {
    fn load_image(&mut self, kind: AssetKind) -> Result<ImageHandle, AssetError>;
}

/// Source with no images at all
#[derive(Debug, Default)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn load_image(&mut self, kind: AssetKind) -> Result<ImageHandle, AssetError> {
        Err(AssetError::NotFound(kind))
    }
}

/// How one kind of thing is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualStyle {
    Shape(Color),
    Image(ImageHandle),
}

impl VisualStyle {
    pub fn is_image(&self) -> bool {
        matches!(self, VisualStyle::Image(_))
    }

    /// Draw filling `rect`
    pub fn draw_rect(&self, surface: &mut dyn DrawSurface, rect: Rect) {
        match *self {
            VisualStyle::Shape(color) => surface.fill_rect(rect, color),
            VisualStyle::Image(image) => surface.image(image, rect),
        }
    }

    /// Draw a round thing; images are stretched over the bounding square
    pub fn draw_circle(&self, surface: &mut dyn DrawSurface, center: Vec2, radius: f32) {
        match *self {
            VisualStyle::Shape(color) => surface.fill_circle(center, radius, color),
            VisualStyle::Image(image) => {
                let rect = Rect::from_center(center, Vec2::splat(radius * 2.0));
                surface.image(image, rect);
            }
        }
    }
}

/// Resolved styles for everything on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Styles {
    pub paddle: VisualStyle,
    pub ball: VisualStyle,
    /// Backdrop behind button labels; `None` draws the label only
    pub button: Option<ImageHandle>,
    /// Menu / pause / end-screen background
    pub background: VisualStyle,
    /// Title banner; `None` draws the title as text
    pub title: Option<ImageHandle>,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            paddle: VisualStyle::Shape(palette::WHITE),
            ball: VisualStyle::Shape(palette::WHITE),
            button: None,
            background: VisualStyle::Shape(palette::DARK_GRAY),
            title: None,
        }
    }
}

impl Styles {
    /// Ask `source` for every image once, falling back to shapes
    pub fn resolve(source: &mut dyn AssetSource) -> Self {
        let mut styles = Self::default();
        for kind in AssetKind::ALL {
            let image = match source.load_image(kind) {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("Using fallback visuals for {:?}: {}", kind, e);
                    continue;
                }
            };
            match kind {
                AssetKind::Paddle => styles.paddle = VisualStyle::Image(image),
                AssetKind::Ball => styles.ball = VisualStyle::Image(image),
                AssetKind::Button => styles.button = Some(image),
                AssetKind::Background => styles.background = VisualStyle::Image(image),
                AssetKind::Title => styles.title = Some(image),
            }
        }
        styles
    }
}
