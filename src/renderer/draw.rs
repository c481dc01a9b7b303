//! Draw command vocabulary
//!
//! The core describes each frame as a list of primitive commands. Pixel
//! buffers, fonts and textures belong to whoever implements [`DrawSurface`].

use glam::Vec2;

use super::style::ImageHandle;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Normalized `[r, g, b, a]` for GPU backends
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Palette
pub mod palette {
    use super::Color;

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const DARK_GRAY: Color = Color::rgb(40, 40, 40);
    pub const LIGHT_GRAY: Color = Color::rgb(200, 200, 200);
    pub const ACCENT: Color = Color::rgb(30, 144, 255);
}

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Half-open containment test
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.pos + self.size;
        p.x >= self.pos.x && p.x < max.x && p.y >= self.pos.y && p.y < max.y
    }
}

/// A single primitive draw request
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
    /// Text centered on `center`, `size` is the font pixel height
    Text {
        text: String,
        center: Vec2,
        size: f32,
        color: Color,
    },
    /// Image stretched over `rect`
    Image { image: ImageHandle, rect: Rect },
}

/// Something that accepts draw commands for one frame
pub trait DrawSurface {
    fn draw(&mut self, command: DrawCommand);

    fn clear(&mut self, color: Color) {
        self.draw(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw(DrawCommand::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draw(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.draw(DrawCommand::Line { from, to, color });
    }

    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color) {
        self.draw(DrawCommand::Text {
            text: text.to_string(),
            center,
            size,
            color,
        });
    }

    fn image(&mut self, image: ImageHandle, rect: Rect) {
        self.draw(DrawCommand::Image { image, rect });
    }
}

/// Records commands; the shell replays them each frame
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drain recorded commands, leaving the buffer empty for the next frame
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// All text strings drawn this frame
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawSurface for CommandBuffer {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.pos, Vec2::new(90.0, 45.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
        assert!(r.contains(Vec2::new(90.0, 45.0)));
        assert!(!r.contains(Vec2::new(110.0, 50.0)));
    }

    #[test]
    fn test_command_buffer_records_and_drains() {
        let mut buf = CommandBuffer::new();
        buf.clear(palette::BLACK);
        buf.text("3   1", Vec2::new(400.0, 20.0), 36.0, palette::WHITE);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.texts().collect::<Vec<_>>(), vec!["3   1"]);

        let drained = buf.take();
        assert_eq!(drained[0], DrawCommand::Clear(palette::BLACK));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_color_to_f32() {
        assert_eq!(palette::WHITE.to_f32(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(palette::BLACK.with_alpha(0).to_f32(), [0.0, 0.0, 0.0, 0.0]);
    }
}
