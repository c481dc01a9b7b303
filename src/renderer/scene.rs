//! Per-state frame composition

use glam::Vec2;

use super::draw::{DrawSurface, Rect, palette};
use super::style::{Styles, VisualStyle};
use crate::sim::{Explosion, Field, MatchSession, Paddle};
use crate::ui::Button;

const TITLE_SIZE: f32 = 80.0;
const PAUSE_TITLE_SIZE: f32 = 60.0;
const SCORE_SIZE: f32 = 36.0;
const END_TEXT_SIZE: f32 = 60.0;
const INTERSTITIAL_SIZE: f32 = 48.0;

/// Score interstitial being shown over the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interstitial {
    pub kind: Explosion,
    /// Ticks left on screen
    pub remaining: u32,
    pub total: u32,
}

fn draw_backdrop(surface: &mut dyn DrawSurface, field: &Field, styles: &Styles) {
    surface.clear(palette::DARK_GRAY);
    if styles.background.is_image() {
        styles
            .background
            .draw_rect(surface, Rect::new(Vec2::ZERO, Vec2::new(field.width, field.height)));
    }
}

fn paddle_rect(paddle: &Paddle) -> Rect {
    Rect::new(paddle.pos, paddle.size)
}

/// Field, paddles, ball, score and any score interstitial
pub fn draw_match(
    surface: &mut dyn DrawSurface,
    session: &MatchSession,
    styles: &Styles,
    interstitial: Option<&Interstitial>,
) {
    let field = session.field();
    surface.clear(palette::BLACK);

    // Center line
    surface.line(
        Vec2::new(field.width / 2.0, 0.0),
        Vec2::new(field.width / 2.0, field.height),
        palette::LIGHT_GRAY,
    );

    styles.paddle.draw_rect(surface, paddle_rect(&session.player));
    styles.paddle.draw_rect(surface, paddle_rect(&session.cpu));

    let ball_style = if session.ball.hit_flash > 0 {
        VisualStyle::Shape(palette::ACCENT)
    } else {
        styles.ball
    };
    ball_style.draw_circle(surface, session.ball.pos, session.ball.radius);

    let score = format!("{}   {}", session.player_score(), session.cpu_score());
    surface.text(
        &score,
        Vec2::new(field.width / 2.0, 20.0 + SCORE_SIZE / 2.0),
        SCORE_SIZE,
        palette::WHITE,
    );

    if let Some(fx) = interstitial {
        draw_interstitial(surface, &field, fx);
    }
}

/// Expanding ring plus a short caption, fading out over its lifetime
fn draw_interstitial(surface: &mut dyn DrawSurface, field: &Field, fx: &Interstitial) {
    let progress = 1.0 - fx.remaining as f32 / fx.total.max(1) as f32;
    let alpha = ((1.0 - progress) * 255.0) as u8;
    let (caption, color) = match fx.kind {
        Explosion::Win => ("Point!", palette::ACCENT),
        Explosion::Lose => ("CPU scores", palette::LIGHT_GRAY),
    };
    let center = field.center();
    let radius = 20.0 + progress * field.height / 2.0;
    surface.fill_circle(center, radius, color.with_alpha(alpha / 3));
    surface.text(caption, center, INTERSTITIAL_SIZE, color.with_alpha(alpha));
}

/// Title and main menu buttons
pub fn draw_menu<'a>(
    surface: &mut dyn DrawSurface,
    field: &Field,
    styles: &Styles,
    buttons: impl IntoIterator<Item = &'a Button>,
) {
    draw_backdrop(surface, field, styles);
    let title_center = Vec2::new(field.width / 2.0, field.height / 2.0 - 100.0);
    match styles.title {
        Some(image) => surface.image(
            image,
            Rect::from_center(title_center, Vec2::new(TITLE_SIZE * 5.0, TITLE_SIZE * 1.25)),
        ),
        None => surface.text("Ping Pong", title_center, TITLE_SIZE, palette::WHITE),
    }
    for button in buttons {
        button.draw(surface, styles);
    }
}

/// Pause title and buttons
pub fn draw_pause<'a>(
    surface: &mut dyn DrawSurface,
    field: &Field,
    styles: &Styles,
    buttons: impl IntoIterator<Item = &'a Button>,
) {
    draw_backdrop(surface, field, styles);
    surface.text(
        "Paused",
        Vec2::new(field.width / 2.0, field.height / 2.0 - 120.0),
        PAUSE_TITLE_SIZE,
        palette::ACCENT,
    );
    for button in buttons {
        button.draw(surface, styles);
    }
}

/// Win/lose message at `scale`
pub fn draw_end(
    surface: &mut dyn DrawSurface,
    field: &Field,
    styles: &Styles,
    message: &str,
    scale: f32,
) {
    draw_backdrop(surface, field, styles);
    surface.text(message, field.center(), END_TEXT_SIZE * scale, palette::ACCENT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandBuffer, DrawCommand, ImageHandle};
    use crate::settings::MatchConfig;

    fn session() -> MatchSession {
        MatchSession::new(MatchConfig::default(), false, 1).unwrap()
    }

    #[test]
    fn test_match_frame_contents() {
        let s = session();
        let mut buf = CommandBuffer::new();
        draw_match(&mut buf, &s, &Styles::default(), None);

        let cmds = buf.commands();
        assert_eq!(cmds[0], DrawCommand::Clear(palette::BLACK));
        let rects = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count();
        assert_eq!(rects, 2);
        assert!(cmds.iter().any(|c| matches!(c, DrawCommand::FillCircle { .. })));
        assert_eq!(buf.texts().collect::<Vec<_>>(), vec!["0   0"]);
    }

    #[test]
    fn test_flashing_ball_is_accent() {
        let mut s = session();
        s.ball.flash();
        let mut buf = CommandBuffer::new();
        draw_match(&mut buf, &s, &Styles::default(), None);
        assert!(buf.commands().iter().any(|c| matches!(
            c,
            DrawCommand::FillCircle { color, .. } if *color == palette::ACCENT
        )));
    }

    #[test]
    fn test_image_paddles() {
        let s = session();
        let styles = Styles {
            paddle: VisualStyle::Image(ImageHandle(3)),
            ..Default::default()
        };
        let mut buf = CommandBuffer::new();
        draw_match(&mut buf, &s, &styles, None);
        let images = buf
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { image: ImageHandle(3), .. }))
            .count();
        assert_eq!(images, 2);
    }

    #[test]
    fn test_interstitial_caption() {
        let s = session();
        let fx = Interstitial {
            kind: Explosion::Win,
            remaining: 10,
            total: 30,
        };
        let mut buf = CommandBuffer::new();
        draw_match(&mut buf, &s, &Styles::default(), Some(&fx));
        assert!(buf.texts().any(|t| t == "Point!"));
    }

    #[test]
    fn test_menu_title_falls_back_to_text() {
        let mut buf = CommandBuffer::new();
        draw_menu(&mut buf, &Field::default(), &Styles::default(), std::iter::empty());
        assert_eq!(buf.texts().collect::<Vec<_>>(), vec!["Ping Pong"]);
    }
}
