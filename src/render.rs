/// Frame composition.  Walks the session in a fixed order and hands each
/// visible thing to a `Canvas`; the canvas decides what that means on screen.

use std::io;

use crate::config::{LIFE_ICON_XS, LIVES_LABEL_POS, LIVES_Y_POSITION, SCORE_LABEL_POS, SCORE_VALUE_POS};
use crate::entities::{Drawable, DrawItem, Sprite};
use crate::session::{Session, SessionStatus};

/// How a piece of text should stand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Label,
    Value,
    /// Large message; `(x, y)` is its centre rather than its left edge.
    Banner,
}

/// Render sink.
pub trait Canvas {
    /// Wipe the surface back to the background.
    fn clear(&mut self) -> io::Result<()>;
    fn draw(&mut self, sprite: Sprite, x: i32, y: i32) -> io::Result<()>;
    fn text(&mut self, text: &str, x: i32, y: i32, tone: Tone) -> io::Result<()>;
    /// Show everything drawn since the last `clear`.
    fn present(&mut self) -> io::Result<()>;
}

fn draw_item(canvas: &mut impl Canvas, item: DrawItem) -> io::Result<()> {
    canvas.draw(item.sprite, item.x, item.y)
}

/// Background, HUD, ship, invaders, projectiles, saucer, barriers, present.
pub fn render_frame(session: &Session, canvas: &mut impl Canvas) -> io::Result<()> {
    canvas.clear()?;
    draw_hud(session, canvas)?;

    draw_item(canvas, session.ship.draw_item())?;
    for item in session.squadron.draw_items() {
        draw_item(canvas, item)?;
    }
    for projectile in &session.projectiles {
        draw_item(canvas, projectile.draw_item())?;
    }
    if let Some(saucer) = &session.saucer {
        draw_item(canvas, saucer.draw_item())?;
    }
    for barrier in &session.barriers {
        draw_item(canvas, barrier.draw_item())?;
    }

    if session.status == SessionStatus::Paused {
        let (w, h) = (session.config.display_width, session.config.display_height);
        canvas.text("Paused", w / 2, h / 2, Tone::Banner)?;
    }
    canvas.present()
}

/// Score on the left, lives on the right.  Life icons disappear from the
/// left as lives are lost.
fn draw_hud(session: &Session, canvas: &mut impl Canvas) -> io::Result<()> {
    let (lx, ly) = LIVES_LABEL_POS;
    canvas.text("Lives", lx, ly, Tone::Label)?;
    let shown = (session.player.lives as usize).min(LIFE_ICON_XS.len());
    for &x in &LIFE_ICON_XS[LIFE_ICON_XS.len() - shown..] {
        canvas.draw(Sprite::LifeIcon, x, LIVES_Y_POSITION)?;
    }

    let (sx, sy) = SCORE_LABEL_POS;
    canvas.text("Score", sx, sy, Tone::Label)?;
    let (vx, vy) = SCORE_VALUE_POS;
    canvas.text(&session.player.score.to_string(), vx, vy, Tone::Value)
}

/// Replace the frame with a centred game-over banner.
pub fn render_game_over(session: &Session, canvas: &mut impl Canvas) -> io::Result<()> {
    let (w, h) = (session.config.display_width, session.config.display_height);
    canvas.clear()?;
    canvas.text("Game Over", w / 2, h / 2, Tone::Banner)?;
    canvas.present()
}
