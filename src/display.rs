/// Terminal rendering.  All terminal output goes through here.
///
/// `TerminalCanvas` implements the `Canvas` sink on top of crossterm.  World
/// coordinates are scaled onto the terminal grid; nothing here knows about
/// game rules.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Sprite, Tier};
use crate::render::{Canvas, Tone};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_LABEL: Color = Color::White;
const C_HUD_VALUE: Color = Color::Green;
const C_BANNER: Color = Color::Blue;
const C_PLAYER: Color = Color::White;
const C_LIFE: Color = Color::Red;
const C_TIER_ONE: Color = Color::Green;
const C_TIER_TWO: Color = Color::Cyan;
const C_TIER_THREE: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Yellow;
const C_LASER: Color = Color::Cyan;
const C_BOMB: Color = Color::Magenta;
const C_SAUCER: Color = Color::Red;
const C_BARRIER: Color = Color::DarkGreen;

fn glyph(sprite: Sprite) -> (&'static str, Color) {
    match sprite {
        Sprite::Gunship => ("/█\\", C_PLAYER),
        Sprite::GunshipExplosion => ("*#*", C_EXPLOSION),
        Sprite::Invader(Tier::One) => ("«▼»", C_TIER_ONE),
        Sprite::Invader(Tier::Two) => ("(◎)", C_TIER_TWO),
        Sprite::Invader(Tier::Three) => ("{Ö}", C_TIER_THREE),
        Sprite::InvaderExplosion(_) => ("\\*/", C_EXPLOSION),
        Sprite::Laser => ("║", C_LASER),
        Sprite::Bomb => ("↓", C_BOMB),
        Sprite::Saucer => ("<=◆=>", C_SAUCER),
        Sprite::SaucerExplosion => ("<*#*>", C_EXPLOSION),
        Sprite::Barrier => ("█", C_BARRIER),
        Sprite::LifeIcon => ("▲", C_LIFE),
    }
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    world_width: i32,
    world_height: i32,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16, world_width: i32, world_height: i32) -> Self {
        Self {
            out,
            cols: cols.max(1),
            rows: rows.max(1),
            world_width: world_width.max(1),
            world_height: world_height.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn column(&self, x: i32) -> i64 {
        x as i64 * self.cols as i64 / self.world_width as i64
    }

    fn row(&self, y: i32) -> i64 {
        y as i64 * self.rows as i64 / self.world_height as i64
    }

    /// Grid cell for a world point, or None when it falls off the terminal.
    pub fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let (col, row) = (self.column(x), self.row(y));
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Print `text` starting at a grid cell, cut at the right edge.
    fn put(&mut self, col: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
        let room = (self.cols - col) as usize;
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw(&mut self, sprite: Sprite, x: i32, y: i32) -> std::io::Result<()> {
        let Some((col, row)) = self.cell(x, y) else {
            return Ok(());
        };
        let (text, color) = glyph(sprite);
        if sprite == Sprite::Barrier {
            // Barriers are stretched to their world width.
            let (width, _) = sprite.size();
            let cells = (self.column(x + width) - self.column(x)).max(1) as usize;
            return self.put(col, row, &text.repeat(cells), color);
        }
        self.put(col, row, text, color)
    }

    fn text(&mut self, text: &str, x: i32, y: i32, tone: Tone) -> std::io::Result<()> {
        let Some((col, row)) = self.cell(x, y) else {
            return Ok(());
        };
        let (col, color) = match tone {
            Tone::Label => (col, C_HUD_LABEL),
            Tone::Value => (col, C_HUD_VALUE),
            Tone::Banner => {
                let half = text.chars().count() as u16 / 2;
                (col.saturating_sub(half), C_BANNER)
            }
        };
        self.put(col, row, text, color)
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
