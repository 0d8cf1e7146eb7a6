//! Rendering layer.  All terminal I/O lives here.
//!
//! The core hands over a [`Frame`] in world units; this module projects it
//! onto the terminal grid and translates it into crossterm commands.  No game
//! logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use scroll_shooter::entities::{EnemyKind, ItemKind, Rect, Viewport};
use scroll_shooter::render::{Frame, Hud, Overlay, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::DarkGrey;
const C_HUD: Color = Color::White;
const C_HUD_LIVES: Color = Color::Red;
const C_POWERUP_ACTIVE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_FLICKER: Color = Color::DarkGrey;
const C_FLAME: Color = Color::DarkYellow;
const C_ENEMY_STRAIGHT: Color = Color::Green;
const C_ENEMY_ZIGZAG: Color = Color::Magenta;
const C_ENEMY_FAST: Color = Color::Red;
const C_BULLET: Color = Color::Cyan;
const C_ITEM_HEALTH: Color = Color::Magenta;
const C_ITEM_FAST_FIRE: Color = Color::Cyan;
const C_ITEM_MULTI_SHOT: Color = Color::Yellow;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

/// Background stars per tile.
const STAR_COUNT: u32 = 48;

// ── World ↔ terminal projection ───────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub viewport: Viewport,
    pub cols: u16,
    pub rows: u16,
}

impl Projection {
    pub fn new(viewport: Viewport, cols: u16, rows: u16) -> Self {
        Projection {
            viewport,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    fn col(&self, x: f32) -> i32 {
        (x * self.cols as f32 / self.viewport.width).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y * self.rows as f32 / self.viewport.height).floor() as i32
    }

    /// Cell containing a world point, if it is on screen.
    pub fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let (c, r) = (self.col(x), self.row(y));
        if c < 0 || r < 0 || c >= self.cols as i32 || r >= self.rows as i32 {
            None
        } else {
            Some((c as u16, r as u16))
        }
    }

    /// Inclusive cell span covered by `rect`, clipped to the screen.  Every
    /// visible rect covers at least one cell.
    pub fn span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col(rect.x).max(0);
        let r0 = self.row(rect.y).max(0);
        let c1 = (self.col(rect.right()) - 1).max(self.col(rect.x)).min(self.cols as i32 - 1);
        let r1 = (self.row(rect.bottom()) - 1).max(self.row(rect.y)).min(self.rows as i32 - 1);
        if c0 > c1 || r0 > r1 {
            None
        } else {
            Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
        }
    }

    /// World coordinates at the centre of a terminal cell (for mouse clicks).
    pub fn to_world(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.viewport.width / self.cols as f32,
            (row as f32 + 0.5) * self.viewport.height / self.rows as f32,
        )
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame, proj: &Projection) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, frame, proj)?;
    for sprite in &frame.sprites {
        draw_sprite(out, sprite, proj)?;
    }
    if let Some(hud) = &frame.hud {
        draw_hud(out, hud, proj)?;
    }
    if let Some(overlay) = &frame.overlay {
        draw_overlay(out, overlay, proj)?;
    }
    draw_controls_hint(out, proj)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, proj.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

/// A fixed star pattern per tile; shifting the tiles scrolls the field.
fn draw_background<W: Write>(out: &mut W, frame: &Frame, proj: &Projection) -> std::io::Result<()> {
    let w = proj.viewport.width.max(1.0) as u32;
    let h = proj.viewport.height.max(1.0) as u32;
    out.queue(style::SetForegroundColor(C_STAR))?;
    for offset in frame.background {
        for i in 0..STAR_COUNT {
            let x = (i * 97 + 13) % w;
            let y = (i * 53 + 7) % h;
            if let Some((c, r)) = proj.cell(x as f32, y as f32 + offset) {
                out.queue(cursor::MoveTo(c, r))?;
                out.queue(Print(if i % 5 == 0 { '+' } else { '.' }))?;
            }
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    span: (u16, u16, u16, u16),
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = span;
    let line: String = std::iter::repeat(glyph).take((c1 - c0 + 1) as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_sprite<W: Write>(out: &mut W, sprite: &Sprite, proj: &Projection) -> std::io::Result<()> {
    let Some(span) = proj.span(&sprite.rect) else {
        return Ok(());
    };
    match sprite.kind {
        SpriteKind::Player { thrusting } => draw_player(out, span, sprite.opacity, thrusting, proj),
        SpriteKind::Enemy(kind) => {
            let (glyph, color) = match kind {
                EnemyKind::Straight => ('▼', C_ENEMY_STRAIGHT),
                EnemyKind::Zigzag => ('◎', C_ENEMY_ZIGZAG),
                EnemyKind::Fast => ('♦', C_ENEMY_FAST),
            };
            fill(out, span, glyph, color)
        }
        SpriteKind::Bullet => fill(out, span, '║', C_BULLET),
        SpriteKind::Item(kind) => {
            let (glyph, color) = match kind {
                ItemKind::Health => ('♥', C_ITEM_HEALTH),
                ItemKind::FastFire => ('!', C_ITEM_FAST_FIRE),
                ItemKind::MultiShot => ('★', C_ITEM_MULTI_SHOT),
            };
            fill(out, span, glyph, color)
        }
        SpriteKind::Explosion => fill(out, span, '*', C_EXPLOSION),
    }
}

fn draw_player<W: Write>(
    out: &mut W,
    span: (u16, u16, u16, u16),
    opacity: u8,
    thrusting: bool,
    proj: &Projection,
) -> std::io::Result<()> {
    // Sprite: a tip on the top row, then "/███\" hull rows beneath.
    let (c0, r0, c1, r1) = span;
    let mid = c0 + (c1 - c0) / 2;
    let color = if opacity < 255 { C_PLAYER_FLICKER } else { C_PLAYER };
    out.queue(style::SetForegroundColor(color))?;

    out.queue(cursor::MoveTo(mid, r0))?;
    out.queue(Print('▲'))?;
    for row in (r0 + 1)..=r1 {
        let width = (c1 - c0 + 1) as usize;
        let hull: String = (0..width)
            .map(|i| match i {
                0 => '/',
                _ if i == width - 1 => '\\',
                _ => '█',
            })
            .collect();
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(hull))?;
    }

    if thrusting && r1 + 1 < proj.rows {
        out.queue(cursor::MoveTo(mid, r1 + 1))?;
        out.queue(style::SetForegroundColor(C_FLAME))?;
        out.queue(Print('▼'))?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, proj: &Projection) -> std::io::Result<()> {
    // Level and lives, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Level: {}   ", hud.level)))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {}", "♥".repeat(hud.lives as usize))))?;

    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Enemies: {}/{}",
        hud.enemies_destroyed, hud.enemies_required
    )))?;

    // Active power-up timers on the right, one per row
    out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
    for (i, (power, secs)) in hud.powers.iter().enumerate() {
        let tag = format!("{}: {}s", power.label(), secs);
        let col = proj.cols.saturating_sub(tag.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, i as u16))?;
        out.queue(Print(&tag))?;
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    proj: &Projection,
    row: u16,
    msg: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (proj.cols / 2).saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(msg))?;
    Ok(())
}

/// Terminals have no alpha; approximate opacity with brightness.
fn banner_color(opacity: u8) -> Color {
    match opacity {
        0..=84 => Color::DarkGrey,
        85..=169 => Color::DarkYellow,
        _ => Color::Yellow,
    }
}

fn draw_overlay<W: Write>(out: &mut W, overlay: &Overlay, proj: &Projection) -> std::io::Result<()> {
    let mid_row = proj.rows / 2;
    match overlay {
        Overlay::Menu { start_button } => {
            print_centered(out, proj, mid_row.saturating_sub(4), "★  SCROLL  SHOOTER  ★", Color::Cyan)?;
            if let Some(span) = proj.span(start_button) {
                fill(out, span, '░', Color::DarkGrey)?;
                let (_, r0, _, r1) = span;
                print_centered(out, proj, r0 + (r1 - r0) / 2, " Start ", Color::White)?;
            }
            print_centered(
                out,
                proj,
                mid_row + 4,
                "Click Start or press ENTER",
                C_HINT,
            )?;
        }
        Overlay::LevelBanner { level, opacity } => {
            let msg = format!("LEVEL {} START!", level);
            print_centered(out, proj, mid_row, &msg, banner_color(*opacity))?;
        }
        Overlay::GameOver {
            restart_center,
            restart_radius,
        } => {
            print_centered(out, proj, mid_row, "GAME  OVER", Color::Red)?;
            let icon = Rect::from_center(
                restart_center.0,
                restart_center.1,
                restart_radius * 2.0,
                restart_radius * 2.0,
            );
            if let Some((c0, r0, c1, r1)) = proj.span(&icon) {
                let row = r0 + (r1 - r0) / 2;
                let col = (c0 + (c1 - c0) / 2).saturating_sub(1);
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(style::SetForegroundColor(Color::White))?;
                out.queue(Print("(▶)"))?;
            }
            print_centered(
                out,
                proj,
                mid_row + 4,
                "Click ▶ or press R to play again   Q - Quit",
                C_HINT,
            )?;
        }
        Overlay::Win => {
            print_centered(out, proj, mid_row, "YOU WIN!", Color::Yellow)?;
            print_centered(out, proj, mid_row + 2, "Q - Quit", C_HINT)?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, proj: &Projection) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, proj.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
