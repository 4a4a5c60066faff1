/// Terminal renderer for the interactive front end.
///
/// Each function receives a mutable writer and a read-only `FrameSnapshot`.
/// No game logic is performed; this module only scales world-space sprites
/// to terminal cells and translates them into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use platformer::snapshot::{FrameSnapshot, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_COINS: Color = Color::DarkYellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Blue;
const C_PLAYER_BLINK: Color = Color::White;
const C_GRASS: Color = Color::Green;
const C_ICE: Color = Color::Cyan;
const C_STONE: Color = Color::DarkYellow;
const C_COIN: Color = Color::Yellow;
const C_HEART: Color = Color::Magenta;
const C_ENEMY_BASIC: Color = Color::Red;
const C_ENEMY_FLYING: Color = Color::DarkMagenta;
const C_ENEMY_FAST: Color = Color::DarkRed;
const C_ENEMY_SHOOTER: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_ENEMY: Color = Color::Red;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

const RAINBOW: [Color; 6] = [
    Color::Red,
    Color::DarkYellow,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Magenta,
];

const HEALTH_BAR_CELLS: usize = 20;

/// Maps world space onto the play area (rows 1 ..= height-2).
struct Viewport {
    camera_x: f32,
    cell_w: f32,
    cell_h: f32,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(snap: &FrameSnapshot, cols: u16, height: u16) -> Self {
        let rows = height.saturating_sub(2).max(1);
        let cols = cols.max(1);
        Viewport {
            camera_x: snap.camera_x,
            cell_w: snap.viewport_width / cols as f32,
            cell_h: snap.viewport_height / rows as f32,
            cols,
            rows,
        }
    }

    /// Inclusive cell span covered by a world rectangle, or `None` if it is
    /// entirely off screen.
    fn span(&self, x: f32, y: f32, w: f32, h: f32) -> Option<(u16, u16, u16, u16)> {
        let c0 = ((x - self.camera_x) / self.cell_w).floor();
        let c1 = (((x + w - self.camera_x) / self.cell_w).ceil() - 1.0).max(c0);
        let r0 = (y / self.cell_h).floor();
        let r1 = (((y + h) / self.cell_h).ceil() - 1.0).max(r0);

        let max_c = self.cols as f32 - 1.0;
        let max_r = self.rows as f32 - 1.0;
        if c1 < 0.0 || c0 > max_c || r1 < 0.0 || r0 > max_r {
            return None;
        }
        Some((
            c0.max(0.0) as u16,
            c1.min(max_c) as u16,
            r0.max(0.0) as u16 + 1,
            r1.min(max_r) as u16 + 1,
        ))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `cheat_prompt` is the text typed so far while
/// the cheat input is open.
pub fn render<W: Write>(
    out: &mut W,
    snap: &FrameSnapshot,
    (width, height): (u16, u16),
    cheat_prompt: Option<&str>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport::new(snap, width, height);
    for sprite in &snap.sprites {
        draw_sprite(out, &view, sprite)?;
    }
    draw_player(out, &view, snap)?;

    draw_hud(out, snap, width)?;
    draw_controls_hint(out, height)?;

    match snap.status {
        "game_over" => draw_banner(out, snap, (width, height), "GAME  OVER", Color::Red)?,
        "won" => draw_banner(out, snap, (width, height), " YOU  WIN ", Color::Green)?,
        _ => {}
    }
    if let Some(text) = cheat_prompt {
        draw_cheat_prompt(out, text, (width, height))?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    (c0, c1, r0, r1): (u16, u16, u16, u16),
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let line: String = std::iter::repeat(glyph).take((c1 - c0 + 1) as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let (glyph, color) = match sprite.kind {
        SpriteKind::Grass => ('▀', C_GRASS),
        SpriteKind::Ice => ('▀', C_ICE),
        SpriteKind::Stone => ('▀', C_STONE),
        SpriteKind::Coin => ('o', C_COIN),
        SpriteKind::Heart => ('♥', C_HEART),
        SpriteKind::Basic => ('B', C_ENEMY_BASIC),
        SpriteKind::Flying => ('W', C_ENEMY_FLYING),
        SpriteKind::Fast => ('F', C_ENEMY_FAST),
        SpriteKind::Shooter => ('S', C_ENEMY_SHOOTER),
        SpriteKind::PlayerBullet => ('-', C_BULLET_PLAYER),
        SpriteKind::EnemyBullet => ('•', C_BULLET_ENEMY),
        SpriteKind::Explosion => return draw_explosion(out, view, sprite),
    };
    match view.span(sprite.x, sprite.y, sprite.w, sprite.h) {
        // Small pickups and bullets collapse to a single cell.
        Some((c0, _, r0, _)) if sprite.w < view.cell_w * 2.0 => {
            fill(out, (c0, c0, r0, r0), glyph, color)
        }
        Some(span) => fill(out, span, glyph, color),
        None => Ok(()),
    }
}

/// A burst that grows over its lifetime: `*` then `✶` then `·`.
fn draw_explosion<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let radius = 5.0 + 1.25 * sprite.frame as f32;
    let glyph = match sprite.frame {
        0..=6 => '*',
        7..=13 => '✶',
        _ => '·',
    };
    match view.span(sprite.x - radius, sprite.y - radius, radius * 2.0, radius * 2.0) {
        Some(span) => fill(out, span, glyph, C_EXPLOSION),
        None => Ok(()),
    }
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, snap: &FrameSnapshot) -> std::io::Result<()> {
    let p = &snap.player;
    let color = if p.permanent_invincibility {
        RAINBOW[(snap.frame / 6) as usize % RAINBOW.len()]
    } else if p.invincible && snap.frame % 10 < 5 {
        C_PLAYER_BLINK
    } else {
        C_PLAYER
    };

    let Some((c0, c1, r0, r1)) = view.span(p.x, p.y, p.w, p.h) else {
        return Ok(());
    };
    fill(out, (c0, c1, r0, r0), if p.facing_right { '►' } else { '◄' }, color)?;
    if r1 > r0 {
        // Legs: planted, striding, or tucked mid-air
        let legs = match (p.on_ground, p.walking) {
            (true, true) if snap.frame % 16 < 8 => '/',
            (true, true) => '\\',
            (true, false) => '║',
            (false, _) => '^',
        };
        fill(out, (c0, c1, r1, r1), legs, color)?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &FrameSnapshot, width: u16) -> std::io::Result<()> {
    let hud = &snap.hud;

    // Left: score, best, coins
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if hud.high_score > 0 {
        out.queue(Print(format!("Score:{:>6}  Hi:{:>6}  ", hud.score, hud.high_score)))?;
    } else {
        out.queue(Print(format!("Score:{:>6}  ", hud.score)))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_COINS))?;
    out.queue(Print(format!("Coins:{}/{}", hud.coins_collected, hud.coins_total)))?;

    // Right-aligned: health bar, lives
    let filled = (hud.health as usize * HEALTH_BAR_CELLS) / hud.max_health.max(1) as usize;
    let bar = format!(
        "[{}{}] {:>3}% ",
        "█".repeat(filled),
        "░".repeat(HEALTH_BAR_CELLS - filled.min(HEALTH_BAR_CELLS)),
        hud.health
    );
    let lives_str = format!("Lives:{}", "♥".repeat(hud.lives as usize));
    let right_len = (bar.chars().count() + lives_str.chars().count()) as u16;
    out.queue(cursor::MoveTo(width.saturating_sub(right_len + 1), 0))?;

    let ratio = hud.health as f32 / hud.max_health.max(1) as f32;
    let bar_color = if ratio > 0.6 {
        Color::Green
    } else if ratio > 0.3 {
        Color::Yellow
    } else {
        Color::Red
    };
    out.queue(style::SetForegroundColor(bar_color))?;
    out.queue(Print(&bar))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE / W : Jump   F : Shoot   = : Cheat   Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    text: &str,
    color: Color,
    width: u16,
    row: u16,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    snap: &FrameSnapshot,
    (width, height): (u16, u16),
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let hud = &snap.hud;
    let new_best = hud.score >= hud.high_score && hud.score > 0;

    let title_line = format!("║    {}      ║", title);
    let score_line = format!("Final Score: {:>6}", hud.score);
    let coins_line = format!("Coins: {}/{}", hud.coins_collected, hud.coins_total);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", hud.high_score)
    } else {
        format!("Best Score:  {:>6}", hud.high_score)
    };

    let start_row = (height / 2).saturating_sub(3);
    draw_centered(out, "╔════════════════════╗", color, width, start_row)?;
    draw_centered(out, &title_line, color, width, start_row + 1)?;
    draw_centered(out, "╚════════════════════╝", color, width, start_row + 2)?;
    draw_centered(out, &score_line, Color::Yellow, width, start_row + 3)?;
    draw_centered(out, &coins_line, C_HUD_COINS, width, start_row + 4)?;
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };
    draw_centered(out, &best_line, best_color, width, start_row + 5)?;
    draw_centered(out, "R - Play Again  Q - Quit", Color::White, width, start_row + 6)?;
    Ok(())
}

fn draw_cheat_prompt<W: Write>(
    out: &mut W,
    text: &str,
    (width, height): (u16, u16),
) -> std::io::Result<()> {
    let row = (height / 2).saturating_sub(1);
    draw_centered(out, "Enter cheat code:", Color::White, width, row)?;
    draw_centered(out, &format!("{}|", text), Color::White, width, row + 1)?;
    draw_centered(
        out,
        "Press Enter to submit, Escape to cancel",
        C_HINT,
        width,
        row + 2,
    )?;
    Ok(())
}
