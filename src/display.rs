//! Rendering layer.  All terminal drawing lives here.
//!
//! The simulation runs on a virtual canvas where one terminal cell covers
//! `CELL_W × CELL_H` units.  Every function receives an immutable view of
//! the game state; nothing here feeds back into the simulation.

use std::f32::consts::TAU;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use backdrop_shooter::collision::Point;
use backdrop_shooter::effects::{EXPLOSION_FRAMES, FLASH_FRAMES};
use backdrop_shooter::entities::{
    Effect, Enemy, EnemyKind, GamePhase, GameState, Hazard, PowerUp, PowerUpKind,
};
use backdrop_shooter::input::ControlLayout;

/// Canvas units per terminal column.
pub const CELL_W: f32 = 8.0;
/// Canvas units per terminal row.
pub const CELL_H: f32 = 16.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_SHIELD: Color = Color::Cyan;
const C_SAUCER: Color = Color::Magenta;
const C_FIGHTER: Color = Color::DarkMagenta;
const C_INSECTOID: Color = Color::Rgb { r: 255, g: 0, b: 200 };
const C_BULLET_PLAYER: Color = Color::Magenta;
const C_BULLET_ENEMY: Color = Color::DarkMagenta;
const C_HAZARD: Color = Color::Green;
const C_EXPLOSION_HOT: Color = Color::Yellow;
const C_EXPLOSION_COOL: Color = Color::DarkYellow;
const C_CONTROLS: Color = Color::Grey;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Canvas size for a terminal of `cols × rows` cells.
pub fn canvas_size(cols: u16, rows: u16) -> (f32, f32) {
    (cols as f32 * CELL_W, rows as f32 * CELL_H)
}

/// Canvas point at the centre of a terminal cell (for pointer events).
pub fn cell_center(col: u16, row: u16) -> Point {
    Point::new((col as f32 + 0.5) * CELL_W, (row as f32 + 0.5) * CELL_H)
}

struct Grid {
    cols: i32,
    rows: i32,
}

impl Grid {
    fn of(state: &GameState) -> Self {
        Grid {
            cols: (state.viewport.width / CELL_W) as i32,
            rows: (state.viewport.height / CELL_H) as i32,
        }
    }

    /// Cell under a canvas point, if it is on screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / CELL_W).floor() as i32;
        let row = (y / CELL_H).floor() as i32;
        if col < 0 || row < 0 || col >= self.cols || row >= self.rows {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Print `glyph` centred horizontally on a canvas point, clipped to the
    /// screen edges.
    fn put<W: Write>(
        &self,
        out: &mut W,
        x: f32,
        y: f32,
        glyph: &str,
        color: Color,
    ) -> std::io::Result<()> {
        let len = glyph.chars().count() as f32;
        let left = x - (len - 1.0) / 2.0 * CELL_W;
        for (i, ch) in glyph.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            if let Some((col, row)) = self.cell(left + i as f32 * CELL_W, y) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(style::SetForegroundColor(color))?;
                out.queue(Print(ch))?;
            }
        }
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    controls: &ControlLayout,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let grid = Grid::of(state);

    for star in &state.stars {
        let glyph = if star.size > 2.0 { "·" } else { "." };
        grid.put(out, star.x, star.y, glyph, C_STAR)?;
    }

    if state.phase == GamePhase::Playing {
        for hazard in &state.hazards {
            draw_hazard(out, &grid, hazard, state.frame)?;
        }
        for power_up in &state.power_ups {
            draw_power_up(out, &grid, power_up)?;
        }
        for enemy in &state.enemies {
            draw_enemy(out, &grid, enemy)?;
        }
        for b in &state.player_bullets {
            grid.put(out, b.x, b.y, "|", C_BULLET_PLAYER)?;
        }
        for b in &state.enemy_bullets {
            grid.put(out, b.x, b.y, "!", C_BULLET_ENEMY)?;
        }
        draw_player(out, &grid, state)?;
    }

    for effect in &state.effects {
        draw_effect(out, &grid, effect)?;
    }

    if state.phase != GamePhase::GameOver {
        draw_hud(out, state)?;
    }
    if controls.visible && state.phase == GamePhase::Playing {
        draw_controls(out, &grid, controls)?;
    }
    if state.phase == GamePhase::GameOver {
        draw_game_over(out, &grid, state)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {}", state.player.lives)))?;

    // One line per running power-up, with whole seconds left at 60 ticks/s.
    for (i, (kind, ticks)) in state.active.iter().enumerate() {
        out.queue(cursor::MoveTo(1, 2 + i as u16))?;
        out.queue(style::SetForegroundColor(power_up_color(kind)))?;
        out.queue(Print(format!("{} {:>2}s", power_up_name(kind), ticks / 60 + 1)))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, grid: &Grid, state: &GameState) -> std::io::Result<()> {
    let p = &state.player;
    // Blink while the hit effect runs.
    if p.hit_effect_timer > 0 && (p.hit_effect_timer / 5) % 2 == 0 {
        return Ok(());
    }
    let color = if p.hit_effect_timer > 0 { C_PLAYER_HIT } else { C_PLAYER };

    //   ▲      ← nose
    //  /█\     ← fuselage + wings
    // <═╩═>    ← wing tips and engine
    let rows = ["▲", "/█\\", "<═╩═>"];
    for (i, glyph) in rows.iter().enumerate() {
        let y = p.y + p.height * (i as f32 + 0.5) / rows.len() as f32;
        grid.put(out, p.x, y, glyph, color)?;
    }

    if state.active.is_active(PowerUpKind::Shield) {
        let cy = p.y + p.height / 2.0;
        let r = p.width.max(p.height) * 0.8;
        grid.put(out, p.x - r, cy, "(", C_SHIELD)?;
        grid.put(out, p.x + r, cy, ")", C_SHIELD)?;
        grid.put(out, p.x, p.y - r * 0.3, "‿", C_SHIELD)?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, grid: &Grid, enemy: &Enemy) -> std::io::Result<()> {
    let (top, bottom, color) = match enemy.kind {
        // Saucer with dome
        EnemyKind::Saucer => ("▄█▄", "◄═●═►", C_SAUCER),
        // Angular fighter
        EnemyKind::Fighter => ("/▼\\", "<═◆═>", C_FIGHTER),
        // Insectoid ship
        EnemyKind::Insectoid => ("\\o o/", "╰█╯", C_INSECTOID),
    };
    grid.put(out, enemy.x, enemy.y - enemy.size / 4.0, top, color)?;
    grid.put(out, enemy.x, enemy.y + enemy.size / 4.0, bottom, color)?;
    Ok(())
}

fn draw_hazard<W: Write>(
    out: &mut W,
    grid: &Grid,
    hazard: &Hazard,
    frame: u64,
) -> std::io::Result<()> {
    let pulse = ((frame % 1_000_000) as f32 * 0.1 + hazard.pulse_phase).sin();
    let glyph = if pulse > 0.0 { "(ʘ‿ʘ)" } else { "(ʘ_ʘ)" };
    grid.put(out, hazard.x, hazard.y, glyph, C_HAZARD)
}

fn power_up_name(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Shield => "SHIELD",
        PowerUpKind::TripleShot => "TRIPLE",
        PowerUpKind::SpeedBoost => "SPEED ",
    }
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Shield => Color::Cyan,
        PowerUpKind::TripleShot => Color::Yellow,
        PowerUpKind::SpeedBoost => Color::Green,
    }
}

/// Draw a falling power-up with its orbiting sparkles.
///
/// Symbols:
///   [S]  (cyan)    Shield
///   [T]  (yellow)  TripleShot
///   [»]  (green)   SpeedBoost
fn draw_power_up<W: Write>(out: &mut W, grid: &Grid, power_up: &PowerUp) -> std::io::Result<()> {
    let color = power_up_color(power_up.kind);
    let glyph = match power_up.kind {
        PowerUpKind::Shield => "[S]",
        PowerUpKind::TripleShot => "[T]",
        PowerUpKind::SpeedBoost => "[»]",
    };
    grid.put(out, power_up.x, power_up.y, glyph, color)?;
    for s in &power_up.particles {
        let x = power_up.x + s.angle.cos() * s.distance;
        let y = power_up.y + s.angle.sin() * s.distance;
        grid.put(out, x, y, "∙", color)?;
    }
    Ok(())
}

// ── Effects ───────────────────────────────────────────────────────────────────

fn draw_effect<W: Write>(out: &mut W, grid: &Grid, effect: &Effect) -> std::io::Result<()> {
    match effect {
        Effect::Explosion(e) => {
            let t = e.frame / EXPLOSION_FRAMES;
            let color = if t < 0.5 { C_EXPLOSION_HOT } else { C_EXPLOSION_COOL };
            let glyph = if t < 0.3 {
                "✸"
            } else if t < 0.7 {
                "*✺*"
            } else {
                "· ·"
            };
            grid.put(out, e.x, e.y, glyph, color)
        }
        Effect::HazardHit(f) | Effect::EnemyHit(f) => {
            let glyph = if f.frame < FLASH_FRAMES / 2 { "O" } else { "o" };
            let color = match effect {
                Effect::HazardHit(_) => C_HAZARD,
                _ => C_EXPLOSION_HOT,
            };
            grid.put(out, f.x, f.y, glyph, color)
        }
        Effect::HazardParticle(p) => grid.put(out, p.x, p.y, "∙", C_HAZARD),
        Effect::EnemyParticle(p) => grid.put(out, p.x, p.y, "∙", C_EXPLOSION_COOL),
        Effect::PowerRing(r) => {
            let color = power_up_color(r.kind);
            for i in 0..12 {
                let a = TAU * i as f32 / 12.0;
                grid.put(out, r.x + a.cos() * r.radius, r.y + a.sin() * r.radius, "°", color)?;
            }
            Ok(())
        }
    }
}

// ── On-screen controls ────────────────────────────────────────────────────────

fn draw_controls<W: Write>(
    out: &mut W,
    grid: &Grid,
    controls: &ControlLayout,
) -> std::io::Result<()> {
    for (button, rect) in &controls.buttons {
        let cx = (rect.left + rect.right) / 2.0;
        let cy = (rect.top + rect.bottom) / 2.0;
        grid.put(out, cx, rect.top + CELL_H / 2.0, "┌────┐", C_CONTROLS)?;
        grid.put(out, cx, cy, button.label(), C_CONTROLS)?;
        grid.put(out, cx, rect.bottom - CELL_H / 2.0, "└────┘", C_CONTROLS)?;
    }
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, grid: &Grid, state: &GameState) -> std::io::Result<()> {
    let cx = state.viewport.width / 2.0;
    let cy = state.viewport.height / 2.0;
    // Slow pulse between white and grey.
    let bright = (state.frame / 15) % 2 == 0;
    let title_color = if bright { Color::White } else { Color::Grey };

    grid.put(out, cx, cy - CELL_H * 2.0, "╔═══════════════╗", title_color)?;
    grid.put(out, cx, cy - CELL_H, "║   GAME OVER   ║", title_color)?;
    grid.put(out, cx, cy, "╚═══════════════╝", title_color)?;
    grid.put(out, cx, cy + CELL_H, &format!("Final Score: {}", state.score), Color::Yellow)?;
    grid.put(out, cx, cy + CELL_H * 2.0, "R - Play Again  Q - Quit", Color::White)?;
    Ok(())
}
