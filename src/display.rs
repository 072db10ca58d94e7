//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; arena coordinates are scaled
//! into whatever terminal rectangle is available.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use laser_defense::compute::{GameState, GameStatus};
use laser_defense::director::SpawnDirector;
use laser_defense::entities::{Asteroid, AsteroidSize, EnemyKind, Hostile, Target};
use laser_defense::events::EndReason;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_TIME: Color = Color::Cyan;
const C_HUD_COINS: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_ENEMY_BASIC: Color = Color::Green;
const C_ENEMY_FAST: Color = Color::Yellow;
const C_ENEMY_TANK: Color = Color::DarkRed;
const C_BOSS: Color = Color::Magenta;
const C_DYING: Color = Color::DarkGrey;
const C_ASTEROID: Color = Color::Grey;
const C_BULLET: Color = Color::Magenta;
const C_BEAM: Color = Color::Cyan;
const C_PICKUP: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Terminal rectangle the arena is drawn into.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    /// Map an arena point to a cell inside the border, or `None` if it lies
    /// outside the arena.
    fn cell(&self, state: &GameState, p: Vec2) -> Option<(u16, u16)> {
        let arena = state.settings.arena;
        if !arena.contains(p) {
            return None;
        }
        // Inner area: columns 1..width-1, rows 2..height-2.
        let cols = self.width.saturating_sub(2).max(1) as f32;
        let rows = self.height.saturating_sub(4).max(1) as f32;
        let x = ((p.x / arena.width) * (cols - 1.0)).round() as u16 + 1;
        let y = ((p.y / arena.height) * (rows - 1.0)).round() as u16 + 2;
        Some((x, y))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    draw_beams(out, state, view)?;
    for asteroid in state.asteroids.live() {
        draw_asteroid(out, state, view, asteroid)?;
    }
    for power_up in state.power_ups.live().iter().filter(|p| p.active && p.visible) {
        if let Some((x, y)) = view.cell(state, power_up.position) {
            out.queue(cursor::MoveTo(x, y))?;
            out.queue(style::SetForegroundColor(C_PICKUP))?;
            out.queue(Print("⌛"))?;
        }
    }
    for hostile in state.enemies.live() {
        draw_hostile(out, state, view, hostile)?;
    }
    for bullet in state.projectiles.iter().filter(|b| b.active) {
        if let Some((x, y)) = view.cell(state, bullet.position) {
            out.queue(cursor::MoveTo(x, y))?;
            out.queue(style::SetForegroundColor(C_BULLET))?;
            out.queue(Print("•"))?;
        }
    }

    draw_player(out, state, view)?;
    draw_controls_hint(out, view)?;

    if state.paused {
        draw_banner(out, view, &[("║      PAUSED        ║", Color::Cyan)], &[])?;
    }
    if state.is_over() {
        draw_level_over(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(format!("Time:{:>5.1}s", state.remaining_time)))?;
    out.queue(style::SetForegroundColor(C_HUD_COINS))?;
    out.queue(Print(format!("  Coins:{:>5}", state.coins)))?;

    let level_str = format!("[ LEVEL {} ]", state.level_id);
    let lx = (view.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&level_str))?;

    let player = &state.player;
    let full = player.health.ceil().max(0.0) as usize;
    let empty = (player.max_health.ceil() as usize).saturating_sub(full);
    let health_str = format!("HP:{}{}", "♥".repeat(full), "♡".repeat(empty));
    let rx = view
        .width
        .saturating_sub(health_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&health_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let Some((x, y)) = view.cell(state, state.player.position) else {
        return Ok(());
    };
    let color = if state.player.is_flashing() {
        C_PLAYER_HIT
    } else {
        C_PLAYER
    };
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print("▲"))?;
    Ok(())
}

fn draw_hostile<W: Write>(
    out: &mut W,
    state: &GameState,
    view: Viewport,
    hostile: &Hostile,
) -> std::io::Result<()> {
    let Some((x, y)) = view.cell(state, hostile.position()) else {
        return Ok(());
    };
    let (glyph, color) = match hostile {
        Hostile::Boss(_) => ("♛", C_BOSS),
        Hostile::Grunt(e) => match e.kind {
            EnemyKind::Basic => ("▼", C_ENEMY_BASIC),
            EnemyKind::Fast => ("▾", C_ENEMY_FAST),
            EnemyKind::Tank => ("◆", C_ENEMY_TANK),
            EnemyKind::Boss => ("♛", C_BOSS),
        },
    };
    let vitals = hostile.vitals();
    let color = if vitals.is_dying() { C_DYING } else { color };
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;

    // Health bar above anything that has been hit
    if vitals.is_alive() && vitals.health_bar_visible() && y > 2 {
        let width = if hostile.is_boss() { 6 } else { 3 };
        let filled = (vitals.fraction() * width as f32).ceil() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(width - filled.min(width)));
        out.queue(cursor::MoveTo(x.saturating_sub(width as u16 / 2).max(1), y - 1))?;
        out.queue(Print(bar))?;
    }
    Ok(())
}

fn draw_asteroid<W: Write>(
    out: &mut W,
    state: &GameState,
    view: Viewport,
    asteroid: &Asteroid,
) -> std::io::Result<()> {
    let Some((x, y)) = view.cell(state, asteroid.position) else {
        return Ok(());
    };
    let glyph = match asteroid.tier {
        AsteroidSize::Small => "·",
        AsteroidSize::Medium => "o",
        AsteroidSize::Large => "O",
    };
    let color = if asteroid.vitals.is_dying() {
        C_DYING
    } else {
        C_ASTEROID
    };
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Dotted laser lines from the player to each locked target.
fn draw_beams<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BEAM))?;
    for beam in state.weapon.beams() {
        let length = beam.from.distance(beam.to);
        let steps = (length / 12.0).ceil().max(1.0) as usize;
        for i in 1..steps {
            let p = beam.from.lerp(beam.to, i as f32 / steps as f32);
            if let Some((x, y)) = view.cell(state, p) {
                out.queue(cursor::MoveTo(x, y))?;
                out.queue(Print("∙"))?;
            }
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_level_over<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let (title, color) = match state.status {
        GameStatus::Victory => ("║      VICTORY!      ║", Color::Green),
        _ => ("║     GAME  OVER     ║", Color::Red),
    };
    let reason = match state.result.as_ref().map(|r| r.reason) {
        Some(EndReason::BossDefeated) => "Boss defeated",
        Some(EndReason::TimeUp) => "Time's up",
        Some(EndReason::HealthDepleted) => "Ship destroyed",
        None => "",
    };
    let mut details = vec![(reason.to_string(), Color::White)];
    if let Some(result) = &state.result {
        details.push((format!("Kills: {:>4}", result.enemies_killed), Color::DarkGrey));
        details.push((format!("Coins: {:>4}", result.final_reward), Color::Yellow));
    }
    details.push(("R - Play Again  Q - Quit".to_string(), Color::White));

    draw_banner(out, view, &[(title, color)], &details)
}

fn draw_banner<W: Write>(
    out: &mut W,
    view: Viewport,
    title: &[(&str, Color)],
    details: &[(String, Color)],
) -> std::io::Result<()> {
    let edge = title.first().map_or(Color::White, |(_, c)| *c);
    let mut lines: Vec<(String, Color)> = vec![("╔════════════════════╗".to_string(), edge)];
    lines.extend(title.iter().map(|(s, c)| (s.to_string(), *c)));
    lines.push(("╚════════════════════╝".to_string(), edge));
    lines.extend(details.iter().cloned());

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}
