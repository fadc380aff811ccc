//! Terminal presentation: all terminal I/O lives here.
//!
//! The raster is shown with upper-half-block characters (foreground = upper
//! pixel, background = lower pixel).  Row 0 holds the HUD; the play field
//! starts at row 1.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use zombie_survival::entities::HudValues;
use zombie_survival::raster::Raster;
use zombie_survival::render::Rgba;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_ENEMIES: Color = Color::Green;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Rows taken by the HUD above the play field.
pub const HUD_ROWS: u16 = 1;

// ── Public entry point ────────────────────────────────────────────────────────

/// Present one complete frame.  `final_score` is set once the game is over
/// and shows the game-over panel.
pub fn render<W: Write>(
    out: &mut W,
    raster: &Raster,
    hud: &HudValues,
    final_score: Option<u32>,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, hud, width)?;
    draw_field(out, raster)?;

    if let Some(score) = final_score {
        draw_game_over(out, score, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(out: &mut W, raster: &Raster) -> std::io::Result<()> {
    for (row, cells) in raster.to_cells().iter().enumerate() {
        out.queue(cursor::MoveTo(0, HUD_ROWS + row as u16))?;
        // Only emit colour changes; a full row of identical cells is one run.
        let mut current: Option<(Rgba, Rgba)> = None;
        for cell in cells {
            if current != Some((cell.top, cell.bottom)) {
                out.queue(style::SetForegroundColor(to_color(cell.top)))?;
                out.queue(style::SetBackgroundColor(to_color(cell.bottom)))?;
                current = Some((cell.top, cell.bottom));
            }
            out.queue(Print("▀"))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &HudValues, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("Health:{:>4}", hud.health)))?;

    out.queue(style::SetForegroundColor(C_HUD_ENEMIES))?;
    out.queue(Print(format!("  Zombies:{:>2}", hud.enemy_count)))?;

    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("  Score:{:>6}", hud.score)))?;

    // Controls hint — right
    let hint = "WASD/←↑→↓ or mouse : Move   SPACE : Attack   Q : Quit";
    let hx = width.saturating_sub(hint.chars().count() as u16 + 1);
    if hx > 40 {
        out.queue(cursor::MoveTo(hx, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(hint))?;
    }
    Ok(())
}

// ── Game-over panel ───────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    score: u32,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", score);
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("R - New Game  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetBackgroundColor(Color::Black))?;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
