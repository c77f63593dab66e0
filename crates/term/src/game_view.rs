//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested against `FrameBuffer::to_text`.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{Position, BOARD_HEIGHT, BOARD_WIDTH};

const BLOCK: char = '█';
const GHOST: char = '░';
const EMPTY: char = '·';

const PLAY_BG: Rgb = Rgb::new(24, 24, 32);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen placement of the bordered play field.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Columns and rows needed to show the field plus the side panel.
    pub fn min_viewport(&self) -> Viewport {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        Viewport::new(frame_w + 2 + 12, BOARD_HEIGHT as u16 + 2)
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height);

        let frame = self.frame_for(viewport);
        let field = GlyphStyle::plain(Rgb::new(70, 70, 84), PLAY_BG);
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            field,
        );
        draw_border(fb, frame, GlyphStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG));

        for (row, cells) in snap.board.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(color) => (BLOCK, GlyphStyle::plain((*color).into(), PLAY_BG)),
                    None => (EMPTY, GlyphStyle { dim: true, ..field }),
                };
                self.fill_cell(fb, frame, Position::new(row as i8, col as i8), ch, style);
            }
        }

        if let (Some(active), Some(ghost)) = (snap.active, snap.ghost) {
            let style = GlyphStyle {
                fg: active.piece.color.into(),
                bg: PLAY_BG,
                bold: false,
                dim: true,
            };
            self.fill_piece(fb, frame, ghost, &active.piece, GHOST, style);
        }

        if let Some(active) = snap.active {
            let style = GlyphStyle {
                bold: true,
                ..GlyphStyle::plain(active.piece.color.into(), PLAY_BG)
            };
            self.fill_piece(fb, frame, active.position, &active.piece, BLOCK, style);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            draw_overlay(fb, frame, &["GAME OVER", "R: restart"]);
        } else if snap.paused {
            draw_overlay(fb, frame, &["PAUSED", "P: resume"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame_for(&self, viewport: Viewport) -> Frame {
        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 + 2;
        Frame {
            x: viewport.width.saturating_sub(w + 14) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Cells outside the board are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell: Position,
        ch: char,
        style: GlyphStyle,
    ) {
        let (Ok(row), Ok(col)) = (u16::try_from(cell.row), u16::try_from(cell.col)) else {
            return;
        };
        if usize::from(row) >= BOARD_HEIGHT || usize::from(col) >= BOARD_WIDTH {
            return;
        }
        let x = frame.x + 1 + col * self.cell_w;
        let y = frame.y + 1 + row;
        fb.fill_rect(x, y, self.cell_w, 1, ch, style);
    }

    fn fill_piece(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        at: Position,
        piece: &Piece,
        ch: char,
        style: GlyphStyle,
    ) {
        for cell in piece.shape.cells().filter_map(|(r, c)| at.translate(r, c)) {
            self.fill_cell(fb, frame, cell, ch, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        if x.saturating_add(8) > viewport.width {
            return;
        }

        let label = GlyphStyle {
            bold: true,
            ..GlyphStyle::plain(Rgb::new(220, 220, 220), SCREEN_BG)
        };
        let value = GlyphStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        fb.put_str(x, y, "NEXT", label);
        y += 1;
        if let Some(next) = snap.next {
            let style = GlyphStyle::plain(next.color.into(), SCREEN_BG);
            for (r, c) in next.shape.cells() {
                let (cx, cy) = (x + c as u16 * self.cell_w, y + r as u16);
                fb.fill_rect(cx, cy, self.cell_w, 1, BLOCK, style);
            }
        }
        y += 5;

        for (name, n) in [
            ("LINES", snap.status.lines),
            ("SCORE", snap.status.score),
            ("LEVEL", snap.status.level),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: GlyphStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered lines over the middle of the field.
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let style = GlyphStyle {
        bold: true,
        ..GlyphStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG)
    };
    let top = frame.y + frame.h / 2 - lines.len() as u16 / 2;
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = frame.x + frame.w.saturating_sub(text_w) / 2;
        fb.put_str(x, top + i as u16, text, style);
    }
}
