//! TerminalRenderer: flushes a framebuffer to the real terminal.
//!
//! The first frame (and any frame after a size change) is a full redraw.
//! Every later frame only emits the runs of glyphs that differ from the
//! previous one.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};

/// `(x, y, len)` of a horizontal run of changed glyphs.
type Run = (u16, u16, u16);

pub struct TerminalRenderer {
    stdout: io::Stdout,
    prev: FrameBuffer,
    full_redraw: bool,
    buf: Vec<u8>,
    runs: Vec<Run>,
    key_release: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            prev: FrameBuffer::new(0, 0),
            full_redraw: true,
            buf: Vec::with_capacity(16 * 1024),
            runs: Vec::new(),
            key_release: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    ///
    /// Also asks for key release events where the terminal supports the
    /// keyboard enhancement protocol.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.key_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        if self.key_release {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.full_redraw = true;
        Ok(())
    }

    /// Whether `enter` turned on key release events.
    pub fn reports_key_release(&self) -> bool {
        self.key_release
    }

    /// Undo everything `enter` did. Safe to call on error paths.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if std::mem::take(&mut self.key_release) {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force a full redraw on the next frame (terminal resize).
    pub fn invalidate(&mut self) {
        self.full_redraw = true;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale content; callers are expected to repaint
    /// it completely before the next call.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        if self.full_redraw
            || self.prev.width() != fb.width()
            || self.prev.height() != fb.height()
        {
            encode_full_into(fb, &mut self.buf)?;
            self.full_redraw = false;
        } else {
            changed_runs_into(&self.prev, fb, &mut self.runs);
            encode_runs_into(fb, &self.runs, &mut self.buf)?;
        }
        self.flush_buf()?;
        std::mem::swap(&mut self.prev, fb);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the last emitted style so runs of equal style cost one escape.
struct StyleCursor {
    current: Option<GlyphStyle>,
}

impl StyleCursor {
    fn new() -> Self {
        Self { current: None }
    }

    fn apply(&mut self, out: &mut Vec<u8>, style: GlyphStyle) -> Result<()> {
        if self.current == Some(style) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(term_color(style.fg)))?;
        out.queue(SetBackgroundColor(term_color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.current = Some(style);
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut styles = StyleCursor::new();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let glyph = fb.get(x, y).unwrap_or(Glyph::BLANK);
            styles.apply(out, glyph.style)?;
            out.queue(Print(glyph.ch))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the glyph runs that differ between `prev` and `next`.
///
/// Emits nothing at all when the frames are identical.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut runs = Vec::new();
    changed_runs_into(prev, next, &mut runs);
    encode_runs_into(next, &runs, out)
}

fn encode_runs_into(next: &FrameBuffer, runs: &[Run], out: &mut Vec<u8>) -> Result<()> {
    if runs.is_empty() {
        return Ok(());
    }

    let mut styles = StyleCursor::new();
    for &(x, y, len) in runs {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or(Glyph::BLANK);
            styles.apply(out, glyph.style)?;
            out.queue(Print(glyph.ch))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn term_color(rgb: Rgb) -> TermColor {
    TermColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Replace the contents of `runs` with every run that differs.
fn changed_runs_into(prev: &FrameBuffer, next: &FrameBuffer, runs: &mut Vec<Run>) {
    runs.clear();
    if prev.width() != next.width() || prev.height() != next.height() {
        runs.extend((0..next.height()).map(|y| (0, y, next.width())));
        return;
    }

    for y in 0..next.height() {
        let mut start: Option<u16> = None;
        for x in 0..next.width() {
            let differs = prev.get(x, y) != next.get(x, y);
            match (differs, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, y, x - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, y, next.width() - s));
        }
    }
}
