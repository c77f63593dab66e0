//! The glyph grid `GameView` paints and `TerminalRenderer` diffs.

use crate::types::Color;

/// 24-bit color as sent to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let (r, g, b) = color.rgb();
        Self::new(r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl GlyphStyle {
    pub const fn plain(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }
}

/// One character cell of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: GlyphStyle,
}

impl Glyph {
    /// What every cell holds after [`FrameBuffer::reset`].
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        style: GlyphStyle::plain(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)),
    };
}

/// Row-major grid of glyphs. Writes that fall outside are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Blank every glyph at the given size. The allocation is reused.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(usize::from(width) * usize::from(height), Glyph::BLANK);
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.index(x, y).map(|i| self.glyphs[i])
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: GlyphStyle) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = Glyph { ch, style };
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: GlyphStyle) {
        for (dx, ch) in (0..).zip(text.chars()) {
            self.put_char(x.saturating_add(dx), y, ch, style);
        }
    }

    /// Decimal digits of `value`, without going through a `String`.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: GlyphStyle) {
        let width = value.checked_ilog10().unwrap_or(0) + 1;
        let mut rest = value;
        for i in (0..width).rev() {
            let digit = char::from(b'0' + (rest % 10) as u8);
            self.put_char(x.saturating_add(i as u16), y, digit, style);
            rest /= 10;
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: GlyphStyle) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.put_char(col, row, ch, style);
            }
        }
    }

    /// The characters only, one line per row.
    pub fn to_text(&self) -> String {
        self.glyphs
            .chunks(usize::from(self.width).max(1))
            .take(usize::from(self.height))
            .flat_map(|row| row.iter().map(|g| g.ch).chain(std::iter::once('\n')))
            .collect()
    }
}
