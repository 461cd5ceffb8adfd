//! The terminal grid's atomic unit of display: a single cell.

use smallvec::SmallVec;
use std::fmt;

use crate::color::{CellAttrs, Color};

/// A grapheme cluster stored inline for the common (≤ 8 byte) case.
///
/// Mirrors `vtparser::bytevec::NonEmptyBytes`'s small-buffer-then-heap
/// approach: almost every cell holds a single ASCII byte or a short UTF-8
/// sequence, so `SmallVec` keeps the print hot path allocation-free.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Glyph(SmallVec<[u8; 8]>);

impl Glyph {
    pub const SPACE: Glyph = Glyph::from_ascii(b' ');

    #[must_use]
    pub const fn from_ascii(byte: u8) -> Self {
        Self(SmallVec::from_const([byte]))
    }

    #[must_use]
    pub fn new(grapheme: &str) -> Self {
        Self(SmallVec::from_slice(grapheme.as_bytes()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Safety-by-construction: every `Glyph` is built from a `&str` or
        // an ASCII byte, so the buffer is always valid UTF-8.
        std::str::from_utf8(&self.0).unwrap_or("\u{FFFD}")
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.as_slice() == [b' '] || self.0.is_empty()
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::SPACE
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<char> for Glyph {
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::new(c.encode_utf8(&mut buf))
    }
}

/// Handle into a [`crate::buffer::HyperlinkTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HyperlinkId(pub u32);

/// A single grid cell.
///
/// A wide (`width == 2`) cell at `(x, y)` owns the glyph; the
/// buffer places a [`Cell::continuation`] sentinel at `(x + 1, y)` that is
/// not directly writable and shares no glyph allocation of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: Glyph,
    pub width: u8,
    pub fg: Color,
    pub bg: Color,
    pub attrs: CellAttrs,
    pub hyperlink_id: Option<HyperlinkId>,
    /// `true` for the sentinel placed at `(x + 1, y)` after a wide cell.
    pub continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

impl Cell {
    #[must_use]
    pub fn blank() -> Self {
        Self {
            glyph: Glyph::SPACE,
            width: 1,
            fg: Color::Default,
            bg: Color::Default,
            attrs: CellAttrs::empty(),
            hyperlink_id: None,
            continuation: false,
        }
    }

    /// A blank cell carrying the current background, as used to fill
    /// freshly scrolled-in or erased rows (`attrs=attrs.bg` in spec.md's
    /// `scroll_up`/`erase_*` contracts).
    #[must_use]
    pub fn blank_with_bg(bg: Color) -> Self {
        Self {
            bg,
            ..Self::blank()
        }
    }

    #[must_use]
    pub fn continuation_of(bg: Color) -> Self {
        Self {
            continuation: true,
            bg,
            width: 0,
            ..Self::blank()
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        !self.continuation
            && self.glyph.is_blank()
            && self.fg == Color::Default
            && self.bg == Color::Default
            && self.attrs.is_empty()
            && self.hyperlink_id.is_none()
    }
}
