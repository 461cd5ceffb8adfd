//! Cell foreground/background color representation.
//!
//! This is distinct from [`xparsecolor::XColor`] (used by `vtio` for OSC
//! 4/10/11/12 palette queries, which speak the X11 `rgb:r/g/b` query
//! syntax): a [`Color`] is what ends up stored in a [`crate::Cell`] after
//! SGR 30-37/40-47/90-97/100-107/38/48 parameter folding.

use bitflags::bitflags;

/// A cell foreground or background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// The terminal's default foreground/background.
    #[default]
    Default,
    /// One of the 256 palette entries (0-15 are the ANSI/bright-ANSI
    /// colors, 16-231 the 6x6x6 color cube, 232-255 the grayscale ramp).
    Indexed(u8),
    /// A 24-bit true color value.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Construct from an SGR base code in `30..=37` or `90..=97`
    /// (foreground) / `40..=47` or `100..=107` (background), already
    /// normalized to `0..=15`.
    #[must_use]
    pub const fn ansi(code: u8) -> Self {
        Self::Indexed(code)
    }
}

bitflags! {
    /// Character attribute bitset (SGR bold/dim/.../strikethrough).
    ///
    /// `DoubleUnderline` corresponds to the colon sub-parameter form
    /// `CSI 4:2 m` (and the legacy `CSI 21 m` alias); a plain single
    /// underline is `CSI 4 m` / `CSI 4:1 m`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellAttrs: u16 {
        const BOLD              = 1 << 0;
        const DIM                = 1 << 1;
        const ITALIC             = 1 << 2;
        const UNDERLINE          = 1 << 3;
        const BLINK              = 1 << 4;
        const REVERSE            = 1 << 5;
        const HIDDEN             = 1 << 6;
        const STRIKETHROUGH      = 1 << 7;
        const DOUBLE_UNDERLINE   = 1 << 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_is_default_variant() {
        assert_eq!(Color::default(), Color::Default);
    }

    #[test]
    fn attrs_fold_independently() {
        let mut attrs = CellAttrs::empty();
        attrs |= CellAttrs::BOLD;
        attrs |= CellAttrs::UNDERLINE;
        assert!(attrs.contains(CellAttrs::BOLD));
        assert!(attrs.contains(CellAttrs::UNDERLINE));
        assert!(!attrs.contains(CellAttrs::ITALIC));
    }
}
