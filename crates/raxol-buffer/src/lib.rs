//! Screen-buffer engine: cell grid, scrollback, damage tracking, hyperlinks.
//!
//! This crate has no knowledge of escape sequences or cursor/mode state —
//! it is the leaf the command executor in `raxol-core` mutates.

pub mod buffer;
pub mod cell;
pub mod color;
pub mod damage;
pub mod hyperlink;
pub mod line;

pub use buffer::{Buffer, DisplayEraseMode, LineEraseMode, Pos};
pub use cell::{Cell, Glyph, HyperlinkId};
pub use color::{CellAttrs, Color};
pub use damage::{DamageSet, DamageTracker, MAX_DIRTY_RECTS};
pub use hyperlink::{Hyperlink, HyperlinkTable};
pub use line::Line;
