//! A point-in-time, serializable snapshot of the visible screen — what a
//! driver (a renderer, a test, a remote frontend) actually wants instead of
//! poking at [`crate::EmulatorState`] directly.

use raxol_buffer::{CellAttrs, Color};

use crate::state::{CursorStyle, EmulatorState};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub text: String,
    pub fg: Color,
    pub bg: Color,
    pub attrs: CellAttrs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CursorView {
    pub x: usize,
    pub y: usize,
    pub visible: bool,
    pub style: CursorStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameView {
    pub width: usize,
    pub height: usize,
    pub cursor: CursorView,
    pub cells: Vec<Vec<CellView>>,
    pub title: String,
    pub scrollback_rows: usize,
}

impl FrameView {
    pub(crate) fn capture(state: &EmulatorState) -> Self {
        let buffer = state.buffer();
        let cells = (0..buffer.height())
            .map(|y| {
                buffer
                    .row(y)
                    .unwrap_or(&[])
                    .iter()
                    .map(|cell| CellView {
                        text: cell.glyph.as_str().to_string(),
                        fg: cell.fg,
                        bg: cell.bg,
                        attrs: cell.attrs,
                    })
                    .collect()
            })
            .collect();
        Self {
            width: buffer.width(),
            height: buffer.height(),
            cursor: CursorView {
                x: state.cursor.x,
                y: state.cursor.y,
                visible: state.cursor.visible && state.modes.show_cursor,
                style: state.cursor.style,
            },
            cells,
            title: state.title.clone(),
            scrollback_rows: buffer.scrollback_len(),
        }
    }
}
