//! The screen-buffer engine: a single screen's grid, scrollback and damage.
//!
//! `switch_active` (alternate-screen swap with conditional cursor
//! save/restore) is not implemented here: it needs the active cursor, which
//! lives in `raxol_core::EmulatorState`, not in a single [`Buffer`]. The
//! executor implements it there by constructing/discarding the alternate
//! [`Buffer`] and delegating everything else (grid ops, damage, scrollback)
//! to this module.

use std::collections::{BTreeSet, VecDeque};

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::Cell;
use crate::color::{CellAttrs, Color};
use crate::damage::{DamageSet, DamageTracker};
use crate::hyperlink::HyperlinkTable;
use crate::line::Line;

const DEFAULT_TAB_WIDTH: usize = 8;

/// A `(row, col)` pair in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

/// Which rows of a line an erase operation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEraseMode {
    ToEnd,
    ToStart,
    All,
}

/// Which part of the screen an `erase_in_display` covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEraseMode {
    ToEnd,
    ToStart,
    All,
    Scrollback,
}

/// One screen: either the primary buffer (scrollback-backed) or the
/// alternate buffer (`max_scrollback == 0`, scrollback never grows).
#[derive(Debug, Clone)]
pub struct Buffer {
    width: usize,
    height: usize,
    grid: Vec<Line>,
    scrollback: VecDeque<Line>,
    max_scrollback: usize,
    scroll_region: (usize, usize),
    tabs: BTreeSet<usize>,
    dirty: DamageTracker,
    hyperlinks: HyperlinkTable,
    selection: Option<(Pos, Pos)>,
}

impl Buffer {
    #[must_use]
    pub fn new(width: usize, height: usize, max_scrollback: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            grid: (0..height).map(|_| Line::blank(width)).collect(),
            scrollback: VecDeque::new(),
            max_scrollback,
            scroll_region: (0, height - 1),
            tabs: default_tab_stops(width),
            dirty: DamageTracker::new(height),
            hyperlinks: HyperlinkTable::new(),
            selection: None,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn scroll_region(&self) -> (usize, usize) {
        self.scroll_region
    }

    #[must_use]
    pub fn scrollback_len(&self) -> usize {
        self.scrollback.len()
    }

    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        self.grid.get(y).map(|l| l.cells.as_slice())
    }

    #[must_use]
    pub fn scrollback_row(&self, i: usize) -> Option<&[Cell]> {
        self.scrollback.get(i).map(|l| l.cells.as_slice())
    }

    #[must_use]
    pub fn hyperlinks(&self) -> &HyperlinkTable {
        &self.hyperlinks
    }

    pub fn hyperlinks_mut(&mut self) -> &mut HyperlinkTable {
        &mut self.hyperlinks
    }

    #[must_use]
    pub fn selection(&self) -> Option<(Pos, Pos)> {
        self.selection
    }

    pub fn set_selection(&mut self, sel: Option<(Pos, Pos)>) {
        self.selection = sel;
    }

    #[must_use]
    pub fn tabs(&self) -> &BTreeSet<usize> {
        &self.tabs
    }

    pub fn set_tab_stop(&mut self, x: usize) {
        self.tabs.insert(x.min(self.width.saturating_sub(1)));
    }

    pub fn clear_tab_stop(&mut self, x: usize) {
        self.tabs.remove(&x);
    }

    pub fn clear_all_tab_stops(&mut self) {
        self.tabs.clear();
    }

    /// Sets `scroll_region`, clamped to `[0, height - 1]`; a request where
    /// `top >= bottom` is ignored and the region is left unchanged.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = top.min(self.height - 1);
        let bottom = bottom.min(self.height - 1);
        if top >= bottom {
            return;
        }
        self.scroll_region = (top, bottom);
    }

    /// Writes a single cell at `(x, y)`, clamping out-of-range coordinates
    /// into the grid (a `Contract` violation that clamps rather than
    /// panics). Wide cells place a continuation sentinel at `x + 1`; a
    /// wide cell landing in the last column is downgraded to width 1
    /// (clipped) since it is the caller's job to wrap beforehand.
    ///
    /// Overwriting either half of an existing wide cell clears its other
    /// half first, so the row never ends up with an orphaned continuation
    /// sentinel or a `width == 2` cell with no continuation neighbor.
    pub fn write_cell(&mut self, x: usize, y: usize, mut cell: Cell) {
        let y = y.min(self.height - 1);
        let x = x.min(self.width.saturating_sub(1));
        if cell.width >= 2 && x + 1 >= self.width {
            cell.width = 1;
        }
        let bg = cell.bg;
        let wide = cell.width >= 2;
        let line = &mut self.grid[y];

        clear_orphaned_wide_half(line, x);
        if wide {
            clear_orphaned_wide_half(line, x + 1);
        }

        line.cells[x] = cell;
        if wide {
            line.cells[x + 1] = Cell::continuation_of(bg);
        }
        self.dirty.mark_row(y);
    }

    /// Marks row `y` as having wrapped into the next row (or not), so a
    /// later [`Self::resize`] rejoins it with that row before re-wrapping at
    /// the new width. A no-op if `y` is out of range.
    pub fn set_wrapped(&mut self, y: usize, wrapped: bool) {
        if let Some(line) = self.grid.get_mut(y) {
            line.is_wrapped = wrapped;
        }
    }

    /// Writes `text` left to right from `(x, y)` honoring grapheme width;
    /// never wraps, clipping at the right edge.
    pub fn write_text(&mut self, x: usize, y: usize, text: &str, fg: Color, bg: Color, attrs: CellAttrs) {
        let mut cursor = x;
        for grapheme in text.graphemes(true) {
            if cursor >= self.width {
                break;
            }
            let width = grapheme.width().clamp(1, 2) as u8;
            self.write_cell(
                cursor,
                y,
                Cell {
                    glyph: crate::cell::Glyph::new(grapheme),
                    width,
                    fg,
                    bg,
                    attrs,
                    hyperlink_id: None,
                    continuation: false,
                },
            );
            cursor += width as usize;
        }
    }

    /// Shifts rows `[top, bot]` up by `n`, filling the bottom with blanks.
    /// When the region spans the whole screen and scrollback is enabled
    /// (primary buffer), evicted rows are appended to scrollback; otherwise
    /// they are discarded.
    pub fn scroll_up(&mut self, top: usize, bot: usize, n: usize, fill_bg: Color) {
        let (top, bot) = self.clamp_region(top, bot);
        let n = n.min(bot - top + 1);
        if n == 0 {
            return;
        }
        let full_screen = top == 0 && bot == self.height - 1;
        for _ in 0..n {
            let evicted = self.grid.remove(top);
            if full_screen && self.max_scrollback > 0 {
                self.push_scrollback(evicted);
            }
            self.grid.insert(bot, Line::blank_with_bg(self.width, fill_bg));
        }
        for y in top..=bot {
            self.dirty.mark_row(y);
        }
    }

    /// Inverse of [`scroll_up`](Self::scroll_up): shifts rows down,
    /// discarding what falls off the bottom of the region.
    pub fn scroll_down(&mut self, top: usize, bot: usize, n: usize, fill_bg: Color) {
        let (top, bot) = self.clamp_region(top, bot);
        let n = n.min(bot - top + 1);
        if n == 0 {
            return;
        }
        for _ in 0..n {
            self.grid.remove(bot);
            self.grid.insert(top, Line::blank_with_bg(self.width, fill_bg));
        }
        for y in top..=bot {
            self.dirty.mark_row(y);
        }
    }

    pub fn insert_lines(&mut self, y: usize, n: usize, fill_bg: Color) {
        let (top, bot) = self.scroll_region;
        if y < top || y > bot {
            return;
        }
        self.scroll_down(y, bot, n, fill_bg);
    }

    pub fn delete_lines(&mut self, y: usize, n: usize, fill_bg: Color) {
        let (top, bot) = self.scroll_region;
        if y < top || y > bot {
            return;
        }
        self.scroll_up(y, bot, n, fill_bg);
    }

    /// Shifts cells at/after `x` on row `y` right by `n`, clipping
    /// overflow at the right edge.
    pub fn insert_chars(&mut self, x: usize, y: usize, n: usize, fill_bg: Color) {
        let y = y.min(self.height - 1);
        let x = x.min(self.width.saturating_sub(1));
        let n = n.min(self.width - x);
        let line = &mut self.grid[y];
        line.cells.truncate(self.width - n);
        for _ in 0..n {
            line.cells.insert(x, Cell::blank_with_bg(fill_bg));
        }
        self.dirty.mark_row(y);
    }

    /// Shifts cells after `x + n` on row `y` left to `x`, filling the
    /// vacated tail with blanks.
    pub fn delete_chars(&mut self, x: usize, y: usize, n: usize, fill_bg: Color) {
        let y = y.min(self.height - 1);
        let x = x.min(self.width.saturating_sub(1));
        let n = n.min(self.width - x);
        let line = &mut self.grid[y];
        line.cells.drain(x..x + n);
        line.cells.resize_with(self.width, || Cell::blank_with_bg(fill_bg));
        self.dirty.mark_row(y);
    }

    /// `CSI X` (ECH): erases `n` cells starting at `(x, y)` in place,
    /// without shifting anything.
    pub fn erase_chars(&mut self, x: usize, y: usize, n: usize, fill_bg: Color) {
        let y = y.min(self.height - 1);
        let x = x.min(self.width.saturating_sub(1));
        let end = (x + n).min(self.width);
        let line = &mut self.grid[y];
        for cell in &mut line.cells[x..end] {
            *cell = Cell::blank_with_bg(fill_bg);
        }
        self.dirty.mark_row(y);
    }

    /// `CSI K`: erases part of row `y` relative to cursor column `x`.
    pub fn erase_in_line(&mut self, x: usize, y: usize, mode: LineEraseMode, fill_bg: Color) {
        let y = y.min(self.height - 1);
        let x = x.min(self.width.saturating_sub(1));
        let width = self.width;
        let line = &mut self.grid[y];
        let range = match mode {
            LineEraseMode::ToEnd => x..width,
            LineEraseMode::ToStart => 0..(x + 1).min(width),
            LineEraseMode::All => 0..width,
        };
        for cell in &mut line.cells[range] {
            *cell = Cell::blank_with_bg(fill_bg);
        }
        self.dirty.mark_row(y);
    }

    /// `CSI J`: erases part of the viewport relative to cursor `(x, y)`.
    pub fn erase_in_display(&mut self, x: usize, y: usize, mode: DisplayEraseMode, fill_bg: Color) {
        match mode {
            DisplayEraseMode::Scrollback => {
                self.scrollback.clear();
            }
            DisplayEraseMode::All => {
                for row in &mut self.grid {
                    *row = Line::blank_with_bg(self.width, fill_bg);
                }
                self.dirty.mark_full();
            }
            DisplayEraseMode::ToEnd => {
                self.erase_in_line(x, y, LineEraseMode::ToEnd, fill_bg);
                for row in y + 1..self.height {
                    self.grid[row] = Line::blank_with_bg(self.width, fill_bg);
                }
                self.dirty.mark_full();
            }
            DisplayEraseMode::ToStart => {
                self.erase_in_line(x, y, LineEraseMode::ToStart, fill_bg);
                for row in &mut self.grid[..y] {
                    *row = Line::blank_with_bg(self.width, fill_bg);
                }
                self.dirty.mark_full();
            }
        }
    }

    /// Resizes the viewport, reflowing previously-wrapped logical lines
    /// across the new width (the decided resize-reflow policy). Grounded
    /// in the ring-buffer reflow used by `other_examples`'s shpool-vterm
    /// `Scrollback::reflow`: the whole scrollback + grid is treated as one
    /// ordered stream of physical lines, rejoined at `is_wrapped`
    /// boundaries into logical lines, then re-chunked at the new width.
    pub fn resize(&mut self, new_width: usize, new_height: usize) {
        let new_width = new_width.max(1);
        let new_height = new_height.max(1);
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut physical: VecDeque<Line> = VecDeque::with_capacity(self.scrollback.len() + self.grid.len());
        physical.extend(self.scrollback.drain(..));
        physical.extend(self.grid.drain(..));

        let reflowed = if new_width == self.width {
            physical
        } else {
            reflow(physical, new_width)
        };

        let mut reflowed = reflowed;
        while reflowed.len() < new_height {
            reflowed.push_back(Line::blank(new_width));
        }
        let mut grid: VecDeque<Line> = VecDeque::with_capacity(new_height);
        while grid.len() < new_height {
            if let Some(line) = reflowed.pop_back() {
                grid.push_front(line);
            } else {
                grid.push_front(Line::blank(new_width));
            }
        }

        let mut scrollback = reflowed;
        while scrollback.len() > self.max_scrollback {
            scrollback.pop_front();
        }

        self.width = new_width;
        self.height = new_height;
        self.grid = grid.into();
        self.scrollback = scrollback;
        self.tabs = default_tab_stops(new_width);
        self.scroll_region = (0, new_height - 1);
        self.dirty.resize(new_height);
    }

    pub fn take_damage(&mut self) -> (DamageSet, u64) {
        self.dirty.take()
    }

    fn clamp_region(&self, top: usize, bot: usize) -> (usize, usize) {
        let top = top.min(self.height - 1);
        let bot = bot.min(self.height - 1);
        if top > bot { (bot, top) } else { (top, bot) }
    }

    fn push_scrollback(&mut self, line: Line) {
        self.scrollback.push_back(line);
        while self.scrollback.len() > self.max_scrollback {
            self.scrollback.pop_front();
        }
    }
}

/// If `pos` currently holds half of a wide cell, blanks the other half so
/// `write_cell` never leaves a dangling continuation sentinel (overwriting
/// the left half) or a `width == 2` cell with no continuation neighbor
/// (overwriting the right half).
fn clear_orphaned_wide_half(line: &mut Line, pos: usize) {
    if pos >= line.cells.len() {
        return;
    }
    if line.cells[pos].width >= 2 {
        if let Some(next) = line.cells.get_mut(pos + 1) {
            let bg = next.bg;
            *next = Cell::blank_with_bg(bg);
        }
    } else if line.cells[pos].continuation && pos > 0 {
        let bg = line.cells[pos - 1].bg;
        line.cells[pos - 1] = Cell::blank_with_bg(bg);
    }
}

fn default_tab_stops(width: usize) -> BTreeSet<usize> {
    (DEFAULT_TAB_WIDTH..width).step_by(DEFAULT_TAB_WIDTH).collect()
}

/// Rejoins physical lines at `is_wrapped` boundaries into logical lines,
/// then re-splits each logical line into physical lines of `new_width`
/// cells, re-deriving `is_wrapped` for every chunk but the last.
fn reflow(mut physical: VecDeque<Line>, new_width: usize) -> VecDeque<Line> {
    let mut out = VecDeque::with_capacity(physical.len());
    let mut logical: Vec<Cell> = Vec::new();

    while let Some(line) = physical.pop_front() {
        let wrapped = line.is_wrapped;
        logical.extend(line.cells);
        if wrapped {
            continue;
        }

        if logical.is_empty() {
            out.push_back(Line::blank(new_width));
        } else {
            let chunks: Vec<Vec<Cell>> = logical.chunks(new_width).map(<[Cell]>::to_vec).collect();
            let last_idx = chunks.len() - 1;
            for (i, mut cells) in chunks.into_iter().enumerate() {
                cells.resize_with(new_width, Cell::blank);
                out.push_back(Line {
                    cells,
                    is_wrapped: i != last_idx,
                });
            }
        }
        logical.clear();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_cell_marks_row_dirty() {
        let mut buf = Buffer::new(10, 3, 100);
        buf.write_cell(0, 0, Cell::blank());
        assert_eq!(buf.take_damage().0, DamageSet::Rows(vec![0]));
    }

    #[test]
    fn write_text_does_not_wrap() {
        let mut buf = Buffer::new(5, 2, 0);
        buf.write_text(0, 0, "hello world", Color::Default, Color::Default, CellAttrs::empty());
        let row = buf.row(0).unwrap();
        assert_eq!(row[4].glyph.as_str(), "o");
    }

    #[test]
    fn scroll_up_full_screen_evicts_to_scrollback() {
        let mut buf = Buffer::new(5, 2, 3);
        buf.write_text(0, 0, "top", Color::Default, Color::Default, CellAttrs::empty());
        buf.scroll_up(0, 1, 1, Color::Default);
        assert_eq!(buf.scrollback_len(), 1);
        assert_eq!(buf.scrollback_row(0).unwrap()[0].glyph.as_str(), "t");
    }

    #[test]
    fn scrollback_eviction_bounded_by_max_scrollback() {
        let mut buf = Buffer::new(5, 2, 3);
        for _ in 0..5 {
            buf.scroll_up(0, 1, 1, Color::Default);
        }
        assert_eq!(buf.scrollback_len(), 3);
    }

    #[test]
    fn insert_delete_chars_roundtrip() {
        let mut buf = Buffer::new(5, 1, 0);
        buf.write_text(0, 0, "abcde", Color::Default, Color::Default, CellAttrs::empty());
        buf.delete_chars(1, 0, 2, Color::Default);
        let row = buf.row(0).unwrap();
        assert_eq!(row[0].glyph.as_str(), "a");
        assert_eq!(row[1].glyph.as_str(), "d");
        assert_eq!(row[2].glyph.as_str(), "e");
        assert!(row[3].is_blank());

        buf.insert_chars(1, 0, 2, Color::Default);
        let row = buf.row(0).unwrap();
        assert!(row[1].is_blank());
        assert!(row[2].is_blank());
        assert_eq!(row[3].glyph.as_str(), "d");
    }

    #[test]
    fn set_scroll_region_ignores_top_ge_bottom() {
        let mut buf = Buffer::new(5, 5, 0);
        let before = buf.scroll_region();
        buf.set_scroll_region(3, 2);
        assert_eq!(buf.scroll_region(), before);
        buf.set_scroll_region(1, 3);
        assert_eq!(buf.scroll_region(), (1, 3));
    }

    #[test]
    fn resize_reflows_wrapped_lines() {
        let mut buf = Buffer::new(10, 3, 0);
        buf.write_text(0, 0, "AAAAAAAAAA", Color::Default, Color::Default, CellAttrs::empty());
        buf.grid[0].is_wrapped = true;
        buf.write_cell(0, 1, Cell {
            glyph: crate::cell::Glyph::from_ascii(b'A'),
            width: 1,
            fg: Color::Default,
            bg: Color::Default,
            attrs: CellAttrs::empty(),
            hyperlink_id: None,
            continuation: false,
        });
        buf.resize(11, 3);
        assert_eq!(buf.width(), 11);
        let row = buf.row(0).unwrap();
        assert_eq!(row[10].glyph.as_str(), "A");
    }
}
