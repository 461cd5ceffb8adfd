//! Cursor, current SGR attributes, private modes, and the primary/alternate
//! buffer pair — everything the command executor mutates that a single
//! [`raxol_buffer::Buffer`] doesn't know about.

use raxol_buffer::{Buffer, CellAttrs, Color, HyperlinkId};

use crate::charset::CharsetState;
use crate::metrics::Metrics;

/// Cursor shape, as set by `DECSCUSR` (`CSI Ps SP q`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CursorStyle {
    Block,
    Underline,
    Bar,
}

impl Default for CursorStyle {
    fn default() -> Self {
        Self::Block
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
    pub visible: bool,
    pub style: CursorStyle,
    pub blinking: bool,
    /// Set when a `Print` lands a glyph in the rightmost column; the next
    /// `Print` wraps before writing instead of writing. Cleared by any
    /// cursor-move or erase command, per DEC's deferred-wrap behavior.
    pub pending_wrap: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            visible: true,
            style: CursorStyle::default(),
            blinking: true,
            pending_wrap: false,
        }
    }
}

/// The current pen: what `Print` stamps into every new cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attrs {
    pub fg: Color,
    pub bg: Color,
    pub attrs: CellAttrs,
    pub hyperlink_id: Option<HyperlinkId>,
}

impl Default for Attrs {
    fn default() -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            attrs: CellAttrs::empty(),
            hyperlink_id: None,
        }
    }
}

/// Which screen is currently being rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveBuffer {
    Primary,
    Alternate,
}

/// The SGR-coordinate mouse report encoding currently selected; only
/// meaningful while some [`MouseTrackingMode`] other than `Off` is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEncoding {
    Default,
    Sgr,
    Urxvt,
    Utf8,
}

impl Default for MouseEncoding {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseTrackingMode {
    Off,
    X10,
    DownUp,
    ButtonEvent,
    AnyEvent,
}

impl Default for MouseTrackingMode {
    fn default() -> Self {
        Self::Off
    }
}

/// Private (`DECSET`/`DECRST`) and ANSI modes the executor honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    pub insert_mode: bool,
    pub origin_mode: bool,
    pub auto_wrap: bool,
    pub cursor_keys_app: bool,
    pub keypad_app: bool,
    pub bracketed_paste: bool,
    pub mouse_tracking: MouseTrackingMode,
    pub mouse_encoding: MouseEncoding,
    pub alt_screen_save_cursor: bool,
    pub show_cursor: bool,
    pub reverse_video: bool,
    pub focus_reporting: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            insert_mode: false,
            origin_mode: false,
            auto_wrap: true,
            cursor_keys_app: false,
            keypad_app: false,
            bracketed_paste: false,
            mouse_tracking: MouseTrackingMode::Off,
            mouse_encoding: MouseEncoding::Default,
            alt_screen_save_cursor: true,
            show_cursor: true,
            reverse_video: false,
            focus_reporting: false,
        }
    }
}

/// Modes addressable through [`crate::Emulator::set_mode`], mirroring the
/// subset of [`Modes`] a test harness would want to flip directly instead of
/// feeding raw `DECSET`/`DECRST`/`SM`/`RM` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    InsertMode,
    OriginMode,
    AutoWrap,
    CursorKeysApplication,
    KeypadApplication,
    BracketedPaste,
    ShowCursor,
    ReverseVideo,
    FocusReporting,
    AlternateScreen,
}

/// Everything `DECSC`/`DECRC` (and the implicit save on `1049h`) restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SavedCursor {
    cursor: Cursor,
    attrs: Attrs,
    charsets: CharsetState,
    origin_mode: bool,
}

pub struct EmulatorState {
    pub primary: Buffer,
    pub alternate: Buffer,
    pub active: ActiveBuffer,
    pub cursor: Cursor,
    pub attrs: Attrs,
    pub modes: Modes,
    pub charsets: CharsetState,
    pub title: String,
    pub icon_name: String,
    pub metrics: Metrics,
    saved_primary: Option<SavedCursor>,
    saved_alternate: Option<SavedCursor>,
}

impl EmulatorState {
    pub fn new(width: usize, height: usize, max_scrollback: usize) -> Self {
        Self {
            primary: Buffer::new(width, height, max_scrollback),
            alternate: Buffer::new(width, height, 0),
            active: ActiveBuffer::Primary,
            cursor: Cursor::default(),
            attrs: Attrs::default(),
            modes: Modes::default(),
            charsets: CharsetState::default(),
            title: String::new(),
            icon_name: String::new(),
            metrics: Metrics::default(),
            saved_primary: None,
            saved_alternate: None,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        match self.active {
            ActiveBuffer::Primary => &self.primary,
            ActiveBuffer::Alternate => &self.alternate,
        }
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        match self.active {
            ActiveBuffer::Primary => &mut self.primary,
            ActiveBuffer::Alternate => &mut self.alternate,
        }
    }

    fn save_slot(&mut self) -> &mut Option<SavedCursor> {
        match self.active {
            ActiveBuffer::Primary => &mut self.saved_primary,
            ActiveBuffer::Alternate => &mut self.saved_alternate,
        }
    }

    /// `DECSC`: saves cursor position, pen, charset state and origin mode
    /// for the currently active screen.
    pub fn save_cursor(&mut self) {
        let saved = SavedCursor {
            cursor: self.cursor,
            attrs: self.attrs,
            charsets: self.charsets,
            origin_mode: self.modes.origin_mode,
        };
        *self.save_slot() = Some(saved);
    }

    /// `DECRC`: restores what `DECSC` saved, or resets to defaults if
    /// nothing was ever saved for this screen.
    pub fn restore_cursor(&mut self) {
        let saved = self.save_slot().take();
        match saved {
            Some(s) => {
                self.cursor = s.cursor;
                self.attrs = s.attrs;
                self.charsets = s.charsets;
                self.modes.origin_mode = s.origin_mode;
            }
            None => {
                self.cursor = Cursor::default();
                self.attrs = Attrs::default();
            }
        }
    }

    /// `CSI ? 1049 h/l`: switches to/from the alternate screen.
    ///
    /// Idempotent re-entry (switching to an already-active screen is a
    /// no-op beyond the contract's cursor save/restore) and the full
    /// alternate screen is cleared on every entry, matching `DECSET 1049`.
    pub fn switch_active(&mut self, target: ActiveBuffer) {
        if self.active == target {
            return;
        }
        match target {
            ActiveBuffer::Alternate => {
                if self.modes.alt_screen_save_cursor {
                    self.save_cursor();
                }
                self.active = ActiveBuffer::Alternate;
                let (w, h) = (self.primary.width(), self.primary.height());
                self.alternate = Buffer::new(w, h, 0);
            }
            ActiveBuffer::Primary => {
                self.active = ActiveBuffer::Primary;
                if self.modes.alt_screen_save_cursor {
                    self.restore_cursor();
                }
            }
        }
    }

    /// `RIS`: full reset. Scrollback on the primary buffer is preserved
    /// (decided: a hard reset clears state, not history a user may still
    /// want to scroll back through).
    pub fn reset(&mut self) {
        let (w, h) = (self.primary.width(), self.primary.height());
        self.active = ActiveBuffer::Primary;
        self.cursor = Cursor::default();
        self.attrs = Attrs::default();
        self.modes = Modes::default();
        self.charsets = CharsetState::default();
        self.title.clear();
        self.icon_name.clear();
        self.saved_primary = None;
        self.saved_alternate = None;
        self.primary
            .erase_in_display(0, 0, raxol_buffer::DisplayEraseMode::All, Color::Default);
        self.alternate = Buffer::new(w, h, 0);
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.primary.resize(width, height);
        self.alternate.resize(width, height);
        self.cursor.x = self.cursor.x.min(width.saturating_sub(1));
        self.cursor.y = self.cursor.y.min(height.saturating_sub(1));
    }

    /// Sets or clears `mode` directly, the same way the executor would in
    /// response to `DECSET`/`DECRST`/`SM`/`RM`. `AlternateScreen` goes
    /// through [`Self::switch_active`] rather than a bare flag flip, so
    /// cursor save/restore semantics stay intact.
    pub fn set_mode(&mut self, mode: Mode, enabled: bool) {
        match mode {
            Mode::InsertMode => self.modes.insert_mode = enabled,
            Mode::OriginMode => self.modes.origin_mode = enabled,
            Mode::AutoWrap => self.modes.auto_wrap = enabled,
            Mode::CursorKeysApplication => self.modes.cursor_keys_app = enabled,
            Mode::KeypadApplication => self.modes.keypad_app = enabled,
            Mode::BracketedPaste => self.modes.bracketed_paste = enabled,
            Mode::ShowCursor => self.modes.show_cursor = enabled,
            Mode::ReverseVideo => self.modes.reverse_video = enabled,
            Mode::FocusReporting => self.modes.focus_reporting = enabled,
            Mode::AlternateScreen => {
                let target = if enabled {
                    ActiveBuffer::Alternate
                } else {
                    ActiveBuffer::Primary
                };
                self.switch_active(target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_to_alternate_and_back_preserves_primary_cursor() {
        let mut state = EmulatorState::new(10, 3, 100);
        state.cursor.x = 4;
        state.cursor.y = 1;
        state.switch_active(ActiveBuffer::Alternate);
        assert_eq!(state.active, ActiveBuffer::Alternate);
        state.cursor.x = 9;
        state.switch_active(ActiveBuffer::Primary);
        assert_eq!(state.cursor.x, 4);
        assert_eq!(state.cursor.y, 1);
    }

    #[test]
    fn switching_to_already_active_screen_is_idempotent() {
        let mut state = EmulatorState::new(10, 3, 100);
        state.cursor.x = 2;
        state.switch_active(ActiveBuffer::Primary);
        assert_eq!(state.cursor.x, 2);
    }

    #[test]
    fn alternate_buffer_never_grows_scrollback() {
        let mut state = EmulatorState::new(10, 3, 100);
        state.switch_active(ActiveBuffer::Alternate);
        for _ in 0..10 {
            state.buffer_mut().scroll_up(0, 2, 1, Color::Default);
        }
        assert_eq!(state.alternate.scrollback_len(), 0);
    }
}
