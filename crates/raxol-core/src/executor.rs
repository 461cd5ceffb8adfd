//! Dispatches a single [`ParsedCommand`] into buffer mutations and state
//! updates — the match table spec.md §4.3 describes, over the generic
//! shape `parser` emits instead of over fully-typed `vtmsg` structs.

use base64::Engine;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;
use vtio::event::charset::Charset94Code;

use raxol_buffer::{Cell, DisplayEraseMode, Glyph, Hyperlink, LineEraseMode};

use crate::charset::Register;
use crate::event::{EventQueue, OutboundEvent};
use crate::parser::{Param, ParsedCommand};
use crate::state::{ActiveBuffer, EmulatorState, MouseEncoding, MouseTrackingMode};

/// Applies `cmd` to `state`, pushing any host-facing notification onto
/// `events`. Never panics: unrecognized commands become
/// [`OutboundEvent::UnknownSequence`].
pub fn execute(cmd: ParsedCommand, state: &mut EmulatorState, events: &mut EventQueue) {
    match cmd {
        ParsedCommand::Print(text) => handle_print(&text, state),
        ParsedCommand::Execute(byte) => handle_execute(byte, state, events),
        ParsedCommand::Csi {
            final_byte,
            intermediates,
            params,
            private_marker,
        } => handle_csi(final_byte, &intermediates, &params, private_marker, state, events),
        ParsedCommand::Osc { params, truncated } => handle_osc(&params, truncated, state, events),
        ParsedCommand::Dcs {
            final_byte,
            data,
            truncated,
            ..
        } => handle_dcs(final_byte, data, truncated, state, events),
        ParsedCommand::EscSimple {
            final_byte,
            intermediates,
        } => handle_esc_simple(final_byte, &intermediates, state, events),
        // Bracketed-paste framing is host-to-child input (see `crate::input`);
        // a program never emits it on its own output stream, so there is
        // nothing for the executor to do with it here.
        ParsedCommand::BracketedPasteStart | ParsedCommand::BracketedPasteEnd => {}
    }
}

fn handle_print(text: &str, state: &mut EmulatorState) {
    for grapheme in text.graphemes(true) {
        let translated: String = grapheme.chars().map(|c| state.charsets.translate(c)).collect();
        print_one(&translated, state);
    }
}

fn print_one(glyph: &str, state: &mut EmulatorState) {
    let width = glyph.width().clamp(1, 2) as u8;
    let buf_width = state.buffer().width();

    if state.cursor.pending_wrap {
        if state.modes.auto_wrap {
            wrap_line(state);
        } else {
            state.cursor.pending_wrap = false;
        }
    }

    if state.cursor.x + width as usize > buf_width {
        if state.modes.auto_wrap {
            wrap_line(state);
        } else {
            state.cursor.x = buf_width.saturating_sub(width as usize);
        }
    }

    let (x, y) = (state.cursor.x, state.cursor.y);
    let attrs = state.attrs;
    if state.modes.insert_mode {
        state.buffer_mut().insert_chars(x, y, width as usize, attrs.bg);
    }
    state.buffer_mut().write_cell(
        x,
        y,
        Cell {
            glyph: Glyph::new(glyph),
            width,
            fg: attrs.fg,
            bg: attrs.bg,
            attrs: attrs.attrs,
            hyperlink_id: attrs.hyperlink_id,
            continuation: false,
        },
    );

    state.cursor.x += width as usize;
    if state.cursor.x >= buf_width {
        state.cursor.x = buf_width - 1;
        state.cursor.pending_wrap = true;
    }
}

fn wrap_line(state: &mut EmulatorState) {
    let y = state.cursor.y;
    state.buffer_mut().set_wrapped(y, true);
    state.cursor.x = 0;
    cursor_down_or_scroll(state);
}

/// Moves the cursor down one row, scrolling the active scroll region up
/// (evicting to scrollback only when that region is the full primary
/// screen) when it is already at the bottom margin.
fn cursor_down_or_scroll(state: &mut EmulatorState) {
    let (top, bot) = state.buffer().scroll_region();
    if state.cursor.y >= bot {
        let bg = state.attrs.bg;
        state.buffer_mut().scroll_up(top, bot, 1, bg);
    } else {
        state.cursor.y += 1;
    }
    state.cursor.pending_wrap = false;
}

fn reverse_index(state: &mut EmulatorState) {
    let (top, bot) = state.buffer().scroll_region();
    if state.cursor.y <= top {
        let bg = state.attrs.bg;
        state.buffer_mut().scroll_down(top, bot, 1, bg);
    } else {
        state.cursor.y -= 1;
    }
    state.cursor.pending_wrap = false;
}

fn next_line(state: &mut EmulatorState) {
    state.cursor.x = 0;
    cursor_down_or_scroll(state);
}

fn tab_forward(state: &mut EmulatorState) {
    let width = state.buffer().width();
    let x = state.cursor.x;
    let next = state
        .buffer()
        .tabs()
        .range(x + 1..)
        .next()
        .copied()
        .unwrap_or(width - 1);
    state.cursor.x = next.min(width.saturating_sub(1));
    state.cursor.pending_wrap = false;
}

fn handle_execute(byte: u8, state: &mut EmulatorState, events: &mut EventQueue) {
    match byte {
        0x0A | 0x0B | 0x0C => cursor_down_or_scroll(state), // LF, VT, FF
        0x0D => {
            state.cursor.x = 0;
            state.cursor.pending_wrap = false;
        }
        0x08 => {
            state.cursor.x = state.cursor.x.saturating_sub(1);
            state.cursor.pending_wrap = false;
        }
        0x09 => tab_forward(state),
        0x07 => events.push(OutboundEvent::BellRung),
        0x0E => state.charsets.shift_out(),
        0x0F => state.charsets.shift_in(),
        _ => {}
    }
}

fn move_cursor_to(state: &mut EmulatorState, x: usize, y: usize) {
    let width = state.buffer().width();
    let height = state.buffer().height();
    let (top, bot) = if state.modes.origin_mode {
        state.buffer().scroll_region()
    } else {
        (0, height - 1)
    };
    let clamped_x = x.min(width.saturating_sub(1));
    let clamped_y = (top + y).clamp(top, bot);
    if clamped_x != x || clamped_y != top + y {
        state.metrics.contract_violations += 1;
    }
    state.cursor.x = clamped_x;
    state.cursor.y = clamped_y;
    state.cursor.pending_wrap = false;
}

fn move_cursor_relative(state: &mut EmulatorState, dx: i64, dy: i64) {
    let width = state.buffer().width() as i64;
    let (top, bot) = if state.modes.origin_mode {
        let (t, b) = state.buffer().scroll_region();
        (t as i64, b as i64)
    } else {
        (0, state.buffer().height() as i64 - 1)
    };
    let wanted_x = state.cursor.x as i64 + dx;
    let wanted_y = state.cursor.y as i64 + dy;
    let clamped_x = wanted_x.clamp(0, width - 1);
    let clamped_y = wanted_y.clamp(top, bot);
    if clamped_x != wanted_x || clamped_y != wanted_y {
        state.metrics.contract_violations += 1;
    }
    state.cursor.x = clamped_x as usize;
    state.cursor.y = clamped_y as usize;
    state.cursor.pending_wrap = false;
}

fn erase_display_mode(n: u32) -> DisplayEraseMode {
    match n {
        1 => DisplayEraseMode::ToStart,
        2 => DisplayEraseMode::All,
        3 => DisplayEraseMode::Scrollback,
        _ => DisplayEraseMode::ToEnd,
    }
}

fn erase_line_mode(n: u32) -> LineEraseMode {
    match n {
        1 => LineEraseMode::ToStart,
        2 => LineEraseMode::All,
        _ => LineEraseMode::ToEnd,
    }
}

fn apply_ansi_mode(mode: u32, set: bool, state: &mut EmulatorState) {
    if mode == 4 {
        state.modes.insert_mode = set;
    }
}

fn apply_dec_mode(mode: u32, set: bool, state: &mut EmulatorState) {
    match mode {
        1 => state.modes.cursor_keys_app = set,
        5 => state.modes.reverse_video = set,
        6 => state.modes.origin_mode = set,
        7 => state.modes.auto_wrap = set,
        9 => {
            state.modes.mouse_tracking = if set {
                MouseTrackingMode::X10
            } else {
                MouseTrackingMode::Off
            };
        }
        25 => state.modes.show_cursor = set,
        47 | 1047 => {
            state.modes.alt_screen_save_cursor = false;
            switch_screen(state, set);
        }
        66 => state.modes.keypad_app = set,
        1000 => {
            state.modes.mouse_tracking = if set {
                MouseTrackingMode::DownUp
            } else {
                MouseTrackingMode::Off
            };
        }
        1002 => {
            state.modes.mouse_tracking = if set {
                MouseTrackingMode::ButtonEvent
            } else {
                MouseTrackingMode::Off
            };
        }
        1003 => {
            state.modes.mouse_tracking = if set {
                MouseTrackingMode::AnyEvent
            } else {
                MouseTrackingMode::Off
            };
        }
        1004 => state.modes.focus_reporting = set,
        1005 => {
            state.modes.mouse_encoding = if set {
                MouseEncoding::Utf8
            } else {
                MouseEncoding::Default
            };
        }
        1006 => {
            state.modes.mouse_encoding = if set {
                MouseEncoding::Sgr
            } else {
                MouseEncoding::Default
            };
        }
        1015 => {
            state.modes.mouse_encoding = if set {
                MouseEncoding::Urxvt
            } else {
                MouseEncoding::Default
            };
        }
        1049 => {
            state.modes.alt_screen_save_cursor = true;
            switch_screen(state, set);
        }
        2004 => state.modes.bracketed_paste = set,
        _ => {}
    }
}

fn switch_screen(state: &mut EmulatorState, to_alternate: bool) {
    state.switch_active(if to_alternate {
        ActiveBuffer::Alternate
    } else {
        ActiveBuffer::Primary
    });
}

fn handle_csi(
    final_byte: u8,
    _intermediates: &[u8],
    params: &[Param],
    private_marker: Option<u8>,
    state: &mut EmulatorState,
    events: &mut EventQueue,
) {
    let default_or = |idx: usize, default: u32| -> u32 {
        match params.get(idx).and_then(|p| p.first().copied().flatten()) {
            None | Some(0) => default,
            Some(v) => v,
        }
    };
    let raw = |idx: usize| -> Option<u32> { params.get(idx).and_then(|p| p.first().copied().flatten()) };

    match (private_marker, final_byte) {
        (None, b'H' | b'f') => {
            let row = default_or(0, 1).saturating_sub(1) as usize;
            let col = default_or(1, 1).saturating_sub(1) as usize;
            move_cursor_to(state, col, row);
        }
        (None, b'A') => move_cursor_relative(state, 0, -(default_or(0, 1) as i64)),
        (None, b'B') => move_cursor_relative(state, 0, default_or(0, 1) as i64),
        (None, b'C') => move_cursor_relative(state, default_or(0, 1) as i64, 0),
        (None, b'D') => move_cursor_relative(state, -(default_or(0, 1) as i64), 0),
        (None, b'J') => {
            let mode = erase_display_mode(raw(0).unwrap_or(0));
            let bg = state.attrs.bg;
            let (x, y) = (state.cursor.x, state.cursor.y);
            state.buffer_mut().erase_in_display(x, y, mode, bg);
            state.cursor.pending_wrap = false;
        }
        (None, b'K') => {
            let mode = erase_line_mode(raw(0).unwrap_or(0));
            let bg = state.attrs.bg;
            let (x, y) = (state.cursor.x, state.cursor.y);
            state.buffer_mut().erase_in_line(x, y, mode, bg);
            state.cursor.pending_wrap = false;
        }
        (None, b'L') => {
            let n = default_or(0, 1) as usize;
            let bg = state.attrs.bg;
            let y = state.cursor.y;
            state.buffer_mut().insert_lines(y, n, bg);
            state.cursor.pending_wrap = false;
        }
        (None, b'M') => {
            let n = default_or(0, 1) as usize;
            let bg = state.attrs.bg;
            let y = state.cursor.y;
            state.buffer_mut().delete_lines(y, n, bg);
            state.cursor.pending_wrap = false;
        }
        (None, b'@') => {
            let n = default_or(0, 1) as usize;
            let bg = state.attrs.bg;
            let (x, y) = (state.cursor.x, state.cursor.y);
            state.buffer_mut().insert_chars(x, y, n, bg);
            state.cursor.pending_wrap = false;
        }
        (None, b'P') => {
            let n = default_or(0, 1) as usize;
            let bg = state.attrs.bg;
            let (x, y) = (state.cursor.x, state.cursor.y);
            state.buffer_mut().delete_chars(x, y, n, bg);
            state.cursor.pending_wrap = false;
        }
        (None, b'X') => {
            let n = default_or(0, 1) as usize;
            let bg = state.attrs.bg;
            let (x, y) = (state.cursor.x, state.cursor.y);
            state.buffer_mut().erase_chars(x, y, n, bg);
            state.cursor.pending_wrap = false;
        }
        (None, b'r') => {
            let height = state.buffer().height();
            let top = raw(0).unwrap_or(1).saturating_sub(1) as usize;
            let bot = match raw(1) {
                None | Some(0) => height - 1,
                Some(v) => (v as usize).saturating_sub(1),
            };
            state.buffer_mut().set_scroll_region(top, bot);
            move_cursor_to(state, 0, 0);
        }
        (None, b'm') => apply_sgr(params, &mut state.attrs),
        (None, b'h') => apply_ansi_mode(default_or(0, 0), true, state),
        (None, b'l') => apply_ansi_mode(default_or(0, 0), false, state),
        (Some(b'?'), b'h') => apply_dec_mode(default_or(0, 0), true, state),
        (Some(b'?'), b'l') => apply_dec_mode(default_or(0, 0), false, state),
        _ => {
            state.metrics.unknown_csi += 1;
            events.push(OutboundEvent::UnknownSequence {
                final_byte,
                params: format_params(params),
            });
        }
    }
}

fn apply_sgr(params: &[Param], attrs: &mut crate::state::Attrs) {
    use raxol_buffer::{CellAttrs, Color};

    if params.is_empty() {
        *attrs = crate::state::Attrs::default();
        return;
    }

    let mut i = 0;
    while i < params.len() {
        let code = params[i].first().copied().flatten().unwrap_or(0);
        match code {
            0 => *attrs = crate::state::Attrs::default(),
            1 => attrs.attrs.insert(CellAttrs::BOLD),
            2 => attrs.attrs.insert(CellAttrs::DIM),
            3 => attrs.attrs.insert(CellAttrs::ITALIC),
            4 => {
                let style = params[i].get(1).copied().flatten().unwrap_or(1);
                attrs.attrs.remove(CellAttrs::UNDERLINE | CellAttrs::DOUBLE_UNDERLINE);
                match style {
                    0 => {}
                    2 => attrs.attrs.insert(CellAttrs::DOUBLE_UNDERLINE),
                    _ => attrs.attrs.insert(CellAttrs::UNDERLINE),
                }
            }
            5 => attrs.attrs.insert(CellAttrs::BLINK),
            7 => attrs.attrs.insert(CellAttrs::REVERSE),
            8 => attrs.attrs.insert(CellAttrs::HIDDEN),
            9 => attrs.attrs.insert(CellAttrs::STRIKETHROUGH),
            21 => {
                attrs.attrs.remove(CellAttrs::UNDERLINE);
                attrs.attrs.insert(CellAttrs::DOUBLE_UNDERLINE);
            }
            22 => attrs.attrs.remove(CellAttrs::BOLD | CellAttrs::DIM),
            23 => attrs.attrs.remove(CellAttrs::ITALIC),
            24 => attrs.attrs.remove(CellAttrs::UNDERLINE | CellAttrs::DOUBLE_UNDERLINE),
            25 => attrs.attrs.remove(CellAttrs::BLINK),
            27 => attrs.attrs.remove(CellAttrs::REVERSE),
            28 => attrs.attrs.remove(CellAttrs::HIDDEN),
            29 => attrs.attrs.remove(CellAttrs::STRIKETHROUGH),
            30..=37 => attrs.fg = Color::ansi((code - 30) as u8),
            38 | 48 => {
                let (color, consumed) = parse_extended_color(&params[i..]);
                if let Some(color) = color {
                    if code == 38 {
                        attrs.fg = color;
                    } else {
                        attrs.bg = color;
                    }
                }
                i += consumed.saturating_sub(1);
            }
            39 => attrs.fg = Color::Default,
            40..=47 => attrs.bg = Color::ansi((code - 40) as u8),
            49 => attrs.bg = Color::Default,
            90..=97 => attrs.fg = Color::ansi((code - 90 + 8) as u8),
            100..=107 => attrs.bg = Color::ansi((code - 100 + 8) as u8),
            _ => {}
        }
        i += 1;
    }
}

/// Parses a `38`/`48` extended-color parameter starting at `params[0]`,
/// accepting both the semicolon form (`38;2;r;g;b`, `38;5;n`) and the
/// colon sub-parameter form (`38:2::r:g:b`, `38:5:n`). Returns the color
/// (if recognized) and how many top-level params were consumed.
fn parse_extended_color(params: &[Param]) -> (Option<raxol_buffer::Color>, usize) {
    use raxol_buffer::Color;

    let first = &params[0];
    if first.len() > 1 {
        let mode = first.get(1).copied().flatten().unwrap_or(0);
        return match mode {
            5 => {
                let n = first.get(2).copied().flatten().unwrap_or(0) as u8;
                (Some(Color::Indexed(n)), 1)
            }
            2 => {
                let r = first.get(3).copied().flatten().unwrap_or(0) as u8;
                let g = first.get(4).copied().flatten().unwrap_or(0) as u8;
                let b = first.get(5).copied().flatten().unwrap_or(0) as u8;
                (Some(Color::Rgb(r, g, b)), 1)
            }
            _ => (None, 1),
        };
    }

    let mode = params.get(1).and_then(|p| p.first().copied().flatten()).unwrap_or(0);
    match mode {
        5 => {
            let n = params.get(2).and_then(|p| p.first().copied().flatten()).unwrap_or(0) as u8;
            (Some(Color::Indexed(n)), 3)
        }
        2 => {
            let r = params.get(2).and_then(|p| p.first().copied().flatten()).unwrap_or(0) as u8;
            let g = params.get(3).and_then(|p| p.first().copied().flatten()).unwrap_or(0) as u8;
            let b = params.get(4).and_then(|p| p.first().copied().flatten()).unwrap_or(0) as u8;
            (Some(Color::Rgb(r, g, b)), 5)
        }
        _ => (None, 1),
    }
}

fn format_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| {
            p.iter()
                .map(|v| v.map(|n| n.to_string()).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(":")
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn handle_osc(params: &[String], truncated: bool, state: &mut EmulatorState, events: &mut EventQueue) {
    if truncated {
        state.metrics.transient_parse_errors += 1;
    }
    let Some(code) = params.first() else {
        return;
    };
    match code.as_str() {
        "0" => {
            if let Some(text) = params.get(1) {
                state.title = text.clone();
                state.icon_name = text.clone();
                events.push(OutboundEvent::TitleChanged(text.clone()));
                events.push(OutboundEvent::IconChanged(text.clone()));
            }
        }
        "1" => {
            if let Some(text) = params.get(1) {
                state.icon_name = text.clone();
                events.push(OutboundEvent::IconChanged(text.clone()));
            }
        }
        "2" => {
            if let Some(text) = params.get(1) {
                state.title = text.clone();
                events.push(OutboundEvent::TitleChanged(text.clone()));
            }
        }
        "8" => {
            let link_params = params.get(1).cloned().unwrap_or_default();
            let uri = params.get(2).cloned().unwrap_or_default();
            if uri.is_empty() {
                state.attrs.hyperlink_id = None;
            } else {
                let id = state.buffer_mut().hyperlinks_mut().intern(Hyperlink {
                    uri,
                    params: link_params,
                });
                state.attrs.hyperlink_id = Some(id);
            }
        }
        "52" => {
            let selection = params.get(1).and_then(|s| s.chars().next()).unwrap_or('c') as u8;
            if let Some(payload) = params.get(2) {
                if payload == "?" {
                    events.push(OutboundEvent::ClipboardReadRequest { selection });
                } else if let Ok(data) = base64::engine::general_purpose::STANDARD.decode(payload) {
                    events.push(OutboundEvent::ClipboardWrite { selection, data });
                }
            }
        }
        _ => {
            state.metrics.unknown_csi += 1;
            events.push(OutboundEvent::UnknownSequence {
                final_byte: b']',
                params: params.join(";"),
            });
        }
    }
}

fn handle_dcs(final_byte: u8, data: Vec<u8>, truncated: bool, state: &mut EmulatorState, events: &mut EventQueue) {
    if truncated {
        state.metrics.transient_parse_errors += 1;
    }
    events.push(OutboundEvent::DcsPayload { final_byte, data });
}

fn register_for_marker(marker: u8) -> Option<Register> {
    match marker {
        b'(' => Some(Register::G0),
        b')' | b'-' => Some(Register::G1),
        b'*' | b'.' => Some(Register::G2),
        b'+' | b'/' => Some(Register::G3),
        _ => None,
    }
}

fn handle_esc_simple(
    final_byte: u8,
    intermediates: &[u8],
    state: &mut EmulatorState,
    events: &mut EventQueue,
) {
    if let Some(&marker) = intermediates.first() {
        if let Some(register) = register_for_marker(marker) {
            let mut code = String::new();
            for &b in &intermediates[1..] {
                code.push(b as char);
            }
            code.push(final_byte as char);
            if let Ok(charset) = code.parse::<Charset94Code>() {
                state.charsets.designate(register, charset);
            }
            return;
        }
    }

    match final_byte {
        b'7' => state.save_cursor(),
        b'8' => state.restore_cursor(),
        b'c' => state.reset(),
        b'D' => cursor_down_or_scroll(state),
        b'M' => reverse_index(state),
        b'E' => next_line(state),
        b'N' => state.charsets.single_shift(Register::G2),
        b'O' => state.charsets.single_shift(Register::G3),
        _ => {
            state.metrics.unknown_csi += 1;
            events.push(OutboundEvent::UnknownSequence {
                final_byte,
                params: String::new(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raxol_buffer::{CellAttrs, Color};

    fn feed(state: &mut EmulatorState, events: &mut EventQueue, parser: &mut crate::parser::Parser, bytes: &[u8]) {
        for cmd in parser.feed(bytes) {
            execute(cmd, state, events);
        }
    }

    #[test]
    fn print_advances_cursor_and_writes_cell() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"hi");
        assert_eq!(state.cursor.x, 2);
        assert_eq!(state.primary.row(0).unwrap()[0].glyph.as_str(), "h");
        assert_eq!(state.primary.row(0).unwrap()[1].glyph.as_str(), "i");
    }

    #[test]
    fn wrap_at_right_edge_moves_to_next_row() {
        let mut state = EmulatorState::new(4, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"abcd");
        assert_eq!(state.cursor.x, 3);
        assert!(state.cursor.pending_wrap);
        feed(&mut state, &mut events, &mut parser, b"e");
        assert_eq!(state.cursor.y, 1);
        assert_eq!(state.cursor.x, 1);
        assert_eq!(state.primary.row(1).unwrap()[0].glyph.as_str(), "e");
    }

    #[test]
    fn sgr_truecolor_and_reset() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1b[38;2;10;20;30mX");
        assert_eq!(state.primary.row(0).unwrap()[0].fg, Color::Rgb(10, 20, 30));
        feed(&mut state, &mut events, &mut parser, b"\x1b[0mY");
        assert_eq!(state.primary.row(0).unwrap()[1].fg, Color::Default);
    }

    #[test]
    fn sgr_colon_subparam_indexed_color() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1b[38:5:42mX");
        assert_eq!(state.primary.row(0).unwrap()[0].fg, Color::Indexed(42));
    }

    #[test]
    fn bold_and_underline_fold_independently() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1b[1;4mX");
        let cell = &state.primary.row(0).unwrap()[0];
        assert!(cell.attrs.contains(CellAttrs::BOLD));
        assert!(cell.attrs.contains(CellAttrs::UNDERLINE));
    }

    #[test]
    fn alt_screen_switch_preserves_primary_cursor() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"abc\x1b[?1049h");
        assert_eq!(state.active, ActiveBuffer::Alternate);
        feed(&mut state, &mut events, &mut parser, b"\x1b[?1049l");
        assert_eq!(state.active, ActiveBuffer::Primary);
        assert_eq!(state.cursor.x, 3);
    }

    #[test]
    fn osc_0_sets_title_and_emits_event() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1b]0;hi there\x07");
        assert_eq!(state.title, "hi there");
        assert!(events
            .drain()
            .any(|e| e == OutboundEvent::TitleChanged("hi there".into())));
    }

    #[test]
    fn osc_52_clipboard_write_decodes_base64() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1b]52;c;aGk=\x07");
        let got: Vec<_> = events.drain().collect();
        assert_eq!(
            got,
            vec![OutboundEvent::ClipboardWrite {
                selection: b'c',
                data: b"hi".to_vec(),
            }]
        );
    }

    #[test]
    fn osc_8_interns_hyperlink_and_applies_to_next_print() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(
            &mut state,
            &mut events,
            &mut parser,
            b"\x1b]8;;https://example.com\x07x",
        );
        let cell = &state.primary.row(0).unwrap()[0];
        let id = cell.hyperlink_id.expect("hyperlink id set");
        assert_eq!(state.primary.hyperlinks().get(id).unwrap().uri, "https://example.com");
    }

    #[test]
    fn dcs_unknown_payload_is_forwarded_verbatim() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1bPqpayload\x1b\\");
        let got: Vec<_> = events.drain().collect();
        assert_eq!(
            got,
            vec![OutboundEvent::DcsPayload {
                final_byte: b'q',
                data: b"payload".to_vec(),
            }]
        );
    }

    #[test]
    fn unknown_csi_final_byte_is_reported_not_panicked() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1b[5;9y");
        let got: Vec<_> = events.drain().collect();
        assert_eq!(got.len(), 1);
        assert!(matches!(got[0], OutboundEvent::UnknownSequence { final_byte: b'y', .. }));
        assert_eq!(state.metrics.unknown_csi, 1);
    }

    #[test]
    fn out_of_range_cursor_move_clamps_and_counts_violation() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1b[999;999H");
        assert_eq!((state.cursor.x, state.cursor.y), (9, 2));
        assert_eq!(state.metrics.contract_violations, 1);
    }

    #[test]
    fn charset_designation_then_shift_out_translates_print() {
        let mut state = EmulatorState::new(10, 3, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1b)0\x0eq");
        assert_eq!(state.primary.row(0).unwrap()[0].glyph.as_str(), "─");
    }

    #[test]
    fn decstbm_sets_scroll_region_and_homes_cursor() {
        let mut state = EmulatorState::new(10, 5, 10);
        let mut events = EventQueue::default();
        let mut parser = crate::parser::Parser::new(1024);
        feed(&mut state, &mut events, &mut parser, b"\x1b[2;4r");
        assert_eq!(state.primary.scroll_region(), (1, 3));
        assert_eq!((state.cursor.x, state.cursor.y), (0, 0));
    }
}
