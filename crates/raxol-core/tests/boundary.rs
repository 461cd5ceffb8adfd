//! Literal boundary scenarios and cross-cutting invariants.

use raxol_buffer::{Color, DamageSet};
use raxol_core::{Config, Emulator, InputEvent, Mode, OutboundEvent};
use vtinput::{KeyCode, KeyEvent, KeyModifiers};

fn emu(width: usize, height: usize) -> Emulator {
    Emulator::create(Config {
        width,
        height,
        ..Config::default()
    })
    .unwrap()
}

#[test]
fn wrap_at_right_edge() {
    let mut e = emu(10, 3);
    e.feed(&[b'A'; 11]);
    let frame = e.snapshot();
    let row0: String = frame.cells[0].iter().map(|c| c.text.clone()).collect();
    assert_eq!(row0, "AAAAAAAAAA");
    assert_eq!(frame.cells[1][0].text, "A");
    assert_eq!((frame.cursor.x, frame.cursor.y), (1, 1));
}

#[test]
fn sgr_true_color() {
    let mut e = emu(10, 3);
    e.feed(b"\x1b[38;2;10;20;30mX");
    let frame = e.snapshot();
    assert_eq!(frame.cells[0][0].text, "X");
    assert_eq!(frame.cells[0][0].fg, Color::Rgb(10, 20, 30));
}

#[test]
fn alt_screen_switch_preserves_primary() {
    let mut e = emu(10, 3);
    e.feed(b"hello");
    e.feed(b"\x1b[?1049h");
    e.feed(b"world");
    e.feed(b"\x1b[?1049l");
    let frame = e.snapshot();
    let row0: String = frame.cells[0][..5].iter().map(|c| c.text.clone()).collect();
    assert_eq!(row0, "hello");
    assert_eq!((frame.cursor.x, frame.cursor.y), (5, 0));
}

#[test]
fn scrollback_eviction() {
    let mut e = Emulator::create(Config {
        width: 5,
        height: 2,
        max_scrollback: 3,
        ..Config::default()
    })
    .unwrap();
    for _ in 0..5 {
        e.feed(b"\n");
    }
    let frame = e.snapshot();
    assert_eq!(frame.scrollback_rows, 3);
    for row in &frame.cells {
        for cell in row {
            assert_eq!(cell.text, " ");
        }
    }
    assert_eq!((frame.cursor.x, frame.cursor.y), (0, 1));
}

#[test]
fn osc_52_clipboard_write() {
    let mut e = emu(10, 3);
    e.feed(b"\x1b]52;c;aGVsbG8=\x07");
    let events: Vec<_> = e.events().collect();
    assert_eq!(
        events,
        vec![OutboundEvent::ClipboardWrite {
            selection: b'c',
            data: b"hello".to_vec(),
        }]
    );
}

#[test]
fn bracketed_paste_framing() {
    let mut e = emu(10, 3);
    e.feed(b"\x1b[?2004h");
    let bytes = e.input(&InputEvent::Paste("ab".into()));
    assert_eq!(bytes, b"\x1b[200~ab\x1b[201~");
}

#[test]
fn cursor_stays_within_bounds_under_heavy_motion() {
    let mut e = emu(10, 3);
    e.feed(b"\x1b[999;999H");
    let frame = e.snapshot();
    assert!(frame.cursor.x < frame.width);
    assert!(frame.cursor.y < frame.height);
    e.feed(b"\x1b[999A\x1b[999D");
    let frame = e.snapshot();
    assert!(frame.cursor.x < frame.width);
    assert!(frame.cursor.y < frame.height);
}

#[test]
fn row_width_sum_matches_buffer_width() {
    // CellView carries no per-cell width, so this invariant (cell widths,
    // counting continuation cells, sum to the row width) is checked
    // directly against the buffer engine rather than through a snapshot.
    let mut buffer = raxol_buffer::Buffer::new(10, 2, 0);
    buffer.write_text(0, 0, "一二三", Color::Default, Color::Default, Default::default());
    let total: usize = buffer.row(0).unwrap().iter().map(|c| c.width as usize).sum();
    assert_eq!(total, buffer.width());
}

#[test]
fn scrollback_never_exceeds_configured_maximum() {
    let mut e = Emulator::create(Config {
        width: 5,
        height: 2,
        max_scrollback: 3,
        ..Config::default()
    })
    .unwrap();
    for _ in 0..50 {
        e.feed(b"\n");
    }
    assert_eq!(e.snapshot().scrollback_rows, 3);
}

#[test]
fn active_buffer_switch_reentry_is_idempotent() {
    let mut e = emu(10, 3);
    e.feed(b"abc");
    e.feed(b"\x1b[?1049h\x1b[?1049h");
    e.feed(b"\x1b[?1049l\x1b[?1049l");
    let frame = e.snapshot();
    assert_eq!((frame.cursor.x, frame.cursor.y), (3, 0));
}

#[test]
fn decsc_decrc_restores_cursor_and_attrs_exactly() {
    let mut e = emu(10, 3);
    e.feed(b"\x1b[5;5H\x1b[1;31m\x1b7");
    e.feed(b"\x1b[1;1H\x1b[0mX");
    e.feed(b"\x1b8Y");
    let frame = e.snapshot();
    assert_eq!((frame.cursor.x, frame.cursor.y), (5, 5));
    assert_eq!(frame.cells[4][4].text, "Y");
    assert_eq!(frame.cells[4][4].fg, Color::Indexed(1));
}

#[test]
fn ris_resets_title_and_cursor_like_a_fresh_emulator() {
    let mut e = emu(10, 3);
    e.feed(b"\x1b]0;custom\x07abc\x1b[31m");
    e.feed(b"\x1bc");
    let frame = e.snapshot();
    assert_eq!(frame.title, "");
    assert_eq!((frame.cursor.x, frame.cursor.y), (0, 0));
    assert_eq!(frame.cells[0][0].text, " ");
}

#[test]
fn set_mode_then_unset_returns_to_prior_state() {
    let mut e = emu(10, 3);
    e.set_mode(Mode::AutoWrap, false);
    e.feed(&[b'A'; 12]); // would wrap if auto_wrap were on
    let frame_off = e.snapshot();
    assert_eq!((frame_off.cursor.x, frame_off.cursor.y), (9, 0));
    e.set_mode(Mode::AutoWrap, true);
    e.feed(b"\x1b[1;1H");
    e.feed(&[b'B'; 11]);
    let frame_on = e.snapshot();
    assert_eq!((frame_on.cursor.x, frame_on.cursor.y), (1, 1));
}

#[test]
fn resize_rejoins_an_auto_wrapped_line_before_rewrapping() {
    let mut e = emu(10, 3);
    e.feed(&[b'A'; 15]); // wraps after column 10, onto row 1
    e.resize(20, 3);
    let frame = e.snapshot();
    let row0: String = frame.cells[0][..15].iter().map(|c| c.text.clone()).collect();
    assert_eq!(row0, "A".repeat(15));
    assert_eq!(frame.cells[0][15].text, " ");
}

#[test]
fn key_event_roundtrips_through_input_encoder() {
    let e = emu(10, 3);
    let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
    let bytes = e.input(&InputEvent::Key(key));
    assert_eq!(bytes, b"a");
}

#[test]
fn damage_is_cleared_after_take_damage() {
    let mut e = emu(10, 3);
    e.feed(b"hello");
    assert_ne!(e.take_damage(), DamageSet::None);
    assert_eq!(e.take_damage(), DamageSet::None);
}

#[test]
fn unknown_command_and_out_of_range_move_are_counted_not_fatal() {
    let mut e = emu(10, 3);
    e.feed(b"\x1b[5;9y"); // no such CSI final
    e.feed(b"\x1b[999;999H"); // clamps onto the grid
    assert_eq!(e.metrics().unknown_csi, 1);
    assert_eq!(e.metrics().contract_violations, 1);
    let frame = e.snapshot();
    assert_eq!((frame.cursor.x, frame.cursor.y), (9, 2));
}
