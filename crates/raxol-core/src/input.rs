//! Encodes host-side input (key presses, mouse activity, paste) into the
//! byte stream a child process expects to read on its PTY.
//!
//! Delegates the wire format entirely to `vtinput::encode::Encode` — the
//! same legacy key/SGR-mouse encoder the teacher carries for host-side
//! input — and only decides, from [`crate::state::Modes`], whether a
//! mouse event or a bracketed paste frame should be sent at all.
//!
//! `vtinput::Encode` always emits cursor-key sequences for the normal
//! (not application) cursor mode; [`rewrite_cursor_keys_app`] below
//! post-processes its output for the unmodified arrow/Home/End keys when
//! [`Modes::cursor_keys_app`] is set. `vtinput::KeyCode` has no numeric
//! keypad digit variants at all (only `KeypadBegin`, which already encodes
//! to nothing), so [`Modes::keypad_app`] has no byte-level representation
//! to rewrite and remains tracked but inert here.

use base64::Engine;
use vtinput::encode::Encode;
pub use vtinput::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::state::{Modes, MouseTrackingMode};

const MAX_ENCODED_LEN: usize = 64;

/// A key or mouse event to encode and forward to the child process, or a
/// clipboard payload to report back in response to an `OSC 52` query.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    /// Answers an `OutboundEvent::ClipboardReadRequest` with the host's
    /// clipboard contents for the given selection (`c`, `p`, ...).
    ClipboardResponse { selection: u8, data: Vec<u8> },
}

/// Encodes `event` according to the currently active modes, returning the
/// bytes to write to the child's stdin. Mouse events encode to nothing
/// while mouse tracking is off.
#[must_use]
pub fn encode_input(event: &InputEvent, modes: &Modes) -> Vec<u8> {
    match event {
        InputEvent::Key(key) => {
            let mut key = key.clone();
            let mut buf = [0u8; MAX_ENCODED_LEN];
            let n = key.encode(&mut buf).unwrap_or(0);
            let bytes = buf[..n].to_vec();
            if modes.cursor_keys_app {
                rewrite_cursor_keys_app(bytes)
            } else {
                bytes
            }
        }
        InputEvent::Mouse(mouse) => {
            if modes.mouse_tracking == MouseTrackingMode::Off {
                return Vec::new();
            }
            let mut mouse = *mouse;
            let mut buf = [0u8; MAX_ENCODED_LEN];
            let n = mouse.encode(&mut buf).unwrap_or(0);
            buf[..n].to_vec()
        }
        InputEvent::Paste(text) => {
            if modes.bracketed_paste {
                let mut out = Vec::with_capacity(text.len() + 12);
                out.extend_from_slice(b"\x1b[200~");
                out.extend_from_slice(text.as_bytes());
                out.extend_from_slice(b"\x1b[201~");
                out
            } else {
                text.as_bytes().to_vec()
            }
        }
        InputEvent::ClipboardResponse { selection, data } => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(data);
            let mut out = Vec::with_capacity(encoded.len() + 8);
            out.extend_from_slice(b"\x1b]52;");
            out.push(*selection);
            out.push(b';');
            out.extend_from_slice(encoded.as_bytes());
            out.extend_from_slice(b"\x1b\\");
            out
        }
    }
}

/// Rewrites the unmodified-arrow/Home/End `CSI <final>` sequence
/// `vtinput::Encode` emits for normal cursor mode into the `SS3 <final>`
/// sequence application cursor mode uses instead. Any other sequence
/// (modified keys, non-cursor keys) passes through unchanged.
fn rewrite_cursor_keys_app(bytes: Vec<u8>) -> Vec<u8> {
    let is_unmodified_cursor_key = bytes.len() == 3
        && bytes[0] == 0x1b
        && bytes[1] == b'['
        && matches!(bytes[2], b'A' | b'B' | b'C' | b'D' | b'H' | b'F');
    if is_unmodified_cursor_key {
        vec![0x1b, b'O', bytes[2]]
    } else {
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_is_bracketed_when_mode_is_on() {
        let mut modes = Modes::default();
        modes.bracketed_paste = true;
        let bytes = encode_input(&InputEvent::Paste("hi".into()), &modes);
        assert_eq!(bytes, b"\x1b[200~hi\x1b[201~");
    }

    #[test]
    fn paste_is_raw_when_mode_is_off() {
        let modes = Modes::default();
        let bytes = encode_input(&InputEvent::Paste("hi".into()), &modes);
        assert_eq!(bytes, b"hi");
    }

    #[test]
    fn mouse_is_silent_when_tracking_is_off() {
        let modes = Modes::default();
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        let bytes = encode_input(&InputEvent::Mouse(mouse), &modes);
        assert!(bytes.is_empty());
    }

    #[test]
    fn mouse_down_encodes_sgr_with_one_based_coordinates() {
        let mut modes = Modes::default();
        modes.mouse_tracking = MouseTrackingMode::DownUp;
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        let bytes = encode_input(&InputEvent::Mouse(mouse), &modes);
        assert_eq!(bytes, b"\x1b[<0;4;5M");
    }

    #[test]
    fn plain_char_key_encodes_as_itself() {
        let modes = Modes::default();
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let bytes = encode_input(&InputEvent::Key(key), &modes);
        assert_eq!(bytes, b"a");
    }

    #[test]
    fn arrow_key_uses_normal_cursor_sequence_by_default() {
        let modes = Modes::default();
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let bytes = encode_input(&InputEvent::Key(key), &modes);
        assert_eq!(bytes, b"\x1b[A");
    }

    #[test]
    fn arrow_key_uses_application_sequence_when_cursor_keys_app_is_set() {
        let mut modes = Modes::default();
        modes.cursor_keys_app = true;
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let bytes = encode_input(&InputEvent::Key(key), &modes);
        assert_eq!(bytes, b"\x1bOA");
    }

    #[test]
    fn modified_arrow_key_is_unaffected_by_cursor_keys_app() {
        let mut modes = Modes::default();
        modes.cursor_keys_app = true;
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT);
        let bytes = encode_input(&InputEvent::Key(key), &modes);
        assert_eq!(bytes, b"\x1b[1;2A");
    }

    #[test]
    fn clipboard_response_encodes_osc_52_with_base64_payload() {
        let modes = Modes::default();
        let event = InputEvent::ClipboardResponse {
            selection: b'c',
            data: b"hello".to_vec(),
        };
        let bytes = encode_input(&event, &modes);
        assert_eq!(bytes, b"\x1b]52;c;aGVsbG8=\x1b\\");
    }
}
