//! Outbound notifications a host needs to act on (set a window title, ring
//! a bell, forward a clipboard write) but that don't belong in the damage
//! model — these happen once, they aren't a diff of persistent state.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    TitleChanged(String),
    IconChanged(String),
    BellRung,
    /// OSC 52: host should place `data` (already base64-decoded) on the
    /// named clipboard selection.
    ClipboardWrite { selection: u8, data: Vec<u8> },
    /// OSC 52 with `?` payload: host should reply with the clipboard
    /// contents, framed the same way a write would have been sent.
    ClipboardReadRequest { selection: u8 },
    HyperlinkActivated { uri: String, params: String },
    /// A CSI/ESC/OSC this executor recognized the shape of but not the
    /// specific command; carried for diagnostics, never panics on.
    UnknownSequence { final_byte: u8, params: String },
    /// A DCS payload with no specific handler (e.g. Sixel, tmux control
    /// mode) passed through verbatim for a host that wants to act on it.
    DcsPayload { final_byte: u8, data: Vec<u8> },
}

/// FIFO of events produced by `feed` calls, drained by the host via
/// [`crate::Emulator::events`].
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<OutboundEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: OutboundEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, OutboundEvent> {
        self.events.drain(..)
    }
}
