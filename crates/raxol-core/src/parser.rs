//! The escape-sequence parser: bytes in, [`ParsedCommand`]s out.
//!
//! Wraps `vt_push_parser::VTPushParser` exactly as
//! `vtio::parser::output::TerminalOutputParser` does — same UTF-8
//! straddling-buffer technique, same `VTEvent` match — but stops one layer
//! higher: instead of trie-dispatching straight to fully-typed `vtmsg`
//! structs, it emits the generic command shape the executor's single
//! dispatch table needs.

use smallvec::SmallVec;
use vt_push_parser::{VTPushParser, VT_PARSER_INTEREST_ALL, event::VTEvent};

const MAX_UTF8_CHAR_BYTES: usize = 4;
const OSC_MAX_BYTES: usize = 8 * 1024;

/// A CSI/DCS parameter, with optional colon sub-parameters
/// (e.g. `38:2::10:20:30`); an omitted field is `None`.
pub type Param = SmallVec<[Option<u32>; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Print(String),
    Execute(u8),
    Csi {
        final_byte: u8,
        intermediates: SmallVec<[u8; 2]>,
        params: SmallVec<[Param; 8]>,
        private_marker: Option<u8>,
    },
    Osc {
        params: Vec<String>,
        truncated: bool,
    },
    Dcs {
        final_byte: u8,
        intermediates: SmallVec<[u8; 2]>,
        params: SmallVec<[Param; 4]>,
        private_marker: Option<u8>,
        data: Vec<u8>,
        truncated: bool,
    },
    EscSimple {
        final_byte: u8,
        intermediates: SmallVec<[u8; 2]>,
    },
    BracketedPasteStart,
    BracketedPasteEnd,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Capture {
    #[default]
    None,
    Osc,
    Dcs,
}

#[derive(Debug, Default)]
struct DcsHeader {
    private: Option<u8>,
    intermediates: SmallVec<[u8; 2]>,
    final_byte: u8,
}

/// Everything `process_event` touches except the `vt_push_parser` itself.
///
/// Split out so `feed_with`'s callback can borrow this disjointly from
/// `inner` — the same shape `vtio::parser::output::TerminalOutputParser`
/// uses for the same reason.
#[derive(Debug, Default)]
struct ParserState {
    utf8_buffer: [u8; MAX_UTF8_CHAR_BYTES],
    utf8_buffer_len: usize,
    capture: Capture,
    capture_buffer: Vec<u8>,
    dcs_header: Option<DcsHeader>,
    max_dcs_bytes: usize,
}

/// Restartable byte-stream parser; holds only its own state.
pub struct Parser {
    inner: VTPushParser<VT_PARSER_INTEREST_ALL>,
    state: ParserState,
}

impl Parser {
    #[must_use]
    pub fn new(max_dcs_bytes: usize) -> Self {
        Self {
            inner: VTPushParser::new_with_interest::<VT_PARSER_INTEREST_ALL>(),
            state: ParserState {
                max_dcs_bytes,
                ..ParserState::default()
            },
        }
    }

    /// Feeds `bytes` and collects every emitted [`ParsedCommand`].
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<ParsedCommand> {
        let mut out = Vec::new();
        self.feed_with(bytes, |cmd| out.push(cmd));
        out
    }

    /// Feeds `bytes`, invoking `cb` for each emitted [`ParsedCommand`]
    /// without intermediate allocation beyond what a single command needs.
    pub fn feed_with<F: FnMut(ParsedCommand)>(&mut self, bytes: &[u8], mut cb: F) {
        let mut print_run = String::new();
        let state = &mut self.state;
        self.inner.feed_with(bytes, |event: VTEvent| {
            Self::process_event(&event, state, &mut print_run, &mut cb);
        });
        flush_print(&mut print_run, &mut cb);
    }

    fn process_event<F: FnMut(ParsedCommand)>(
        event: &VTEvent,
        state: &mut ParserState,
        print_run: &mut String,
        cb: &mut F,
    ) {
        match event {
            VTEvent::Raw(bytes) => decode_print(bytes, state, print_run),
            VTEvent::C0(byte) => {
                flush_print(print_run, cb);
                cb(ParsedCommand::Execute(*byte));
            }
            VTEvent::Esc(esc) => {
                flush_print(print_run, cb);
                let intermediates: SmallVec<[u8; 2]> = esc.intermediates.as_ref().into();
                cb(ParsedCommand::EscSimple {
                    final_byte: esc.final_byte,
                    intermediates,
                });
            }
            VTEvent::EscInvalid(_) => {}
            VTEvent::Ss2(ss2) => {
                flush_print(print_run, cb);
                cb(ParsedCommand::EscSimple {
                    final_byte: b'N',
                    intermediates: SmallVec::new(),
                });
                cb(ParsedCommand::Print(char::from(ss2.char).to_string()));
            }
            VTEvent::Ss3(ss3) => {
                flush_print(print_run, cb);
                cb(ParsedCommand::EscSimple {
                    final_byte: b'O',
                    intermediates: SmallVec::new(),
                });
                cb(ParsedCommand::Print(char::from(ss3.char).to_string()));
            }
            VTEvent::Csi(csi) => {
                flush_print(print_run, cb);
                let params: SmallVec<[Param; 8]> =
                    csi.params.iter().map(|p| split_param(p)).collect();
                if csi.private.is_none() && csi.final_byte == b'~' {
                    if is_single_param(&params, 200) {
                        cb(ParsedCommand::BracketedPasteStart);
                        return;
                    }
                    if is_single_param(&params, 201) {
                        cb(ParsedCommand::BracketedPasteEnd);
                        return;
                    }
                }
                cb(ParsedCommand::Csi {
                    final_byte: csi.final_byte,
                    intermediates: csi.intermediates.as_ref().into(),
                    params,
                    private_marker: csi.private,
                });
            }
            VTEvent::OscStart => {
                state.capture = Capture::Osc;
                state.capture_buffer.clear();
            }
            VTEvent::OscCancel => {
                state.capture = Capture::None;
                state.capture_buffer.clear();
            }
            VTEvent::OscData(data) => {
                if state.capture == Capture::Osc {
                    state.capture_buffer.extend_from_slice(data);
                }
            }
            VTEvent::OscEnd { data, .. } => {
                flush_print(print_run, cb);
                state.capture_buffer.extend_from_slice(data);
                let raw = std::mem::take(&mut state.capture_buffer);
                state.capture = Capture::None;
                let truncated = raw.len() > OSC_MAX_BYTES;
                let bounded = &raw[..raw.len().min(OSC_MAX_BYTES)];
                let params = String::from_utf8_lossy(bounded)
                    .split(';')
                    .map(str::to_owned)
                    .collect();
                cb(ParsedCommand::Osc { params, truncated });
            }
            VTEvent::DcsStart(dcs) => {
                flush_print(print_run, cb);
                state.dcs_header = Some(DcsHeader {
                    private: dcs.private,
                    intermediates: dcs.intermediates.as_ref().into(),
                    final_byte: dcs.final_byte,
                });
                state.capture = Capture::Dcs;
                state.capture_buffer.clear();
            }
            VTEvent::DcsCancel => {
                state.dcs_header = None;
                state.capture = Capture::None;
                state.capture_buffer.clear();
            }
            VTEvent::DcsData(data) => {
                if state.capture == Capture::Dcs && state.capture_buffer.len() < state.max_dcs_bytes
                {
                    state.capture_buffer.extend_from_slice(data);
                }
            }
            VTEvent::DcsEnd(data) => {
                if state.capture == Capture::Dcs {
                    state.capture_buffer.extend_from_slice(data);
                }
                state.capture = Capture::None;
                let raw = std::mem::take(&mut state.capture_buffer);
                if let Some(header) = state.dcs_header.take() {
                    let truncated = raw.len() > state.max_dcs_bytes;
                    let data = raw[..raw.len().min(state.max_dcs_bytes)].to_vec();
                    cb(ParsedCommand::Dcs {
                        final_byte: header.final_byte,
                        intermediates: header.intermediates,
                        params: SmallVec::new(),
                        private_marker: header.private,
                        data,
                        truncated,
                    });
                }
            }
        }
    }
}

fn decode_print(bytes: &[u8], state: &mut ParserState, print_run: &mut String) {
    let mut input = bytes;
    if state.utf8_buffer_len > 0 {
        let have = state.utf8_buffer_len;
        let take = input.len().min(MAX_UTF8_CHAR_BYTES - have);
        let mut tmp = [0u8; MAX_UTF8_CHAR_BYTES];
        tmp[..have].copy_from_slice(&state.utf8_buffer[..have]);
        tmp[have..have + take].copy_from_slice(&input[..take]);
        let combined = &tmp[..have + take];
        match std::str::from_utf8(combined) {
            Ok(s) => {
                print_run.push_str(s);
                state.utf8_buffer_len = 0;
                input = &input[take..];
            }
            Err(e) => {
                let valid = e.valid_up_to();
                if valid > 0 {
                    print_run.push_str(std::str::from_utf8(&combined[..valid]).unwrap());
                }
                match e.error_len() {
                    Some(_) => {
                        print_run.push('\u{FFFD}');
                        state.utf8_buffer_len = 0;
                    }
                    None => {
                        let remaining = &combined[valid..];
                        state.utf8_buffer[..remaining.len()].copy_from_slice(remaining);
                        state.utf8_buffer_len = remaining.len();
                        return;
                    }
                }
                input = &input[take..];
            }
        }
    }

    loop {
        match std::str::from_utf8(input) {
            Ok(s) => {
                print_run.push_str(s);
                break;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                print_run.push_str(std::str::from_utf8(&input[..valid]).unwrap());
                match e.error_len() {
                    Some(bad_len) => {
                        print_run.push('\u{FFFD}');
                        input = &input[valid + bad_len..];
                    }
                    None => {
                        let remaining = &input[valid..];
                        state.utf8_buffer[..remaining.len()].copy_from_slice(remaining);
                        state.utf8_buffer_len = remaining.len();
                        break;
                    }
                }
            }
        }
    }
}

fn flush_print<F: FnMut(ParsedCommand)>(print_run: &mut String, cb: &mut F) {
    if !print_run.is_empty() {
        cb(ParsedCommand::Print(std::mem::take(print_run)));
    }
}

fn split_param(raw: &[u8]) -> Param {
    if raw.is_empty() {
        let mut p = Param::new();
        p.push(None);
        return p;
    }
    raw.split(|&b| b == b':')
        .map(|part| {
            if part.is_empty() {
                None
            } else {
                atoi_simd::parse::<u32>(part).ok()
            }
        })
        .collect()
}

fn is_single_param(params: &[Param], value: u32) -> bool {
    params.len() == 1 && params[0].first().copied() == Some(Some(value))
}
