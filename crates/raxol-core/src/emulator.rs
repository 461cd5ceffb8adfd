//! The public facade: feed bytes in, read a [`FrameView`] back out, encode
//! host input, drain host-facing events.

use raxol_buffer::DamageSet;

use crate::config::{Config, ConfigError};
use crate::event::{EventQueue, OutboundEvent};
use crate::executor;
use crate::frame::FrameView;
use crate::input::{self, InputEvent};
use crate::parser::Parser;
use crate::state::{EmulatorState, Mode};

/// A complete, driver-agnostic terminal emulator core.
///
/// Construction is the only fallible operation (`create`); every method on
/// a live `Emulator` is infallible and never panics on malformed input.
pub struct Emulator {
    state: EmulatorState,
    parser: Parser,
    events: EventQueue,
    config: Config,
}

impl Emulator {
    pub fn create(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: EmulatorState::new(config.width, config.height, config.max_scrollback),
            parser: Parser::new(config.max_dcs_bytes),
            events: EventQueue::default(),
            config,
        })
    }

    /// Feeds `bytes` (the child process's stdout/stderr) through the
    /// parser, dispatching each resulting command into buffer and state
    /// mutations immediately.
    pub fn feed(&mut self, bytes: &[u8]) {
        let state = &mut self.state;
        let events = &mut self.events;
        self.parser.feed_with(bytes, |cmd| {
            executor::execute(cmd, state, events);
        });
    }

    /// Encodes a host-originated key/mouse/paste event into bytes to write
    /// to the child process's stdin.
    #[must_use]
    pub fn input(&self, event: &InputEvent) -> Vec<u8> {
        input::encode_input(event, &self.state.modes)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.state.resize(width, height);
    }

    /// Sets or clears a mode directly, the way a test harness would rather
    /// than feeding raw `DECSET`/`DECRST`/`SM`/`RM` bytes.
    pub fn set_mode(&mut self, mode: Mode, enabled: bool) {
        self.state.set_mode(mode, enabled);
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameView {
        FrameView::capture(&self.state)
    }

    #[must_use]
    pub fn take_damage(&mut self) -> DamageSet {
        self.state.buffer_mut().take_damage().0
    }

    /// Drains events queued since the last call (title changes, bell,
    /// clipboard I/O, unknown/DCS passthrough).
    pub fn events(&mut self) -> impl Iterator<Item = OutboundEvent> + '_ {
        self.events.drain()
    }

    /// `RIS`: equivalent to the child process emitting `ESC c`.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Cumulative counters for recovered-from conditions (unknown commands,
    /// clamped coordinates, truncated captures). Never reset by the core
    /// itself; sample as often as a host wants.
    #[must_use]
    pub fn metrics(&self) -> &crate::metrics::Metrics {
        &self.state.metrics
    }
}
