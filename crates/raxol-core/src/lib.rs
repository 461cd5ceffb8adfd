//! Terminal emulator core: escape-sequence parsing, screen-buffer state,
//! and the command executor that ties them together.
//!
//! Driven by a single `Emulator`: feed it child-process output, read a
//! [`FrameView`] snapshot back, encode host input with [`input::encode_input`].
//! The screen-buffer engine itself (grid, scrollback, damage) lives in
//! [`raxol_buffer`]; this crate owns everything escape-sequence shaped.

pub mod charset;
pub mod config;
pub mod emulator;
pub mod event;
pub mod executor;
pub mod frame;
pub mod input;
pub mod metrics;
pub mod parser;
pub mod state;

pub use config::{Config, ConfigError};
pub use emulator::Emulator;
pub use event::OutboundEvent;
pub use frame::{CellView, CursorView, FrameView};
pub use input::InputEvent;
pub use metrics::Metrics;
pub use state::{ActiveBuffer, CursorStyle, Mode, MouseEncoding, MouseTrackingMode};
