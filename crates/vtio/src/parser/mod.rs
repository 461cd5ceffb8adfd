pub mod common;
pub mod input;
pub mod output;

pub use self::input::TerminalInputParser;
pub use self::output::TerminalOutputParser;
