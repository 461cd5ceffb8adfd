//! Construction-time configuration and the one class of error that can
//! actually fail a call: a bad [`Config`].

use thiserror::Error;

/// Construction parameters for an [`crate::Emulator`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Maximum scrollback rows retained on the primary buffer.
    pub max_scrollback: usize,
    /// Maximum bytes retained for an in-flight DCS payload before it is
    /// truncated (the OSC bound is a fixed 8 KiB, per spec).
    pub max_dcs_bytes: usize,
    /// A host-chosen discriminator a driver may use to pick an outbound
    /// framing (e.g. JSON-over-stdio for editor embedding). The core never
    /// reads this itself; it is inert plumbing carried through `Config`
    /// for the host's own dispatch.
    pub raxol_mode: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            max_scrollback: 10_000,
            max_dcs_bytes: 1024 * 1024,
            raxol_mode: None,
        }
    }
}

/// Fatal construction-time errors (`create` is the only fallible entry
/// point; every other operation on a live [`crate::Emulator`] is
/// infallible by contract).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("width and height must both be at least 1, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
}

impl Config {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
