//! Counters for conditions that are recovered from rather than surfaced as
//! errors — unknown commands, truncated captures, clamped coordinates.
//! Never resets itself; a host samples it however often it likes.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// CSI/OSC/ESC finals the executor didn't recognize.
    pub unknown_csi: u64,
    /// Truncated OSC/DCS captures and invalid-UTF-8 replacement chars.
    pub transient_parse_errors: u64,
    /// Cursor moves or coordinates clamped to stay on-grid.
    pub contract_violations: u64,
}
