//! Sequential text reveal.
//!
//! A [`Script`] is an immutable list of lines. A [`Typewriter`] walks the
//! script one character at a time and reports a [`PlaybackState`] snapshot on
//! every reveal and every line transition.
//!
//! The engine never sleeps. Each call returns the delay until it wants to be
//! advanced again, so it can be driven by a [`Scheduler`](crate::scheduler::Scheduler)
//! inside the TUI reducer or by [`play`] on the tokio timer.

mod engine;
mod player;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use engine::{Advance, Typewriter};
pub use player::{PlayOutcome, play};
use unicode_segmentation::UnicodeSegmentation;

// ============================================================================
// Script
// ============================================================================

/// One line of a script with its grapheme boundaries precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScriptLine {
    text: String,
    /// Byte offset of the end of each grapheme cluster.
    ends: Vec<usize>,
}

impl ScriptLine {
    fn new(text: String) -> Self {
        let ends = text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();
        Self { text, ends }
    }
}

/// Ordered, immutable list of lines to reveal.
///
/// Cloning is cheap: lines are shared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    lines: Arc<[ScriptLine]>,
    /// Characters across all lines.
    total_chars: usize,
}

impl Script {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Arc<[ScriptLine]> = lines
            .into_iter()
            .map(|line| ScriptLine::new(line.into()))
            .collect();
        let total_chars = lines.iter().map(|line| line.ends.len()).sum();
        Self { lines, total_chars }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of characters across every line.
    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    /// Returns the full text of line `index`.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|line| line.text.as_str())
    }

    /// Number of user-perceived characters in line `index` (0 if out of range).
    pub fn char_count(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, |line| line.ends.len())
    }

    /// Returns character `n` (0-based) of line `index`.
    pub(crate) fn grapheme(&self, index: usize, n: usize) -> &str {
        let line = &self.lines[index];
        let start = if n == 0 { 0 } else { line.ends[n - 1] };
        &line.text[start..line.ends[n]]
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Rejected typewriter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The character interval must be strictly positive.
    ZeroCharInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCharInterval => {
                write!(f, "Typewriter character interval must be greater than zero")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Timing and mode configuration for a [`Typewriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    char_interval: Duration,
    line_delay: Duration,
    start_delay: Duration,
    looping: bool,
    accumulate: bool,
}

impl TypewriterConfig {
    /// Creates a configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroCharInterval`] if `char_interval` is zero.
    pub fn new(
        char_interval: Duration,
        line_delay: Duration,
        looping: bool,
        accumulate: bool,
    ) -> Result<Self, ConfigError> {
        if char_interval.is_zero() {
            return Err(ConfigError::ZeroCharInterval);
        }
        Ok(Self {
            char_interval,
            line_delay,
            start_delay: Duration::ZERO,
            looping,
            accumulate,
        })
    }

    /// Convenience constructor taking milliseconds.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroCharInterval`] if `char_interval_ms` is zero.
    pub fn from_millis(
        char_interval_ms: u64,
        line_delay_ms: u64,
        looping: bool,
        accumulate: bool,
    ) -> Result<Self, ConfigError> {
        Self::new(
            Duration::from_millis(char_interval_ms),
            Duration::from_millis(line_delay_ms),
            looping,
            accumulate,
        )
    }

    /// Pause between `start()` and the first reveal.
    #[must_use]
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn char_interval(&self) -> Duration {
        self.char_interval
    }

    pub fn line_delay(&self) -> Duration {
        self.line_delay
    }

    pub fn start_delay(&self) -> Duration {
        self.start_delay
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_accumulating(&self) -> bool {
        self.accumulate
    }
}

// ============================================================================
// PlaybackState
// ============================================================================

/// Snapshot of a typewriter's progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackState {
    /// Current line, in `0..=script.len()`. Equals `script.len()` once complete.
    pub line_index: usize,
    /// Characters of the current line revealed so far.
    pub char_index: usize,
    /// Visible text.
    pub revealed: String,
    pub is_complete: bool,
    /// Times a looping script has wrapped back to its first line.
    pub pass: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_char_interval_is_rejected() {
        let err = TypewriterConfig::from_millis(0, 100, false, false).unwrap_err();
        assert_eq!(err, ConfigError::ZeroCharInterval);
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_zero_line_delay_is_allowed() {
        let config = TypewriterConfig::from_millis(1, 0, true, true).unwrap();
        assert_eq!(config.line_delay(), Duration::ZERO);
        assert!(config.is_looping());
        assert!(config.is_accumulating());
    }

    #[test]
    fn test_script_counts_graphemes() {
        let script = Script::new(["✓ ok", "e\u{301}", ""]);
        assert_eq!(script.char_count(0), 4);
        // "e" + combining acute is one user-perceived character
        assert_eq!(script.char_count(1), 1);
        assert_eq!(script.char_count(2), 0);
        assert_eq!(script.char_count(9), 0);
    }

    #[test]
    fn test_script_grapheme() {
        let script = Script::new(["✓ ok"]);
        assert_eq!(script.grapheme(0, 0), "✓");
        assert_eq!(script.grapheme(0, 1), " ");
        assert_eq!(script.grapheme(0, 3), "k");
    }
}
