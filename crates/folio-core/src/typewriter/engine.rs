use std::time::Duration;

use super::{PlaybackState, Script, TypewriterConfig};

/// Result of starting or advancing a [`Typewriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// Snapshot emitted by this step, if the visible state changed.
    pub emitted: Option<PlaybackState>,
    /// Delay until the engine must be advanced again. `None` means playback
    /// is over (complete or stopped) and nothing should be scheduled.
    pub next: Option<Duration>,
}

impl Advance {
    fn emit(state: &PlaybackState, next: Option<Duration>) -> Self {
        Self {
            emitted: Some(state.clone()),
            next,
        }
    }

    fn wait(next: Duration) -> Self {
        Self {
            emitted: None,
            next: Some(next),
        }
    }

    fn idle() -> Self {
        Self {
            emitted: None,
            next: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Not started, or stopped.
    Idle,
    /// Waiting out the start delay before line 0.
    Starting,
    /// Revealing characters of the current line.
    Revealing,
    /// Every character is visible; the completion transition is pending.
    LineEnd,
    /// Waiting `line_delay` before the next line.
    LineDelay,
    Complete,
}

/// Timing state machine that reveals a [`Script`] character by character.
///
/// The caller drives it: [`start`](Self::start) and every
/// [`advance`](Self::advance) return the delay until the next `advance`.
/// Nothing happens between calls, so stopping is just never calling
/// `advance` again; [`stop`](Self::stop) makes that explicit and turns any
/// late `advance` into a no-op.
#[derive(Debug, Clone)]
pub struct Typewriter {
    script: Script,
    config: TypewriterConfig,
    state: PlaybackState,
    phase: Phase,
}

impl Typewriter {
    pub fn new(script: Script, config: TypewriterConfig) -> Self {
        Self {
            script,
            config,
            state: PlaybackState::default(),
            phase: Phase::Idle,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    /// Current snapshot.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// True while playback has pending work.
    pub fn is_running(&self) -> bool {
        !matches!(self.phase, Phase::Idle | Phase::Complete)
    }

    /// Resets to line 0, char 0, empty buffer and begins playback.
    ///
    /// An empty script completes immediately: the returned step carries one
    /// complete snapshot and schedules nothing.
    pub fn start(&mut self) -> Advance {
        self.state = PlaybackState::default();

        if self.script.is_empty() {
            self.phase = Phase::Complete;
            self.state.is_complete = true;
            return Advance::emit(&self.state, None);
        }

        let start_delay = self.config.start_delay();
        if start_delay.is_zero() {
            self.enter_first_line()
        } else {
            self.phase = Phase::Starting;
            Advance::wait(start_delay)
        }
    }

    /// Halts playback. No further snapshots are produced until the next
    /// [`start`](Self::start). Calling it repeatedly is harmless.
    pub fn stop(&mut self) {
        if self.phase != Phase::Complete {
            self.phase = Phase::Idle;
        }
    }

    /// Stops and clears back to the initial snapshot.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.state = PlaybackState::default();
    }

    /// Performs the step that was due after the previously returned delay.
    pub fn advance(&mut self) -> Advance {
        match self.phase {
            Phase::Idle | Phase::Complete => Advance::idle(),
            Phase::Starting => self.enter_first_line(),
            Phase::Revealing => self.reveal_next(),
            Phase::LineEnd => self.complete_line(),
            Phase::LineDelay => self.next_line(),
        }
    }

    fn reveal_next(&mut self) -> Advance {
        let line = self.state.line_index;
        let glyph = self.script.grapheme(line, self.state.char_index);
        self.state.revealed.push_str(glyph);
        self.state.char_index += 1;

        if self.state.char_index >= self.script.char_count(line) {
            // The line completes one character tick after its last reveal.
            self.phase = Phase::LineEnd;
        }
        Advance::emit(&self.state, Some(self.config.char_interval()))
    }

    fn complete_line(&mut self) -> Advance {
        let has_following = self.state.line_index + 1 < self.script.len();
        if self.config.is_accumulating() {
            if has_following {
                self.state.revealed.push('\n');
            }
        } else {
            self.state.revealed.clear();
        }
        self.phase = Phase::LineDelay;
        Advance::emit(&self.state, Some(self.config.line_delay()))
    }

    fn enter_first_line(&mut self) -> Advance {
        self.begin_line();
        match self.phase {
            Phase::LineEnd => self.complete_line(),
            _ => Advance::wait(self.config.char_interval()),
        }
    }

    fn next_line(&mut self) -> Advance {
        let next = self.state.line_index + 1;
        if next < self.script.len() {
            self.state.line_index = next;
        } else if self.config.is_looping() && !self.is_instant_pass() {
            self.state.line_index = 0;
            self.state.revealed.clear();
            self.state.pass += 1;
        } else {
            self.state.line_index = self.script.len();
            self.state.char_index = 0;
            self.state.is_complete = true;
            self.phase = Phase::Complete;
            return Advance::emit(&self.state, None);
        }

        self.state.char_index = 0;
        self.begin_line();
        match self.phase {
            // Zero-length line: nothing to reveal, complete right away.
            Phase::LineEnd => Advance::emit(&self.state, Some(Duration::ZERO)),
            _ => Advance::emit(&self.state, Some(self.config.char_interval())),
        }
    }

    /// True when a pass takes no time: no characters and no line delay.
    /// Such a script completes after one pass even when looping.
    fn is_instant_pass(&self) -> bool {
        self.script.total_chars() == 0 && self.config.line_delay().is_zero()
    }

    fn begin_line(&mut self) {
        self.phase = if self.script.char_count(self.state.line_index) == 0 {
            Phase::LineEnd
        } else {
            Phase::Revealing
        };
    }
}
