//! Presentation shell for a typewriter.
//!
//! A [`TypewriterShell`] binds one [`Typewriter`] to a caret and a private
//! [`Scheduler`]. The view that owns it calls [`mount`](TypewriterShell::mount)
//! when it becomes active, [`poll`](TypewriterShell::poll) on every tick, and
//! [`unmount`](TypewriterShell::unmount) when it goes away. Unmounting cancels
//! every pending timer before returning.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::caret::CaretBlink;
use crate::config::Config;
use crate::scheduler::Scheduler;
use crate::typewriter::{
    Advance, ConfigError, PlaybackState, Script, Typewriter, TypewriterConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellTimer {
    Reveal,
    Caret,
}

/// A typewriter plus blinking caret with a mount/unmount lifecycle.
#[derive(Debug)]
pub struct TypewriterShell {
    label: &'static str,
    engine: Typewriter,
    caret: CaretBlink,
    timers: Scheduler<ShellTimer>,
    mounted: bool,
}

impl TypewriterShell {
    pub fn new(
        label: &'static str,
        script: Script,
        config: TypewriterConfig,
        caret_period: Duration,
    ) -> Self {
        Self {
            label,
            engine: Typewriter::new(script, config),
            caret: CaretBlink::new(caret_period),
            timers: Scheduler::new(),
            mounted: false,
        }
    }

    /// Code snippets replacing each other in a loop.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the configured character interval is zero.
    pub fn playground(script: Script, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(
            "playground",
            script,
            config.playground_typewriter()?,
            config.caret_period(),
        ))
    }

    /// Terminal transcript typed once, line after line.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the configured character interval is zero.
    pub fn terminal(script: Script, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(
            "terminal",
            script,
            config.terminal_typewriter()?,
            config.caret_period(),
        ))
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Visible text.
    pub fn text(&self) -> &str {
        &self.engine.state().revealed
    }

    pub fn state(&self) -> &PlaybackState {
        self.engine.state()
    }

    pub fn script(&self) -> &Script {
        self.engine.script()
    }

    pub fn caret_visible(&self) -> bool {
        self.caret.is_visible()
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Starts playback from line 0. Mounting an already mounted shell
    /// restarts it.
    ///
    /// Returns the snapshots emitted at `now` (an empty script completes
    /// immediately).
    pub fn mount(&mut self, now: Instant) -> Vec<PlaybackState> {
        if self.mounted {
            self.unmount();
        }
        debug!(shell = self.label, lines = self.script().len(), "mounting typewriter");
        self.mounted = true;

        self.caret.reset();
        let half = self.caret.half_period();
        if !half.is_zero() {
            self.timers.schedule(ShellTimer::Caret, now + half);
        }

        let step = self.engine.start();
        let mut emitted = Vec::new();
        self.apply(step, now, &mut emitted);
        emitted.extend(self.poll(now));
        emitted
    }

    /// Cancels all timers and resets to the initial empty state.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        debug!(shell = self.label, "unmounting typewriter");
        self.timers.cancel_all();
        self.engine.reset();
        self.caret.reset();
        self.mounted = false;
    }

    /// Runs every timer due at or before `now`, in order.
    ///
    /// Returns the snapshots emitted along the way.
    pub fn poll(&mut self, now: Instant) -> Vec<PlaybackState> {
        let mut emitted = Vec::new();
        while let Some(due) = self.timers.pop_due(now) {
            match due.key {
                ShellTimer::Reveal => {
                    let step = self.engine.advance();
                    self.apply(step, due.at, &mut emitted);
                }
                ShellTimer::Caret => {
                    self.caret.toggle();
                    let half = self.caret.half_period();
                    self.timers.schedule(ShellTimer::Caret, due.at + half);
                }
            }
        }
        emitted
    }

    fn apply(&mut self, step: Advance, at: Instant, emitted: &mut Vec<PlaybackState>) {
        if let Some(state) = step.emitted {
            emitted.push(state);
        }
        if let Some(next) = step.next {
            self.timers.schedule(ShellTimer::Reveal, at + next);
        }
    }
}

impl Drop for TypewriterShell {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn shell(lines: &[&str], looping: bool, accumulate: bool) -> TypewriterShell {
        let config = TypewriterConfig::from_millis(50, 3000, looping, accumulate).unwrap();
        TypewriterShell::new("test", Script::new(lines.iter().copied()), config, ms(1000))
    }

    fn revealed(states: &[PlaybackState]) -> Vec<&str> {
        states.iter().map(|s| s.revealed.as_str()).collect()
    }

    #[test]
    fn test_poll_catches_up_in_order() {
        let base = Instant::now();
        let mut sh = shell(&["ab"], true, false);
        assert!(sh.mount(base).is_empty());

        assert_eq!(revealed(&sh.poll(base + ms(49))), Vec::<&str>::new());
        assert_eq!(revealed(&sh.poll(base + ms(100))), vec!["a", "ab"]);
        assert_eq!(revealed(&sh.poll(base + ms(150))), vec![""]);
        assert_eq!(sh.text(), "");
        assert_eq!(revealed(&sh.poll(base + ms(3200))), vec!["", "a"]);
        assert_eq!(sh.text(), "a");
    }

    #[test]
    fn test_caret_blinks_independently() {
        let base = Instant::now();
        let mut sh = shell(&["abc"], false, true);
        sh.mount(base);
        assert!(sh.caret_visible());
        sh.poll(base + ms(500));
        assert!(!sh.caret_visible());
        sh.poll(base + ms(1000));
        assert!(sh.caret_visible());
        // Caret keeps blinking after playback completes.
        sh.poll(base + ms(10_000));
        assert!(sh.state().is_complete);
        assert!(sh.next_deadline().is_some());
    }

    #[test]
    fn test_unmount_cancels_and_resets() {
        let base = Instant::now();
        let mut sh = shell(&["hello"], false, true);
        sh.mount(base);
        sh.poll(base + ms(120));
        assert_eq!(sh.text(), "he");

        sh.unmount();
        assert!(!sh.is_mounted());
        assert_eq!(sh.text(), "");
        assert_eq!(sh.next_deadline(), None);
        assert!(sh.poll(base + ms(10_000)).is_empty());
        assert_eq!(sh.state(), &PlaybackState::default());
    }

    #[test]
    fn test_remount_restarts_from_line_zero() {
        let base = Instant::now();
        let mut sh = shell(&["one", "two"], false, true);
        sh.mount(base);
        sh.poll(base + ms(3500));
        assert!(sh.text().starts_with("one\nt"));

        sh.unmount();
        let later = base + ms(5000);
        sh.mount(later);
        let states = sh.poll(later + ms(50));
        assert_eq!(revealed(&states), vec!["o"]);
        assert_eq!(states[0].line_index, 0);
    }

    #[test]
    fn test_mount_twice_restarts() {
        let base = Instant::now();
        let mut sh = shell(&["abc"], false, false);
        sh.mount(base);
        sh.poll(base + ms(100));
        sh.mount(base + ms(100));
        assert_eq!(sh.text(), "");
        assert_eq!(revealed(&sh.poll(base + ms(150))), vec!["a"]);
    }

    #[test]
    fn test_terminal_waits_start_delay() {
        let base = Instant::now();
        let mut sh = TypewriterShell::terminal(Script::new(["$ ls"]), &Config::default()).unwrap();
        assert_eq!(sh.label(), "terminal");
        sh.mount(base);
        assert!(sh.poll(base + ms(340)).is_empty());
        assert_eq!(revealed(&sh.poll(base + ms(350))), vec!["$"]);
    }

    #[test]
    fn test_playground_rejects_zero_interval() {
        let mut config = Config::default();
        config.playground.char_interval_ms = 0;
        assert!(TypewriterShell::playground(Script::new(["x"]), &config).is_err());
    }

    #[test]
    fn test_blank_looping_script_mounts_and_settles() {
        let base = Instant::now();
        let config = TypewriterConfig::from_millis(50, 0, true, false).unwrap();
        let mut sh = TypewriterShell::new("test", Script::new(["", ""]), config, ms(1000));
        let states = sh.mount(base);
        assert!(states.last().unwrap().is_complete);
        assert!(sh.poll(base + ms(10)).is_empty());
        // Only the caret is left to schedule.
        assert_eq!(sh.next_deadline(), Some(base + ms(500)));
    }

    #[test]
    fn test_empty_script_completes_on_mount() {
        let base = Instant::now();
        let mut sh = shell(&[], false, true);
        let states = sh.mount(base);
        assert_eq!(states.len(), 1);
        assert!(states[0].is_complete);
        assert_eq!(sh.text(), "");
    }
}
