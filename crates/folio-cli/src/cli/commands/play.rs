//! Non-interactive typewriter playback on stdout.

use std::io::{self, Write};
use std::ops::ControlFlow;

use anyhow::{Context, Result};
use folio_core::config::Config;
use folio_core::content::Portfolio;
use folio_core::typewriter::{PlayOutcome, PlaybackState, Typewriter, play};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Playback was stopped with Ctrl-C.
#[derive(Debug)]
pub struct InterruptedError;

impl std::fmt::Display for InterruptedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interrupted")
    }
}

impl std::error::Error for InterruptedError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScriptKind {
    /// Code snippets, replaced in a loop
    Playground,
    /// Shell session, typed once
    Terminal,
}

/// Timing overrides from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    pub char_ms: Option<u64>,
    pub line_ms: Option<u64>,
    pub start_ms: Option<u64>,
    pub loops: Option<u64>,
}

impl PlayOptions {
    fn apply(&self, char_ms: &mut u64, line_ms: &mut u64, start_ms: &mut u64) {
        if let Some(v) = self.char_ms {
            *char_ms = v;
        }
        if let Some(v) = self.line_ms {
            *line_ms = v;
        }
        if let Some(v) = self.start_ms {
            *start_ms = v;
        }
    }
}

pub fn run(
    kind: ScriptKind,
    options: &PlayOptions,
    config: &Config,
    portfolio: &Portfolio,
) -> Result<()> {
    let mut config = config.clone();
    let (script, timing) = match kind {
        ScriptKind::Playground => {
            let p = &mut config.playground;
            options.apply(&mut p.char_interval_ms, &mut p.line_delay_ms, &mut p.start_delay_ms);
            (portfolio.playground_script(), config.playground_typewriter())
        }
        ScriptKind::Terminal => {
            let t = &mut config.terminal;
            options.apply(&mut t.char_interval_ms, &mut t.line_delay_ms, &mut t.start_delay_ms);
            (portfolio.terminal_script(), config.terminal_typewriter())
        }
    };
    let timing = timing.context("Invalid typewriter timing")?;
    let mut typewriter = Typewriter::new(script, timing);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    ctrlc::set_handler(move || trigger.cancel()).context("Failed to set Ctrl-C handler")?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("create tokio runtime")?;

    info!(script = ?kind, lines = typewriter.script().len(), "playing script");
    let mut printer = Printer::new(io::stdout().lock());
    let loops = options.loops.and_then(|n| usize::try_from(n).ok());

    let outcome = rt.block_on(play(&mut typewriter, &cancel, |state| {
        if loops.is_some_and(|n| state.pass >= n) {
            return ControlFlow::Break(());
        }
        printer.show(state)
    }));
    info!(?outcome, "playback finished");

    printer.finish()?;
    if outcome == PlayOutcome::Cancelled {
        return Err(InterruptedError.into());
    }
    Ok(())
}

/// Writes successive snapshots as a stream of text.
///
/// Growth is written as the new suffix. A snapshot that does not extend the
/// previous one (a cleared snippet) starts a new paragraph.
struct Printer<W: Write> {
    out: W,
    shown: String,
    error: Option<io::Error>,
}

impl<W: Write> Printer<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            shown: String::new(),
            error: None,
        }
    }

    fn show(&mut self, state: &PlaybackState) -> ControlFlow<()> {
        match self.write(&state.revealed) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                self.error = Some(e);
                ControlFlow::Break(())
            }
        }
    }

    fn write(&mut self, revealed: &str) -> io::Result<()> {
        if let Some(rest) = revealed.strip_prefix(self.shown.as_str()) {
            self.out.write_all(rest.as_bytes())?;
        } else {
            self.out.write_all(b"\n\n")?;
            self.out.write_all(revealed.as_bytes())?;
        }
        self.out.flush()?;
        self.shown.clear();
        self.shown.push_str(revealed);
        Ok(())
    }

    /// Ends the output with a newline and reports any write error.
    /// A closed pipe is not an error.
    fn finish(mut self) -> Result<()> {
        if let Some(e) = self.error.take() {
            if e.kind() == io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(e).context("Failed to write to stdout");
        }
        if !self.shown.is_empty() && !self.shown.ends_with('\n') {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
