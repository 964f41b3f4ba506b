//! Events consumed by the reducer.

use std::time::Instant;

use crossterm::event::Event;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick. Due timers run and the frame is redrawn.
    Tick,
    /// Start of a loop iteration: terminal size and the current instant.
    Frame { width: u16, height: u16, now: Instant },
    /// Raw terminal input.
    Terminal(Event),
    /// Outcome of delivering the contact form.
    ContactSent { result: Result<(), String> },
}
