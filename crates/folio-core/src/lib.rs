//! Core of the folio terminal portfolio.
//!
//! Everything here is terminal-agnostic: the typewriter engine and its
//! scheduler, the presentation shell, portfolio content, configuration and
//! logging setup.

pub mod caret;
pub mod carousel;
pub mod config;
pub mod contact;
pub mod content;
pub mod logging;
pub mod scheduler;
pub mod shell;
pub mod theme;
pub mod typewriter;
