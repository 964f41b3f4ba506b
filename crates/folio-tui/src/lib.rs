//! Full-screen terminal portfolio.

pub mod common;
pub mod effects;
pub mod events;
pub mod markdown;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod sections;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::path::PathBuf;

use anyhow::Result;
use folio_core::config::Config;
use folio_core::content::Portfolio;
pub use runtime::TuiRuntime;
pub use sections::blog::{POST_NOT_FOUND, post_lines};
use tracing::info;

/// Runs the interactive portfolio until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the configuration is
/// invalid, or the terminal fails.
pub fn run(config: Config, portfolio: Portfolio, config_path: PathBuf) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The portfolio needs a terminal.\n\
             Use `folio blog` or `folio play` for non-interactive output."
        );
    }

    info!(theme = config.theme.as_str(), "starting tui");
    let mut runtime = TuiRuntime::new(config, portfolio, config_path)?;
    let result = runtime.run();
    drop(runtime);
    info!("tui exited");
    result
}
