//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use folio_core::config::{self, Config};
use folio_core::content::Portfolio;
use folio_core::logging::{self, WorkerGuard};

pub mod commands;

use commands::play::{PlayOptions, ScriptKind};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Terminal portfolio with a live typewriter code playground")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Portfolio content file (overrides `content_file` from config)
    #[arg(long, value_name = "PATH", env = "FOLIO_CONTENT", global = true)]
    content: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Types a script to stdout (Ctrl-C stops)
    Play {
        /// Which script to play
        #[arg(value_enum)]
        script: ScriptKind,

        /// Milliseconds between characters
        #[arg(long, value_name = "MS")]
        char_ms: Option<u64>,

        /// Milliseconds to wait after each line
        #[arg(long, value_name = "MS")]
        line_ms: Option<u64>,

        /// Milliseconds before the first character
        #[arg(long, value_name = "MS")]
        start_ms: Option<u64>,

        /// Stop a looping script after this many passes
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
        loops: Option<u64>,
    },

    /// Lists blog posts, or prints one as plain text
    Blog {
        /// The ID of the post to print
        #[arg(value_name = "POST_ID")]
        id: Option<u32>,

        /// Wrap width for the post body
        #[arg(long, default_value_t = 80)]
        width: usize,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        Some(Commands::Blog { id, width }) => {
            let config = Config::load()?;
            let portfolio = load_portfolio(cli.content, &config)?;
            commands::blog::run(&portfolio, id, width)
        }
        Some(Commands::Play {
            script,
            char_ms,
            line_ms,
            start_ms,
            loops,
        }) => {
            let config = Config::load()?;
            let _guard = init_logging(&config);
            let portfolio = load_portfolio(cli.content, &config)?;
            let options = PlayOptions {
                char_ms,
                line_ms,
                start_ms,
                loops,
            };
            commands::play::run(script, &options, &config, &portfolio)
        }
        None => {
            let config = Config::load()?;
            let _guard = init_logging(&config);
            let portfolio = load_portfolio(cli.content, &config)?;
            folio_tui::run(config, portfolio, config::paths::config_path())
        }
    }
}

/// `--content` wins over the configured file; neither means built-in content.
fn load_portfolio(content: Option<PathBuf>, config: &Config) -> Result<Portfolio> {
    let path = content.or_else(|| config.content_path(&config::paths::folio_home()));
    Portfolio::load(path.as_deref())
}

/// Logging failures are reported but never fatal.
fn init_logging(config: &Config) -> Option<WorkerGuard> {
    match logging::init(&config::paths::logs_dir(), &config.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    }
}
