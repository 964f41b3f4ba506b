//! Configuration management for folio.
//!
//! Loads configuration from ${FOLIO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::theme::Theme;
use crate::typewriter::{ConfigError, TypewriterConfig};

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments and sections from the template are always present, while the
/// user's customized values are kept.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for folio configuration and data directories.
    //!
    //! FOLIO_HOME resolution order:
    //! 1. FOLIO_HOME environment variable (if set)
    //! 2. ~/.config/folio (default)

    use std::path::PathBuf;

    /// Returns the folio home directory.
    ///
    /// Falls back to `./.folio` when no home directory can be determined.
    pub fn folio_home() -> PathBuf {
        if let Ok(home) = std::env::var("FOLIO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".folio"),
            |h| h.join(".config").join("folio"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        folio_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        folio_home().join("logs")
    }
}

/// Code playground timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub char_interval_ms: u64,
    pub line_delay_ms: u64,
    pub start_delay_ms: u64,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            char_interval_ms: 50,
            line_delay_ms: 3000,
            start_delay_ms: 0,
        }
    }
}

/// Terminal modal timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub char_interval_ms: u64,
    pub line_delay_ms: u64,
    pub start_delay_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            char_interval_ms: 50,
            line_delay_ms: 800,
            start_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaretConfig {
    /// Full on/off cycle in milliseconds. 0 disables blinking.
    pub period_ms: u64,
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self { period_ms: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialsConfig {
    /// Auto-advance interval in milliseconds. 0 disables auto-advance.
    pub interval_ms: u64,
}

impl Default for TestimonialsConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,

    /// Optional portfolio file replacing the built-in content.
    pub content_file: Option<String>,

    /// Log filter used when FOLIO_LOG is not set.
    pub log_level: String,

    pub playground: PlaygroundConfig,
    pub terminal: TerminalConfig,
    pub caret: CaretConfig,
    pub testimonials: TestimonialsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            content_file: None,
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
            playground: PlaygroundConfig::default(),
            terminal: TerminalConfig::default(),
            caret: CaretConfig::default(),
            testimonials: TestimonialsConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            debug!(path = %path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the theme field to the config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read, parsed or written.
    pub fn save_theme(theme: Theme) -> Result<()> {
        Self::save_theme_to(&paths::config_path(), theme)
    }

    /// Saves only the theme field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read, parsed or written.
    pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["theme"] = value(theme.as_str());

        Self::write_config(path, &doc.to_string())?;
        info!(theme = theme.as_str(), path = %path.display(), "saved theme");
        Ok(())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Fails if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Resolved portfolio file, if one is configured.
    ///
    /// Relative paths are resolved against `base` (normally FOLIO_HOME).
    pub fn content_path(&self, base: &Path) -> Option<PathBuf> {
        let raw = self.content_file.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let path = Path::new(raw);
        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        })
    }

    /// Replace-mode looping typewriter for the code playground.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the character interval is zero.
    pub fn playground_typewriter(&self) -> Result<TypewriterConfig, ConfigError> {
        let p = &self.playground;
        Ok(
            TypewriterConfig::from_millis(p.char_interval_ms, p.line_delay_ms, true, false)?
                .with_start_delay(Duration::from_millis(p.start_delay_ms)),
        )
    }

    /// Accumulating one-shot typewriter for the terminal modal.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the character interval is zero.
    pub fn terminal_typewriter(&self) -> Result<TypewriterConfig, ConfigError> {
        let t = &self.terminal;
        Ok(
            TypewriterConfig::from_millis(t.char_interval_ms, t.line_delay_ms, false, true)?
                .with_start_delay(Duration::from_millis(t.start_delay_ms)),
        )
    }

    pub fn caret_period(&self) -> Duration {
        Duration::from_millis(self.caret.period_ms)
    }

    /// Testimonial auto-advance interval, `None` when disabled.
    pub fn testimonial_interval(&self) -> Option<Duration> {
        (self.testimonials.interval_ms > 0)
            .then(|| Duration::from_millis(self.testimonials.interval_ms))
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.terminal.line_delay_ms, 800);
        assert_eq!(config.content_file, None);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "theme = \"light\"\n[playground]\nline_delay_ms = 10\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.playground.line_delay_ms, 10);
        assert_eq!(config.playground.char_interval_ms, 50);
        assert_eq!(config.caret.period_ms, 1000);
    }

    #[test]
    fn test_load_invalid_theme_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "theme = \"sepia\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_template_matches_defaults() {
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.theme, defaults.theme);
        assert_eq!(parsed.log_level, defaults.log_level);
        assert_eq!(parsed.playground, defaults.playground);
        assert_eq!(parsed.terminal, defaults.terminal);
        assert_eq!(parsed.caret, defaults.caret);
        assert_eq!(parsed.testimonials, defaults.testimonials);
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# folio configuration"));
        assert!(contents.contains("# content_file ="));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        let err = Config::init(&config_path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_save_theme_creates_file_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        Config::save_theme_to(&config_path, Theme::Light).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, Theme::Light);
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Colour theme"));
    }

    #[test]
    fn test_save_theme_preserves_other_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "theme = \"dark\"\ncontent_file = \"me.toml\"\n[terminal]\nchar_interval_ms = 20\n",
        )
        .unwrap();

        Config::save_theme_to(&config_path, Theme::Light).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.content_file.as_deref(), Some("me.toml"));
        assert_eq!(config.terminal.char_interval_ms, 20);
        assert_eq!(config.terminal.line_delay_ms, 800);
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Terminal modal"));
    }

    #[test]
    fn test_content_path_resolution() {
        let base = Path::new("/home/ada/.config/folio");
        let mut config = Config::default();
        assert_eq!(config.content_path(base), None);

        config.content_file = Some("me.toml".to_string());
        assert_eq!(config.content_path(base), Some(base.join("me.toml")));

        config.content_file = Some("/srv/me.toml".to_string());
        assert_eq!(config.content_path(base), Some(PathBuf::from("/srv/me.toml")));

        config.content_file = Some("  ".to_string());
        assert_eq!(config.content_path(base), None);
    }

    #[test]
    fn test_typewriter_configs() {
        let config = Config::default();
        let playground = config.playground_typewriter().unwrap();
        assert!(playground.is_looping());
        assert!(!playground.is_accumulating());
        assert_eq!(playground.line_delay(), Duration::from_millis(3000));

        let terminal = config.terminal_typewriter().unwrap();
        assert!(!terminal.is_looping());
        assert!(terminal.is_accumulating());
        assert_eq!(terminal.start_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_zero_char_interval_rejected() {
        let mut config = Config::default();
        config.terminal.char_interval_ms = 0;
        assert_eq!(
            config.terminal_typewriter(),
            Err(ConfigError::ZeroCharInterval)
        );
    }

    #[test]
    fn test_testimonial_interval_zero_disables() {
        let mut config = Config::default();
        assert_eq!(
            config.testimonial_interval(),
            Some(Duration::from_millis(5000))
        );
        config.testimonials.interval_ms = 0;
        assert_eq!(config.testimonial_interval(), None);
    }
}
