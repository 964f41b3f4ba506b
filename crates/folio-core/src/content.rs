//! Portfolio content model.
//!
//! The default portfolio is embedded from `default_portfolio.toml` at compile
//! time. A user file with the same layout replaces it entirely when
//! `content_file` is set in the config.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::typewriter::Script;

fn builtin_source() -> &'static str {
    include_str!("../default_portfolio.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub initials: String,
    pub role: String,
    pub headline: String,
    pub tagline: String,
    pub location: String,
    pub email: String,
    /// About section paragraphs.
    pub about: Vec<String>,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent. Values above 100 are shown as 100.
    pub level: u8,
}

impl Skill {
    pub fn percent(&self) -> u8 {
        self.level.min(100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
}

impl Project {
    /// URL opened when the project is activated: the demo if there is one,
    /// otherwise the repository.
    pub fn primary_url(&self) -> Option<&str> {
        self.demo_url.as_deref().or(self.github_url.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    #[default]
    Work,
    Education,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub kind: ExperienceKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub company: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    pub read_time: String,
    /// Markdown body.
    pub content: String,
}

impl BlogPost {
    /// Human-readable date, e.g. `December 15, 2024`. Dates that are not
    /// ISO formatted are shown as written.
    pub fn display_date(&self) -> String {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_or_else(|_| self.date.clone(), |d| d.format("%B %-d, %Y").to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Lines fed to the two typewriters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scripts {
    /// Code snippets, revealed one at a time in a loop.
    pub playground: Vec<String>,
    /// Terminal transcript, revealed once line by line.
    pub terminal: Vec<String>,
}

/// Everything the portfolio displays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub profile: Profile,
    pub stats: Vec<Stat>,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub testimonials: Vec<Testimonial>,
    pub blog: Vec<BlogPost>,
    pub social: Vec<SocialLink>,
    pub scripts: Scripts,
}

impl Portfolio {
    /// Parses the embedded default portfolio.
    ///
    /// # Errors
    /// Only fails if the embedded file is malformed.
    pub fn builtin() -> Result<Self> {
        Self::parse(builtin_source()).context("Failed to parse built-in portfolio")
    }

    /// Loads a portfolio file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read portfolio from {}", path.display()))?;
        let portfolio = Self::parse(&contents)
            .with_context(|| format!("Failed to parse portfolio from {}", path.display()))?;
        debug!(path = %path.display(), posts = portfolio.blog.len(), "loaded portfolio");
        Ok(portfolio)
    }

    /// Loads `path` if given, otherwise the built-in portfolio.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::builtin(),
        }
    }

    fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn post(&self, id: u32) -> Option<&BlogPost> {
        self.blog.iter().find(|p| p.id == id)
    }

    pub fn playground_script(&self) -> Script {
        Script::new(self.scripts.playground.iter().cloned())
    }

    pub fn terminal_script(&self) -> Script {
        Script::new(self.scripts.terminal.iter().cloned())
    }
}
