use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::catalog::platforms::{parse_platform_list, Platform};
use crate::catalog::purposes::PurposeCatalog;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override these per invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw analytics counter record (REACH_EVENTS_PATH, default ./events.json)
    pub events_path: PathBuf,
    /// Optional purpose table. When unset the built-in table is used.
    pub purposes_path: Option<PathBuf>,
    /// Default platform selection, comma separated (REACH_PLATFORMS)
    pub platforms: String,
    /// Where `reach report` writes its markdown file
    pub report_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every field has a default, so this only fails on malformed values
    /// once they're actually used.
    pub fn load() -> Result<Self> {
        Ok(Self {
            events_path: env::var("REACH_EVENTS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./events.json")),
            purposes_path: env::var("REACH_PURPOSES_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            platforms: env::var("REACH_PLATFORMS").unwrap_or_default(),
            report_path: env::var("REACH_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output/reach-report.md")),
        })
    }

    /// Check that the event snapshot file exists.
    /// Call this before any operation that evaluates purposes.
    pub fn require_events(&self) -> Result<()> {
        if !self.events_path.exists() {
            anyhow::bail!(
                "Event snapshot not found at {}\n\
                 Export your analytics counters to that file, or set REACH_EVENTS_PATH.\n\
                 See .env.example for the available variables.",
                self.events_path.display()
            );
        }
        Ok(())
    }

    /// Parse the configured default platforms.
    pub fn selected_platforms(&self) -> Result<Vec<Platform>> {
        parse_platform_list(&self.platforms)
    }

    /// The purpose table: loaded from `purposes_path` if set, built-in otherwise.
    pub fn purpose_catalog(&self) -> Result<PurposeCatalog> {
        match &self.purposes_path {
            Some(path) => PurposeCatalog::load(path),
            None => Ok(PurposeCatalog::builtin()),
        }
    }
}
