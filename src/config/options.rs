// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppOptions {
    pub store: StoreOptions,
    pub scrape: ScrapeOptions,
    pub analysis: AnalysisOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    pub path: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(STORE_DIR).join(DEFAULT_DB_FILE) }
    }
}

impl StoreOptions {
    /// Directory holding the store file (and the debug log).
    pub fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Text file with one game URL per line.
    pub links_file: Option<PathBuf>,
    /// Pause between two game links.
    pub delay: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            links_file: None,
            delay: Duration::from_millis(SCRAPE_DELAY_MS),
            retries: MAX_RETRIES,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

/// Which reference score a deviation is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reference {
    /// Metascore (critics).
    Pro,
    /// User score (players).
    Players,
}

impl Reference {
    pub const ALL: [Reference; 2] = [Reference::Pro, Reference::Players];

    pub fn label(self) -> &'static str {
        match self {
            Reference::Pro => "PRO",
            Reference::Players => "PLAYERS",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisOptions {
    /// Share of outlets (by review volume) kept in the ranked tables.
    pub keep_fraction: f64,
    pub top_n: usize,
    /// Reference highlighted by the GUI tables.
    pub reference: Reference,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            keep_fraction: DEFAULT_KEEP_FRACTION,
            top_n: DEFAULT_TOP_N,
            reference: Reference::Pro,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptionsError {
    #[error("keep fraction must be in (0, 1], got {0}")]
    KeepFraction(f64),

    #[error("top N must be at least 1")]
    TopN,
}

impl AnalysisOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.keep_fraction > 0.0 && self.keep_fraction <= 1.0) {
            return Err(OptionsError::KeepFraction(self.keep_fraction));
        }
        if self.top_n == 0 {
            return Err(OptionsError::TopN);
        }
        Ok(())
    }
}
