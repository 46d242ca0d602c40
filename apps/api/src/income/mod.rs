//! Suburb income lookup: the bundled 2016 census medians, keyed state → suburb.
//!
//! Loaded once at startup and shared read-only through `AppState`.

pub mod handlers;

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum IncomeDataError {
    #[error("Failed to read income dataset {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Income dataset {path} is not valid JSON: {source}")]
    Format {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct IncomeTable {
    incomes: HashMap<String, HashMap<String, u32>>,
}

impl IncomeTable {
    pub fn new(incomes: HashMap<String, HashMap<String, u32>>) -> Self {
        Self { incomes }
    }

    /// Loads `{ "<state>": { "<suburb>": <income> } }` from disk.
    /// A missing file yields an empty table; an unreadable or malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IncomeDataError> {
        let path = path.as_ref();
        let path_label = path.display().to_string();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Income dataset {path_label} not found; all lookups will miss");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(IncomeDataError::Read {
                    path: path_label,
                    source,
                })
            }
        };

        let table = Self::from_json(&raw).map_err(|source| IncomeDataError::Format {
            path: path_label.clone(),
            source,
        })?;

        info!(
            "Loaded income dataset {path_label}: {} states, {} suburbs",
            table.incomes.len(),
            table.suburb_count()
        );
        Ok(table)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw).map(Self::new)
    }

    pub fn lookup(&self, state: &str, suburb: &str) -> Option<u32> {
        self.incomes.get(state)?.get(suburb).copied()
    }

    /// State names, sorted.
    pub fn states(&self) -> Vec<&str> {
        let mut states: Vec<&str> = self.incomes.keys().map(String::as_str).collect();
        states.sort_unstable();
        states
    }

    /// Suburbs of `state`, sorted, optionally narrowed by a case-insensitive
    /// substring. `None` when the state is unknown.
    pub fn suburbs(&self, state: &str, filter: Option<&str>) -> Option<Vec<&str>> {
        let needle = filter
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());

        let mut suburbs: Vec<&str> = self
            .incomes
            .get(state)?
            .keys()
            .map(String::as_str)
            .filter(|s| {
                needle
                    .as_deref()
                    .map_or(true, |n| s.to_lowercase().contains(n))
            })
            .collect();
        suburbs.sort_unstable();
        Some(suburbs)
    }

    pub fn suburb_count(&self) -> usize {
        self.incomes.values().map(HashMap::len).sum()
    }
}
