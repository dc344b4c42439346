use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::RegistryError;

/// A country code and the wiki page holding its chart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String)")]
pub struct SourceEntry {
    pub country_code: String,
    pub page: String,
}

impl From<(String, String)> for SourceEntry {
    fn from((country_code, page): (String, String)) -> Self {
        Self { country_code, page }
    }
}

// Only `data` matters; the registry's own schema block is ignored.
#[derive(Deserialize)]
struct Registry {
    data: Vec<SourceEntry>,
}

/// Read the source registry, keeping its row order.
pub fn load(path: &Path) -> Result<Vec<SourceEntry>, RegistryError> {
    let contents = fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sources = parse(&contents).map_err(|source| RegistryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} sources from {}", sources.len(), path.display());
    Ok(sources)
}

pub fn parse(contents: &str) -> serde_json::Result<Vec<SourceEntry>> {
    let registry: Registry = serde_json::from_str(contents)?;
    Ok(registry.data)
}
