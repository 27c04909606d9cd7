use std::path::PathBuf;

use serde::Deserialize;

/// Ingestion path for the node/edge tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Count-prefixed fixed-width records, loaded into a CSR [`GraphStore`](crate::GraphStore)
    #[default]
    Binary,
    /// Header-row CSV tables, loaded into a [`LegacyGraph`](crate::LegacyGraph)
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphSourceConfig {
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
    #[serde(default)]
    pub format: SourceFormat,
}

impl GraphSourceConfig {
    pub fn binary(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            edges_path: edges_path.into(),
            format: SourceFormat::Binary,
        }
    }

    pub fn csv(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            edges_path: edges_path.into(),
            format: SourceFormat::Csv,
        }
    }
}
