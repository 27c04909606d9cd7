//! Optional TOML configuration, merged under the command-line flags.
//!
//! ```toml
//! [graph]
//! nodes = "data/nodes.bin"
//! edges = "data/edges.bin"
//! format = "binary"      # or "csv"
//!
//! [routing]
//! mode = "time"
//!
//! [output]
//! gpx = "route.gpx"
//! geojson = "route.geojson"
//!
//! [logging]
//! level = "debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use roadroute_core::{CostMode, GraphSourceConfig, SourceFormat};
use serde::Deserialize;

use crate::error::CliError;

/// Environment variable naming the config file when `--config` is absent
pub const CONFIG_ENV: &str = "ROADROUTE_CONFIG";

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub graph: GraphSection,
    pub routing: RoutingSection,
    pub output: OutputSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphSection {
    pub nodes: Option<PathBuf>,
    pub edges: Option<PathBuf>,
    pub format: Option<SourceFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingSection {
    pub mode: Option<CostMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub gpx: Option<PathBuf>,
    pub geojson: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
}

/// Graph source flags given on the command line
#[derive(Debug, Clone, Default)]
pub struct GraphOverrides {
    pub nodes: Option<PathBuf>,
    pub edges: Option<PathBuf>,
    pub format: Option<SourceFormat>,
}

impl AppConfig {
    /// Reads `path` if given; no path means an empty configuration.
    ///
    /// Relative paths inside the file are taken relative to the file's directory.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&contents).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        for slot in [
            &mut self.graph.nodes,
            &mut self.graph.edges,
            &mut self.output.gpx,
            &mut self.output.geojson,
        ] {
            if let Some(path) = slot.as_mut()
                && path.is_relative()
            {
                *path = base.join(&*path);
            }
        }
    }

    /// Graph source with command-line flags taking precedence over the file
    pub fn graph_source(&self, overrides: &GraphOverrides) -> Result<GraphSourceConfig, CliError> {
        let nodes = overrides.nodes.clone().or_else(|| self.graph.nodes.clone());
        let edges = overrides.edges.clone().or_else(|| self.graph.edges.clone());
        let (Some(nodes_path), Some(edges_path)) = (nodes, edges) else {
            return Err(CliError::Config(
                "both a nodes and an edges file are required (--nodes/--edges or [graph])"
                    .to_string(),
            ));
        };
        let format = overrides
            .format
            .or(self.graph.format)
            .unwrap_or_else(|| infer_format(&nodes_path));
        Ok(GraphSourceConfig {
            nodes_path,
            edges_path,
            format,
        })
    }

    pub fn mode(&self, flag: Option<CostMode>) -> CostMode {
        flag.or(self.routing.mode).unwrap_or_default()
    }

    /// Log filter directive: flag, then config file, then `RUST_LOG`, then `info`
    pub fn log_filter(&self, flag: Option<&str>, env: Option<&str>) -> String {
        flag.or(self.logging.level.as_deref())
            .or(env)
            .filter(|level| !level.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string()
    }
}

/// `.csv` nodes file means the CSV path, anything else the binary path
fn infer_format(nodes_path: &Path) -> SourceFormat {
    match nodes_path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => SourceFormat::Csv,
        _ => SourceFormat::Binary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> AppConfig {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn parses_all_sections() {
        let config = parse(
            r#"
            [graph]
            nodes = "nodes.csv"
            edges = "edges.csv"
            format = "csv"

            [routing]
            mode = "fastest"

            [output]
            gpx = "out.gpx"

            [logging]
            level = "warn"
            "#,
        );
        assert_eq!(config.graph.format, Some(SourceFormat::Csv));
        assert_eq!(config.routing.mode, Some(CostMode::Time));
        assert_eq!(config.output.gpx, Some(PathBuf::from("out.gpx")));
        assert_eq!(config.output.geojson, None);
        assert_eq!(config.logging.level.as_deref(), Some("warn"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<AppConfig>("[graph]\nnodez = \"a\"").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let config = parse("[graph]\nnodes = \"a.bin\"\nedges = \"b.bin\"\n[routing]\nmode = \"time\"");
        let source = config
            .graph_source(&GraphOverrides {
                edges: Some(PathBuf::from("c.bin")),
                ..GraphOverrides::default()
            })
            .unwrap();
        assert_eq!(source.nodes_path, PathBuf::from("a.bin"));
        assert_eq!(source.edges_path, PathBuf::from("c.bin"));
        assert_eq!(source.format, SourceFormat::Binary);
        assert_eq!(config.mode(None), CostMode::Time);
        assert_eq!(config.mode(Some(CostMode::Distance)), CostMode::Distance);
    }

    #[test]
    fn missing_graph_paths_are_a_config_error() {
        let err = AppConfig::default()
            .graph_source(&GraphOverrides::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn format_is_inferred_from_extension() {
        let source = AppConfig::default()
            .graph_source(&GraphOverrides {
                nodes: Some(PathBuf::from("nodes.CSV")),
                edges: Some(PathBuf::from("edges.csv")),
                format: None,
            })
            .unwrap();
        assert_eq!(source.format, SourceFormat::Csv);
    }

    #[test]
    fn log_level_precedence() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_filter(None, None), "info");
        assert_eq!(config.log_filter(None, Some("trace")), "trace");
        config.logging.level = Some("warn".to_string());
        assert_eq!(config.log_filter(None, Some("trace")), "warn");
        assert_eq!(config.log_filter(Some("debug"), Some("trace")), "debug");
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roadroute.toml");
        fs::write(&path, "[graph]\nnodes = \"n.bin\"\nedges = \"/abs/e.bin\"\n").unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.graph.nodes, Some(dir.path().join("n.bin")));
        assert_eq!(config.graph.edges, Some(PathBuf::from("/abs/e.bin")));
        assert!(matches!(
            AppConfig::load(Some(&dir.path().join("absent.toml"))),
            Err(CliError::ConfigRead { .. })
        ));
    }
}
