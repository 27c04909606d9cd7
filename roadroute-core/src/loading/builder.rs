use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use super::config::{GraphSourceConfig, SourceFormat};
use super::{binary, legacy};
use crate::model::RoadNetwork;
use crate::{Error, GraphStore, LegacyGraph};

/// Loads a CSR graph from the binary node and edge streams
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] if either file cannot be opened, and any
/// error of [`binary::read_graph`]. No partially built graph is returned.
pub fn load(nodes_path: &Path, edges_path: &Path) -> Result<GraphStore, Error> {
    info!(
        "Loading binary road network: nodes {}, edges {}",
        nodes_path.display(),
        edges_path.display()
    );
    let nodes = open(nodes_path, "nodes")?;
    let edges = open(edges_path, "edges")?;

    let graph = binary::read_graph(BufReader::new(nodes), BufReader::new(edges))?;
    release_free_memory();
    Ok(graph)
}

/// Loads a list-backed graph from the legacy CSV tables
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] if either file cannot be opened and
/// [`Error::CsvError`] if reading a file fails. Malformed rows are skipped.
pub fn load_legacy(nodes_path: &Path, edges_path: &Path) -> Result<LegacyGraph, Error> {
    info!(
        "Loading CSV road network: nodes {}, edges {}",
        nodes_path.display(),
        edges_path.display()
    );
    legacy::read_legacy_graph(nodes_path, edges_path)
}

/// A network loaded through either ingestion path
#[derive(Debug)]
pub enum LoadedGraph {
    Csr(GraphStore),
    Lists(LegacyGraph),
}

impl LoadedGraph {
    pub fn graph(&self) -> &(dyn RoadNetwork + Send + Sync) {
        match self {
            LoadedGraph::Csr(store) => store,
            LoadedGraph::Lists(lists) => lists,
        }
    }
}

/// Loads the network described by `config` through the matching ingestion path
///
/// # Errors
///
/// Any error of [`load`] or [`load_legacy`].
pub fn load_network(config: &GraphSourceConfig) -> Result<LoadedGraph, Error> {
    Ok(match config.format {
        SourceFormat::Binary => LoadedGraph::Csr(load(&config.nodes_path, &config.edges_path)?),
        SourceFormat::Csv => {
            LoadedGraph::Lists(load_legacy(&config.nodes_path, &config.edges_path)?)
        }
    })
}

pub(crate) fn open(path: &Path, what: &'static str) -> Result<File, Error> {
    File::open(path).map_err(|source| {
        Error::FileNotFound {
            what,
            path: path.to_path_buf(),
            source,
        }
        .logged()
    })
}

fn release_free_memory() {
    // The bulk record buffers are freed by now but glibc keeps the pages.
    // This call returns free memory at the top of the heap to the system.
    //
    // # Safety
    //
    // malloc_trim has no preconditions on linux with glibc,
    // which is checked by the cfg attribute at compile time.
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    unsafe {
        if libc::malloc_trim(0) == 0 {
            log::debug!("No heap memory released after load");
        } else {
            log::debug!("Trimmed unused heap memory after load");
        }
    }
}
