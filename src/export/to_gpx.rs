use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use roadroute_core::Node;

use crate::error::CliError;

/// Writes `nodes` as a single-segment GPX 1.1 track
pub fn write_gpx<W: Write>(mut out: W, nodes: &[Node], created: DateTime<Utc>) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<gpx version="1.1" creator="roadroute" xmlns="http://www.topografix.com/gpx/1/1">"#
    )?;
    writeln!(out, "  <metadata>")?;
    writeln!(out, "    <name>Shortest Path Route</name>")?;
    writeln!(
        out,
        "    <time>{}</time>",
        created.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out, "  </metadata>")?;
    writeln!(out, "  <trk>")?;
    writeln!(out, "    <name>Shortest Path</name>")?;
    writeln!(out, "    <trkseg>")?;
    for node in nodes {
        writeln!(
            out,
            r#"      <trkpt lat="{:.6}" lon="{:.6}">"#,
            node.latitude, node.longitude
        )?;
        writeln!(out, "        <name>Node {}</name>", node.id)?;
        writeln!(out, "      </trkpt>")?;
    }
    writeln!(out, "    </trkseg>")?;
    writeln!(out, "  </trk>")?;
    writeln!(out, "</gpx>")?;
    out.flush()
}

pub fn export_gpx(path: &Path, nodes: &[Node]) -> Result<(), CliError> {
    let write_error = |source| CliError::FileWrite {
        what: "GPX track",
        path: path.to_path_buf(),
        source,
    };
    if nodes.is_empty() {
        return Err(CliError::Input("cannot export an empty path".to_string()));
    }
    let file = File::create(path).map_err(write_error)?;
    write_gpx(BufWriter::new(file), nodes, Utc::now()).map_err(write_error)?;
    tracing::info!("Exported {} track points to {}", nodes.len(), path.display());
    Ok(())
}
