//! Binary node/edge stream ingestion.
//!
//! Both streams start with a little-endian `u32` record count followed by
//! fixed 20-byte records:
//!
//! - node: `id: u32, latitude: f64, longitude: f64`
//! - edge: `from_id: u32, to_id: u32, length_m: u32, reserved: u32,
//!   speed_limit_kph: u16, highway_class: u8, one_way: u8`

use std::io::{self, Read, Write};

use bytes::{Buf, BufMut};
use log::{debug, info};

use crate::model::streets::csr::EdgeEnds;
use crate::model::streets::graph_store::resolve_edge;
use crate::model::{Edge, GraphStore, Node, NodeIndex};
use crate::Error;

pub const NODE_RECORD_SIZE: usize = 20;
pub const EDGE_RECORD_SIZE: usize = 20;

/// Upper bound of a single read buffer reservation
pub const READ_CHUNK_BYTES: usize = 8 << 20;

/// Reads both streams into a [`GraphStore`].
///
/// # Errors
///
/// - [`Error::TruncatedRead`] if a stream holds fewer records than its header declares
/// - [`Error::DanglingReference`] if an edge names a node id absent from the node stream
/// - [`Error::AllocationFailure`] if a declared record count cannot be allocated
/// - [`Error::IoError`] on other read failures, including a missing count header
pub fn read_graph<N: Read, E: Read>(nodes: N, edges: E) -> Result<GraphStore, Error> {
    let (nodes, node_index) = read_nodes(nodes)?;
    let (edges, ends) = read_edges(edges, &node_index)?;
    Ok(GraphStore::assemble(nodes, edges, ends, node_index))
}

/// Reads the node stream, inserting every record into a fresh index in read order.
pub fn read_nodes<R: Read>(mut reader: R) -> Result<(Vec<Node>, NodeIndex), Error> {
    let count = read_count(&mut reader, "node")?;
    let raw = read_records(&mut reader, count, NODE_RECORD_SIZE, "node")?;

    let mut nodes = Vec::new();
    nodes
        .try_reserve_exact(count)
        .map_err(|source| {
            Error::AllocationFailure {
                what: "node table",
                count,
                source,
            }
            .logged()
        })?;
    let mut index = NodeIndex::with_expected_nodes(count);

    let mut buf = raw.as_slice();
    while buf.has_remaining() {
        let node = Node {
            id: buf.get_u32_le(),
            latitude: buf.get_f64_le(),
            longitude: buf.get_f64_le(),
        };
        index.insert(node.id, nodes.len());
        nodes.push(node);
    }

    info!("Loaded {} nodes from binary stream", nodes.len());
    Ok((nodes, index))
}

/// Reads the edge stream, resolving both endpoints of every edge through `index`.
pub fn read_edges<R: Read>(
    mut reader: R,
    index: &NodeIndex,
) -> Result<(Vec<Edge>, Vec<EdgeEnds>), Error> {
    let count = read_count(&mut reader, "edge")?;
    let raw = read_records(&mut reader, count, EDGE_RECORD_SIZE, "edge")?;

    let mut edges = Vec::new();
    let mut ends = Vec::new();
    edges
        .try_reserve_exact(count)
        .and_then(|()| ends.try_reserve_exact(count))
        .map_err(|source| {
            Error::AllocationFailure {
                what: "edge table",
                count,
                source,
            }
            .logged()
        })?;

    let mut buf = raw.as_slice();
    while buf.has_remaining() {
        let from_id = buf.get_u32_le();
        let to_id = buf.get_u32_le();
        let length_m = buf.get_u32_le();
        let _reserved = buf.get_u32_le();
        let edge = Edge {
            from_id,
            to_id,
            length_m,
            speed_limit_kph: buf.get_u16_le(),
            highway_class: buf.get_u8(),
            one_way: buf.get_u8() != 0,
        };
        ends.push(resolve_edge(index, edges.len(), &edge)?);
        edges.push(edge);
    }

    info!("Loaded {} edges from binary stream", edges.len());
    Ok((edges, ends))
}

fn read_count<R: Read>(reader: &mut R, what: &'static str) -> Result<usize, Error> {
    let mut header = [0u8; 4];
    reader.read_exact(&mut header).map_err(|e| {
        Error::IoError(io::Error::new(
            e.kind(),
            format!("failed to read {what} count header: {e}"),
        ))
        .logged()
    })?;
    let count = u32::from_le_bytes(header) as usize;
    debug!("{what} stream header declares {count} records");
    Ok(count)
}

/// Reads `count` fixed-size records.
///
/// The buffer grows in chunks of at most [`READ_CHUNK_BYTES`] as data arrives,
/// so a header larger than the stream ends in [`Error::TruncatedRead`].
fn read_records<R: Read>(
    reader: &mut R,
    count: usize,
    record_size: usize,
    what: &'static str,
) -> Result<Vec<u8>, Error> {
    let expected_bytes = count.saturating_mul(record_size);
    let mut raw = Vec::new();
    while raw.len() < expected_bytes {
        let want = (expected_bytes - raw.len()).min(READ_CHUNK_BYTES);
        raw.try_reserve_exact(want).map_err(|source| {
            Error::AllocationFailure {
                what: "read buffer",
                count,
                source,
            }
            .logged()
        })?;
        let read = reader
            .by_ref()
            .take(want as u64)
            .read_to_end(&mut raw)
            .map_err(|e| Error::IoError(e).logged())?;
        if read == 0 {
            break;
        }
    }

    if raw.len() < expected_bytes {
        return Err(Error::TruncatedRead {
            what,
            expected: count,
            read: raw.len() / record_size,
        }
        .logged());
    }
    Ok(raw)
}

/// Writes `nodes` in the binary node stream format
pub fn write_nodes<W: Write>(mut writer: W, nodes: &[Node]) -> io::Result<()> {
    let mut buf = Vec::with_capacity(4 + nodes.len() * NODE_RECORD_SIZE);
    buf.put_u32_le(record_count(nodes.len())?);
    for node in nodes {
        buf.put_u32_le(node.id);
        buf.put_f64_le(node.latitude);
        buf.put_f64_le(node.longitude);
    }
    writer.write_all(&buf)
}

/// Writes `edges` in the binary edge stream format
pub fn write_edges<W: Write>(mut writer: W, edges: &[Edge]) -> io::Result<()> {
    let mut buf = Vec::with_capacity(4 + edges.len() * EDGE_RECORD_SIZE);
    buf.put_u32_le(record_count(edges.len())?);
    for edge in edges {
        buf.put_u32_le(edge.from_id);
        buf.put_u32_le(edge.to_id);
        buf.put_u32_le(edge.length_m);
        buf.put_u32_le(0);
        buf.put_u16_le(edge.speed_limit_kph);
        buf.put_u8(edge.highway_class);
        buf.put_u8(u8::from(edge.one_way));
    }
    writer.write_all(&buf)
}

fn record_count(len: usize) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{len} records exceed the u32 count header"),
        )
    })
}
