use std::collections::TryReserveError;
use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open {what} file '{}': {source}", path.display())]
    FileNotFound {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Truncated {what} stream: header declares {expected} records, {read} read")]
    TruncatedRead {
        what: &'static str,
        expected: usize,
        read: usize,
    },
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Edge {edge} references unknown node id {node_id}")]
    DanglingReference { edge: usize, node_id: NodeId },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Edge {edge} has non-positive speed limit ({speed} km/h)")]
    InvalidEdgeData { edge: usize, speed: f64 },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Node id {0} not found")]
    NodeNotFound(NodeId),
    #[error("Invalid node index {0}")]
    InvalidNodeIndex(usize),
    #[error("No path found: {0}")]
    PathNotFound(String),
    #[error("Failed to allocate {what} for {count} records: {source}")]
    AllocationFailure {
        what: &'static str,
        count: usize,
        #[source]
        source: TryReserveError,
    },
}

impl Error {
    /// Taxonomy code for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound { .. } => ErrorKind::FileNotFound,
            Error::TruncatedRead { .. } => ErrorKind::TruncatedRead,
            Error::IoError(_) | Error::CsvError(_) => ErrorKind::FileRead,
            Error::DanglingReference { .. } => ErrorKind::DanglingReference,
            Error::InvalidData(_) => ErrorKind::InvalidData,
            Error::InvalidEdgeData { .. } => ErrorKind::InvalidEdgeData,
            Error::InvalidArgument(_) | Error::InvalidNodeIndex(_) => ErrorKind::InvalidArgument,
            Error::NodeNotFound(_) | Error::PathNotFound(_) => ErrorKind::NotFound,
            Error::AllocationFailure { .. } => ErrorKind::AllocationFailure,
        }
    }

    /// Emits an `error` log record located at the caller, then returns `self`.
    ///
    /// Failure sites wrap the error they return with this, so the record
    /// carries the code, the message and the file and line that raised it.
    #[track_caller]
    pub(crate) fn logged(self) -> Self {
        let location: &'static Location<'static> = Location::caller();
        if log::Level::Error <= log::max_level() {
            log::logger().log(
                &log::Record::builder()
                    .level(log::Level::Error)
                    .target(module_path!())
                    .module_path_static(Some(module_path!()))
                    .file_static(Some(location.file()))
                    .line(Some(location.line()))
                    .args(format_args!("[{}] {self}", self.kind()))
                    .build(),
            );
        }
        self
    }
}

/// Error taxonomy shared by the core and presentation layers.
///
/// `FileWrite` and `Input` are never produced by this crate; they exist so
/// that collaborators report through the same set of codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    AllocationFailure,
    FileNotFound,
    TruncatedRead,
    FileRead,
    FileWrite,
    DanglingReference,
    InvalidData,
    InvalidEdgeData,
    NotFound,
    Input,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::AllocationFailure => "ALLOCATION_FAILURE",
            ErrorKind::FileNotFound => "FILE_NOT_FOUND",
            ErrorKind::TruncatedRead => "TRUNCATED_READ",
            ErrorKind::FileRead => "FILE_READ",
            ErrorKind::FileWrite => "FILE_WRITE",
            ErrorKind::DanglingReference => "DANGLING_REFERENCE",
            ErrorKind::InvalidData => "INVALID_DATA",
            ErrorKind::InvalidEdgeData => "INVALID_EDGE_DATA",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Input => "INPUT_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(Error::NodeNotFound(7).kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::PathNotFound("unreachable".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            Error::DanglingReference { edge: 0, node_id: 3 }.kind(),
            ErrorKind::DanglingReference
        );
        assert_eq!(
            Error::InvalidEdgeData { edge: 1, speed: 0.0 }.kind().code(),
            "INVALID_EDGE_DATA"
        );
    }

    #[test]
    fn messages_carry_context() {
        let err = Error::TruncatedRead {
            what: "node",
            expected: 10,
            read: 4,
        };
        assert_eq!(
            err.to_string(),
            "Truncated node stream: header declares 10 records, 4 read"
        );
        assert_eq!(ErrorKind::Input.to_string(), "INPUT_ERROR");
    }
}
