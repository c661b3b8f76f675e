//! Error taxonomy for the scan pipeline
//!
//! Fatal variants abort the scan and surface through the CLI; per-file
//! read and parse failures are handled inside the parse stage (the file is
//! skipped and a `parse-error` finding is recorded) and never reach here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// Input path does not exist
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Directory walk failed
    #[error("cannot enumerate {}: {source}", .path.display())]
    CannotEnumerate {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// Per-file read error
    #[error("cannot read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file failed to parse
    #[error("cannot parse {}", .path.display())]
    Parse { path: PathBuf },
}
