use std::io;
use std::path::PathBuf;

use folio_store::StoreError;
use thiserror::Error;

/// Startup and configuration failures. Once the desktop is running nothing
/// is fatal; failures degrade to defaults and end up in the log instead.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not open the document store: {0}")]
    Store(#[from] StoreError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("no usable {kind} directory; pass --{kind}-dir")]
    MissingDirectory { kind: &'static str },
    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<FolioError> for io::Error {
    fn from(err: FolioError) -> Self {
        match err {
            FolioError::Io(err) => err,
            FolioError::Config(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            other => io::Error::other(other.to_string()),
        }
    }
}
