//! Log sink setup. The terminal belongs to the desktop while it runs, so
//! logs go to a file; stderr is only used when the file cannot be opened.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;

use crate::error::FolioError;

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<File>),
    Stderr(io::Stderr),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => {
                let mut file: &File = file;
                file.write(buf)
            }
            DelegatingInner::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => {
                let mut file: &File = file;
                file.flush()
            }
            DelegatingInner::Stderr(s) => s.flush(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<File>>,
}

impl SubscriberMakeWriter {
    pub fn file(file: File) -> Self {
        Self {
            file: Some(Arc::new(file)),
        }
    }

    pub fn stderr() -> Self {
        Self::default()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None => DelegatingInner::Stderr(io::stderr()),
        };
        DelegatingWriter { inner }
    }
}

/// Open `path` for appending, creating its directory.
pub fn open_log_file(path: &Path) -> Result<File, FolioError> {
    let to_error = |source| FolioError::LogFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}

/// Install the global subscriber at `level`, writing to `log_file`. Falls
/// back to stderr (and says so) when the file cannot be opened. Later calls
/// are no-ops.
pub fn init(log_file: &Path, level: Level) {
    let (writer, fallback) = match open_log_file(log_file) {
        Ok(file) => (SubscriberMakeWriter::file(file), None),
        Err(err) => (SubscriberMakeWriter::stderr(), Some(err)),
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(true)
        .try_init();
    if let Some(err) = fallback {
        tracing::warn!(error = %err, "logging to stderr");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn log_file_is_created_with_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("term-folio.log");
        let file = open_log_file(&path).unwrap();
        let make = SubscriberMakeWriter::file(file);
        let mut writer = tracing_subscriber::fmt::MakeWriter::make_writer(&make);
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "hello\n");
    }

    #[test]
    fn unopenable_path_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_log_file(dir.path()).unwrap_err();
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }
}
