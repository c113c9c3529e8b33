//! Whole-file reads for shader sources and other assets.
//!
//! [`load_text_file`] and [`load_binary_file`] never fail: a missing or
//! unreadable file yields an empty result and an error event on the log. The
//! `read_*` variants return the underlying [`LoadError`] instead.
//!
//! Text loads must be valid UTF-8; a file that is not counts as a read
//! failure rather than being passed through byte for byte.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to read a file from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was opened but its contents could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Read a whole file as UTF-8 text.
///
/// # Errors
///
/// Returns [`LoadError::Open`] if the file cannot be opened and
/// [`LoadError::Read`] if reading fails or the contents are not valid UTF-8.
pub fn read_text_file(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let bytes = read_binary_file(path.as_ref())?;
    String::from_utf8(bytes).map_err(|err| LoadError::Read {
        path: path.as_ref().to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
    })
}

/// Read a whole file as raw bytes.
///
/// # Errors
///
/// Returns [`LoadError::Open`] if the file cannot be opened and
/// [`LoadError::Read`] if reading its contents fails.
pub fn read_binary_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    use std::io::Read;

    let path = path.as_ref();
    let mut file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(buffer)
}

/// Load a text file, returning an empty string on failure.
///
/// Failures are logged at error level with the offending path.
pub fn load_text_file(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match read_text_file(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "Failed to open text file");
            String::new()
        }
    }
}

/// Load a binary file, returning an empty buffer on failure.
///
/// Failures are logged at error level with the offending path.
pub fn load_binary_file(path: impl AsRef<Path>) -> Vec<u8> {
    let path = path.as_ref();
    match read_binary_file(path) {
        Ok(bytes) => bytes,
        Err(err @ LoadError::Open { .. }) => {
            tracing::error!(path = %path.display(), error = %err, "Failed to open binary file");
            Vec::new()
        }
        Err(err @ LoadError::Read { .. }) => {
            tracing::error!(path = %path.display(), error = %err, "Failed to read binary file");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Shared buffer the test subscriber formats events into.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber that records every event, returning the
    /// formatted log alongside `f`'s result.
    fn with_captured_log<T>(f: impl FnOnce() -> T) -> (T, String) {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        (result, text)
    }

    #[test]
    fn text_file_round_trips_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vert.glsl");
        fs::write(&path, "#version 330 core\nvoid main() {}\n").unwrap();

        assert_eq!(load_text_file(&path), "#version 330 core\nvoid main() {}\n");
    }

    #[test]
    fn missing_text_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load_text_file(dir.path().join("nope.glsl")).is_empty());
    }

    #[test]
    fn missing_file_reports_open_error() {
        let dir = TempDir::new().unwrap();
        let err = read_text_file(dir.path().join("nope.glsl")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("nope.glsl"));
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(read_text_file(&path), Err(LoadError::Read { .. })));
        assert!(load_text_file(&path).is_empty());
    }

    #[test]
    fn binary_file_keeps_every_byte() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        let data: Vec<u8> = (0..=255).collect();
        fs::write(&path, &data).unwrap();

        assert_eq!(load_binary_file(&path), data);
    }

    #[test]
    fn missing_binary_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load_binary_file(dir.path().join("missing.bin")).is_empty());
    }

    #[test]
    fn empty_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.bin");
        fs::write(&path, b"").unwrap();

        assert!(read_binary_file(&path).unwrap().is_empty());
        assert!(read_text_file(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_text_file_logs_error_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.glsl");

        let (text, log) = with_captured_log(|| load_text_file(&path));
        assert!(text.is_empty());
        assert!(log.contains("ERROR"), "log was: {log}");
        assert!(log.contains("Failed to open text file"), "log was: {log}");
        assert!(log.contains(&path.display().to_string()), "log was: {log}");
    }

    #[test]
    fn missing_binary_file_logs_error_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.bin");

        let (bytes, log) = with_captured_log(|| load_binary_file(&path));
        assert!(bytes.is_empty());
        assert!(log.contains("Failed to open binary file"), "log was: {log}");
        assert!(log.contains(&path.display().to_string()), "log was: {log}");
    }

    #[test]
    fn empty_file_loads_silently() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.glsl");
        fs::write(&path, b"").unwrap();

        let ((text, bytes), log) =
            with_captured_log(|| (load_text_file(&path), load_binary_file(&path)));
        assert!(text.is_empty());
        assert!(bytes.is_empty());
        assert!(log.is_empty(), "log was: {log}");
    }
}
