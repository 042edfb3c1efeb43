use std::io;
use std::path::PathBuf;

/// Failure to acquire the bytes to count.
///
/// Scanning itself never fails; only opening or reading the input can. The underlying
/// `io::Error` is exposed as the error source.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to open '{}'", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read from stdin")]
    Stdin(#[source] io::Error),
}
