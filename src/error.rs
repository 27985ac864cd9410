use std::{io, path::PathBuf};

use thiserror::Error;

/// Why a log file could not be opened. Never returned to logging callers;
/// the logger reports it as a console error line.
#[derive(Debug, Error)]
pub(crate) enum SinkError {
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
}
