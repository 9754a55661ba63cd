use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("source file not found: {}", .0.display())]
    MissingSource(PathBuf),
    #[error("source is not a regular file: {}", .0.display())]
    SourceNotAFile(PathBuf),
    #[error("concept file not found: {}", .0.display())]
    MissingConceptFile(PathBuf),
    #[error("destination must be a relative path inside the site root: {}", .0.display())]
    InvalidDestination(PathBuf),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
