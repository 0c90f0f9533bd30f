use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures the navigator reports to its collaborators
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The directory itself could not be enumerated
    #[error("Error loading directory {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The OS default handler could not be launched
    #[error("Could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BrowseError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            BrowseError::Listing { path, .. } | BrowseError::Open { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowseError>;
