use std::path::PathBuf;
use std::{error, fmt, io};

/// Error type for project loading.
///
/// Asset problems (a tileset image that is missing or will not decode) are
/// not errors: the registry logs a warning and the affected tiles simply do
/// not render. Likewise a texture descriptor pointing at a missing tileset
/// or an out-of-range index skips that cell at draw time.
#[derive(Debug)]
pub enum Error {
    /// The project/level file does not exist.
    NotFound(PathBuf),
    /// File I/O error while reading the document.
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The document is not valid JSON or a required field is missing
    /// (serde names the field in the message).
    Json {
        /// Path of the offending document.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// The document parsed but violates the level data model
    /// (zero width/height/tile_size).
    InvalidLevel {
        /// Path of the offending document.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(path) => write!(f, "Project file not found: {}", path.display()),
            Error::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            Error::Json { path, source } => {
                write!(f, "Failed to parse {}: {}", path.display(), source)
            }
            Error::InvalidLevel { path, reason } => {
                write!(f, "Invalid level in {}: {}", path.display(), reason)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
