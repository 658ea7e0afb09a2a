use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZeroGenError>;

/// Everything that can end a run early.
#[derive(Error, Debug)]
pub enum ZeroGenError {
    /// Bad command line input that the argument parser itself let through.
    #[error("argument error: {0}")]
    Argument(String),

    /// The destination could not be created or truncated.
    #[error("could not create \"{}\": {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
