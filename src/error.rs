use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while preparing or running a render.
#[derive(Debug, Error)]
pub enum Error {
    /// The executable could not be found next to this program, on the `PATH`, or in the
    /// directory named by its environment variable
    #[error("{command} not found")]
    NotFound { command: String },

    /// The process could not be launched or exited unsuccessfully. Holds the trimmed
    /// standard error of the process when it wrote any, otherwise the launch/exit failure
    #[error("{0}")]
    Process(String),

    /// Streaming a page into the process's standard input failed
    #[error("Failed to stream page input: {0}")]
    Input(#[source] std::io::Error),

    /// The process did not finish before the deadline and was killed
    #[error("wkhtmltopdf did not finish within {0:?}")]
    TimedOut(Duration),

    /// A document can only read one page from standard input
    #[error("Only one page per document can be read from a stream")]
    MultipleStreamPages,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialise document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode page data: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
