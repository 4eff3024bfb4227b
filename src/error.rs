use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a whole snapshot.
///
/// A tool that ran and printed nothing is not an error: that is a host
/// without controllers and parses to an empty snapshot.
#[derive(Error, Debug)]
pub enum Error {
    /// The array CLI is not installed at the configured path
    #[error("array tool not found at {path}")]
    ToolNotFound { path: String },

    /// The array CLI did not finish in time
    #[error("{path} timed out after {seconds}s")]
    ToolTimeout { path: String, seconds: u64 },

    /// The array CLI exited unsuccessfully
    #[error("{path} exited with status {code}: {stderr}")]
    ToolFailed {
        path: String,
        code: i32,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The inventory API answered with a non-success status
    #[error("inventory API returned HTTP {status}: {body}")]
    ApiRejected { status: u16, body: String },
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
