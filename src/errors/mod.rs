use thiserror::Error;

/// Closed set of failure kinds surfaced at the API boundary.
///
/// The HTTP layer maps each kind to a distinct status code instead of
/// flattening everything into a generic 500, so callers can tell a
/// missing player from a provider outage without string inspection.
#[derive(Debug, Error)]
pub enum AppError {
    /// Name did not match any active roster entry (exact, case-insensitive).
    #[error("player '{0}' not found in the active roster")]
    PlayerNotFound(String),

    /// Requested stat column is absent from the fetched game log.
    #[error("stat '{0}' not available in the fetched game log")]
    StatNotAvailable(String),

    /// Malformed request input (unknown stat code, bad numeric field).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Network or upstream failure talking to the stats provider.
    #[error("stats provider error: {0}")]
    Provider(String),

    /// Anything that escaped classification.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Provider(err.to_string())
    }
}
