//! Error handling for the Occupi lock monitor.

/// A specialized `Result` type for Occupi operations.
pub type Result<T> = std::result::Result<T, OccupiError>;

/// The main error type for Occupi operations.
#[derive(Debug, thiserror::Error)]
pub enum OccupiError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// GPIO subsystem could not be opened or a line could not be claimed
    #[error("GPIO error: {0}")]
    Gpio(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// State report could not be delivered
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl OccupiError {
    /// Create a new GPIO error
    pub fn gpio_error(msg: impl Into<String>) -> Self {
        Self::Gpio(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Failure to deliver a single lock state notification.
///
/// Every variant is terminal for that one attempt; the reporter never retries.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The notification payload could not be serialized
    #[error("could not marshal state change: {0}")]
    Marshal(#[from] serde_json::Error),

    /// The HTTP request could not be built (usually a malformed endpoint)
    #[error("could not create update request: {0}")]
    Request(#[source] reqwest::Error),

    /// The request was sent but the exchange failed or timed out
    #[error("could not perform update request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with something other than 200 OK
    #[error("invalid status code from service: {0}")]
    Status(reqwest::StatusCode),
}

impl ReportError {
    /// Whether the failure happened after the service answered.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_error_message() {
        let err = OccupiError::gpio_error("Could not open GPIO: permission denied");
        assert_eq!(
            err.to_string(),
            "GPIO error: Could not open GPIO: permission denied"
        );
    }

    #[test]
    fn test_status_error_converts() {
        let err: OccupiError = ReportError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE).into();
        assert!(matches!(err, OccupiError::Report(ReportError::Status(_))));
        assert!(err.to_string().contains("503"));
    }
}
