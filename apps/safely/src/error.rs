//! CLI error handling

use std::fmt;

use safely_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(safely_errors::ConfigError),
    /// Operations error
    Ops(safely_errors::Error),
    /// Some selected files could not be downloaded
    PartialFailure { failed: usize, total: usize },
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {e}"),
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: running the command again may succeed.")?;
                }
                Ok(())
            }
            CliError::PartialFailure { failed, total } => {
                write!(f, "{failed} of {total} files failed to download")
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::PartialFailure { .. } => None,
        }
    }
}

impl From<safely_errors::ConfigError> for CliError {
    fn from(e: safely_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<safely_errors::Error> for CliError {
    fn from(e: safely_errors::Error) -> Self {
        match e {
            safely_errors::Error::Config(config) => CliError::Config(config),
            other => CliError::Ops(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safely_errors::{ConfigError, Error, NetworkError};

    #[test]
    fn test_ops_error_shows_code_and_hint() {
        let err = CliError::from(Error::from(NetworkError::UnexpectedStatus { status: 404 }));
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("Code: network.unexpected_status"));
        assert!(text.contains("Hint:"));
    }

    #[test]
    fn test_config_errors_are_unwrapped() {
        let err = CliError::from(Error::from(ConfigError::MissingField {
            field: "api.host".into(),
        }));
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
