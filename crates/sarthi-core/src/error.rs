use thiserror::Error;

#[derive(Debug, Error)]
pub enum SarthiError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-supplied query was missing, not a string, or blank.
    /// Displays the bare message so it can be relayed to callers as-is.
    #[error("{0}")]
    InvalidInput(String),
}

impl SarthiError {
    /// Short error code string, used in log fields.
    pub fn code(&self) -> &'static str {
        match self {
            SarthiError::Config(_) => "CONFIG_ERROR",
            SarthiError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

pub type Result<T> = std::result::Result<T, SarthiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_messages() {
        let config = SarthiError::Config("bad port".into());
        assert_eq!(config.code(), "CONFIG_ERROR");
        assert_eq!(config.to_string(), "Configuration error: bad port");

        let input = SarthiError::InvalidInput("blank".into());
        assert_eq!(input.code(), "INVALID_INPUT");
        assert_eq!(input.to_string(), "blank");
    }
}
