// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(String),
    Source(SourceError),
}

/// Specific error types for photo-listing failures.
/// A listing failure aborts the whole scan and is surfaced once as a
/// placeholder message in the grid area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The listing endpoint could not be reached (DNS, TLS, timeout, ...).
    Network(String),

    /// The listing endpoint answered with a non-success HTTP status.
    Status(u16),

    /// The listing response did not match the expected payload shape.
    Listing(String),
}

impl SourceError {
    /// Returns a short human-readable message for the grid placeholder.
    pub fn user_message(&self) -> String {
        match self {
            SourceError::Network(_) => {
                "Could not reach the photo listing. Check your connection and restart.".to_string()
            }
            SourceError::Status(code) => {
                format!("The photo listing answered with HTTP {code}.")
            }
            SourceError::Listing(_) => "The photo listing could not be understood.".to_string(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "listing endpoint unreachable: {}", msg),
            SourceError::Status(code) => write!(f, "listing endpoint returned HTTP {}", code),
            SourceError::Listing(msg) => write!(f, "malformed listing payload: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Source(e) => write!(f, "Source Error: {}", e),
        }
    }
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Error::Source(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn source_error_wraps_into_error() {
        let err: Error = SourceError::Status(503).into();
        assert!(matches!(err, Error::Source(SourceError::Status(503))));
    }

    #[test]
    fn source_error_display_mentions_status_code() {
        let err = SourceError::Status(404);
        assert!(format!("{}", err).contains("404"));
    }

    #[test]
    fn user_message_for_status_names_the_code() {
        let msg = SourceError::Status(500).user_message();
        assert!(msg.contains("500"));
    }

    #[test]
    fn user_message_for_network_suggests_checking_connection() {
        let msg = SourceError::Network("connection refused".into()).user_message();
        assert!(msg.contains("connection"));
    }
}
