use std::fmt;

/// Error types for linkstat operations
#[derive(Debug)]
pub enum LinkstatError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// CSV parsing or serialization error
    Csv(csv::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Required column missing from the input header
    MissingColumn(String),

    /// Input row that cannot be processed
    MalformedRecord(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for LinkstatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkstatError::Io(err) => write!(f, "IO error: {err}"),
            LinkstatError::Csv(err) => write!(f, "CSV error: {err}"),
            LinkstatError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LinkstatError::Http(err) => write!(f, "HTTP error: {err}"),
            LinkstatError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            LinkstatError::MissingColumn(name) => write!(f, "Missing column: {name}"),
            LinkstatError::MalformedRecord(msg) => write!(f, "Malformed record: {msg}"),
            LinkstatError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for LinkstatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkstatError::Io(err) => Some(err),
            LinkstatError::Csv(err) => Some(err),
            LinkstatError::Http(err) => Some(err),
            LinkstatError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LinkstatError {
    fn from(err: std::io::Error) -> Self {
        LinkstatError::Io(err)
    }
}

impl From<csv::Error> for LinkstatError {
    fn from(err: csv::Error) -> Self {
        LinkstatError::Csv(err)
    }
}

impl From<reqwest::Error> for LinkstatError {
    fn from(err: reqwest::Error) -> Self {
        LinkstatError::Http(err)
    }
}

impl From<toml::de::Error> for LinkstatError {
    fn from(err: toml::de::Error) -> Self {
        LinkstatError::TomlParsing(err)
    }
}

/// Type alias for Results using LinkstatError
pub type Result<T> = std::result::Result<T, LinkstatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_error = LinkstatError::Config("secondary probe requires a base".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: secondary probe requires a base"
        );

        let column_error = LinkstatError::MissingColumn("URL".to_string());
        assert_eq!(format!("{column_error}"), "Missing column: URL");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let linkstat_error = LinkstatError::from(io_error);

        match linkstat_error {
            LinkstatError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;

        let io_error = std::io::Error::other("inner");
        let linkstat_error = LinkstatError::Io(io_error);
        assert!(linkstat_error.source().is_some());

        let arg_error = LinkstatError::InvalidArgument("bad".to_string());
        assert!(arg_error.source().is_none());
    }
}
