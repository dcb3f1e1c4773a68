use std::fmt;

/// Column names used by the record files.
pub mod columns {
    pub const URL: &str = "URL";
    pub const LAST_CRAWLED: &str = "Last crawled";
    pub const STATUS: &str = "Status";
    pub const REDIRECT_TO: &str = "Redirect to";
    pub const NGINX_CONFIG: &str = "nginx config";
}

/// Status assigned to a record after probing.
///
/// Exactly one of the two variants ends up on every processed record:
/// a definitive HTTP status code, or the error sentinel for probes that
/// failed at the network level (DNS, connect, TLS, timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Effective HTTP status code (may differ from the raw response code,
    /// e.g. a trailing-slash self-redirect is demoted to 404).
    Code(u16),
    /// Network-level failure sentinel, serialized as the literal "Error".
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Code(code) => write!(f, "{code}"),
            Status::Error => write!(f, "Error"),
        }
    }
}

/// One row of the input/output file.
///
/// `url` is the only required input field. `last_crawled` and `extra` are
/// passed through untouched. The output fields are populated exactly once
/// by the probe/classify/resolve chain; a record is never mutated after
/// serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub url: String,
    pub last_crawled: String,
    pub status: Option<Status>,
    pub redirect_to: Option<String>,
    pub nginx_config: Option<String>,
    /// Values of unrecognized input columns, in header order.
    pub extra: Vec<String>,
}

impl Record {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// True once the probe chain has assigned either a definitive code or
    /// the error sentinel.
    pub fn is_processed(&self) -> bool {
        self.status.is_some()
    }
}
