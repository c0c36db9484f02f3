//! Error types for urilex

use std::fmt;
use thiserror::Error;

/// Which component of a URI failed strict validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriErrorKind {
    /// No `scheme:` prefix
    MissingScheme,
    /// Scheme contains characters outside `[A-Za-z0-9+.-]` or does not start with a letter
    InvalidScheme,
    /// An authority is present but the path does not start with `/`
    AuthorityPath,
    /// No authority is present but the path starts with `//`
    DoubleSlashPath,
}

impl fmt::Display for UriErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UriErrorKind::MissingScheme => write!(f, "{}", messages::MISSING_SCHEME),
            UriErrorKind::InvalidScheme => write!(f, "{}", messages::INVALID_SCHEME),
            UriErrorKind::AuthorityPath => write!(f, "{}", messages::AUTHORITY_PATH),
            UriErrorKind::DoubleSlashPath => write!(f, "{}", messages::DOUBLE_SLASH_PATH),
        }
    }
}

/// Main error type for urilex
#[derive(Error, Debug)]
pub enum Error {
    /// A path handed to the splitter has no recognizable root
    #[error("SyntaxError: {} (got {path:?})", messages::MALFORMED_PATH)]
    MalformedPath { path: String },

    /// Strict URI parsing failed
    #[error("URIError: {kind} in {input:?}")]
    InvalidUri { input: String, kind: UriErrorKind },

    /// IO error
    #[error("IOError: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a malformed path error
    pub fn malformed_path(path: impl Into<String>) -> Self {
        Error::MalformedPath { path: path.into() }
    }

    /// Create an invalid URI error
    pub fn invalid_uri(input: impl Into<String>, kind: UriErrorKind) -> Self {
        Error::InvalidUri {
            input: input.into(),
            kind,
        }
    }

    /// True for errors raised by the path splitter
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Error::MalformedPath { .. })
    }
}

/// Result type alias for urilex
pub type Result<T> = std::result::Result<T, Error>;

/// Standardized error message templates
pub mod messages {
    pub const MALFORMED_PATH: &str = "path must start with '/', '\\', or a DOS drive letter";

    pub const MISSING_SCHEME: &str = "scheme is missing";
    pub const INVALID_SCHEME: &str = "scheme contains illegal characters";
    pub const AUTHORITY_PATH: &str =
        "if a URI contains an authority component, then the path component must either be empty or begin with a slash character";
    pub const DOUBLE_SLASH_PATH: &str =
        "if a URI does not contain an authority component, then the path cannot begin with two slash characters";
}
