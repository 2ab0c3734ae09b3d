//! Error types for podd-edit
//!
//! Failure modes of the client:
//! - Transport (request failures, HTTP error statuses, timeouts)
//! - RDF (malformed RDF/JSON documents, invalid terms)
//! - Synchronization (server responses without artifact identity)
//! - Configuration (unreadable or invalid config files)
//! - File I/O

use std::fmt;
use std::io;

/// Result type alias for podd-edit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for podd-edit
#[derive(Debug)]
pub enum Error {
    /// Requests to the PODD web services
    Transport(TransportError),
    /// RDF parsing and term errors
    Rdf(RdfError),
    /// Identity reconciliation errors
    Sync(SyncError),
    /// Configuration errors
    Config(ConfigError),
    /// I/O errors
    Io(io::Error),
}

/// Errors talking to the PODD web services
#[derive(Debug)]
pub enum TransportError {
    /// Request could not be sent or the response could not be read
    RequestFailed { url: String, source: String },
    /// Server answered with a non-success status
    Status { url: String, status: u16, body: String },
    /// Request did not complete within the configured timeout
    Timeout { url: String, timeout_secs: u64 },
    /// Endpoint URL could not be built from the configured base
    InvalidUrl(String),
}

/// RDF document and term errors
#[derive(Debug)]
pub enum RdfError {
    /// RDF/JSON body could not be parsed
    ParseFailed(String),
    /// RDF/JSON value object has an unknown type tag or missing fields
    InvalidTerm(String),
    /// Databank could not be serialized
    SerializeFailed(String),
}

/// Identity reconciliation errors
#[derive(Debug)]
pub enum SyncError {
    /// Response contained no `owl:versionIRI` statement
    MissingOntologyId,
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    ReadFailed { path: String, source: io::Error },
    /// Config file is not valid TOML or has wrong field types
    ParseFailed { path: String, details: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "Transport error: {}", e),
            Error::Rdf(e) => write!(f, "RDF error: {}", e),
            Error::Sync(e) => write!(f, "Sync error: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::RequestFailed { url, source } => {
                write!(f, "Request to {} failed: {}", url, source)
            }
            TransportError::Status { url, status, body } => {
                if body.is_empty() {
                    write!(f, "{} returned status {}", url, status)
                } else {
                    write!(f, "{} returned status {}: {}", url, status, body)
                }
            }
            TransportError::Timeout { url, timeout_secs } => {
                write!(f, "Request to {} timed out after {}s", url, timeout_secs)
            }
            TransportError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
        }
    }
}

impl fmt::Display for RdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfError::ParseFailed(details) => {
                write!(f, "Failed to parse RDF/JSON: {}", details)
            }
            RdfError::InvalidTerm(details) => write!(f, "Invalid RDF term: {}", details),
            RdfError::SerializeFailed(details) => {
                write!(f, "Failed to serialize databank: {}", details)
            }
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::MissingOntologyId => {
                write!(f, "Response did not contain an artifact version IRI")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path, source)
            }
            ConfigError::ParseFailed { path, details } => {
                write!(f, "Failed to parse {}: {}", path, details)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(ConfigError::ReadFailed { source, .. }) | Error::Io(source) => {
                Some(source)
            }
            _ => None,
        }
    }
}

impl std::error::Error for TransportError {}
impl std::error::Error for RdfError {}
impl std::error::Error for SyncError {}
impl std::error::Error for ConfigError {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Transport(err)
    }
}

impl From<RdfError> for Error {
    fn from(err: RdfError) -> Self {
        Error::Rdf(err)
    }
}

impl From<SyncError> for Error {
    fn from(err: SyncError) -> Self {
        Error::Sync(err)
    }
}

impl Error {
    /// Check if a later attempt could succeed (network issues, server errors).
    ///
    /// Nothing in the client retries on its own; this only lets callers decide.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(TransportError::RequestFailed { .. })
            | Error::Transport(TransportError::Timeout { .. }) => true,
            Error::Transport(TransportError::Status { status, .. }) => *status >= 500,
            _ => false,
        }
    }

    /// Get formatted context string for logging
    pub fn context(&self) -> String {
        match self {
            Error::Transport(e) => format!("transport: {}", e),
            Error::Rdf(e) => format!("rdf: {}", e),
            Error::Sync(e) => format!("sync: {}", e),
            Error::Config(e) => format!("config: {}", e),
            Error::Io(e) => format!("io: {}", e),
        }
    }
}
