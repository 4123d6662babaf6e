//! Error type shared by every fallible operation in the core.
//!
//! Only one condition in dpnav is recoverable, a missing appliance credential,
//! and it is modelled as a navigation outcome rather than an error. Everything
//! represented here is fatal: the coordinator logs it and stops.

use std::path::PathBuf;

/// Convenience alias used throughout `dpnav-core`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The appliance answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// A management response did not have the expected shape.
    #[error("malformed {what} response: {detail}")]
    Malformed { what: &'static str, detail: String },

    /// Reading a local directory failed.
    #[error("cannot read local directory {}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is missing or contradictory.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wraps any of the above with the listing operation that hit it.
    #[error("{operation} for {location}")]
    Listing {
        operation: &'static str,
        location: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn malformed(what: &'static str, detail: impl Into<String>) -> Self {
        Error::Malformed { what, detail: detail.into() }
    }

    /// Attaches the failing operation and location to an error.
    pub(crate) fn listing(self, operation: &'static str, location: impl Into<String>) -> Self {
        Error::Listing { operation, location: location.into(), source: Box::new(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_context_keeps_the_cause() {
        let err = Error::Config("no management url".into()).listing("list domains", "dev");
        assert_eq!(err.to_string(), "list domains for dev");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("configuration error: no management url"));
    }
}
