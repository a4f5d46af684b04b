//! Error types for link extraction.

use thiserror::Error;

/// Errors that can occur while resolving a document's links.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The effective base URL could not be determined. Raised only when
    /// constructing an extractor.
    #[error("malformed base URL {href:?}: {source}")]
    MalformedBaseUrl {
        href: String,
        #[source]
        source: UriError,
    },

    /// A single link could not be resolved against the base URL.
    #[error("cannot resolve {reference:?}: {source}")]
    UnresolvableLink {
        reference: String,
        #[source]
        source: UriError,
    },
}

/// Why a reference could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("not a URI reference")]
    InvalidReference,

    #[error("relative reference with an empty base")]
    MissingBase,

    /// Scheme-less bases must start with `/` to be merged with.
    #[error("base is neither an absolute URI nor an absolute-path reference")]
    InvalidBase,

    #[error("{0}")]
    Resolution(String),
}

pub type Result<T> = std::result::Result<T, Error>;
