// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Error types for page-fragments

use thiserror::Error;

/// Result type alias for page-fragments operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or running fragments and sequences
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid argument provided to method
    ///
    /// Raised at the call boundary before any driver call is made
    /// (empty selector, empty expected text, empty keys, unknown state name, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Selector was never registered on the fragment
    #[error("Element not found: selector '{0}' is not registered")]
    ElementNotFound(String),

    /// No fragment registered under the key
    #[error("Fragment not found: no fragment registered under '{0}'")]
    FragmentNotFound(String),

    /// A registered fragment is not of the requested type
    #[error("Wrong type: fragment '{key}' is not a {expected}")]
    WrongType { key: String, expected: &'static str },

    /// A verification predicate did not hold
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// Failure reported by the element driver or navigation session
    ///
    /// Drivers wrap their own error type here; it is never reinterpreted.
    #[error("Driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Runner configuration could not be assembled
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL could not be parsed or joined
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Wraps a driver-side failure.
    pub fn driver<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Driver(err.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn assertion(msg: impl Into<String>) -> Self {
        Error::AssertionFailed(msg.into())
    }
}
