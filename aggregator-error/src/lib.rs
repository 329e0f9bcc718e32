// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the aggregator sequential-reduction primitive
//!
//! The aggregator validates exactly one thing up front: that it was given a
//! combiner. Everything else that can go wrong happens inside user code and is
//! either propagated untouched (panics in synchronous callbacks) or wrapped as
//! a [`AggregatorError::UserError`] when a fallible input stream is fed in.
//!
//! # Examples
//!
//! ```
//! use aggregator_error::{AggregatorError, Result};
//!
//! fn configure() -> Result<()> {
//!     Err(AggregatorError::configuration("combiner not implemented"))
//! }
//!
//! assert!(configure().unwrap_err().is_configuration());
//! ```

/// Root error type for all aggregator operations
#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    /// The aggregator was built without a mandatory part
    ///
    /// Raised synchronously by the builder; no instance is produced.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// What is missing or invalid
        reason: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors produced by fallible input streams so they can be
    /// returned to the caller that was feeding the aggregator.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AggregatorError {
    /// Create a configuration error with the given reason
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this error was raised while configuring an instance
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Specialized Result type for aggregator operations
///
/// # Examples
///
/// ```
/// use aggregator_error::Result;
///
/// fn process() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, AggregatorError>;

/// Extension trait for converting errors into `AggregatorError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoAggregatorError {
    /// Convert this error into an `AggregatorError`
    fn into_aggregator_error(self) -> AggregatorError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoAggregatorError for E {
    fn into_aggregator_error(self) -> AggregatorError {
        AggregatorError::user_error(self)
    }
}
