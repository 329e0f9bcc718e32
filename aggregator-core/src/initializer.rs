// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The three accepted shapes of an initial accumulated value.
//!
//! Whatever the shape, [`Initial::start`] resolves the supplied completion
//! exactly once: immediately for [`Initial::Value`] and [`Initial::Sync`],
//! whenever the user resolves it for [`Initial::Async`].
//!
//! ```
//! use aggregator_core::{Completion, Initial};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(None));
//! let sink = Arc::clone(&seen);
//!
//! Initial::from_fn(|| 12).start(Completion::new("init", move |v| {
//!     *sink.lock().unwrap() = Some(v);
//! }));
//!
//! assert_eq!(*seen.lock().unwrap(), Some(12));
//! ```

use crate::Completion;
use alloc::boxed::Box;
use core::fmt;

/// Produces the starting accumulated value of an aggregator.
pub enum Initial<V> {
    /// A literal value, available immediately.
    Value(V),
    /// A zero-argument producer, called once during construction.
    Sync(Box<dyn FnOnce() -> V + Send>),
    /// A producer that resolves the given completion whenever it is ready.
    Async(Box<dyn FnOnce(Completion<V>) + Send>),
}

impl<V> Initial<V> {
    /// A literal initial value.
    pub const fn value(value: V) -> Self {
        Self::Value(value)
    }

    /// A synchronous producer. Whatever it returns, unit and `None` included,
    /// becomes the initial value.
    pub fn from_fn<F>(producer: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
    {
        Self::Sync(Box::new(producer))
    }

    /// An asynchronous producer that must resolve the completion it receives.
    pub fn with_callback<F>(producer: F) -> Self
    where
        F: FnOnce(Completion<V>) + Send + 'static,
    {
        Self::Async(Box::new(producer))
    }

    /// Returns `true` if `start` resolves its completion before returning.
    #[must_use]
    pub const fn is_synchronous(&self) -> bool {
        !matches!(self, Self::Async(_))
    }

    /// Runs the producer and resolves `done` with its result.
    pub fn start(self, done: Completion<V>) {
        match self {
            Self::Value(value) => done.complete(value),
            Self::Sync(producer) => done.complete(producer()),
            Self::Async(producer) => producer(done),
        }
    }
}

impl<V> From<V> for Initial<V> {
    fn from(value: V) -> Self {
        Self::Value(value)
    }
}

impl<V: fmt::Debug> fmt::Debug for Initial<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Sync(_) => f.write_str("Sync(..)"),
            Self::Async(_) => f.write_str("Async(..)"),
        }
    }
}
