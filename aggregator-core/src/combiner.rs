// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Folds one incoming value into the accumulated value.
//!
//! The caller picks the shape explicitly: [`Combiner::sync`] for a plain
//! `(value, current) -> next` function, [`Combiner::with_callback`] for a
//! function that resolves a [`Completion`] later. Both are driven through the
//! single [`Combiner::combine`] entry point.
//!
//! ```
//! use aggregator_core::{Combiner, Completion};
//! use std::sync::{Arc, Mutex};
//!
//! let mut concat = Combiner::sync(|value: char, mut current: String| {
//!     current.push(value);
//!     current
//! });
//!
//! let out = Arc::new(Mutex::new(String::new()));
//! let sink = Arc::clone(&out);
//! concat.combine('h', String::new(), Completion::new("combine", move |v| {
//!     *sink.lock().unwrap() = v;
//! }));
//!
//! assert_eq!(*out.lock().unwrap(), "h");
//! ```

use crate::Completion;
use alloc::boxed::Box;
use core::fmt;

type SyncFn<T, V> = Box<dyn FnMut(T, V) -> V + Send>;
type AsyncFn<T, V> = Box<dyn FnMut(T, V, Completion<V>) + Send>;

/// A user-supplied fold step, either synchronous or completion-based.
pub enum Combiner<T, V> {
    /// Returns the next accumulated value directly.
    Sync(SyncFn<T, V>),
    /// Resolves the completion with the next accumulated value, possibly later.
    Async(AsyncFn<T, V>),
}

impl<T, V> Combiner<T, V> {
    /// A synchronous combiner: `(incoming, current) -> next`.
    pub fn sync<F>(combine: F) -> Self
    where
        F: FnMut(T, V) -> V + Send + 'static,
    {
        Self::Sync(Box::new(combine))
    }

    /// An asynchronous combiner: `(incoming, current, completion)`.
    ///
    /// The completion must be resolved exactly once; until then no other value
    /// is combined.
    pub fn with_callback<F>(combine: F) -> Self
    where
        F: FnMut(T, V, Completion<V>) + Send + 'static,
    {
        Self::Async(Box::new(combine))
    }

    /// Returns `true` if `combine` resolves its completion before returning.
    #[must_use]
    pub const fn is_synchronous(&self) -> bool {
        matches!(self, Self::Sync(_))
    }

    /// Folds `value` into `current` and resolves `done` with the result.
    pub fn combine(&mut self, value: T, current: V, done: Completion<V>) {
        match self {
            Self::Sync(combine) => done.complete(combine(value, current)),
            Self::Async(combine) => combine(value, current, done),
        }
    }
}

impl<T, V> fmt::Debug for Combiner<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Combiner::Sync(..)"),
            Self::Async(_) => f.write_str("Combiner::Async(..)"),
        }
    }
}
