// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot completion handle handed to asynchronous initializers and combiners.
//!
//! A [`Completion`] is the Rust shape of a "call me back with the result"
//! argument. Resolving it consumes the handle, so a completion can never fire
//! twice. Dropping it unresolved leaves the owning aggregator waiting forever;
//! that is reported through the `tracing` feature but otherwise accepted.
//!
//! ## Example
//!
//! ```
//! use aggregator_core::Completion;
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let completion = Completion::new("example", move |value: i32| {
//!     tx.send(value).unwrap();
//! });
//!
//! std::thread::spawn(move || completion.complete(42)).join().unwrap();
//! assert_eq!(rx.recv().unwrap(), 42);
//! ```

use alloc::boxed::Box;
use core::fmt;

type Resolver<V> = Box<dyn FnOnce(V) + Send>;

/// A handle that must be resolved exactly once with a value.
///
/// Completions are `Send`, so they can be moved into spawned tasks, timers or
/// other threads and resolved from there.
#[must_use = "an unresolved completion stalls the aggregator that issued it"]
pub struct Completion<V> {
    resolver: Option<Resolver<V>>,
    label: &'static str,
}

impl<V> Completion<V> {
    /// Creates a completion that hands the resolved value to `resolver`.
    ///
    /// `label` identifies the issuing operation in log records.
    pub fn new<F>(label: &'static str, resolver: F) -> Self
    where
        F: FnOnce(V) + Send + 'static,
    {
        Self {
            resolver: Some(Box::new(resolver)),
            label,
        }
    }

    /// Resolves the completion with `value`.
    pub fn complete(mut self, value: V) {
        if let Some(resolver) = self.resolver.take() {
            resolver(value);
        }
    }

    /// The label of the operation that issued this completion.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

impl<V> Drop for Completion<V> {
    fn drop(&mut self) {
        if self.resolver.is_some() {
            warn!(
                "{} completion dropped without a value; the aggregator will not make progress",
                self.label
            );
        }
    }
}

impl<V> fmt::Debug for Completion<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("label", &self.label)
            .field("resolved", &self.resolver.is_none())
            .finish()
    }
}
