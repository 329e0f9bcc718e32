// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A combiner the test drives by hand.
//!
//! ```rust
//! use aggregator_test_utils::ManualCombiner;
//! use aggregator_core::Completion;
//!
//! let manual = ManualCombiner::<i32, i32>::new();
//! let mut combiner = manual.combiner();
//!
//! combiner.combine(1, 0, Completion::new("test", |_| {}));
//! assert_eq!(manual.in_flight(), 1);
//!
//! let (value, current) = manual.resolve_with(|value, current| current + value);
//! assert_eq!((value, current), (1, 0));
//! ```

use aggregator_core::aggregator_mutex::Mutex;
use aggregator_core::{Combiner, Completion};
use std::collections::VecDeque;
use std::sync::Arc;

type Parked<T, V> = (T, V, Completion<V>);

/// Parks every combine call until the test resolves it.
#[derive(Debug)]
pub struct ManualCombiner<T, V> {
    parked: Arc<Mutex<VecDeque<Parked<T, V>>>>,
}

impl<T, V> ManualCombiner<T, V>
where
    T: Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            parked: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// A combiner that parks its calls in this handle.
    #[must_use]
    pub fn combiner(&self) -> Combiner<T, V> {
        let parked = Arc::clone(&self.parked);
        Combiner::with_callback(move |value: T, current: V, done: Completion<V>| {
            parked.lock().push_back((value, current, done));
        })
    }

    /// Number of combine calls waiting to be resolved.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.parked.lock().len()
    }

    /// Resolves the oldest parked call with `combine(value, current)` and
    /// returns the `(value, current)` pair it was called with.
    ///
    /// # Panics
    ///
    /// Panics if nothing is parked.
    pub fn resolve_with(&self, combine: impl FnOnce(T, V) -> V) -> (T, V) {
        let (value, current, done) = self
            .parked
            .lock()
            .pop_front()
            .expect("no combine call is in flight");
        done.complete(combine(value.clone(), current.clone()));
        (value, current)
    }
}

impl<T, V> Default for ManualCombiner<T, V>
where
    T: Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
