// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use aggregator_core::aggregator_mutex::Mutex;
use std::sync::Arc;

/// Collects every payload handed to its handlers, in delivery order.
#[derive(Debug)]
pub struct Recorder<V> {
    values: Arc<Mutex<Vec<V>>>,
}

impl<V: Clone + Send + 'static> Recorder<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A handler suitable for `subscribe` that records a clone of each payload.
    pub fn handler(&self) -> impl Fn(&V) + Send + Sync + 'static {
        let values = Arc::clone(&self.values);
        move |value: &V| values.lock().push(value.clone())
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.values.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl<V: Clone + Send + 'static> Default for Recorder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for Recorder<V> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}
