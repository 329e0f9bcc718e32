// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Validating construction of an [`Aggregator`].
//!
//! ```
//! use aggregator::{Aggregator, Combiner, Initial};
//!
//! let total = Aggregator::builder()
//!     .name("total")
//!     .combiner(Combiner::sync(|value: u32, current: u32| current + value))
//!     .initial(Initial::from_fn(|| 10))
//!     .build()
//!     .unwrap();
//!
//! total.add(5);
//! assert_eq!(total.get(), Some(15));
//!
//! let missing = Aggregator::<u32, u32>::builder().initial(0u32).build();
//! assert!(missing.unwrap_err().is_configuration());
//! ```

use crate::Aggregator;
use aggregator_core::{Combiner, Event, Initial, Notifier};
use aggregator_error::{AggregatorError, Result};
use std::fmt;
use std::sync::Arc;

type Handler<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// Collects the parts of an [`Aggregator`]; [`build`](Self::build) refuses to
/// produce an instance without a combiner or an initial value.
pub struct AggregatorBuilder<T, V> {
    name: Option<String>,
    combiner: Option<Combiner<T, V>>,
    initial: Option<Initial<V>>,
    handlers: Vec<(Event, Handler<V>)>,
}

impl<T, V> AggregatorBuilder<T, V>
where
    T: Send + 'static,
    V: Clone + Send + 'static,
{
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            combiner: None,
            initial: None,
            handlers: Vec::new(),
        }
    }

    /// Names the instance in log records.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn combiner(mut self, combiner: Combiner<T, V>) -> Self {
        self.combiner = Some(combiner);
        self
    }

    #[must_use]
    pub fn initial(mut self, initial: impl Into<Initial<V>>) -> Self {
        self.initial = Some(initial.into());
        self
    }

    /// Registers a [`Event::Ready`] handler before initialization starts, so
    /// it also fires for synchronous initializers.
    #[must_use]
    pub fn on_ready<F>(mut self, handler: F) -> Self
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.handlers.push((Event::Ready, Arc::new(handler)));
        self
    }

    /// Registers a [`Event::Data`] handler before initialization starts.
    #[must_use]
    pub fn on_data<F>(mut self, handler: F) -> Self
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.handlers.push((Event::Data, Arc::new(handler)));
        self
    }

    /// Builds the instance and starts its initializer.
    ///
    /// # Errors
    ///
    /// Returns [`AggregatorError::Configuration`] if no combiner or no initial
    /// value was supplied.
    pub fn build(self) -> Result<Aggregator<T, V>> {
        let Self {
            name,
            combiner,
            initial,
            handlers,
        } = self;

        let combiner =
            combiner.ok_or_else(|| AggregatorError::configuration("combiner not implemented"))?;
        let initial =
            initial.ok_or_else(|| AggregatorError::configuration("initial value not provided"))?;

        Ok(Aggregator::start(
            name,
            combiner,
            initial,
            move |notifier: &Notifier<V>| {
                for (event, handler) in handlers {
                    notifier.subscribe(event, move |value| handler(value));
                }
            },
        ))
    }
}

impl<T, V> Default for AggregatorBuilder<T, V>
where
    T: Send + 'static,
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> fmt::Debug for AggregatorBuilder<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregatorBuilder")
            .field("name", &self.name)
            .field("combiner", &self.combiner)
            .field("has_initial", &self.initial.is_some())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
