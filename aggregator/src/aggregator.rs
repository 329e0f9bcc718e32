// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The aggregator instance.
//!
//! An [`Aggregator`] folds every value passed to [`Aggregator::add`] into one
//! accumulated value, strictly one value at a time and strictly in the order
//! the values were added, whether the initializer and the combiner complete
//! synchronously or later from another task.
//!
//! ## Characteristics
//!
//! - **Sequential**: never two combines in flight; the combiner need not be
//!   re-entrant.
//! - **Ordered**: values are combined in `add` order regardless of how long
//!   each asynchronous combine takes.
//! - **Buffered**: values added before the initial value exists, or while a
//!   combine is running, wait in an unbounded queue.
//! - **Shared**: cheap to clone; all clones drive the same instance.
//!
//! ## Example
//!
//! ```
//! use aggregator::{Added, Aggregator, Combiner};
//!
//! let concat = Aggregator::new(
//!     Combiner::sync(|value: char, mut current: String| {
//!         current.push(value);
//!         current
//!     }),
//!     String::new(),
//! );
//!
//! assert_eq!(concat.add('h'), Added::Settled("h".to_string()));
//! concat.add('i');
//! assert_eq!(concat.get().as_deref(), Some("hi"));
//! ```

use crate::builder::AggregatorBuilder;
use aggregator_core::aggregator_mutex::Mutex;
use aggregator_core::{
    debug, trace, warn, Combiner, Completion, Controller, Event, Initial, Input,
    NotificationStream, Notifier, Output, Phase, Subscription,
};
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::sync::Arc;

/// What [`Aggregator::add`] observed once it returned control.
///
/// The outcome depends only on the instance's state, never on how it was
/// configured. With a synchronous initializer and combiner, an `add` made
/// outside a notification handler always settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Added<V> {
    /// Ready, nothing in flight and nothing queued: the value is the
    /// accumulated result including the value just added.
    Settled(V),
    /// Still initializing, combining, or delivering notifications. Use
    /// [`Aggregator::get`], [`Aggregator::settled`] or a `Data` subscription.
    Pending,
}

impl<V> Added<V> {
    /// The settled value, if any.
    pub fn settled(self) -> Option<V> {
        match self {
            Self::Settled(value) => Some(value),
            Self::Pending => None,
        }
    }

    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }
}

struct Shared<T, V> {
    controller: Controller<T, V>,
    outbox: VecDeque<(Event, V)>,
    draining: bool,
}

enum Step<T, V> {
    Notify(Event, V),
    Combine { value: T, current: V },
    Idle,
}

impl<T, V: Clone> Shared<T, V> {
    fn next_step(&mut self) -> Step<T, V> {
        if let Some((event, value)) = self.outbox.pop_front() {
            return Step::Notify(event, value);
        }

        match self.controller.transition(Input::Drain) {
            Output::Combine { value, current } => Step::Combine { value, current },
            Output::Stay | Output::Ready(_) | Output::Data(_) => {
                self.draining = false;
                Step::Idle
            }
        }
    }
}

struct Inner<T, V> {
    name: Option<String>,
    shared: Mutex<Shared<T, V>>,
    combiner: Mutex<Combiner<T, V>>,
    notifier: Notifier<V>,
    changed: event_listener::Event,
}

impl<T, V> Inner<T, V> {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("aggregator")
    }
}

impl<T, V> Inner<T, V>
where
    T: Send + 'static,
    V: Clone + Send + 'static,
{
    /// Feeds `input` to the state machine, then drains unless another call
    /// further up some stack is already draining.
    fn resolve(self: &Arc<Self>, input: Input<T, V>) {
        let owner = {
            let mut shared = self.shared.lock();
            match shared.controller.transition(input) {
                Output::Ready(value) => {
                    debug!("{}: ready", self.label());
                    shared.outbox.push_back((Event::Ready, value));
                }
                Output::Data(value) => {
                    trace!("{}: combine completed", self.label());
                    shared.outbox.push_back((Event::Data, value));
                }
                // Combine is only ever handed out for Input::Drain.
                Output::Stay | Output::Combine { .. } => {}
            }
            !mem::replace(&mut shared.draining, true)
        };

        self.changed.notify(usize::MAX);

        if owner {
            self.drain();
        }
    }

    /// Runs until there is nothing left to deliver or combine. Only one
    /// thread drains at a time, so notifications leave in combine order and
    /// synchronous chains never recurse.
    fn drain(self: &Arc<Self>) {
        let mut guard = DrainGuard {
            inner: Arc::as_ref(self),
            finished: false,
        };

        loop {
            let step = self.shared.lock().next_step();
            match step {
                Step::Notify(event, value) => self.notifier.notify(event, &value),
                Step::Combine { value, current } => {
                    trace!("{}: combining next pending value", self.label());
                    let inner = Arc::clone(self);
                    let done = Completion::new("combiner", move |next| {
                        inner.resolve(Input::Combined(next));
                    });
                    self.combiner.lock().combine(value, current, done);
                }
                Step::Idle => {
                    guard.finished = true;
                    self.changed.notify(usize::MAX);
                    return;
                }
            }
        }
    }
}

/// Hands drain ownership back if user code unwinds out of [`Inner::drain`],
/// so the next `add` or completion drains again.
struct DrainGuard<'a, T, V> {
    inner: &'a Inner<T, V>,
    finished: bool,
}

impl<T, V> Drop for DrainGuard<'_, T, V> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("{}: drain interrupted by a panic", self.inner.label());
            self.inner.shared.lock().draining = false;
            self.inner.changed.notify(usize::MAX);
        }
    }
}

/// Folds added values into one accumulated value, one at a time, in order.
///
/// See the [module documentation](crate::aggregator) for details.
pub struct Aggregator<T, V> {
    inner: Arc<Inner<T, V>>,
}

impl<T, V> Aggregator<T, V>
where
    T: Send + 'static,
    V: Clone + Send + 'static,
{
    /// Creates an aggregator and immediately starts producing its initial
    /// value.
    ///
    /// `initial` accepts a plain value or any [`Initial`] shape. A synchronous
    /// initializer completes before `new` returns.
    pub fn new(combiner: Combiner<T, V>, initial: impl Into<Initial<V>>) -> Self {
        Self::start(None, combiner, initial.into(), |_| {})
    }

    /// A builder that validates its parts before producing an instance.
    #[must_use]
    pub fn builder() -> AggregatorBuilder<T, V> {
        AggregatorBuilder::new()
    }

    pub(crate) fn start(
        name: Option<String>,
        combiner: Combiner<T, V>,
        initial: Initial<V>,
        register: impl FnOnce(&Notifier<V>),
    ) -> Self {
        let inner = Arc::new(Inner {
            name,
            shared: Mutex::new(Shared {
                controller: Controller::new(),
                outbox: VecDeque::new(),
                draining: false,
            }),
            combiner: Mutex::new(combiner),
            notifier: Notifier::new(),
            changed: event_listener::Event::new(),
        });

        register(&inner.notifier);

        debug!(
            "{}: initializing ({} initializer, {} combiner)",
            inner.label(),
            if initial.is_synchronous() { "sync" } else { "async" },
            if inner.combiner.lock().is_synchronous() { "sync" } else { "async" }
        );

        let resolver = Arc::clone(&inner);
        initial.start(Completion::new("initializer", move |value| {
            resolver.resolve(Input::Initialized(value));
        }));

        Self { inner }
    }

    /// Queues `value` for combining and drains if the instance is idle.
    ///
    /// Panics raised by a synchronous combiner propagate to this caller.
    pub fn add(&self, value: T) -> Added<V> {
        trace!(
            "{}: value added; {} already pending",
            self.inner.label(),
            self.pending_len()
        );
        self.inner.resolve(Input::Enqueue(value));

        let shared = self.inner.shared.lock();
        match shared.controller.get() {
            Some(value) if shared.controller.is_settled() && !shared.draining => {
                Added::Settled(value.clone())
            }
            _ => Added::Pending,
        }
    }

    /// Alias of [`Aggregator::add`].
    pub fn aggregate(&self, value: T) -> Added<V> {
        self.add(value)
    }

    /// Alias of [`Aggregator::add`].
    pub fn write(&self, value: T) -> Added<V> {
        self.add(value)
    }

    /// The accumulated value, or `None` until the initial value is available.
    ///
    /// While a combine is in flight this is still the previous value.
    #[must_use]
    pub fn get(&self) -> Option<V> {
        self.inner.shared.lock().controller.get().cloned()
    }

    /// Alias of [`Aggregator::get`].
    #[must_use]
    pub fn value(&self) -> Option<V> {
        self.get()
    }

    /// Alias of [`Aggregator::get`].
    #[must_use]
    pub fn read(&self) -> Option<V> {
        self.get()
    }

    /// Calls `handler` for every future `event`.
    ///
    /// [`Event::Ready`] fires once; subscribing after it fired never calls the
    /// handler. Use [`AggregatorBuilder::on_ready`] or [`Aggregator::ready`]
    /// when the initializer may be synchronous.
    pub fn subscribe<F>(&self, event: Event, handler: F) -> Subscription
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.inner.notifier.subscribe(event, handler)
    }

    /// Calls `handler` for the next `event` only.
    pub fn subscribe_once<F>(&self, event: Event, handler: F) -> Subscription
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.inner.notifier.subscribe_once(event, handler)
    }

    /// Removes a handler registered with `subscribe` or `subscribe_once`.
    pub fn unsubscribe(&self, event: Event, subscription: &Subscription) -> bool {
        self.inner.notifier.unsubscribe(event, subscription)
    }

    /// A stream of the payloads of every future `event`.
    pub fn stream(&self, event: Event) -> NotificationStream<V> {
        self.inner.notifier.stream(event)
    }

    /// Number of handlers and live streams listening to `event`.
    #[must_use]
    pub fn subscriber_count(&self, event: Event) -> usize {
        self.inner.notifier.subscriber_count(event)
    }

    /// Resolves with the initial value as soon as it is available.
    pub async fn ready(&self) -> V {
        loop {
            let listener = self.inner.changed.listen();
            if let Some(value) = self.get() {
                return value;
            }
            listener.await;
        }
    }

    /// Resolves once the instance is ready, idle, has nothing queued and has
    /// delivered every notification. Yields the accumulated value.
    ///
    /// Never resolves if an initializer or combiner never completes.
    pub async fn settled(&self) -> V {
        loop {
            let listener = self.inner.changed.listen();
            {
                let shared = self.inner.shared.lock();
                if let Some(value) = shared.controller.get() {
                    if shared.controller.is_settled() && !shared.draining {
                        return value.clone();
                    }
                }
            }
            listener.await;
        }
    }

    /// `true` once the initial value has been delivered.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.shared.lock().controller.is_ready()
    }

    /// `true` while a combine is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.inner.shared.lock().controller.is_processing()
    }

    /// Number of values waiting to be combined.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.inner.shared.lock().controller.pending().len()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.inner.shared.lock().controller.phase()
    }

    /// The name given through the builder, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }
}

impl<T, V> Clone for Aggregator<T, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, V> fmt::Debug for Aggregator<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.inner.shared.lock();
        f.debug_struct("Aggregator")
            .field("name", &self.inner.name)
            .field("phase", &shared.controller.phase())
            .field("pending", &shared.controller.pending().len())
            .finish_non_exhaustive()
    }
}
