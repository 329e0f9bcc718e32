// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Instance-owned notification channel.
//!
//! A [`Notifier`] keeps, per [`Event`], an ordered list of handlers and a list
//! of stream subscribers. [`Notifier::notify`] calls the handlers in
//! subscription order and pushes the payload into every live stream.
//!
//! ## Characteristics
//!
//! - **Hot**: subscribers only see notifications sent after they subscribed.
//! - **Ordered**: handlers of one event fire in subscription order.
//! - **Once**: handlers registered with [`Notifier::subscribe_once`] are
//!   removed before their first invocation.
//! - **Re-entrant**: no lock is held while handlers run, so a handler may
//!   subscribe, unsubscribe or notify again.
//!
//! ## Example
//!
//! ```
//! use aggregator_core::{Event, Notifier};
//! use std::sync::{Arc, Mutex};
//!
//! let notifier = Notifier::<i32>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! notifier.subscribe(Event::Data, move |v| sink.lock().unwrap().push(*v));
//!
//! notifier.notify(Event::Data, &1);
//! notifier.notify(Event::Data, &2);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
//! ```

use crate::aggregator_mutex::Mutex;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use async_channel::Sender;
use core::fmt;
use core::pin::Pin;
use futures::stream::Stream;

/// The notifications an aggregator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Fired exactly once, with the initial accumulated value.
    Ready,
    /// Fired after every combine, with the new accumulated value.
    Data,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::Data => f.write_str("data"),
        }
    }
}

/// Handle returned by `subscribe`; pass it back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    event: Event,
    id: u64,
}

impl Subscription {
    /// The event this subscription listens to.
    #[must_use]
    pub const fn event(&self) -> Event {
        self.event
    }
}

/// Stream of notification payloads for one event.
pub type NotificationStream<V> = Pin<Box<dyn Stream<Item = V> + Send + 'static>>;

type Handler<V> = Arc<dyn Fn(&V) + Send + Sync>;

struct Entry<V> {
    id: u64,
    once: bool,
    handler: Handler<V>,
}

struct Listeners<V> {
    handlers: Vec<Entry<V>>,
    streams: Vec<Sender<V>>,
}

impl<V> Listeners<V> {
    const fn new() -> Self {
        Self {
            handlers: Vec::new(),
            streams: Vec::new(),
        }
    }
}

struct Registry<V> {
    next_id: u64,
    ready: Listeners<V>,
    data: Listeners<V>,
}

impl<V> Registry<V> {
    fn listeners(&mut self, event: Event) -> &mut Listeners<V> {
        match event {
            Event::Ready => &mut self.ready,
            Event::Data => &mut self.data,
        }
    }
}

/// Observer registry for [`Event::Ready`] and [`Event::Data`].
pub struct Notifier<V> {
    registry: Mutex<Registry<V>>,
}

impl<V: Clone + Send + 'static> Notifier<V> {
    /// Creates a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                next_id: 0,
                ready: Listeners::new(),
                data: Listeners::new(),
            }),
        }
    }

    /// Calls `handler` for every future `event`.
    pub fn subscribe<F>(&self, event: Event, handler: F) -> Subscription
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.register(event, false, Arc::new(handler))
    }

    /// Calls `handler` for the next `event` only.
    pub fn subscribe_once<F>(&self, event: Event, handler: F) -> Subscription
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.register(event, true, Arc::new(handler))
    }

    /// Removes a handler. Returns `false` if it was already gone, for
    /// instance because a once-handler has fired, or if `event` does not match
    /// the event the subscription was made for.
    pub fn unsubscribe(&self, event: Event, subscription: &Subscription) -> bool {
        if subscription.event != event {
            return false;
        }

        let mut registry = self.registry.lock();
        let handlers = &mut registry.listeners(event).handlers;
        let before = handlers.len();
        handlers.retain(|entry| entry.id != subscription.id);
        before != handlers.len()
    }

    /// A stream of every future `event` payload.
    ///
    /// Dropping the stream unsubscribes it; the sender is pruned on the next
    /// notification.
    pub fn stream(&self, event: Event) -> NotificationStream<V> {
        let (tx, rx) = async_channel::unbounded();
        self.registry.lock().listeners(event).streams.push(tx);
        Box::pin(rx)
    }

    /// Delivers `value` to every subscriber of `event`.
    pub fn notify(&self, event: Event, value: &V) {
        let handlers = {
            let mut registry = self.registry.lock();
            let listeners = registry.listeners(event);

            let handlers: Vec<Handler<V>> = listeners
                .handlers
                .iter()
                .map(|entry| Arc::clone(&entry.handler))
                .collect();
            listeners.handlers.retain(|entry| !entry.once);

            let before = listeners.streams.len();
            listeners
                .streams
                .retain(|tx| tx.try_send(value.clone()).is_ok());
            if listeners.streams.len() != before {
                trace!(
                    "pruned {} dropped {} stream subscriber(s)",
                    before - listeners.streams.len(),
                    event
                );
            }

            handlers
        };

        for handler in handlers {
            handler(value);
        }
    }

    /// Number of handlers plus live streams listening to `event`.
    ///
    /// Dropped streams are only pruned on the next notification.
    #[must_use]
    pub fn subscriber_count(&self, event: Event) -> usize {
        let mut registry = self.registry.lock();
        let listeners = registry.listeners(event);
        listeners.handlers.len() + listeners.streams.len()
    }

    fn register(&self, event: Event, once: bool, handler: Handler<V>) -> Subscription {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .listeners(event)
            .handlers
            .push(Entry { id, once, handler });
        Subscription { event, id }
    }
}

impl<V: Clone + Send + 'static> Default for Notifier<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Notifier<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.lock();
        f.debug_struct("Notifier")
            .field("ready_handlers", &registry.ready.handlers.len())
            .field("data_handlers", &registry.data.handlers.len())
            .finish_non_exhaustive()
    }
}
