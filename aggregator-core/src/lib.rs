// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Building blocks of the aggregator sequential-reduction primitive.
//!
//! - [`Initial`] and [`Combiner`] normalize synchronous and completion-based
//!   user code into one "do the work, then resolve a [`Completion`]" shape.
//! - [`PendingQueue`] buffers values that cannot be combined yet.
//! - [`Controller`] is the explicit state machine that enforces one combine at
//!   a time and FIFO draining.
//! - [`Notifier`] delivers [`Event::Ready`] and [`Event::Data`] to handlers and
//!   streams.

extern crate alloc;

#[macro_use]
#[doc(hidden)]
pub mod logging;

pub mod aggregator_mutex;
pub mod combiner;
pub mod completion;
pub mod controller;
pub mod initializer;
pub mod notifier;
pub mod pending_queue;

pub use self::combiner::Combiner;
pub use self::completion::Completion;
pub use self::controller::{Controller, Input, Output, Phase};
pub use self::initializer::Initial;
pub use self::notifier::{Event, NotificationStream, Notifier, Subscription};
pub use self::pending_queue::PendingQueue;
