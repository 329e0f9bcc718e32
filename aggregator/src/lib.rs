// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! # Aggregator
//!
//! A small sequential-reduction primitive: values go in through
//! [`Aggregator::add`], a user-supplied [`Combiner`] folds them one at a time
//! into an accumulated value, and subscribers hear about every new value.
//!
//! Both the combiner and the production of the initial value may finish
//! synchronously or later, from any task or thread, by resolving a
//! [`Completion`]. Either way:
//!
//! - values are combined in exactly the order they were added;
//! - at most one combine runs at a time;
//! - values added before the initial value exists are buffered and drained
//!   automatically once it does.
//!
//! ## Quick Start
//!
//! ```rust
//! use aggregator::prelude::*;
//!
//! let history = Aggregator::new(
//!     Combiner::sync(|value: i32, mut current: Vec<i32>| {
//!         current.push(value);
//!         if current.len() > 3 {
//!             current.remove(0);
//!         }
//!         current
//!     }),
//!     Vec::new(),
//! );
//!
//! for value in 1..=4 {
//!     history.add(value);
//! }
//! assert_eq!(history.get(), Some(vec![2, 3, 4]));
//! ```
//!
//! ## Asynchronous combiners
//!
//! ```rust
//! use aggregator::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let slow_sum = Aggregator::new(
//!     Combiner::with_callback(|value: i32, current: i32, done: Completion<i32>| {
//!         tokio::spawn(async move {
//!             tokio::time::sleep(Duration::from_millis(10)).await;
//!             done.complete(current + value);
//!         });
//!     }),
//!     0,
//! );
//!
//! slow_sum.add(1);
//! assert_eq!(slow_sum.get(), Some(0));
//! assert_eq!(slow_sum.settled().await, 1);
//! # }
//! ```

pub mod aggregator;
pub mod builder;
mod feed;
pub mod prelude;
#[cfg(feature = "runtime-tokio")]
pub mod spawned;

pub use self::aggregator::{Added, Aggregator};
pub use self::builder::AggregatorBuilder;
pub use aggregator_core::{
    Combiner, Completion, Event, Initial, NotificationStream, Phase, Subscription,
};
pub use aggregator_error::{AggregatorError, Result};
