// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Future-based initializers and combiners driven by tokio.
//!
//! These wrap an `async` computation into the completion-based shapes: the
//! future is spawned with `tokio::spawn` and resolves the completion when it
//! finishes. They must be invoked from inside a tokio runtime.
//!
//! ```
//! use aggregator::{spawned, Aggregator};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let sum = Aggregator::new(
//!     spawned::combiner(|value: u64, current: u64| async move {
//!         tokio::time::sleep(Duration::from_millis(1)).await;
//!         current + value
//!     }),
//!     spawned::initial(async { 100u64 }),
//! );
//!
//! sum.add(1);
//! sum.add(2);
//! assert_eq!(sum.settled().await, 103);
//! # }
//! ```

use aggregator_core::{Combiner, Completion, Initial};
use core::future::Future;

/// A combiner whose fold step is an `async` computation.
///
/// If the future panics its completion is dropped and the aggregator stops
/// making progress.
pub fn combiner<T, V, F, Fut>(mut combine: F) -> Combiner<T, V>
where
    F: FnMut(T, V) -> Fut + Send + 'static,
    Fut: Future<Output = V> + Send + 'static,
    V: Send + 'static,
{
    Combiner::with_callback(move |value: T, current: V, done: Completion<V>| {
        let next = combine(value, current);
        tokio::spawn(async move {
            done.complete(next.await);
        });
    })
}

/// An initial value produced by an `async` computation.
pub fn initial<V, Fut>(produce: Fut) -> Initial<V>
where
    Fut: Future<Output = V> + Send + 'static,
    V: Send + 'static,
{
    Initial::with_callback(move |done: Completion<V>| {
        tokio::spawn(async move {
            done.complete(produce.await);
        });
    })
}
