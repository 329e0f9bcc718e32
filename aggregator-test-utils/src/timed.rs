// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Initializers and combiners that complete after a tokio timer.

use aggregator_core::{Combiner, Completion, Initial};
use std::time::Duration;
use tokio::time::sleep;

/// An initial value delivered `delay_ms` after initialization starts.
pub fn delayed_initial<V: Send + 'static>(delay_ms: u64, value: V) -> Initial<V> {
    Initial::with_callback(move |done: Completion<V>| {
        tokio::spawn(async move {
            sleep(Duration::from_millis(delay_ms)).await;
            done.complete(value);
        });
    })
}

/// Applies `combine` and delivers its result `delay_ms` later.
pub fn delayed_combiner<T, V, F>(delay_ms: u64, mut combine: F) -> Combiner<T, V>
where
    F: FnMut(T, V) -> V + Send + 'static,
    V: Send + 'static,
{
    Combiner::with_callback(move |value: T, current: V, done: Completion<V>| {
        let next = combine(value, current);
        tokio::spawn(async move {
            sleep(Duration::from_millis(delay_ms)).await;
            done.complete(next);
        });
    })
}

/// Like [`delayed_combiner`], but the n-th call waits `delays_ms[n]`
/// (the last delay repeats once the list runs out).
///
/// # Panics
///
/// Panics if `delays_ms` is empty.
pub fn staggered_combiner<T, V, F>(delays_ms: Vec<u64>, mut combine: F) -> Combiner<T, V>
where
    F: FnMut(T, V) -> V + Send + 'static,
    V: Send + 'static,
{
    assert!(!delays_ms.is_empty(), "staggered_combiner needs at least one delay");
    let mut call = 0usize;
    Combiner::with_callback(move |value: T, current: V, done: Completion<V>| {
        let delay_ms = delays_ms[call.min(delays_ms.len() - 1)];
        call += 1;
        let next = combine(value, current);
        tokio::spawn(async move {
            sleep(Duration::from_millis(delay_ms)).await;
            done.complete(next);
        });
    })
}
