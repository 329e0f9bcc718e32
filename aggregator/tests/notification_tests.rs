// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use aggregator::{Added, Aggregator, Combiner, Event, Phase};
use aggregator_test_utils::{
    assert_no_element_emitted, delayed_combiner, delayed_initial, unwrap_stream, Recorder,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::timeout;

fn sum() -> Combiner<i32, i32> {
    Combiner::sync(|value: i32, current: i32| current + value)
}

#[tokio::test]
async fn test_ready_fires_once_with_initial_value() -> anyhow::Result<()> {
    // Arrange
    let ready = Recorder::new();
    let aggregator = Aggregator::new(sum(), delayed_initial(5, 10));
    aggregator.subscribe(Event::Ready, ready.handler());

    // Act
    aggregator.settled().await;
    aggregator.add(1);
    aggregator.settled().await;

    // Assert
    assert_eq!(ready.values(), vec![10]);
    Ok(())
}

#[tokio::test]
async fn test_ready_fires_before_buffered_data() -> anyhow::Result<()> {
    // Arrange
    let log = Arc::new(Mutex::new(Vec::new()));
    let aggregator = Aggregator::new(sum(), delayed_initial(5, 0));
    let ready_log = Arc::clone(&log);
    aggregator.subscribe(Event::Ready, move |v| {
        ready_log.lock().unwrap().push(format!("ready:{v}"));
    });
    let data_log = Arc::clone(&log);
    aggregator.subscribe(Event::Data, move |v| {
        data_log.lock().unwrap().push(format!("data:{v}"));
    });

    // Act
    aggregator.add(1);
    aggregator.add(2);
    aggregator.settled().await;

    // Assert
    assert_eq!(*log.lock().unwrap(), ["ready:0", "data:1", "data:3"]);
    Ok(())
}

#[test]
fn test_data_fires_after_every_combine() {
    // Arrange
    let data = Recorder::new();
    let aggregator = Aggregator::new(sum(), 0);
    aggregator.subscribe(Event::Data, data.handler());

    // Act
    for value in [1, 2, 3] {
        aggregator.add(value);
    }

    // Assert
    assert_eq!(data.values(), vec![1, 3, 6]);
}

#[test]
fn test_late_ready_subscriber_is_not_called() {
    let ready = Recorder::new();
    let aggregator = Aggregator::new(sum(), 5);

    aggregator.subscribe(Event::Ready, ready.handler());
    aggregator.add(1);

    assert!(ready.is_empty());
}

#[test]
fn test_handlers_fire_in_subscription_order() {
    // Arrange
    let order = Arc::new(Mutex::new(Vec::new()));
    let aggregator = Aggregator::new(sum(), 0);
    for name in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        aggregator.subscribe(Event::Data, move |_| order.lock().unwrap().push(name));
    }

    // Act
    aggregator.add(1);

    // Assert
    assert_eq!(*order.lock().unwrap(), ["first", "second", "third"]);
}

#[test]
fn test_subscribe_once_is_removed_after_first_call() {
    // Arrange
    let once = Recorder::new();
    let aggregator = Aggregator::new(sum(), 0);
    aggregator.subscribe_once(Event::Data, once.handler());

    // Act
    aggregator.add(1);
    aggregator.add(2);

    // Assert
    assert_eq!(once.values(), vec![1]);
    assert_eq!(aggregator.subscriber_count(Event::Data), 0);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    // Arrange
    let data = Recorder::new();
    let aggregator = Aggregator::new(sum(), 0);
    let subscription = aggregator.subscribe(Event::Data, data.handler());

    // Act
    aggregator.add(1);
    let removed = aggregator.unsubscribe(Event::Data, &subscription);
    aggregator.add(2);

    // Assert
    assert!(removed);
    assert_eq!(subscription.event(), Event::Data);
    assert_eq!(data.values(), vec![1]);
}

#[test]
fn test_handler_can_read_and_add_reentrantly() {
    // Arrange
    let seen = Recorder::new();
    let aggregator = Aggregator::new(sum(), 0);
    let inner = aggregator.clone();
    let record = seen.handler();
    aggregator.subscribe(Event::Data, move |v| {
        assert_eq!(inner.get(), Some(*v));
        record(v);
        if *v < 5 {
            assert_eq!(inner.add(1), Added::Pending);
        }
    });

    // Act
    let outcome = aggregator.add(1);

    // Assert
    assert_eq!(outcome, Added::Settled(5));
    assert_eq!(seen.values(), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_data_stream_yields_each_new_value() -> anyhow::Result<()> {
    // Arrange
    let aggregator = Aggregator::new(delayed_combiner(2, |v: i32, acc: i32| acc + v), 0);
    let mut data = aggregator.stream(Event::Data);

    // Act
    aggregator.add(4);
    aggregator.add(5);

    // Assert
    assert_eq!(unwrap_stream(&mut data, 500).await, 4);
    assert_eq!(unwrap_stream(&mut data, 500).await, 9);
    assert_no_element_emitted(&mut data, 20).await;
    Ok(())
}

#[tokio::test]
async fn test_ready_stream_yields_once() -> anyhow::Result<()> {
    // Arrange
    let aggregator = Aggregator::new(sum(), delayed_initial(5, 1));
    let mut ready = aggregator.stream(Event::Ready);

    // Act
    aggregator.add(1);

    // Assert
    assert_eq!(unwrap_stream(&mut ready, 500).await, 1);
    assert_no_element_emitted(&mut ready, 20).await;
    Ok(())
}

#[tokio::test]
async fn test_panicking_handler_does_not_stop_later_adds() -> anyhow::Result<()> {
    // Arrange
    let aggregator = Aggregator::new(sum(), 0);
    let armed = Arc::new(AtomicBool::new(true));
    let trip = Arc::clone(&armed);
    aggregator.subscribe(Event::Data, move |_| {
        if trip.swap(false, Ordering::SeqCst) {
            panic!("handler exploded");
        }
    });

    // Act
    let first = panic::catch_unwind(AssertUnwindSafe(|| aggregator.add(1)));

    // Assert
    assert!(first.is_err());
    assert_eq!(aggregator.phase(), Phase::Idle);
    assert_eq!(aggregator.get(), Some(1));
    assert_eq!(aggregator.add(2), Added::Settled(3));
    assert_eq!(aggregator.add(3), Added::Settled(6));
    assert_eq!(aggregator.pending_len(), 0);
    assert_eq!(timeout(Duration::from_secs(1), aggregator.settled()).await?, 6);
    Ok(())
}

#[test]
fn test_values_added_before_a_handler_panic_are_still_combined() {
    // Arrange
    let data = Recorder::new();
    let aggregator = Aggregator::new(sum(), 0);
    let inner = aggregator.clone();
    let armed = Arc::new(AtomicBool::new(true));
    aggregator.subscribe(Event::Data, move |v| {
        if *v == 1 && armed.swap(false, Ordering::SeqCst) {
            inner.add(10);
            panic!("handler exploded");
        }
    });
    aggregator.subscribe(Event::Data, data.handler());

    // Act
    let first = panic::catch_unwind(AssertUnwindSafe(|| aggregator.add(1)));
    let next = aggregator.add(100);

    // Assert
    assert!(first.is_err());
    assert_eq!(next, Added::Settled(111));
    assert_eq!(data.values(), vec![11, 111]);
}
