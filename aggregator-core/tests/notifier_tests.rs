// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use aggregator_core::{Event, Notifier};
use futures::StreamExt;
use std::sync::{Arc, Mutex};

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str, i32) + Clone) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let record = move |tag: &str, value: i32| sink.lock().unwrap().push(format!("{tag}:{value}"));
    (log, record)
}

#[test]
fn test_handlers_fire_in_subscription_order() {
    // Arrange
    let notifier = Notifier::<i32>::new();
    let (log, record) = recorder();
    for tag in ["a", "b", "c"] {
        let record = record.clone();
        notifier.subscribe(Event::Data, move |v| record(tag, *v));
    }

    // Act
    notifier.notify(Event::Data, &7);

    // Assert
    assert_eq!(*log.lock().unwrap(), ["a:7", "b:7", "c:7"]);
}

#[test]
fn test_once_handler_fires_a_single_time() {
    // Arrange
    let notifier = Notifier::<i32>::new();
    let (log, record) = recorder();
    let once = record.clone();
    notifier.subscribe_once(Event::Data, move |v| once("once", *v));
    notifier.subscribe(Event::Data, move |v| record("always", *v));

    // Act
    notifier.notify(Event::Data, &1);
    notifier.notify(Event::Data, &2);

    // Assert
    assert_eq!(*log.lock().unwrap(), ["once:1", "always:1", "always:2"]);
    assert_eq!(notifier.subscriber_count(Event::Data), 1);
}

#[test]
fn test_events_are_independent() {
    // Arrange
    let notifier = Notifier::<i32>::new();
    let (log, record) = recorder();
    let ready = record.clone();
    notifier.subscribe(Event::Ready, move |v| ready("ready", *v));
    notifier.subscribe(Event::Data, move |v| record("data", *v));

    // Act
    notifier.notify(Event::Ready, &0);
    notifier.notify(Event::Data, &5);

    // Assert
    assert_eq!(*log.lock().unwrap(), ["ready:0", "data:5"]);
}

#[test]
fn test_unsubscribe_removes_only_that_handler() {
    // Arrange
    let notifier = Notifier::<i32>::new();
    let (log, record) = recorder();
    let first = record.clone();
    let subscription = notifier.subscribe(Event::Data, move |v| first("first", *v));
    notifier.subscribe(Event::Data, move |v| record("second", *v));

    // Act
    let removed = notifier.unsubscribe(Event::Data, &subscription);
    notifier.notify(Event::Data, &3);

    // Assert
    assert!(removed);
    assert!(!notifier.unsubscribe(Event::Data, &subscription));
    assert_eq!(*log.lock().unwrap(), ["second:3"]);
}

#[test]
fn test_unsubscribe_with_wrong_event_is_rejected() {
    let notifier = Notifier::<i32>::new();
    let subscription = notifier.subscribe(Event::Ready, |_| {});

    assert!(!notifier.unsubscribe(Event::Data, &subscription));
    assert_eq!(notifier.subscriber_count(Event::Ready), 1);
}

#[test]
fn test_handler_may_subscribe_reentrantly() {
    // Arrange
    let notifier = Arc::new(Notifier::<i32>::new());
    let (log, record) = recorder();
    let inner_notifier = Arc::clone(&notifier);
    notifier.subscribe_once(Event::Data, move |_| {
        let record = record.clone();
        inner_notifier.subscribe(Event::Data, move |v| record("late", *v));
    });

    // Act
    notifier.notify(Event::Data, &1);
    notifier.notify(Event::Data, &2);

    // Assert
    assert_eq!(*log.lock().unwrap(), ["late:2"]);
}

#[tokio::test]
async fn test_stream_receives_payloads_sent_after_subscribing() -> anyhow::Result<()> {
    // Arrange
    let notifier = Notifier::<i32>::new();
    notifier.notify(Event::Data, &0);
    let mut stream = notifier.stream(Event::Data);

    // Act
    notifier.notify(Event::Data, &1);
    notifier.notify(Event::Ready, &99);
    notifier.notify(Event::Data, &2);

    // Assert
    assert_eq!(stream.next().await, Some(1));
    assert_eq!(stream.next().await, Some(2));
    Ok(())
}

#[tokio::test]
async fn test_dropped_streams_are_pruned_on_next_notify() -> anyhow::Result<()> {
    // Arrange
    let notifier = Notifier::<i32>::new();
    let dropped = notifier.stream(Event::Data);
    let mut kept = notifier.stream(Event::Data);
    assert_eq!(notifier.subscriber_count(Event::Data), 2);

    // Act
    drop(dropped);
    notifier.notify(Event::Data, &4);

    // Assert
    assert_eq!(notifier.subscriber_count(Event::Data), 1);
    assert_eq!(kept.next().await, Some(4));
    Ok(())
}
