// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use aggregator::{Aggregator, AggregatorError, Combiner};
use aggregator_test_utils::{delayed_combiner, delayed_initial};
use futures::stream;
use std::io;

#[tokio::test]
async fn test_feed_adds_every_item_in_order() -> anyhow::Result<()> {
    // Arrange
    let digits = Aggregator::new(
        delayed_combiner(1, |v: u32, acc: u32| acc * 10 + v),
        delayed_initial(5, 0u32),
    );

    // Act
    let added = digits.feed(stream::iter([1, 2, 3, 4])).await;

    // Assert
    assert_eq!(added, 4);
    assert_eq!(digits.settled().await, 1234);
    Ok(())
}

#[tokio::test]
async fn test_try_feed_stops_at_first_error() -> anyhow::Result<()> {
    // Arrange
    let sum = Aggregator::new(Combiner::sync(|v: i32, acc: i32| acc + v), 0);
    let items = vec![Ok(1), Ok(2), Err(io::Error::other("broken pipe")), Ok(4)];

    // Act
    let result = sum.try_feed(stream::iter(items)).await;

    // Assert
    assert!(matches!(result, Err(AggregatorError::UserError(_))));
    assert_eq!(sum.get(), Some(3));
    Ok(())
}

#[tokio::test]
async fn test_try_feed_reports_count_on_success() -> anyhow::Result<()> {
    let sum = Aggregator::new(Combiner::sync(|v: i32, acc: i32| acc + v), 0);
    let items: Vec<Result<i32, io::Error>> = vec![Ok(5), Ok(6)];

    let added = sum.try_feed(stream::iter(items)).await?;

    assert_eq!(added, 2);
    assert_eq!(sum.get(), Some(11));
    Ok(())
}
