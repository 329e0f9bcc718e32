// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Aggregator;
use aggregator_error::{IntoAggregatorError, Result};
use futures::stream::{Stream, StreamExt};
use futures::pin_mut;

impl<T, V> Aggregator<T, V>
where
    T: Send + 'static,
    V: Clone + Send + 'static,
{
    /// Adds every item of `stream`, in stream order, and returns how many
    /// items were added once the stream ends.
    ///
    /// Returning does not mean the items were combined; await
    /// [`Aggregator::settled`] for that.
    pub async fn feed<S>(&self, stream: S) -> usize
    where
        S: Stream<Item = T>,
    {
        pin_mut!(stream);
        let mut added = 0;
        while let Some(value) = stream.next().await {
            self.add(value);
            added += 1;
        }
        added
    }

    /// Like [`Aggregator::feed`] for fallible streams: stops at the first
    /// error. Values before the error stay added.
    ///
    /// # Errors
    ///
    /// Returns the stream's error wrapped as
    /// [`AggregatorError::UserError`](aggregator_error::AggregatorError::UserError).
    pub async fn try_feed<S, E>(&self, stream: S) -> Result<usize>
    where
        S: Stream<Item = core::result::Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        pin_mut!(stream);
        let mut added = 0;
        while let Some(item) = stream.next().await {
            let value = item.map_err(IntoAggregatorError::into_aggregator_error)?;
            self.add(value);
            added += 1;
        }
        Ok(added)
    }
}
