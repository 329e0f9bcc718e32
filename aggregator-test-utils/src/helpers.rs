// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{Stream, StreamExt};
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Panics if `stream` yields anything within `timeout_ms`.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected notification emitted, expected no output.");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// The next item of `stream`; panics if none arrives within `timeout_ms` or
/// the stream ends.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("Stream ended before emitting an item"),
        Err(_) => panic!("No item emitted within {timeout_ms}ms"),
    }
}
