// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the aggregator workspace.
//!
//! Not meant for production code. The helpers fall into three groups:
//!
//! - `timed`: tokio-driven initializers and combiners that resolve after a
//!   delay, including per-call staggered delays for ordering tests.
//! - `manual`: a combiner whose completions are parked until the test
//!   resolves them by hand, for step-by-step state assertions.
//! - `helpers` and [`Recorder`]: capturing notifications and asserting on
//!   streams with timeouts.
//!
//! ```rust
//! use aggregator_test_utils::Recorder;
//!
//! let recorder = Recorder::new();
//! let handler = recorder.handler();
//! handler(&1);
//! handler(&2);
//! assert_eq!(recorder.values(), vec![1, 2]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod manual;
pub mod recorder;
pub mod timed;

pub use helpers::{assert_no_element_emitted, unwrap_stream};
pub use manual::ManualCombiner;
pub use recorder::Recorder;
pub use timed::{delayed_combiner, delayed_initial, staggered_combiner};
