// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Convenient imports: `use aggregator::prelude::*;`

pub use crate::{Added, Aggregator, AggregatorBuilder};
pub use aggregator_core::{Combiner, Completion, Event, Initial, Subscription};
pub use aggregator_error::{AggregatorError, Result};
