// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Synchronization primitive shared by every aggregator component.
//!
//! `parking_lot` locks do not poison.

pub use parking_lot::{Mutex, MutexGuard};
