// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::add_bench::{bench_add_async_buffered, bench_add_sync};
use criterion::{criterion_group, criterion_main};


criterion_group!(benches, bench_add_sync, bench_add_async_buffered);
criterion_main!(benches);
