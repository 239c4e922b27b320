//! Scoped data-parallel loops over a fixed number of worker threads.
//!
//! Every helper returns only after all of its workers have joined, so the end of a call
//! is the synchronization point for whatever the workers wrote.

use std::ops::Range;
use std::thread;

/// Upper bound on workers for a single loop
pub const MAX_WORKERS: usize = 256;
/// Smallest index range handed to a worker by [`for_each_range`]
pub const MIN_RANGE_LEN: usize = 1024;

/// Worker count to use: `requested` (at most [`MAX_WORKERS`]) when non-zero, otherwise the
/// available parallelism.
pub fn worker_count(requested: usize) -> usize {
	if requested > 0 {
		return requested.min(MAX_WORKERS);
	}
	thread::available_parallelism()
		.map(|n| n.get())
		.unwrap_or(1)
}

/// Split `items` into at most `threads` contiguous chunks and run `work` on each.
pub fn for_each_chunk<T, F>(items: &[T], threads: usize, work: F)
where
	T: Sync,
	F: Fn(&[T]) + Sync,
{
	if items.is_empty() {
		return;
	}
	let threads = threads.clamp(1, MAX_WORKERS).min(items.len());
	if threads == 1 {
		work(items);
		return;
	}
	let chunk_size = items.len().div_ceil(threads);

	thread::scope(|scope| {
		for chunk in items.chunks(chunk_size) {
			let work = &work;
			scope.spawn(move || work(chunk));
		}
	});
}

/// Split `0..len` into at most `threads` contiguous ranges, no more than one per
/// [`MIN_RANGE_LEN`] indices, and run `work` on each.
pub fn for_each_range<F>(len: usize, threads: usize, work: F)
where
	F: Fn(Range<usize>) + Sync,
{
	if len == 0 {
		return;
	}
	let threads = threads
		.clamp(1, MAX_WORKERS)
		.min(len.div_ceil(MIN_RANGE_LEN));
	if threads == 1 {
		work(0..len);
		return;
	}
	let chunk = len.div_ceil(threads);

	thread::scope(|scope| {
		for start in (0..len).step_by(chunk) {
			let end = (start + chunk).min(len);
			let work = &work;
			scope.spawn(move || work(start..end));
		}
	});
}
