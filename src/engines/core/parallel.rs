//! Parallel processing primitives
//!
//! Order-preserving maps over independent items. With the `parallel`
//! feature the work is split across the rayon pool in chunks sized from the
//! number of CPUs; without it the same functions run sequentially and
//! return identical results.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Minimum chunks handed to each thread
const MIN_CHUNKS_PER_THREAD: usize = 4;

// Below this many items the rayon pool is not worth waking
#[cfg(feature = "parallel")]
const SEQUENTIAL_CUTOFF: usize = 8;

/// Get the default number of threads to use
#[cfg(feature = "parallel")]
pub fn default_num_threads() -> usize {
    num_cpus::get()
}

/// Get the default number of threads to use
#[cfg(not(feature = "parallel"))]
pub fn default_num_threads() -> usize {
    1
}

/// Calculate how many items each parallel task should take
pub fn calculate_chunk_size(total_items: usize, min_chunk_size: Option<usize>) -> usize {
    let min_size = min_chunk_size.unwrap_or(1).max(1);
    let total_chunks = default_num_threads() * MIN_CHUNKS_PER_THREAD;

    (total_items / total_chunks).max(min_size)
}

/// Apply `f` to every item, keeping input order in the output
#[cfg(feature = "parallel")]
pub fn map_ordered<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
{
    if items.len() <= SEQUENTIAL_CUTOFF {
        return items.iter().map(f).collect();
    }

    let chunk_size = calculate_chunk_size(items.len(), None);
    log::trace!(
        "mapping {} items across {} threads in chunks of {}",
        items.len(),
        default_num_threads(),
        chunk_size
    );

    items.par_iter().with_min_len(chunk_size).map(f).collect()
}

/// Apply `f` to every item, keeping input order in the output
#[cfg(not(feature = "parallel"))]
pub fn map_ordered<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
{
    log::trace!("mapping {} items sequentially", items.len());
    items.iter().map(f).collect()
}
