//! Batch operations over many sequences
//!
//! Each item is processed independently; results come back in input order.
//! Enable the `parallel` feature to spread the work over all CPUs.

use super::alphabet::AlphabetId;
use super::error::SequenceResult;
use super::kind::Kind;
use super::polymeric::Polymeric;
use super::sequence::Sequence;
use crate::engines::core::parallel;

/// Validate every item against `alphabet`
pub fn validate_all<P>(items: &[P], alphabet: Option<AlphabetId>) -> Vec<SequenceResult<P>>
where
    P: Polymeric + Send + Sync,
{
    let results = parallel::map_ordered(items, |item| item.validate(alphabet));
    log::debug!(
        "validated {} items, {} failed",
        results.len(),
        results.iter().filter(|result| result.is_err()).count()
    );
    results
}

/// Complement every single strand
pub fn complement_all<K: Kind>(
    items: &[Sequence<K>],
    alphabet: Option<AlphabetId>,
) -> Vec<SequenceResult<Sequence<K>>> {
    parallel::map_ordered(items, |item| item.complement(alphabet))
}

/// Convert every item to kind `T` with the registered conversion
pub fn convert_all<P, T>(items: &[P]) -> Vec<SequenceResult<P::Retyped<T>>>
where
    P: Polymeric + Sync,
    P::Retyped<T>: Send,
    T: Kind,
{
    parallel::map_ordered(items, |item| item.convert::<T>())
}
