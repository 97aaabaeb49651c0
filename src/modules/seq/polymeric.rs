//! The capability shared by every sequence shape
//!
//! [`Polymeric`] is implemented once for single strands and once for double
//! strands. It is what the conversion pipeline, the FASTA writer and the
//! batch helpers are written against.

use serde::{Deserialize, Serialize};

use super::alphabet::AlphabetId;
use super::convert::{self, KmerTransform};
use super::error::SequenceResult;
use super::kind::Kind;

/// Non-symbol fields of a sequence, carried alongside its k-mers so a
/// converted value can be rebuilt with the same label and offset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceMetadata {
    pub label: Option<String>,
    pub alphabet: Option<AlphabetId>,
    pub complement_offset: isize,
}

impl SequenceMetadata {
    /// The carried alphabet if it belongs to the kind `T`
    pub fn alphabet_for<T: Kind>(&self) -> Option<AlphabetId> {
        self.alphabet
            .filter(|alphabet| alphabet.molecule() == T::MOLECULE)
    }
}

/// Trait for sequence shapes that decompose into k-mers
pub trait Polymeric: Sized {
    /// Polymer kind of the value
    type Kind: Kind;

    /// One k-sized unit of the decomposition
    type Kmer: Clone;

    /// The same shape over another kind
    type Retyped<T: Kind>;

    /// Optional label
    fn label(&self) -> Option<&str>;

    /// Decompose into consecutive k-sized units plus reconstruction metadata
    fn kmers(&self, k: usize) -> SequenceResult<(Vec<Self::Kmer>, SequenceMetadata)>;

    /// Whether the value is valid under `alphabet`
    fn is_valid(&self, alphabet: AlphabetId) -> bool;

    /// Validate, returning a new value marked valid on success
    fn validate(&self, alphabet: Option<AlphabetId>) -> SequenceResult<Self>;

    /// Render as a single FASTA record
    fn fasta_line(&self) -> String;

    /// Re-encode the symbols of one k-mer
    fn map_kmer(kmer: Self::Kmer, transform: KmerTransform) -> SequenceResult<Self::Kmer>;

    /// Rebuild a value of kind `T` from k-mers and metadata
    fn reassemble<T: Kind>(
        kmers: Vec<Self::Kmer>,
        metadata: SequenceMetadata,
    ) -> SequenceResult<Self::Retyped<T>>;

    /// Convert to kind `T` with the registered default conversion
    fn convert<T: Kind>(&self) -> SequenceResult<Self::Retyped<T>> {
        convert::convert::<Self, T>(self, None)
    }
}
