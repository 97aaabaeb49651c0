//! Single-strand sequence type
//!
//! [`Sequence<K>`] is one ordered run of symbols of kind `K` with an
//! optional label and alphabet. Construction never validates; a sequence
//! only becomes valid through [`Sequence::validate`], which returns a new
//! value pinned to the alphabet it was checked against.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::alphabet::{AlphabetId, Molecule};
use super::convert::KmerTransform;
use super::error::{SequenceError, SequenceResult};
use super::kind::{AminoAcid, Dna, Kind, Rna};
use super::polymeric::{Polymeric, SequenceMetadata};
use super::validation;
use crate::engines::compute::string_ops;

/// Construction options shared by single and double strands.
///
/// `complement_offset` and `bottom_strand` only affect double strands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceOptions {
    pub label: Option<String>,
    pub alphabet: Option<AlphabetId>,
    pub complement_offset: isize,
    pub bottom_strand: Option<String>,
}

impl SequenceOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the alphabet
    pub fn with_alphabet(mut self, alphabet: AlphabetId) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Set the offset between top and bottom strand
    pub fn with_complement_offset(mut self, offset: isize) -> Self {
        self.complement_offset = offset;
        self
    }

    /// Supply the bottom strand instead of deriving it
    pub fn with_bottom_strand(mut self, bottom: impl Into<String>) -> Self {
        self.bottom_strand = Some(bottom.into());
        self
    }
}

/// A single-stranded polymer sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct Sequence<K: Kind> {
    symbols: Vec<u8>,
    label: Option<String>,
    alphabet: Option<AlphabetId>,
    valid: bool,
    #[serde(skip)]
    kind: PhantomData<K>,
}

/// A single DNA strand
pub type DnaSequence = Sequence<Dna>;
/// A single RNA strand
pub type RnaSequence = Sequence<Rna>;
/// An amino acid chain
pub type AminoAcidSequence = Sequence<AminoAcid>;

impl<K: Kind> Sequence<K> {
    /// Create a new sequence from raw symbols.
    ///
    /// No validation happens here; the result is never marked valid.
    pub fn new(raw: impl AsRef<[u8]>, options: SequenceOptions) -> Self {
        Self::from_parts(raw.as_ref().to_vec(), options.label, options.alphabet)
    }

    pub(crate) fn from_parts(
        symbols: Vec<u8>,
        label: Option<String>,
        alphabet: Option<AlphabetId>,
    ) -> Self {
        Self {
            symbols,
            label,
            alphabet,
            valid: false,
            kind: PhantomData,
        }
    }

    /// Rebuild a sequence from consecutive k-mers and their metadata.
    ///
    /// The carried alphabet is kept only if it belongs to `K`.
    pub fn from_kmers(kmers: Vec<Vec<u8>>, metadata: SequenceMetadata) -> Self {
        let alphabet = metadata.alphabet_for::<K>();
        Self::from_parts(kmers.concat(), metadata.label, alphabet)
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The symbols
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The label (if any)
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The carried alphabet (if any)
    pub fn alphabet(&self) -> Option<AlphabetId> {
        self.alphabet
    }

    /// Whether a validation pass has succeeded on this value
    pub fn is_validated(&self) -> bool {
        self.valid
    }

    /// Molecule family
    pub fn molecule(&self) -> Molecule {
        K::MOLECULE
    }

    /// Get the sequence as a string, one `char` per symbol byte
    pub fn as_string(&self) -> String {
        self.symbols.iter().map(|&symbol| symbol as char).collect()
    }

    /// Metadata needed to rebuild this sequence from its k-mers
    pub fn metadata(&self) -> SequenceMetadata {
        SequenceMetadata {
            label: self.label.clone(),
            alphabet: self.alphabet,
            complement_offset: 0,
        }
    }

    /// Partition into consecutive k-mers.
    ///
    /// Fails with `SeqLenMismatch` unless `k` divides the length.
    pub fn kmers(&self, k: usize) -> SequenceResult<(Vec<Vec<u8>>, SequenceMetadata)> {
        if k == 0 || self.len() % k != 0 {
            return Err(SequenceError::SeqLenMismatch {
                length: self.len(),
                k,
            });
        }

        Ok((string_ops::partition(&self.symbols, k), self.metadata()))
    }

    /// Whether every symbol belongs to `alphabet`
    pub fn is_valid(&self, alphabet: AlphabetId) -> bool {
        validation::is_valid(&self.symbols, alphabet.alphabet())
    }

    /// Validate against the given alphabet, or the carried one.
    ///
    /// Returns a new sequence marked valid and pinned to the alphabet, or
    /// every mismatching position.
    pub fn validate(&self, alphabet: Option<AlphabetId>) -> SequenceResult<Self> {
        let alphabet = alphabet.or(self.alphabet).ok_or(SequenceError::NoAlpha)?;

        validation::validate_against(&self.symbols, alphabet.alphabet())
            .map_err(SequenceError::MismatchAlpha)?;

        log::debug!("validated {} symbols against {}", self.len(), alphabet);
        Ok(Self {
            alphabet: Some(alphabet),
            valid: true,
            ..self.clone()
        })
    }

    /// Alphabet used for complementing: explicit, then carried, then the
    /// kind's default
    pub fn complement_alphabet(&self, alphabet: Option<AlphabetId>) -> AlphabetId {
        alphabet.or(self.alphabet).unwrap_or_else(K::default_alphabet)
    }

    /// Get the complement of the sequence
    pub fn complement(&self, alphabet: Option<AlphabetId>) -> SequenceResult<Self> {
        let alphabet = self.complement_alphabet(alphabet);
        let complemented = validation::complement_symbols(&self.symbols, alphabet.alphabet())
            .map_err(SequenceError::MismatchAlpha)?;

        Ok(Self::from_parts(
            complemented,
            self.label.clone(),
            Some(alphabet),
        ))
    }

    /// Get the reverse complement of the sequence
    pub fn reverse_complement(&self, alphabet: Option<AlphabetId>) -> SequenceResult<Self> {
        let mut complemented = self.complement(alphabet)?;
        string_ops::reverse_in_place(&mut complemented.symbols);
        Ok(complemented)
    }

    /// Get the reverse of the sequence
    pub fn reverse(&self) -> Self {
        Self::from_parts(
            string_ops::reverse(&self.symbols),
            self.label.clone(),
            self.alphabet,
        )
    }

    /// Up to `len` symbols from a signed start; negative starts count from
    /// the end
    pub fn slice(&self, start: isize, len: usize) -> Self {
        Self::from_parts(
            string_ops::signed_slice(&self.symbols, start, len).to_vec(),
            self.label.clone(),
            self.alphabet,
        )
    }

    /// Render as `>{label}\n{symbols}\n`
    pub fn fasta_line(&self) -> String {
        format!(">{}\n{}\n", self.label.as_deref().unwrap_or(""), self.as_string())
    }
}

impl<K: Kind> Polymeric for Sequence<K> {
    type Kind = K;
    type Kmer = Vec<u8>;
    type Retyped<T: Kind> = Sequence<T>;

    fn label(&self) -> Option<&str> {
        Sequence::label(self)
    }

    fn kmers(&self, k: usize) -> SequenceResult<(Vec<Vec<u8>>, SequenceMetadata)> {
        Sequence::kmers(self, k)
    }

    fn is_valid(&self, alphabet: AlphabetId) -> bool {
        Sequence::is_valid(self, alphabet)
    }

    fn validate(&self, alphabet: Option<AlphabetId>) -> SequenceResult<Self> {
        Sequence::validate(self, alphabet)
    }

    fn fasta_line(&self) -> String {
        Sequence::fasta_line(self)
    }

    fn map_kmer(kmer: Vec<u8>, transform: KmerTransform) -> SequenceResult<Vec<u8>> {
        transform(&kmer)
    }

    fn reassemble<T: Kind>(
        kmers: Vec<Vec<u8>>,
        metadata: SequenceMetadata,
    ) -> SequenceResult<Sequence<T>> {
        Ok(Sequence::from_kmers(kmers, metadata))
    }
}

impl<K: Kind> fmt::Display for Sequence<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl<K: Kind> From<&str> for Sequence<K> {
    fn from(s: &str) -> Self {
        Self::new(s, SequenceOptions::default())
    }
}
