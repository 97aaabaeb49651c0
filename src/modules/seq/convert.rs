//! Conversion pipeline
//!
//! A conversion re-encodes every k-mer of a value and rebuilds the same
//! shape over a different kind. Each kind registers a [`Converter`] that
//! knows which transforms exist from it; callers may bypass the registry by
//! passing an explicit [`Conversion`].

use std::fmt;

use super::alphabet::Molecule;
use super::error::{SequenceError, SequenceResult};
use super::kind::Kind;
use super::polymeric::Polymeric;
use crate::engines::compute::string_ops;

/// Re-encodes the symbols of one k-mer
pub type KmerTransform = fn(&[u8]) -> SequenceResult<Vec<u8>>;

/// A transform together with the k-mer size it expects
#[derive(Clone, Copy)]
pub struct Conversion {
    pub transform: KmerTransform,
    pub k: usize,
}

impl Conversion {
    /// Create a new conversion
    pub fn new(transform: KmerTransform, k: usize) -> Self {
        Self { transform, k }
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion").field("k", &self.k).finish()
    }
}

/// Registry of default conversions out of one kind
pub trait Converter: Sync {
    /// The default conversion to `target`, or `UndefConversion`
    fn to(&self, target: Molecule) -> SequenceResult<Conversion>;
}

/// Default conversions out of DNA
#[derive(Debug, Clone, Copy, Default)]
pub struct DnaConverter;

/// Default conversions out of RNA
#[derive(Debug, Clone, Copy, Default)]
pub struct RnaConverter;

fn identity(kmer: &[u8]) -> SequenceResult<Vec<u8>> {
    Ok(kmer.to_vec())
}

fn dna_to_rna(kmer: &[u8]) -> SequenceResult<Vec<u8>> {
    Ok(string_ops::transcribe(kmer))
}

fn rna_to_dna(kmer: &[u8]) -> SequenceResult<Vec<u8>> {
    Ok(string_ops::reverse_transcribe(kmer))
}

impl Converter for DnaConverter {
    fn to(&self, target: Molecule) -> SequenceResult<Conversion> {
        match target {
            Molecule::Dna => Ok(Conversion::new(identity, 1)),
            Molecule::Rna => Ok(Conversion::new(dna_to_rna, 1)),
            Molecule::AminoAcid => Err(SequenceError::UndefConversion {
                from: Molecule::Dna,
                to: target,
            }),
        }
    }
}

impl Converter for RnaConverter {
    fn to(&self, target: Molecule) -> SequenceResult<Conversion> {
        match target {
            Molecule::Rna => Ok(Conversion::new(identity, 1)),
            Molecule::Dna => Ok(Conversion::new(rna_to_dna, 1)),
            Molecule::AminoAcid => Err(SequenceError::UndefConversion {
                from: Molecule::Rna,
                to: target,
            }),
        }
    }
}

/// Convert `sequence` to the kind `T`.
///
/// With `conversion` set, the registry of the source kind is not consulted
/// at all, so even kinds without a converter can be converted.
pub fn convert<P, T>(sequence: &P, conversion: Option<Conversion>) -> SequenceResult<P::Retyped<T>>
where
    P: Polymeric,
    T: Kind,
{
    let source = <P::Kind as Kind>::MOLECULE;

    let conversion = match conversion {
        Some(conversion) => {
            log::warn!(
                "using caller-supplied conversion from {} to {} (k = {})",
                source,
                T::MOLECULE,
                conversion.k
            );
            conversion
        }
        None => {
            let converter =
                <P::Kind as Kind>::converter().ok_or(SequenceError::NoConverter(source))?;
            converter.to(T::MOLECULE)?
        }
    };

    let (kmers, metadata) = sequence.kmers(conversion.k)?;
    log::debug!(
        "converting {} {}-mers from {} to {}",
        kmers.len(),
        conversion.k,
        source,
        T::MOLECULE
    );

    let converted = kmers
        .into_iter()
        .map(|kmer| P::map_kmer(kmer, conversion.transform))
        .collect::<SequenceResult<Vec<_>>>()?;

    P::reassemble::<T>(converted, metadata)
}
