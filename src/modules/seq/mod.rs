//! Sequence module
//!
//! Alphabets, single and double strands, validation and conversion between
//! polymer kinds.

pub mod alphabet;
pub mod batch;
pub mod convert;
pub mod double_strand;
pub mod error;
pub mod kind;
pub mod polymeric;
pub mod sequence;
pub mod validation;

/// Convenience re-exports
pub use alphabet::{complement, Alphabet, AlphabetId, Molecule, UnknownSymbol};
pub use batch::{complement_all, convert_all, validate_all};
pub use convert::{convert, Conversion, Converter, DnaConverter, KmerTransform, RnaConverter};
pub use double_strand::{
    DnaDoubleStrand, DoubleStrand, GappedStrands, KmerPair, Overhangs, RnaDoubleStrand, Slot,
    GAP_CHAR,
};
pub use error::{Mismatch, PairMismatch, SequenceError, SequenceResult, StrandSide};
pub use kind::{AminoAcid, Dna, Kind, Rna};
pub use polymeric::{Polymeric, SequenceMetadata};
pub use sequence::{AminoAcidSequence, DnaSequence, RnaSequence, Sequence, SequenceOptions};
