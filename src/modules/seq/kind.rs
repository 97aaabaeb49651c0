//! Polymer kinds
//!
//! Zero-sized marker types that parameterize [`Sequence`](super::Sequence)
//! and [`DoubleStrand`](super::DoubleStrand). A kind fixes the molecule
//! family, the default alphabet and the converter registry for its values.

use std::fmt::Debug;

use super::alphabet::{AlphabetId, Molecule};
use super::convert::{Converter, DnaConverter, RnaConverter};

/// Trait for polymer kinds
pub trait Kind: Debug + Clone + Copy + Default + PartialEq + Eq + Send + Sync + 'static {
    /// Molecule family of this kind
    const MOLECULE: Molecule;

    /// Alphabet used when neither the caller nor the sequence names one
    fn default_alphabet() -> AlphabetId {
        Self::MOLECULE.common().id()
    }

    /// The converter registry for this kind, if it has one
    fn converter() -> Option<&'static dyn Converter> {
        None
    }
}

/// Deoxyribonucleic acid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dna;

/// Ribonucleic acid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rna;

/// Amino acid chains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AminoAcid;

impl Kind for Dna {
    const MOLECULE: Molecule = Molecule::Dna;

    fn converter() -> Option<&'static dyn Converter> {
        Some(&DnaConverter)
    }
}

impl Kind for Rna {
    const MOLECULE: Molecule = Molecule::Rna;

    fn converter() -> Option<&'static dyn Converter> {
        Some(&RnaConverter)
    }
}

impl Kind for AminoAcid {
    const MOLECULE: Molecule = Molecule::AminoAcid;
}
