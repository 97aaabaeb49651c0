//! Error types for sequence operations

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::alphabet::{AlphabetId, Molecule, UnknownSymbol};

/// Which strand of a double strand an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrandSide {
    Top,
    Bottom,
}

impl fmt::Display for StrandSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrandSide::Top => f.write_str("top"),
            StrandSide::Bottom => f.write_str("bottom"),
        }
    }
}

/// A symbol that failed an alphabet check at a given position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mismatch {
    pub symbol: u8,
    pub position: usize,
    pub alphabet: AlphabetId,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' at position {} ({})",
            self.symbol as char, self.position, self.alphabet
        )
    }
}

/// An aligned top/bottom pair that does not base-pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairMismatch {
    pub position: usize,
    pub top: u8,
    pub bottom: u8,
}

impl fmt::Display for PairMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}'/'{}' at position {}",
            self.top as char, self.bottom as char, self.position
        )
    }
}

/// Error type for sequence operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequenceError {
    #[error("length {length} is not divisible by k-mer size {k}")]
    SeqLenMismatch { length: usize, k: usize },

    #[error("{} symbol(s) outside the alphabet: {}", .0.len(), .0.iter().join(", "))]
    MismatchAlpha(Vec<Mismatch>),

    #[error(transparent)]
    UnknownSymbol(#[from] UnknownSymbol),

    #[error("top strand alphabet {top:?} differs from bottom strand alphabet {bottom:?}")]
    StrandAlphabetMismatch {
        top: Option<AlphabetId>,
        bottom: Option<AlphabetId>,
    },

    #[error("{side} strand is invalid: {}", .mismatches.iter().join(", "))]
    Strand {
        side: StrandSide,
        mismatches: Vec<Mismatch>,
    },

    #[error("strands do not pair at {} position(s): {}", .0.len(), .0.iter().join(", "))]
    NotComplementary(Vec<PairMismatch>),

    #[error("no default conversion from {from} to {to}")]
    UndefConversion { from: Molecule, to: Molecule },

    #[error("{0} sequences have no converter")]
    NoConverter(Molecule),

    #[error("no alphabet given and none carried by the sequence")]
    NoAlpha,

    #[error("operation not supported: {0}")]
    NotSupported(String),

    #[error("overhang of {offset} does not fit a strand of length {length}")]
    OffsetOutOfRange { offset: isize, length: usize },
}

/// Result type for sequence operations
pub type SequenceResult<T> = Result<T, SequenceError>;
