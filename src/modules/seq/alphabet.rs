//! Alphabet registry
//!
//! Static tables of valid symbols and complement maps. DNA and RNA each have
//! three nested alphabets (common, with the ambiguity code `N`, full IUPAC);
//! amino acids have a common and an IUPAC alphabet without complements.
//! Upper and lower case symbols are distinct members and complement within
//! their own case.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Polymer molecule family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Molecule {
    Dna,
    Rna,
    AminoAcid,
}

impl Molecule {
    /// Human-readable name of the molecule family
    pub fn name(&self) -> &'static str {
        match self {
            Molecule::Dna => "DNA",
            Molecule::Rna => "RNA",
            Molecule::AminoAcid => "amino acid",
        }
    }

    /// The smallest standard alphabet
    pub fn common(&self) -> &'static Alphabet {
        match self {
            Molecule::Dna => &DNA_COMMON,
            Molecule::Rna => &RNA_COMMON,
            Molecule::AminoAcid => &AMINO_ACID_COMMON,
        }
    }

    /// The common alphabet plus the ambiguity code `N`.
    ///
    /// Amino acids have no separate level here and return the IUPAC alphabet.
    pub fn with_ambiguity(&self) -> &'static Alphabet {
        match self {
            Molecule::Dna => &DNA_WITH_N,
            Molecule::Rna => &RNA_WITH_N,
            Molecule::AminoAcid => &AMINO_ACID_IUPAC,
        }
    }

    /// The full IUPAC alphabet
    pub fn iupac(&self) -> &'static Alphabet {
        match self {
            Molecule::Dna => &DNA_IUPAC,
            Molecule::Rna => &RNA_IUPAC,
            Molecule::AminoAcid => &AMINO_ACID_IUPAC,
        }
    }

    /// All predefined alphabets of this molecule, smallest first
    pub fn alphabets(&self) -> Vec<&'static Alphabet> {
        match self {
            Molecule::Dna => vec![&DNA_COMMON, &DNA_WITH_N, &DNA_IUPAC],
            Molecule::Rna => vec![&RNA_COMMON, &RNA_WITH_N, &RNA_IUPAC],
            Molecule::AminoAcid => vec![&AMINO_ACID_COMMON, &AMINO_ACID_IUPAC],
        }
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a predefined alphabet.
///
/// Sequences carry an `AlphabetId` rather than a reference so they stay
/// `Copy`-cheap to compare and serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphabetId {
    DnaCommon,
    DnaWithN,
    DnaIupac,
    RnaCommon,
    RnaWithN,
    RnaIupac,
    AminoAcidCommon,
    AminoAcidIupac,
}

impl AlphabetId {
    /// Resolve the identifier to its static table
    pub fn alphabet(&self) -> &'static Alphabet {
        match self {
            AlphabetId::DnaCommon => &DNA_COMMON,
            AlphabetId::DnaWithN => &DNA_WITH_N,
            AlphabetId::DnaIupac => &DNA_IUPAC,
            AlphabetId::RnaCommon => &RNA_COMMON,
            AlphabetId::RnaWithN => &RNA_WITH_N,
            AlphabetId::RnaIupac => &RNA_IUPAC,
            AlphabetId::AminoAcidCommon => &AMINO_ACID_COMMON,
            AlphabetId::AminoAcidIupac => &AMINO_ACID_IUPAC,
        }
    }

    /// The molecule family this alphabet belongs to
    pub fn molecule(&self) -> Molecule {
        self.alphabet().molecule
    }
}

impl fmt::Display for AlphabetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alphabet().name)
    }
}

/// The symbol has no entry in the alphabet's complement map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct UnknownSymbol {
    pub symbol: u8,
    pub alphabet: AlphabetId,
}

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "symbol '{}' has no complement in the {} alphabet",
            self.symbol as char, self.alphabet
        )
    }
}

/// An ordered, deduplicated symbol set with an optional complement map
#[derive(Debug)]
pub struct Alphabet {
    id: AlphabetId,
    name: &'static str,
    molecule: Molecule,
    symbols: &'static [u8],
    complements: Option<&'static [u8; 256]>,
}

impl Alphabet {
    /// Identifier of this alphabet
    pub fn id(&self) -> AlphabetId {
        self.id
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Molecule family
    pub fn molecule(&self) -> Molecule {
        self.molecule
    }

    /// Valid symbols in table order
    pub fn symbols(&self) -> &'static [u8] {
        self.symbols
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the alphabet has no symbols
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check membership of a single symbol
    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Whether this alphabet defines complements at all
    pub fn has_complements(&self) -> bool {
        self.complements.is_some()
    }

    /// Complement a single symbol
    pub fn complement(&self, symbol: u8) -> Result<u8, UnknownSymbol> {
        complement(symbol, self)
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Alphabet {}

/// Complement `symbol` under `alphabet`
pub fn complement(symbol: u8, alphabet: &Alphabet) -> Result<u8, UnknownSymbol> {
    let unknown = UnknownSymbol {
        symbol,
        alphabet: alphabet.id,
    };

    match alphabet.complements {
        Some(table) => match table[symbol as usize] {
            0 => Err(unknown),
            paired => Ok(paired),
        },
        None => Err(unknown),
    }
}

/// Build a lookup table mapping `from[i]` to `to[i]`; 0 marks "no entry".
const fn complement_table(from: &[u8], to: &[u8]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < from.len() && i < to.len() {
        table[from[i] as usize] = to[i];
        i += 1;
    }
    table
}

static DNA_COMMON_COMPLEMENTS: [u8; 256] = complement_table(b"ATGCatgc", b"TACGtacg");
static DNA_WITH_N_COMPLEMENTS: [u8; 256] = complement_table(b"ACGTNacgtn", b"TGCANtgcan");
static DNA_IUPAC_COMPLEMENTS: [u8; 256] = complement_table(
    b"ACGTRYSWKMBDHVNacgtryswkmbdhvn",
    b"TGCAYRSWMKVHDBNtgcayrswmkvhdbn",
);

static RNA_COMMON_COMPLEMENTS: [u8; 256] = complement_table(b"AUGCaugc", b"UACGuacg");
static RNA_WITH_N_COMPLEMENTS: [u8; 256] = complement_table(b"ACGUNacgun", b"UGCANugcan");
static RNA_IUPAC_COMPLEMENTS: [u8; 256] = complement_table(
    b"ACGURYSWKMBDHVNacguryswkmbdhvn",
    b"UGCAYRSWMKVHDBNugcayrswmkvhdbn",
);

static DNA_COMMON: Alphabet = Alphabet {
    id: AlphabetId::DnaCommon,
    name: "DNA (common)",
    molecule: Molecule::Dna,
    symbols: b"ATGCatgc",
    complements: Some(&DNA_COMMON_COMPLEMENTS),
};

static DNA_WITH_N: Alphabet = Alphabet {
    id: AlphabetId::DnaWithN,
    name: "DNA (with N)",
    molecule: Molecule::Dna,
    symbols: b"ACGTNacgtn",
    complements: Some(&DNA_WITH_N_COMPLEMENTS),
};

static DNA_IUPAC: Alphabet = Alphabet {
    id: AlphabetId::DnaIupac,
    name: "DNA (IUPAC)",
    molecule: Molecule::Dna,
    symbols: b"ACGTRYSWKMBDHVNacgtryswkmbdhvn",
    complements: Some(&DNA_IUPAC_COMPLEMENTS),
};

static RNA_COMMON: Alphabet = Alphabet {
    id: AlphabetId::RnaCommon,
    name: "RNA (common)",
    molecule: Molecule::Rna,
    symbols: b"AUGCaugc",
    complements: Some(&RNA_COMMON_COMPLEMENTS),
};

static RNA_WITH_N: Alphabet = Alphabet {
    id: AlphabetId::RnaWithN,
    name: "RNA (with N)",
    molecule: Molecule::Rna,
    symbols: b"ACGUNacgun",
    complements: Some(&RNA_WITH_N_COMPLEMENTS),
};

static RNA_IUPAC: Alphabet = Alphabet {
    id: AlphabetId::RnaIupac,
    name: "RNA (IUPAC)",
    molecule: Molecule::Rna,
    symbols: b"ACGURYSWKMBDHVNacguryswkmbdhvn",
    complements: Some(&RNA_IUPAC_COMPLEMENTS),
};

static AMINO_ACID_COMMON: Alphabet = Alphabet {
    id: AlphabetId::AminoAcidCommon,
    name: "amino acid (common)",
    molecule: Molecule::AminoAcid,
    symbols: b"ARNDCEQGHILKMFPSTWYVarndceqghilkmfpstwyv",
    complements: None,
};

static AMINO_ACID_IUPAC: Alphabet = Alphabet {
    id: AlphabetId::AminoAcidIupac,
    name: "amino acid (IUPAC)",
    molecule: Molecule::AminoAcid,
    symbols: b"ARNDCEQGHILKMFPSTWYVBZXUOJarndceqghilkmfpstwyvbzxuoj",
    complements: None,
};
