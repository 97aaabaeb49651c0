//! Validation engine
//!
//! Positional alphabet checks and complementation over raw symbol slices.
//! Both scan the whole input and report every failing position; nothing
//! here stops at the first bad symbol.

use std::collections::{BTreeSet, HashSet};

use itertools::Itertools;

use super::alphabet::{complement, Alphabet};
use super::error::Mismatch;

/// Check every symbol against `alphabet`, collecting all mismatches
pub fn validate_against(symbols: &[u8], alphabet: &Alphabet) -> Result<(), Vec<Mismatch>> {
    let mismatches: Vec<Mismatch> = symbols
        .iter()
        .enumerate()
        .filter(|&(_, &symbol)| !alphabet.contains(symbol))
        .map(|(position, &symbol)| Mismatch {
            symbol,
            position,
            alphabet: alphabet.id(),
        })
        .collect();

    if mismatches.is_empty() {
        Ok(())
    } else {
        log::debug!(
            "{} of {} symbols outside {}",
            mismatches.len(),
            symbols.len(),
            alphabet.name()
        );
        Err(mismatches)
    }
}

/// Distinct symbols of `seq_symbols` that are not in `alphabet_symbols`.
///
/// This is a plain set difference and is not symmetric.
pub fn differences(seq_symbols: &[u8], alphabet_symbols: &[u8]) -> BTreeSet<u8> {
    let allowed: HashSet<u8> = alphabet_symbols.iter().copied().collect();

    seq_symbols
        .iter()
        .copied()
        .unique()
        .filter(|symbol| !allowed.contains(symbol))
        .collect()
}

/// Whether every symbol belongs to `alphabet`
pub fn is_valid(symbols: &[u8], alphabet: &Alphabet) -> bool {
    differences(symbols, alphabet.symbols()).is_empty()
}

/// Complement every symbol under `alphabet`.
///
/// Succeeds only when all positions have a complement; otherwise returns
/// one mismatch per failing position.
pub fn complement_symbols(symbols: &[u8], alphabet: &Alphabet) -> Result<Vec<u8>, Vec<Mismatch>> {
    let (complemented, mismatches): (Vec<u8>, Vec<Mismatch>) = symbols
        .iter()
        .enumerate()
        .map(|(position, &symbol)| {
            complement(symbol, alphabet).map_err(|unknown| Mismatch {
                symbol: unknown.symbol,
                position,
                alphabet: unknown.alphabet,
            })
        })
        .partition_result();

    if mismatches.is_empty() {
        Ok(complemented)
    } else {
        log::debug!(
            "complement under {} failed at {} position(s)",
            alphabet.name(),
            mismatches.len()
        );
        Err(mismatches)
    }
}
