//! Double-strand sequences
//!
//! A [`DoubleStrand<K>`] pairs a top strand with a bottom strand written
//! under it (3' to 5'), staggered by a signed `complement_offset`:
//!
//! ```text
//! offset  2:  top     attgatc--        offset -2:  top     --attgatc
//!             bottom  --actag                      bottom  ag--
//! ```
//!
//! With a positive offset the bottom strand is missing on its 5' side and
//! the top strand on its 3' side; a negative offset mirrors this. The
//! missing positions are filled with [`Slot::Gap`] whenever the strands are
//! aligned, and a gap never counts as a symbol.

use std::cmp::Ordering;
use std::fmt;
use std::iter;

use serde::{Deserialize, Serialize};

use super::alphabet::{complement, Alphabet, AlphabetId};
use super::convert::KmerTransform;
use super::error::{PairMismatch, SequenceError, SequenceResult, StrandSide};
use super::kind::{Dna, Kind, Rna};
use super::polymeric::{Polymeric, SequenceMetadata};
use super::sequence::{Sequence, SequenceOptions};
use super::validation;
use crate::engines::compute::string_ops;

/// Character used when rendering gap positions
pub const GAP_CHAR: char = '-';

/// One aligned position: a symbol or an overhang gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Symbol(u8),
    Gap,
}

impl Slot {
    /// The symbol, unless this is a gap
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Slot::Symbol(symbol) => Some(*symbol),
            Slot::Gap => None,
        }
    }

    /// Whether this is a gap
    pub fn is_gap(&self) -> bool {
        matches!(self, Slot::Gap)
    }

    /// Render as a character
    pub fn as_char(&self) -> char {
        match self {
            Slot::Symbol(symbol) => *symbol as char,
            Slot::Gap => GAP_CHAR,
        }
    }
}

/// Render a run of slots, gaps as `-`
pub fn render_slots(slots: &[Slot]) -> String {
    slots.iter().map(Slot::as_char).collect()
}

fn to_slots(symbols: &[u8]) -> impl Iterator<Item = Slot> + '_ {
    symbols.iter().map(|&symbol| Slot::Symbol(symbol))
}

fn strip_gaps(slots: &[Slot]) -> Vec<u8> {
    slots.iter().filter_map(Slot::symbol).collect()
}

/// Overhang lengths requested for each strand.
///
/// Only one side may be non-zero; see [`DoubleStrand::construct_complement`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Overhangs {
    pub top: isize,
    pub bottom: isize,
}

impl Overhangs {
    /// Overhang on the top strand only
    pub fn top(offset: isize) -> Self {
        Self { top: offset, bottom: 0 }
    }

    /// Overhang on the bottom strand only
    pub fn bottom(offset: isize) -> Self {
        Self { top: 0, bottom: offset }
    }
}

/// Two aligned strands with explicit gap positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GappedStrands {
    pub top: Vec<Slot>,
    pub bottom: Vec<Slot>,
}

impl GappedStrands {
    /// Render the top strand
    pub fn top_string(&self) -> String {
        render_slots(&self.top)
    }

    /// Render the bottom strand
    pub fn bottom_string(&self) -> String {
        render_slots(&self.bottom)
    }
}

/// Aligned top and bottom k-mer pair
pub type KmerPair = (Vec<Slot>, Vec<Slot>);

/// A double-stranded polymer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct DoubleStrand<K: Kind> {
    top: Sequence<K>,
    bottom: Sequence<K>,
    complement_offset: isize,
    label: Option<String>,
    alphabet: Option<AlphabetId>,
    valid: bool,
}

/// A DNA double strand
pub type DnaDoubleStrand = DoubleStrand<Dna>;
/// An RNA double strand
pub type RnaDoubleStrand = DoubleStrand<Rna>;

impl<K: Kind> DoubleStrand<K> {
    /// Create a double strand from its top strand.
    ///
    /// When `options.bottom_strand` is set both strands are taken verbatim
    /// and nothing is checked until [`validate`](Self::validate). Otherwise
    /// the bottom strand is the complement of `top.len()` symbols of the top
    /// strand starting at `complement_offset` (negative counts from the
    /// end), and any symbol without a complement fails construction.
    pub fn new(top: impl AsRef<[u8]>, options: SequenceOptions) -> SequenceResult<Self> {
        let SequenceOptions {
            label,
            alphabet,
            complement_offset,
            bottom_strand,
        } = options;

        let top = Sequence::<K>::from_parts(top.as_ref().to_vec(), None, alphabet);

        let bottom = match bottom_strand {
            Some(bottom) => Sequence::from_parts(bottom.into_bytes(), None, alphabet),
            None => {
                let window = string_ops::signed_slice(top.symbols(), complement_offset, top.len());
                let complement_alphabet = top.complement_alphabet(alphabet);
                let symbols =
                    validation::complement_symbols(window, complement_alphabet.alphabet())
                        .map_err(SequenceError::MismatchAlpha)?;
                log::debug!(
                    "derived {}-symbol bottom strand at offset {} under {}",
                    symbols.len(),
                    complement_offset,
                    complement_alphabet
                );
                Sequence::from_parts(symbols, None, alphabet)
            }
        };

        Ok(Self {
            top,
            bottom,
            complement_offset,
            label,
            alphabet,
            valid: false,
        })
    }

    /// Pair two existing strands without any checks
    pub fn from_strands(top: Sequence<K>, bottom: Sequence<K>, complement_offset: isize) -> Self {
        let alphabet = if top.alphabet() == bottom.alphabet() {
            top.alphabet()
        } else {
            None
        };

        Self {
            top,
            bottom,
            complement_offset,
            label: None,
            alphabet,
            valid: false,
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The top strand
    pub fn top(&self) -> &Sequence<K> {
        &self.top
    }

    /// The bottom strand
    pub fn bottom(&self) -> &Sequence<K> {
        &self.bottom
    }

    /// Offset of the top strand relative to the bottom
    pub fn complement_offset(&self) -> isize {
        self.complement_offset
    }

    /// The label (if any)
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The alphabet (if any)
    pub fn alphabet(&self) -> Option<AlphabetId> {
        self.alphabet
    }

    /// Whether a validation pass has succeeded on this value
    pub fn is_validated(&self) -> bool {
        self.valid
    }

    /// Number of aligned positions.
    ///
    /// This is `top.len() + |offset|` unless an explicit bottom strand is
    /// longer than the top, in which case the bottom sets the span.
    pub fn span(&self) -> usize {
        self.top.len().max(self.bottom.len()) + self.complement_offset.unsigned_abs()
    }

    /// Metadata needed to rebuild this double strand from its k-mers
    pub fn metadata(&self) -> SequenceMetadata {
        SequenceMetadata {
            label: self.label.clone(),
            alphabet: self.alphabet,
            complement_offset: self.complement_offset,
        }
    }

    /// Both strands padded with gaps so that aligned positions line up.
    ///
    /// The strands are further extended with trailing gaps to a common
    /// length, so no symbol is lost when they are zipped.
    pub fn aligned(&self) -> GappedStrands {
        let gaps = self.complement_offset.unsigned_abs();
        let spacing = || iter::repeat(Slot::Gap).take(gaps);
        let top = to_slots(self.top.symbols());
        let bottom = to_slots(self.bottom.symbols());

        let (mut top, mut bottom): (Vec<Slot>, Vec<Slot>) = match self.complement_offset.cmp(&0) {
            Ordering::Greater => (
                top.chain(spacing()).collect(),
                spacing().chain(bottom).collect(),
            ),
            Ordering::Less => (
                spacing().chain(top).collect(),
                bottom.chain(spacing()).collect(),
            ),
            Ordering::Equal => (top.collect(), bottom.collect()),
        };

        let common = top.len().max(bottom.len());
        top.resize(common, Slot::Gap);
        bottom.resize(common, Slot::Gap);

        GappedStrands { top, bottom }
    }

    /// Decompose into aligned top/bottom k-mer pairs.
    ///
    /// Fails with `SeqLenMismatch` unless `k` divides the [`span`](Self::span),
    /// so every chunk on both strands holds exactly `k` slots. Pairs made
    /// entirely of gaps on one side are overhangs and are kept.
    pub fn kmers(&self, k: usize) -> SequenceResult<(Vec<KmerPair>, SequenceMetadata)> {
        let span = self.span();
        if k == 0 || span % k != 0 {
            return Err(SequenceError::SeqLenMismatch { length: span, k });
        }

        let GappedStrands { top, bottom } = self.aligned();
        let pairs: Vec<KmerPair> = string_ops::partition(&top, k)
            .into_iter()
            .zip(string_ops::partition(&bottom, k))
            .collect();

        log::trace!(
            "split double strand of span {} into {} {}-mer pairs",
            span,
            pairs.len(),
            k
        );
        Ok((pairs, self.metadata()))
    }

    /// Aligned positions whose symbols do not pair under `alphabet`.
    ///
    /// A position with a gap on either strand is an overhang and imposes
    /// no constraint.
    pub fn unpaired(&self, alphabet: &Alphabet) -> Vec<PairMismatch> {
        let GappedStrands { top, bottom } = self.aligned();

        top.iter()
            .zip(bottom.iter())
            .enumerate()
            .filter_map(|(position, pair)| match pair {
                (Slot::Symbol(top), Slot::Symbol(bottom)) => match complement(*top, alphabet) {
                    Ok(paired) if paired == *bottom => None,
                    _ => Some(PairMismatch {
                        position,
                        top: *top,
                        bottom: *bottom,
                    }),
                },
                _ => None,
            })
            .collect()
    }

    /// Whether both strands belong to `alphabet` and every aligned pair is
    /// complementary
    pub fn is_valid(&self, alphabet: AlphabetId) -> bool {
        self.top.is_valid(alphabet)
            && self.bottom.is_valid(alphabet)
            && self.unpaired(alphabet.alphabet()).is_empty()
    }

    /// Validate both strands against one alphabet.
    ///
    /// With no explicit alphabet, each strand's carried alphabet is used and
    /// the two must agree. The top strand is checked before the bottom, and
    /// pairing is checked last.
    pub fn validate(&self, alphabet: Option<AlphabetId>) -> SequenceResult<Self> {
        let (top_alphabet, bottom_alphabet) = match alphabet {
            Some(alphabet) => (Some(alphabet), Some(alphabet)),
            None => (self.top.alphabet(), self.bottom.alphabet()),
        };

        if top_alphabet != bottom_alphabet {
            return Err(SequenceError::StrandAlphabetMismatch {
                top: top_alphabet,
                bottom: bottom_alphabet,
            });
        }
        let alphabet = top_alphabet.ok_or(SequenceError::NoAlpha)?;

        let top = self
            .top
            .validate(Some(alphabet))
            .map_err(on_side(StrandSide::Top))?;
        let bottom = self
            .bottom
            .validate(Some(alphabet))
            .map_err(on_side(StrandSide::Bottom))?;

        let unpaired = self.unpaired(alphabet.alphabet());
        if !unpaired.is_empty() {
            return Err(SequenceError::NotComplementary(unpaired));
        }

        log::debug!("validated double strand of span {} against {}", self.span(), alphabet);
        Ok(Self {
            top,
            bottom,
            complement_offset: self.complement_offset,
            label: self.label.clone(),
            alphabet: Some(alphabet),
            valid: true,
        })
    }

    /// Build the missing strand for a single-sided overhang.
    ///
    /// `given` is the strand on `side`; the other strand is derived from it
    /// by complementing and padded with gaps where its overhang is missing:
    ///
    /// ```text
    /// given top attgatc,    bottom  2  ->  bottom taact--
    /// given top attgatc,    bottom -2  ->  bottom --actag
    /// given bottom attgatc, top     2  ->  top    --actag
    /// given bottom attgatc, top    -2  ->  top    taact--
    /// ```
    ///
    /// Overhangs on both strands at once, or on the given strand itself,
    /// are `NotSupported`.
    pub fn construct_complement(
        given: &Sequence<K>,
        side: StrandSide,
        overhangs: Overhangs,
        alphabet: Option<AlphabetId>,
    ) -> SequenceResult<GappedStrands> {
        if overhangs.top != 0 && overhangs.bottom != 0 {
            return Err(SequenceError::NotSupported(format!(
                "overhangs on both strands ({}, {})",
                overhangs.top, overhangs.bottom
            )));
        }

        let (given_offset, derived_offset) = match side {
            StrandSide::Top => (overhangs.top, overhangs.bottom),
            StrandSide::Bottom => (overhangs.bottom, overhangs.top),
        };
        if given_offset != 0 {
            return Err(SequenceError::NotSupported(format!(
                "overhang of {} on the supplied {} strand",
                given_offset, side
            )));
        }

        let length = given.len();
        let gaps = derived_offset.unsigned_abs();
        if gaps > length {
            return Err(SequenceError::OffsetOutOfRange {
                offset: derived_offset,
                length,
            });
        }

        // Gaps lead on a derived bottom for negative offsets and on a
        // derived top for positive ones.
        let gaps_lead = (side == StrandSide::Top) == (derived_offset < 0);
        let window = if gaps_lead {
            &given.symbols()[gaps..]
        } else {
            &given.symbols()[..length - gaps]
        };

        let alphabet = given.complement_alphabet(alphabet);
        let paired = validation::complement_symbols(window, alphabet.alphabet())
            .map_err(SequenceError::MismatchAlpha)?;

        let spacing = iter::repeat(Slot::Gap).take(gaps);
        let paired = to_slots(&paired);
        let derived: Vec<Slot> = if gaps_lead {
            spacing.chain(paired).collect()
        } else {
            paired.chain(spacing).collect()
        };
        let given: Vec<Slot> = to_slots(given.symbols()).collect();

        Ok(match side {
            StrandSide::Top => GappedStrands {
                top: given,
                bottom: derived,
            },
            StrandSide::Bottom => GappedStrands {
                top: derived,
                bottom: given,
            },
        })
    }

    /// Render as `>{label}\n{top}\n`
    pub fn fasta_line(&self) -> String {
        format!(
            ">{}\n{}\n",
            self.label.as_deref().unwrap_or(""),
            self.top.as_string()
        )
    }
}

fn on_side(side: StrandSide) -> impl Fn(SequenceError) -> SequenceError {
    move |err| match err {
        SequenceError::MismatchAlpha(mismatches) => SequenceError::Strand { side, mismatches },
        other => other,
    }
}

impl<K: Kind> Polymeric for DoubleStrand<K> {
    type Kind = K;
    type Kmer = KmerPair;
    type Retyped<T: Kind> = DoubleStrand<T>;

    fn label(&self) -> Option<&str> {
        DoubleStrand::label(self)
    }

    fn kmers(&self, k: usize) -> SequenceResult<(Vec<KmerPair>, SequenceMetadata)> {
        DoubleStrand::kmers(self, k)
    }

    fn is_valid(&self, alphabet: AlphabetId) -> bool {
        DoubleStrand::is_valid(self, alphabet)
    }

    fn validate(&self, alphabet: Option<AlphabetId>) -> SequenceResult<Self> {
        DoubleStrand::validate(self, alphabet)
    }

    fn fasta_line(&self) -> String {
        DoubleStrand::fasta_line(self)
    }

    fn map_kmer(kmer: KmerPair, transform: KmerTransform) -> SequenceResult<KmerPair> {
        let (top, bottom) = kmer;
        Ok((map_slots(top, transform)?, map_slots(bottom, transform)?))
    }

    fn reassemble<T: Kind>(
        kmers: Vec<KmerPair>,
        metadata: SequenceMetadata,
    ) -> SequenceResult<DoubleStrand<T>> {
        let (top, bottom): (Vec<Vec<Slot>>, Vec<Vec<Slot>>) = kmers.into_iter().unzip();
        let alphabet = metadata.alphabet_for::<T>();

        let top = Sequence::from_parts(strip_gaps(&top.concat()), None, alphabet);
        let bottom = Sequence::from_parts(strip_gaps(&bottom.concat()), None, alphabet);

        Ok(DoubleStrand {
            top,
            bottom,
            complement_offset: metadata.complement_offset,
            label: metadata.label,
            alphabet,
            valid: false,
        })
    }
}

/// Apply `transform` to the symbols of a slot run, leaving gaps in place
fn map_slots(slots: Vec<Slot>, transform: KmerTransform) -> SequenceResult<Vec<Slot>> {
    let symbols = strip_gaps(&slots);
    if symbols.is_empty() {
        return Ok(slots);
    }

    let mapped = transform(&symbols)?;
    if mapped.len() != symbols.len() {
        return Err(SequenceError::NotSupported(format!(
            "transform changed a {}-symbol run to {} symbols inside a gapped k-mer",
            symbols.len(),
            mapped.len()
        )));
    }

    let mut mapped = mapped.into_iter();
    Ok(slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Symbol(_) => mapped.next().map_or(Slot::Gap, Slot::Symbol),
            Slot::Gap => Slot::Gap,
        })
        .collect())
}

impl<K: Kind> fmt::Display for DoubleStrand<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let aligned = self.aligned();
        writeln!(f, "{}", aligned.top_string())?;
        write!(f, "{}", aligned.bottom_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::seq::alphabet::Molecule;
    use crate::modules::seq::error::Mismatch;
    use crate::modules::seq::DnaSequence;
    use proptest::prelude::*;

    fn rendered(pairs: &[KmerPair]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(top, bottom)| (render_slots(top), render_slots(bottom)))
            .collect()
    }

    fn dna_common() -> SequenceOptions {
        SequenceOptions::new().with_alphabet(AlphabetId::DnaCommon)
    }

    #[test]
    fn test_derived_bottom_without_offset() {
        let ds = DnaDoubleStrand::new("attgatc", SequenceOptions::new().with_label("ds")).unwrap();
        assert_eq!(ds.top().symbols(), b"attgatc");
        assert_eq!(ds.bottom().symbols(), b"taactag");
        assert_eq!(ds.complement_offset(), 0);
        assert_eq!(ds.label(), Some("ds"));
        assert!(!ds.is_validated());
    }

    #[test]
    fn test_derived_bottom_positive_offset() {
        let ds = DnaDoubleStrand::new("attgatc", dna_common().with_complement_offset(2)).unwrap();
        assert_eq!(ds.bottom().symbols(), b"actag");
        assert_eq!(ds.span(), 9);

        let aligned = ds.aligned();
        assert_eq!(aligned.top_string(), "attgatc--");
        assert_eq!(aligned.bottom_string(), "--actag--");
        assert!(ds.is_valid(AlphabetId::DnaCommon));
    }

    #[test]
    fn test_derived_bottom_negative_offset_slices_from_end() {
        let ds = DnaDoubleStrand::new("attgatc", dna_common().with_complement_offset(-2)).unwrap();
        assert_eq!(ds.bottom().symbols(), b"ag");

        let aligned = ds.aligned();
        assert_eq!(aligned.top_string(), "--attgatc");
        assert_eq!(aligned.bottom_string(), "ag-------");
    }

    #[test]
    fn test_derived_bottom_offset_past_end_is_empty() {
        let ds = DnaDoubleStrand::new(
            "attg",
            SequenceOptions::new().with_complement_offset(9),
        )
        .unwrap();
        assert!(ds.bottom().is_empty());
        assert_eq!(ds.span(), 13);
    }

    #[test]
    fn test_derived_bottom_fails_on_unknown_symbols() {
        let result = DnaDoubleStrand::new("anttgn", dna_common());
        match result {
            Err(SequenceError::MismatchAlpha(mismatches)) => {
                let positions: Vec<usize> = mismatches.iter().map(|m| m.position).collect();
                assert_eq!(positions, vec![1, 5]);
            }
            other => panic!("Expected MismatchAlpha, got {:?}", other),
        }

        // The wider alphabet knows N
        let ds = DnaDoubleStrand::new(
            "anttgn",
            SequenceOptions::new().with_alphabet(AlphabetId::DnaWithN),
        );
        assert_eq!(ds.unwrap().bottom().symbols(), b"tnaacn");
    }

    #[test]
    fn test_explicit_bottom_is_not_checked() {
        let ds = DnaDoubleStrand::new(
            "aaaa",
            SequenceOptions::new().with_bottom_strand("aaaa"),
        )
        .unwrap();
        assert_eq!(ds.bottom().symbols(), b"aaaa");
        assert!(!ds.is_validated());
    }

    #[test]
    fn test_kmers_zero_offset() {
        let ds = DnaDoubleStrand::new("aattggcc", SequenceOptions::new()).unwrap();
        let (pairs, metadata) = ds.kmers(4).unwrap();
        assert_eq!(
            rendered(&pairs),
            vec![
                ("aatt".to_string(), "ttaa".to_string()),
                ("ggcc".to_string(), "ccgg".to_string()),
            ]
        );
        assert_eq!(metadata.complement_offset, 0);

        assert_eq!(
            ds.kmers(3).unwrap_err(),
            SequenceError::SeqLenMismatch { length: 8, k: 3 }
        );
    }

    #[test]
    fn test_kmers_positive_offset_pads_top_end_and_bottom_start() {
        let ds = DnaDoubleStrand::new(
            "attgatc",
            SequenceOptions::new()
                .with_complement_offset(2)
                .with_bottom_strand("taactag"),
        )
        .unwrap();

        let (pairs, metadata) = ds.kmers(3).unwrap();
        assert_eq!(
            rendered(&pairs),
            vec![
                ("att".to_string(), "--t".to_string()),
                ("gat".to_string(), "aac".to_string()),
                ("c--".to_string(), "tag".to_string()),
            ]
        );
        assert_eq!(metadata.complement_offset, 2);

        assert_eq!(
            ds.kmers(2).unwrap_err(),
            SequenceError::SeqLenMismatch { length: 9, k: 2 }
        );
    }

    #[test]
    fn test_kmers_negative_offset_pads_top_start_and_bottom_end() {
        let ds = DnaDoubleStrand::new(
            "attgatc",
            SequenceOptions::new()
                .with_complement_offset(-2)
                .with_bottom_strand("taactag"),
        )
        .unwrap();

        let (pairs, _) = ds.kmers(3).unwrap();
        assert_eq!(
            rendered(&pairs),
            vec![
                ("--a".to_string(), "taa".to_string()),
                ("ttg".to_string(), "cta".to_string()),
                ("atc".to_string(), "g--".to_string()),
            ]
        );
    }

    #[test]
    fn test_kmers_keep_all_gap_chunks() {
        let ds = DnaDoubleStrand::new(
            "atgc",
            SequenceOptions::new()
                .with_complement_offset(2)
                .with_bottom_strand("tacg"),
        )
        .unwrap();

        let (pairs, _) = ds.kmers(2).unwrap();
        assert_eq!(pairs.len(), 3);
        assert!(pairs[0].1.iter().all(Slot::is_gap));
        assert!(pairs[2].0.iter().all(Slot::is_gap));
    }

    #[test]
    fn test_kmers_with_bottom_longer_than_top() {
        let ds = DnaDoubleStrand::new("at", SequenceOptions::new().with_bottom_strand("tac"))
            .unwrap();
        assert_eq!(ds.span(), 3);
        assert_eq!(
            ds.kmers(2).unwrap_err(),
            SequenceError::SeqLenMismatch { length: 3, k: 2 }
        );

        let (pairs, _) = ds.kmers(3).unwrap();
        assert_eq!(rendered(&pairs), vec![("at-".to_string(), "tac".to_string())]);

        let (singles, _) = ds.kmers(1).unwrap();
        assert_eq!(singles.len(), 3);
        assert!(singles
            .iter()
            .all(|(top, bottom)| top.len() == 1 && bottom.len() == 1));

        let staggered = DnaDoubleStrand::new(
            "at",
            SequenceOptions::new()
                .with_complement_offset(1)
                .with_bottom_strand("tacg"),
        )
        .unwrap();
        assert_eq!(staggered.span(), 5);
        let (pairs, _) = staggered.kmers(5).unwrap();
        assert_eq!(rendered(&pairs), vec![("at---".to_string(), "-tacg".to_string())]);
        assert!(staggered.kmers(2).is_err());
    }

    #[test]
    fn test_valid_requires_complementary_strands() {
        let ds = DnaDoubleStrand::new(
            "aaaa",
            SequenceOptions::new().with_bottom_strand("aaaa"),
        )
        .unwrap();
        assert!(ds.top().is_valid(AlphabetId::DnaCommon));
        assert!(ds.bottom().is_valid(AlphabetId::DnaCommon));
        assert!(!ds.is_valid(AlphabetId::DnaCommon));

        let paired = DnaDoubleStrand::new(
            "aaaa",
            SequenceOptions::new().with_bottom_strand("tttt"),
        )
        .unwrap();
        assert!(paired.is_valid(AlphabetId::DnaCommon));
        assert!(!paired.is_valid(AlphabetId::RnaCommon));
    }

    #[test]
    fn test_valid_ignores_overhangs() {
        let ds = DnaDoubleStrand::new(
            "attgatc",
            SequenceOptions::new()
                .with_complement_offset(2)
                .with_bottom_strand("actag"),
        )
        .unwrap();
        assert!(ds.is_valid(AlphabetId::DnaCommon));
    }

    #[test]
    fn test_unpartnered_tail_counts_as_overhang() {
        // A gap on either strand exempts the position, bottom gaps included
        let short_bottom =
            DnaDoubleStrand::new("aaaa", SequenceOptions::new().with_bottom_strand("tt"))
                .unwrap();
        assert_eq!(short_bottom.aligned().bottom_string(), "tt--");
        assert!(short_bottom.unpaired(Molecule::Dna.common()).is_empty());
        assert!(short_bottom.is_valid(AlphabetId::DnaCommon));
        assert!(short_bottom.validate(Some(AlphabetId::DnaCommon)).is_ok());

        let short_top =
            DnaDoubleStrand::new("aa", SequenceOptions::new().with_bottom_strand("tttt"))
                .unwrap();
        assert_eq!(short_top.aligned().top_string(), "aa--");
        assert!(short_top.is_valid(AlphabetId::DnaCommon));

        // Symbols facing each other are still checked
        let clash =
            DnaDoubleStrand::new("aaaa", SequenceOptions::new().with_bottom_strand("tg"))
                .unwrap();
        assert_eq!(
            clash.unpaired(Molecule::Dna.common()),
            vec![PairMismatch { position: 1, top: b'a', bottom: b'g' }]
        );
    }

    #[test]
    fn test_validate_sets_alphabet_on_both_strands() {
        let ds = DnaDoubleStrand::new("attgatc", SequenceOptions::new()).unwrap();
        let validated = ds.validate(Some(AlphabetId::DnaCommon)).unwrap();

        assert!(validated.is_validated());
        assert_eq!(validated.alphabet(), Some(AlphabetId::DnaCommon));
        assert_eq!(validated.top().alphabet(), Some(AlphabetId::DnaCommon));
        assert_eq!(validated.bottom().alphabet(), Some(AlphabetId::DnaCommon));
        assert!(validated.top().is_validated());
        assert!(validated.bottom().is_validated());
        assert!(!ds.is_validated());
    }

    #[test]
    fn test_validate_with_carried_alphabets() {
        let ds = DnaDoubleStrand::new(
            "acgtn",
            SequenceOptions::new().with_alphabet(AlphabetId::DnaWithN),
        )
        .unwrap();
        let validated = ds.validate(None).unwrap();
        assert_eq!(validated.alphabet(), Some(AlphabetId::DnaWithN));

        let bare = DnaDoubleStrand::new("acgt", SequenceOptions::new()).unwrap();
        assert_eq!(bare.validate(None).unwrap_err(), SequenceError::NoAlpha);
    }

    #[test]
    fn test_validate_rejects_disagreeing_alphabets_first() {
        let top = DnaSequence::new(
            "nnnn",
            SequenceOptions::new().with_alphabet(AlphabetId::DnaCommon),
        );
        let bottom = DnaSequence::new(
            "xxxx",
            SequenceOptions::new().with_alphabet(AlphabetId::DnaIupac),
        );
        let ds = DnaDoubleStrand::from_strands(top, bottom, 0);
        assert_eq!(ds.alphabet(), None);

        assert_eq!(
            ds.validate(None).unwrap_err(),
            SequenceError::StrandAlphabetMismatch {
                top: Some(AlphabetId::DnaCommon),
                bottom: Some(AlphabetId::DnaIupac),
            }
        );
    }

    #[test]
    fn test_validate_tags_failing_strand() {
        let ds = DnaDoubleStrand::new(
            "anna",
            SequenceOptions::new().with_bottom_strand("tnnx"),
        )
        .unwrap();
        assert_eq!(
            ds.validate(Some(AlphabetId::DnaCommon)).unwrap_err(),
            SequenceError::Strand {
                side: StrandSide::Top,
                mismatches: vec![
                    Mismatch { symbol: b'n', position: 1, alphabet: AlphabetId::DnaCommon },
                    Mismatch { symbol: b'n', position: 2, alphabet: AlphabetId::DnaCommon },
                ],
            }
        );

        let ds = DnaDoubleStrand::new(
            "aaaa",
            SequenceOptions::new().with_bottom_strand("tnnx"),
        )
        .unwrap();
        match ds.validate(Some(AlphabetId::DnaCommon)) {
            Err(SequenceError::Strand { side, mismatches }) => {
                assert_eq!(side, StrandSide::Bottom);
                assert_eq!(mismatches.len(), 3);
            }
            other => panic!("Expected bottom strand error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_reports_unpaired_positions() {
        let ds = DnaDoubleStrand::new(
            "acgt",
            SequenceOptions::new().with_bottom_strand("tgga"),
        )
        .unwrap();
        assert_eq!(
            ds.validate(Some(AlphabetId::DnaCommon)).unwrap_err(),
            SequenceError::NotComplementary(vec![PairMismatch {
                position: 2,
                top: b'g',
                bottom: b'g',
            }])
        );
    }

    #[test]
    fn test_construct_complement_bottom_overhangs() {
        let top = DnaSequence::from("attgatc");

        let positive = DnaDoubleStrand::construct_complement(
            &top,
            StrandSide::Top,
            Overhangs::bottom(2),
            Some(AlphabetId::DnaCommon),
        )
        .unwrap();
        assert_eq!(positive.top_string(), "attgatc");
        assert_eq!(positive.bottom_string(), "taact--");

        let negative = DnaDoubleStrand::construct_complement(
            &top,
            StrandSide::Top,
            Overhangs::bottom(-2),
            Some(AlphabetId::DnaCommon),
        )
        .unwrap();
        assert_eq!(negative.bottom_string(), "--actag");
    }

    #[test]
    fn test_construct_complement_top_overhangs() {
        let bottom = DnaSequence::from("attgatc");

        let positive = DnaDoubleStrand::construct_complement(
            &bottom,
            StrandSide::Bottom,
            Overhangs::top(2),
            Some(AlphabetId::DnaCommon),
        )
        .unwrap();
        assert_eq!(positive.top_string(), "--actag");
        assert_eq!(positive.bottom_string(), "attgatc");

        let negative = DnaDoubleStrand::construct_complement(
            &bottom,
            StrandSide::Bottom,
            Overhangs::top(-2),
            Some(AlphabetId::DnaCommon),
        )
        .unwrap();
        assert_eq!(negative.top_string(), "taact--");
    }

    #[test]
    fn test_construct_complement_without_overhang() {
        let top = DnaSequence::from("attgatc");
        let strands = DnaDoubleStrand::construct_complement(
            &top,
            StrandSide::Top,
            Overhangs::default(),
            None,
        )
        .unwrap();
        assert_eq!(strands.bottom_string(), "taactag");
    }

    #[test]
    fn test_construct_complement_rejects_combined_overhangs() {
        let top = DnaSequence::from("attgatc");
        let combined = Overhangs { top: 1, bottom: 2 };
        assert!(matches!(
            DnaDoubleStrand::construct_complement(&top, StrandSide::Top, combined, None),
            Err(SequenceError::NotSupported(_))
        ));

        // An overhang on the strand that was supplied is not derivable either
        assert!(matches!(
            DnaDoubleStrand::construct_complement(&top, StrandSide::Top, Overhangs::top(2), None),
            Err(SequenceError::NotSupported(_))
        ));
    }

    #[test]
    fn test_construct_complement_bounds_and_symbols() {
        let top = DnaSequence::from("atg");
        assert_eq!(
            DnaDoubleStrand::construct_complement(
                &top,
                StrandSide::Top,
                Overhangs::bottom(-4),
                None,
            )
            .unwrap_err(),
            SequenceError::OffsetOutOfRange { offset: -4, length: 3 }
        );

        let all_gaps = DnaDoubleStrand::construct_complement(
            &top,
            StrandSide::Top,
            Overhangs::bottom(3),
            None,
        )
        .unwrap();
        assert_eq!(all_gaps.bottom_string(), "---");

        let unknown = DnaSequence::from("anx");
        assert!(matches!(
            DnaDoubleStrand::construct_complement(
                &unknown,
                StrandSide::Top,
                Overhangs::bottom(1),
                None,
            ),
            Err(SequenceError::MismatchAlpha(m)) if m.len() == 1 && m[0].position == 1
        ));
    }

    #[test]
    fn test_fasta_line_renders_top_strand() {
        let ds = DnaDoubleStrand::new(
            "attgatc",
            SequenceOptions::new().with_label("duplex"),
        )
        .unwrap();
        assert_eq!(ds.fasta_line(), ">duplex\nattgatc\n");
        assert_eq!(ds.to_string(), "attgatc\ntaactag");
    }

    #[test]
    fn test_rendering_agrees_for_non_ascii_symbols() {
        let ds = DnaDoubleStrand::new(
            [b'a', 0xE9],
            SequenceOptions::new().with_bottom_strand("t"),
        )
        .unwrap();
        let aligned = ds.aligned();

        assert_eq!(aligned.top_string(), ds.top().as_string());
        assert_eq!(ds.fasta_line(), format!(">\n{}\n", aligned.top_string()));
        assert_eq!(ds.to_string(), "a\u{e9}\nt-");
    }

    #[test]
    fn test_map_slots_keeps_gaps() {
        fn upper(kmer: &[u8]) -> SequenceResult<Vec<u8>> {
            Ok(kmer.to_ascii_uppercase())
        }
        fn shrink(kmer: &[u8]) -> SequenceResult<Vec<u8>> {
            Ok(kmer[1..].to_vec())
        }

        let slots = vec![Slot::Gap, Slot::Symbol(b'a'), Slot::Symbol(b'c')];
        assert_eq!(
            map_slots(slots.clone(), upper).unwrap(),
            vec![Slot::Gap, Slot::Symbol(b'A'), Slot::Symbol(b'C')]
        );
        assert!(map_slots(slots, shrink).is_err());
        assert_eq!(map_slots(vec![Slot::Gap; 2], shrink).unwrap(), vec![Slot::Gap; 2]);
    }

    proptest! {
        #[test]
        fn prop_kmer_divisibility(seq in "[acgt]{1,40}", offset in -10isize..10, k in 1usize..6) {
            let ds = DnaDoubleStrand::new(
                seq.as_str(),
                SequenceOptions::new().with_complement_offset(offset),
            )
            .unwrap();
            let span = seq.len() + offset.unsigned_abs();
            match ds.kmers(k) {
                Ok((pairs, _)) => {
                    prop_assert_eq!(span % k, 0);
                    let top: Vec<Slot> = pairs.iter().flat_map(|(top, _)| top.clone()).collect();
                    prop_assert_eq!(strip_gaps(&top), seq.as_bytes().to_vec());
                }
                Err(_) => prop_assert_ne!(span % k, 0),
            }
        }

        #[test]
        fn prop_derived_positive_offset_is_valid(seq in "[ACGTacgt]{1,40}", offset in 0isize..10) {
            let ds = DnaDoubleStrand::new(
                seq.as_str(),
                SequenceOptions::new().with_complement_offset(offset),
            )
            .unwrap();
            prop_assert!(ds.is_valid(AlphabetId::DnaCommon));
            prop_assert!(ds.validate(Some(AlphabetId::DnaCommon)).is_ok());
        }
    }
}
