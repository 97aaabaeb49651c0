//! Low-level symbol operations for sequence data
//!
//! This module provides the slice-level primitives the sequence types are
//! built on: reversal, T/U re-encoding, signed slicing and k-sized
//! partitioning. None of them know about alphabets.

/// Reverse a sequence in-place
pub fn reverse_in_place<T>(sequence: &mut [T]) {
    let len = sequence.len();
    if len <= 1 {
        return;
    }

    for i in 0..len / 2 {
        sequence.swap(i, len - 1 - i);
    }
}

/// Reverse a sequence, returning a new vector
pub fn reverse<T: Clone>(sequence: &[T]) -> Vec<T> {
    let mut result = sequence.to_vec();
    reverse_in_place(&mut result);
    result
}

/// Transcribe DNA to RNA (T -> U), preserving case
pub fn transcribe(dna: &[u8]) -> Vec<u8> {
    let mut rna = Vec::with_capacity(dna.len());

    for &base in dna {
        match base {
            b'T' => rna.push(b'U'),
            b't' => rna.push(b'u'),
            _ => rna.push(base),
        }
    }

    rna
}

/// Reverse-transcribe RNA to DNA (U -> T), preserving case
pub fn reverse_transcribe(rna: &[u8]) -> Vec<u8> {
    let mut dna = Vec::with_capacity(rna.len());

    for &base in rna {
        match base {
            b'U' => dna.push(b'T'),
            b'u' => dna.push(b't'),
            _ => dna.push(base),
        }
    }

    dna
}

/// Take up to `len` elements starting at a signed position.
///
/// A negative `start` counts from the end of the sequence. A start that
/// falls outside the sequence in either direction yields an empty slice;
/// a window running past the end is cut short.
pub fn signed_slice<T>(sequence: &[T], start: isize, len: usize) -> &[T] {
    let n = sequence.len() as isize;
    let start = if start < 0 { n + start } else { start };

    if start < 0 || start >= n {
        return &[];
    }

    let start = start as usize;
    let end = start.saturating_add(len).min(sequence.len());
    &sequence[start..end]
}

/// Split a sequence into consecutive runs of `k` elements.
///
/// The last run is shorter when `k` does not divide the length; callers
/// that need exact partitions check divisibility first.
pub fn partition<T: Clone>(sequence: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return Vec::new();
    }

    sequence.chunks(k).map(|chunk| chunk.to_vec()).collect()
}
