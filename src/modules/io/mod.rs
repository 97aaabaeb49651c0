//! I/O module
//!
//! Reading and writing FASTA text for any [`Polymeric`](crate::modules::seq::Polymeric)
//! value.

pub mod fasta;

/// Convenience re-exports
pub use fasta::{parse_fasta_str, read_fasta_file, write_fasta, write_fasta_file};
