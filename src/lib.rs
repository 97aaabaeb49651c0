//! Biological polymer sequences in Rust
//!
//! Alphabets with complement tables, single strands, offset-aware double
//! strands and k-mer based conversion between DNA and RNA.
//!
//! ```
//! use biopolymer_rust::{AlphabetId, DnaDoubleStrand, Polymeric, Rna, SequenceOptions};
//!
//! let options = SequenceOptions::new().with_complement_offset(2);
//! let dna = DnaDoubleStrand::new("attgatc", options).unwrap();
//! assert_eq!(dna.bottom().symbols(), b"actag");
//! assert!(dna.is_valid(AlphabetId::DnaCommon));
//!
//! let rna = dna.convert::<Rna>().unwrap();
//! assert_eq!(rna.top().symbols(), b"auugauc");
//! ```

pub mod engines;
pub mod modules;

pub use modules::io::{parse_fasta_str, read_fasta_file, write_fasta, write_fasta_file};
pub use modules::seq::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
