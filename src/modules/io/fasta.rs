//! FASTA format I/O
//!
//! Records are written one line per sequence, exactly as
//! [`Polymeric::fasta_line`] renders them. Parsing accepts wrapped records
//! and joins their lines.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::modules::seq::{Kind, Polymeric, Sequence, SequenceOptions};

/// Write every record to `writer`
pub fn write_fasta<W, P>(writer: &mut W, records: &[P]) -> io::Result<()>
where
    W: Write,
    P: Polymeric,
{
    for record in records {
        writer.write_all(record.fasta_line().as_bytes())?;
    }
    Ok(())
}

/// Write every record to a new file at `path`
pub fn write_fasta_file<P, Q>(path: Q, records: &[P]) -> io::Result<()>
where
    P: Polymeric,
    Q: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_fasta(&mut writer, records)?;
    writer.flush()?;

    log::debug!(
        "wrote {} FASTA records to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Parse FASTA text into sequences of kind `K`.
///
/// The full header text after `>` becomes the label. Blank lines are
/// skipped, and symbols that appear before the first header form an
/// unlabeled record.
pub fn parse_fasta_str<K: Kind>(content: &str) -> Vec<Sequence<K>> {
    let mut records = Vec::new();
    let mut current_label: Option<String> = None;
    let mut current_seq: Vec<u8> = Vec::new();
    let mut started = false;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if started || !current_seq.is_empty() {
                records.push(finish_record(current_label.take(), &mut current_seq));
            }
            current_label = Some(header.trim().to_string());
            started = true;
        } else {
            current_seq.extend_from_slice(line.as_bytes());
        }
    }

    if started || !current_seq.is_empty() {
        records.push(finish_record(current_label, &mut current_seq));
    }

    log::trace!("parsed {} FASTA records", records.len());
    records
}

/// Read and parse a FASTA file
pub fn read_fasta_file<K: Kind, Q: AsRef<Path>>(path: Q) -> io::Result<Vec<Sequence<K>>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_fasta_str(&content))
}

fn finish_record<K: Kind>(label: Option<String>, symbols: &mut Vec<u8>) -> Sequence<K> {
    let options = match label {
        Some(label) => SequenceOptions::new().with_label(label),
        None => SequenceOptions::new(),
    };
    Sequence::new(std::mem::take(symbols), options)
}
