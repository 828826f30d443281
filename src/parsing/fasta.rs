//! FASTA record reader using noodles.
//!
//! Yields `(id, sequence)` records for the corpus and query sets. The id is
//! the first whitespace-delimited word of the header; sequences are
//! uppercased. Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use thiserror::Error;
use tracing::warn;

use crate::core::types::SequenceRecord;
use crate::utils::validation::normalize_sequence;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read every record of a FASTA file, in file order.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if a record is malformed, or `ParseError::InvalidFormat` if the file holds
/// no sequences.
pub fn read_records(path: &Path) -> Result<Vec<SequenceRecord>, ParseError> {
    if !is_fasta_file(path) {
        warn!(
            "{} does not have a FASTA extension; reading it as FASTA",
            path.display()
        );
    }
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let reader = BufReader::new(MultiGzDecoder::new(file));
        read_from(&mut fasta::io::Reader::new(reader))
    } else {
        let reader = BufReader::new(file);
        read_from(&mut fasta::io::Reader::new(reader))
    }
}

fn read_from<R: BufRead>(reader: &mut fasta::io::Reader<R>) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name());
        let id = name.split_whitespace().next().unwrap_or_default().to_string();
        let sequence = normalize_sequence(&String::from_utf8_lossy(record.sequence().as_ref()));

        records.push(SequenceRecord::new(id, sequence));
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}
