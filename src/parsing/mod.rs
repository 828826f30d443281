//! Readers that turn sequence files into `(id, sequence)` records.
//!
//! ## Example
//!
//! ```rust,no_run
//! use oligo_solver::parsing::fasta::read_records;
//! use std::path::Path;
//!
//! let corpus = read_records(Path::new("master_oligos.fasta")).unwrap();
//! for record in &corpus {
//!     println!("{}\t{}", record.id, record.sequence);
//! }
//! ```

pub mod fasta;
