//! Input and output helpers around the signature builder.
//! `fasta` reads the two-line records (a metadata line followed by one sequence line),
//! and `sigfile` writes/reads the flat binary signature files.
#[macro_use]
extern crate log;
pub mod fasta;
pub mod sigfile;
pub use fasta::Record;
pub use sigfile::signature_file_name;
