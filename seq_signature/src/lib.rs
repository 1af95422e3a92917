//! Random indexing signatures of protein sequences.
//!
//! Every term (k-mer) of a sequence is given a sparse ternary vector derived
//! from its own bytes. A sequence is cut into windows overlapping by half,
//! the term vectors of each window are summed up, and the sum is thresholded
//! at zero into a bit signature, one per window.
//! The bit signatures are meant to be compared by Hamming distance.
//!
//! ```
//! use seq_signature::{Config, Signer};
//! let signer = Signer::new(Config::new(3, 6, 8, 50)).unwrap();
//! let windows = signer.sign_sequence(b"CSTPAGND").unwrap();
//! assert_eq!(windows.len(), 2);
//! assert_eq!(windows[0].len(), 1);
//! ```
#[macro_use]
extern crate log;
extern crate serde;
extern crate dashmap;
extern crate md5;
extern crate rand;
extern crate rand_xoshiro;
extern crate rayon;
extern crate serde_json;
extern crate sig_io;
extern crate thiserror;
pub mod accumulate;
pub mod alphabet;
pub mod cache;
mod config;
mod error;
pub mod pack;
pub mod partition;
pub mod seeded;
pub mod signer;
pub mod term;
pub use cache::TermCache;
pub use config::*;
pub use error::{ConfigError, SignatureError};
pub use pack::PackedRecord;
pub use partition::{partitions, PartitionWindow};
pub use signer::{sign_records, InvalidPolicy, Numbering, RunSummary, Signer};
pub use term::TermSignature;
