//! Error types for the library.
//!
//! Only two things can fail: getting hold of the input bytes and loading a
//! simulation config. Framing, CRC and checksum computation are total, and
//! simulated channel faults are protocol events rather than errors.

use std::path::PathBuf;
use thiserror::Error;

/// The byte stream could not be obtained. Always fatal.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("{} is empty, nothing to transmit", .0.display())]
    Empty(PathBuf),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A probability outside [0, 1].
    #[error("probability `{name}` must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("frame loss + frame corruption must not exceed 1, got {sum}")]
    FrameFaultsExceedOne { sum: f64 },
}
