//! Frame check sequences and a Stop-and-Wait ARQ simulation.
//!
//! Bytes are cut into 100-bit frames, each frame gets a bit-serial CRC-16
//! (x^16 + x^12 + x^5 + 1), the CRCs are folded into one end-around-carry
//! checksum, and a Stop-and-Wait sender pushes it all through a lossy link.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod transmission;
pub mod util;
