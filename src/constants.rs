pub const FRAME_BITS: usize = 100;
pub const CRC_BITS: usize = 16;
pub const AUGMENTED_BITS: usize = FRAME_BITS + CRC_BITS;

// x^16 + x^12 + x^5 + 1
pub const CCITT_GENERATOR: u32 = 0b1_0001_0000_0010_0001;

pub const DEFAULT_REPORT_FRAMES: usize = 10;

pub const FRAME_LOSS_PROB: f64 = 0.10;
pub const FRAME_CORRUPTION_PROB: f64 = 0.20;
pub const ACK_LOSS_PROB: f64 = 0.15;
pub const CHECKSUM_CORRUPTION_PROB: f64 = 0.05;

pub const DEFAULT_DELAY_MS: u64 = 500;
