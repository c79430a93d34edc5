pub mod checksum;
pub mod crc;
pub mod framing;

pub use checksum::{Checksum, ChecksumAccumulator, checksum};
pub use crc::{CrcEngine, CrcRemainder, Generator};
pub use framing::{Frame, Frames, frame_count, split_into_frames};

/// Everything the sender knows before the first transmission.
///
/// `generator` is the polynomial the CRCs were computed with; the receiver
/// side of the link divides by the same one.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub generator: Generator,
    pub frames: Vec<Frame>,
    pub crcs: Vec<CrcRemainder>,
    pub checksum: Checksum,
}

impl Encoded {
    pub fn new(bytes: &[u8], engine: &CrcEngine) -> Self {
        let frames = split_into_frames(bytes);
        let crcs = engine.remainders(&frames);
        let checksum = checksum(&crcs);
        Encoded {
            generator: engine.generator(),
            frames,
            crcs,
            checksum,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
