use serde::{Deserialize, Serialize};

use crate::protocol::Encoded;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct FrameRecord {
    pub frame_id: usize,
    /// Left aligned frame bits, hex encoded.
    pub payload: String,
    pub crc: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct FcsReport {
    pub file_name: String,
    pub total_length: u64,
    pub frame_count: usize,
    pub checksum: String,
    pub frames: Vec<FrameRecord>,
}

impl FcsReport {
    pub fn new(file_name: String, total_length: u64, encoded: &Encoded) -> Self {
        let frames = encoded
            .frames
            .iter()
            .zip(&encoded.crcs)
            .enumerate()
            .map(|(frame_id, (frame, crc))| FrameRecord {
                frame_id,
                payload: hex::encode_upper(frame.to_bytes()),
                crc: format!("{:#06X}", crc.value()),
            })
            .collect();

        FcsReport {
            file_name,
            total_length,
            frame_count: encoded.len(),
            checksum: encoded.checksum.to_string(),
            frames,
        }
    }
}
