pub mod sending;

pub use sending::{SenderState, StopAndWait, TransmissionStats};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::DEFAULT_DELAY_MS;
use crate::protocol::{Checksum, CrcRemainder};

/// One observable move of the Stop-and-Wait sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Frame `index` goes on the wire; `attempt` counts from 1.
    Sending { index: usize, attempt: usize },
    FrameLost { index: usize },
    /// The receiver's CRC disagreed with the FCS and it answered with a NACK.
    FrameCorrupted {
        index: usize,
        expected: CrcRemainder,
        received: CrcRemainder,
    },
    FrameDelivered { index: usize },
    AckLost { index: usize },
    AckReceived { index: usize },
    SendingChecksum { checksum: Checksum },
    ChecksumDelivered { checksum: Checksum },
    /// The whole data set is rejected. Never retried.
    ChecksumRejected { checksum: Checksum },
}

impl Step {
    /// How long the sender waits after this step.
    pub fn delay(&self, timing: &Timing) -> Duration {
        match self {
            Step::Sending { .. } | Step::SendingChecksum { .. } => timing.transmission_delay(),
            Step::FrameLost { .. } | Step::FrameCorrupted { .. } | Step::AckLost { .. } => {
                timing.timeout()
            }
            Step::AckReceived { .. } => timing.ack_delay(),
            Step::FrameDelivered { .. }
            | Step::ChecksumDelivered { .. }
            | Step::ChecksumRejected { .. } => Duration::ZERO,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            Step::FrameLost { .. }
                | Step::FrameCorrupted { .. }
                | Step::AckLost { .. }
                | Step::ChecksumRejected { .. }
        )
    }
}

/// Fixed pacing delays, in milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Timing {
    pub transmission_delay_ms: u64,
    pub timeout_ms: u64,
    pub ack_delay_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            transmission_delay_ms: DEFAULT_DELAY_MS,
            timeout_ms: DEFAULT_DELAY_MS,
            ack_delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl Timing {
    pub const NONE: Timing = Timing {
        transmission_delay_ms: 0,
        timeout_ms: 0,
        ack_delay_ms: 0,
    };

    pub fn transmission_delay(&self) -> Duration {
        Duration::from_millis(self.transmission_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn ack_delay(&self) -> Duration {
        Duration::from_millis(self.ack_delay_ms)
    }
}
