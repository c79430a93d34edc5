pub mod mock;
pub mod real;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ACK_LOSS_PROB, CHECKSUM_CORRUPTION_PROB, FRAME_CORRUPTION_PROB, FRAME_LOSS_PROB,
};
use crate::error::ConfigError;

/// Uniform draws in `[0, 1)` that decide the fate of each transmission.
pub trait RandomSource {
    fn draw(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

/// What happened to one frame attempt.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    #[display("delivered")]
    Delivered,
    #[display("frame lost")]
    FrameLost,
    #[display("frame corrupted")]
    FrameCorrupted,
    #[display("ACK lost")]
    AckLost,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumEvent {
    #[display("delivered")]
    Delivered,
    #[display("corrupted")]
    Corrupted,
}

const PPM: f64 = 1_000_000.0;

// Sum of two probabilities in whole parts per million, so 0.10 + 0.20 is
// exactly 0.30 rather than 0.30000000000000004.
fn cumulative(a: f64, b: f64) -> f64 {
    ((a * PPM).round() + (b * PPM).round()) / PPM
}

/// Fault probabilities of the simulated link.
///
/// Probabilities are resolved to parts per million when bands are stacked.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ChannelProfile {
    pub frame_loss: f64,
    pub frame_corruption: f64,
    pub ack_loss: f64,
    pub checksum_corruption: f64,
}

impl Default for ChannelProfile {
    fn default() -> Self {
        ChannelProfile {
            frame_loss: FRAME_LOSS_PROB,
            frame_corruption: FRAME_CORRUPTION_PROB,
            ack_loss: ACK_LOSS_PROB,
            checksum_corruption: CHECKSUM_CORRUPTION_PROB,
        }
    }
}

impl ChannelProfile {
    pub const PERFECT: ChannelProfile = ChannelProfile {
        frame_loss: 0.0,
        frame_corruption: 0.0,
        ack_loss: 0.0,
        checksum_corruption: 0.0,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("frame_loss", self.frame_loss),
            ("frame_corruption", self.frame_corruption),
            ("ack_loss", self.ack_loss),
            ("checksum_corruption", self.checksum_corruption),
        ];
        for (name, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        let sum = cumulative(self.frame_loss, self.frame_corruption);
        if sum > 1.0 {
            return Err(ConfigError::FrameFaultsExceedOne { sum });
        }
        Ok(())
    }

    /// Loss takes the bottom of the range, corruption the band right above it.
    pub fn classify_frame(&self, draw: f64) -> ChannelEvent {
        if draw < self.frame_loss {
            ChannelEvent::FrameLost
        } else if draw < cumulative(self.frame_loss, self.frame_corruption) {
            ChannelEvent::FrameCorrupted
        } else {
            ChannelEvent::Delivered
        }
    }

    pub fn classify_ack(&self, draw: f64) -> ChannelEvent {
        if draw < self.ack_loss {
            ChannelEvent::AckLost
        } else {
            ChannelEvent::Delivered
        }
    }

    pub fn classify_checksum(&self, draw: f64) -> ChecksumEvent {
        if draw < self.checksum_corruption {
            ChecksumEvent::Corrupted
        } else {
            ChecksumEvent::Delivered
        }
    }
}
