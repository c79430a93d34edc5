use log::{debug, info};

use super::{Step, Timing};
use crate::constants::FRAME_BITS;
use crate::protocol::{CrcEngine, Encoded};
use crate::transmission::{ChannelEvent, ChannelProfile, ChecksumEvent, RandomSource};
use crate::util::timer::Pacer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderState {
    /// About to put frame `i` on the wire.
    Sending(usize),
    /// Frame `i` is on the wire, its fate not drawn yet.
    InFlight(usize),
    AwaitingAck(usize),
    SendingChecksum,
    ChecksumInFlight,
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransmissionStats {
    pub frames: usize,
    pub frame_attempts: usize,
    pub frame_losses: usize,
    pub frame_corruptions: usize,
    pub ack_losses: usize,
    pub checksum_attempts: usize,
    pub checksum_accepted: Option<bool>,
}

impl TransmissionStats {
    pub fn attempts(&self) -> usize {
        self.frame_attempts + self.checksum_attempts
    }

    pub fn retransmissions(&self) -> usize {
        // Frames still waiting for their first attempt are not counted.
        self.frame_attempts.saturating_sub(self.frames)
    }
}

/// Stop-and-Wait sender over a simulated lossy link.
///
/// Frames go out strictly one at a time: frame `i + 1` is only sent once
/// frame `i` has been acknowledged. Every fault sends the same frame again,
/// with no retry limit. The closing checksum gets exactly one attempt.
///
/// Each attempt consumes one draw for the frame and, if the frame arrived,
/// one for its ACK. The checksum consumes one draw.
pub struct StopAndWait<'a> {
    encoded: &'a Encoded,
    engine: CrcEngine,
    profile: ChannelProfile,
    timing: Timing,
    state: SenderState,
    attempt: usize,
    stats: TransmissionStats,
}

impl<'a> StopAndWait<'a> {
    pub fn new(encoded: &'a Encoded, profile: ChannelProfile) -> Self {
        let state = if encoded.is_empty() {
            SenderState::SendingChecksum
        } else {
            SenderState::Sending(0)
        };

        Self {
            encoded,
            engine: CrcEngine::new(encoded.generator),
            profile,
            timing: Timing::default(),
            state,
            attempt: 0,
            stats: TransmissionStats {
                frames: encoded.len(),
                ..Default::default()
            },
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn state(&self) -> SenderState {
        self.state
    }

    pub fn stats(&self) -> &TransmissionStats {
        &self.stats
    }

    /// Advance by one step. `None` once the checksum attempt is over.
    pub fn step<R: RandomSource + ?Sized>(&mut self, source: &mut R) -> Option<Step> {
        let step = match self.state {
            SenderState::Sending(index) => {
                self.attempt += 1;
                self.stats.frame_attempts += 1;
                self.state = SenderState::InFlight(index);
                Step::Sending {
                    index,
                    attempt: self.attempt,
                }
            }

            SenderState::InFlight(index) => {
                let draw = source.draw();
                let event = self.profile.classify_frame(draw);
                debug!("frame {index} attempt {}: draw {draw:.4} -> {event}", self.attempt);

                match event {
                    ChannelEvent::FrameLost => {
                        self.stats.frame_losses += 1;
                        self.state = SenderState::Sending(index);
                        Step::FrameLost { index }
                    }
                    ChannelEvent::FrameCorrupted => {
                        self.stats.frame_corruptions += 1;
                        self.state = SenderState::Sending(index);
                        self.corrupted(index)
                    }
                    _ => {
                        self.state = SenderState::AwaitingAck(index);
                        Step::FrameDelivered { index }
                    }
                }
            }

            SenderState::AwaitingAck(index) => {
                let draw = source.draw();
                let event = self.profile.classify_ack(draw);
                debug!("ack {index}: draw {draw:.4} -> {event}");

                match event {
                    ChannelEvent::AckLost => {
                        self.stats.ack_losses += 1;
                        self.state = SenderState::Sending(index);
                        Step::AckLost { index }
                    }
                    _ => {
                        self.attempt = 0;
                        self.state = if index + 1 < self.encoded.len() {
                            SenderState::Sending(index + 1)
                        } else {
                            SenderState::SendingChecksum
                        };
                        Step::AckReceived { index }
                    }
                }
            }

            SenderState::SendingChecksum => {
                self.stats.checksum_attempts += 1;
                self.state = SenderState::ChecksumInFlight;
                Step::SendingChecksum {
                    checksum: self.encoded.checksum,
                }
            }

            SenderState::ChecksumInFlight => {
                let draw = source.draw();
                let event = self.profile.classify_checksum(draw);
                debug!("checksum: draw {draw:.4} -> {event}");

                let checksum = self.encoded.checksum;
                self.state = SenderState::Done;
                match event {
                    ChecksumEvent::Corrupted => {
                        self.stats.checksum_accepted = Some(false);
                        Step::ChecksumRejected { checksum }
                    }
                    ChecksumEvent::Delivered => {
                        self.stats.checksum_accepted = Some(true);
                        Step::ChecksumDelivered { checksum }
                    }
                }
            }

            SenderState::Done => return None,
        };

        Some(step)
    }

    // The receiver sees a frame with one bit flipped and recomputes its CRC.
    // Attempt n flips bit (n - 1) mod 100, so the first attempt flips bit 0.
    fn corrupted(&self, index: usize) -> Step {
        let frame = self.encoded.frames[index];
        let expected = self.encoded.crcs[index];
        let damaged = frame.with_flipped_bit((self.attempt - 1) % FRAME_BITS);
        let received = self.engine.remainder(&damaged);
        debug_assert!(!self.engine.verify(&damaged, expected));

        Step::FrameCorrupted {
            index,
            expected,
            received,
        }
    }

    /// Drive the machine to the end, pausing after each step and handing
    /// every step to `observer`.
    pub async fn run<R, P, F>(
        mut self,
        source: &mut R,
        pacer: &P,
        mut observer: F,
    ) -> TransmissionStats
    where
        R: RandomSource + ?Sized,
        P: Pacer + ?Sized,
        F: FnMut(&Step),
    {
        while let Some(step) = self.step(source) {
            observer(&step);
            pacer.pause(step.delay(&self.timing)).await;
        }

        info!(
            "transmission finished: {} frames, {} attempts, {} retransmissions",
            self.stats.frames,
            self.stats.attempts(),
            self.stats.retransmissions()
        );
        self.stats
    }
}
