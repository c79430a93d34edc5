use once_cell::sync::Lazy;
use owo_colors::*;
use std::time::Instant;

use crate::engine::{Step, TransmissionStats};
use crate::protocol::{Checksum, CrcRemainder};

pub static PROGRAM_START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

pub fn elapsed_ms() -> f64 {
    PROGRAM_START_TIME.elapsed().as_secs_f64() * 1000.0
}

/// One trace line for a sender step, without colors.
pub fn describe(step: &Step) -> String {
    match step {
        Step::Sending { index, attempt: 1 } => format!("[Sender] Sending frame {index}..."),
        Step::Sending { index, attempt } => {
            format!("[Sender] Sending frame {index}... (attempt {attempt})")
        }
        Step::FrameLost { index } => format!("  Frame {index} lost! Waiting for timeout..."),
        Step::FrameCorrupted {
            index,
            expected,
            received,
        } => format!(
            "  Frame {index} corrupted! Receiver CRC {:#06x} != FCS {:#06x}, NACK sent.",
            received.value(),
            expected.value()
        ),
        Step::FrameDelivered { index } => format!("  Frame {index} received successfully."),
        Step::AckLost { index } => format!("  ACK for frame {index} lost. Timeout..."),
        Step::AckReceived { index } => {
            format!("  ACK for frame {index} received. Moving on to the next frame.")
        }
        Step::SendingChecksum { checksum } => format!("--- Sending checksum {checksum} ---"),
        Step::ChecksumDelivered { checksum } => {
            format!("Checksum delivered successfully: {checksum}")
        }
        Step::ChecksumRejected { checksum } => {
            format!("Checksum {checksum} corrupted! The receiver rejected the whole data set.")
        }
    }
}

pub fn print_step(step: &Step) {
    let line = describe(step);
    let stamp = format!("[{:>10.3}ms]", elapsed_ms());
    let line = match step {
        Step::FrameLost { .. } | Step::AckLost { .. } => line.red().to_string(),
        Step::FrameCorrupted { .. } | Step::ChecksumRejected { .. } => line.yellow().to_string(),
        Step::FrameDelivered { .. } | Step::AckReceived { .. } | Step::ChecksumDelivered { .. } => {
            line.green().to_string()
        }
        Step::Sending { .. } | Step::SendingChecksum { .. } => line.blue().to_string(),
    };
    println!("{} {line}", stamp.dimmed());
    // A blank line closes every attempt.
    if matches!(
        step,
        Step::AckReceived { .. }
            | Step::FrameLost { .. }
            | Step::FrameCorrupted { .. }
            | Step::AckLost { .. }
    ) {
        println!();
    }
}

pub fn print_crcs(crcs: &[CrcRemainder], limit: usize) {
    for (index, crc) in crcs.iter().take(limit).enumerate() {
        println!("Frame {index} CRC: {} ({:#06x})", crc.bright_blue(), crc.value());
    }
}

pub fn print_checksum(checksum: Checksum) {
    println!("Checksum (2's complement): {}", checksum.yellow());
}

pub fn print_summary(stats: &TransmissionStats) {
    println!(
        "--- Transmission complete: {} frames, {} attempts ({} lost, {} corrupted, {} ACKs lost) ---",
        stats.frames,
        stats.attempts().blue(),
        stats.frame_losses.red(),
        stats.frame_corruptions.yellow(),
        stats.ack_losses.red(),
    );
}
