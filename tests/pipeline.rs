use std::io::Write;

use crc_arq::engine::{Step, StopAndWait, Timing};
use crc_arq::protocol::{Checksum, ChecksumAccumulator, CrcEngine, Encoded, frame_count};
use crc_arq::transmission::ChannelProfile;
use crc_arq::transmission::mock::ScriptedSource;
use crc_arq::transmission::real::SeededSource;
use crc_arq::util::file::map_input;
use crc_arq::util::timer::InstantPacer;
use tempfile::NamedTempFile;

const UDHR_ARTICLE_1: &[u8] = b"All human beings are born free and equal in dignity and rights. \
They are endowed with reason and conscience and should act towards one another \
in a spirit of brotherhood.";

fn write_input(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn perfect_channel_delivers_in_n_plus_one_attempts() -> anyhow::Result<()> {
    let file = write_input(UDHR_ARTICLE_1);
    let input = map_input(file.path())?;
    let encoded = Encoded::new(&input, &CrcEngine::default());
    assert_eq!(encoded.len(), frame_count(UDHR_ARTICLE_1.len()));

    let mut accumulator = ChecksumAccumulator::default();
    accumulator.extend(encoded.crcs.iter().copied());
    assert_eq!(accumulator.finish(), encoded.checksum);

    let pacer = InstantPacer::default();
    let mut steps = vec![];
    let stats = StopAndWait::new(&encoded, ChannelProfile::PERFECT)
        .with_timing(Timing::NONE)
        .run(&mut SeededSource::from_seed(2024), &pacer, |step| {
            steps.push(step.clone())
        })
        .await;

    assert_eq!(stats.attempts(), encoded.len() + 1);
    assert_eq!(stats.retransmissions(), 0);
    assert_eq!(stats.checksum_accepted, Some(true));
    assert!(steps.iter().all(|step| !step.is_fault()));
    assert_eq!(pacer.waited(), std::time::Duration::ZERO);
    Ok(())
}

#[tokio::test]
async fn same_seed_same_trace() {
    let encoded = Encoded::new(UDHR_ARTICLE_1, &CrcEngine::default());

    let mut traces = vec![];
    for _ in 0..2 {
        let mut steps = vec![];
        let stats = StopAndWait::new(&encoded, ChannelProfile::default())
            .run(
                &mut SeededSource::from_seed(99),
                &InstantPacer::default(),
                |step| steps.push(step.clone()),
            )
            .await;
        traces.push((steps, stats));
    }

    assert_eq!(traces[0], traces[1]);
}

#[tokio::test]
async fn scripted_faults_hold_the_frame_index() {
    let encoded = Encoded::new(&[0xFF; 10], &CrcEngine::default());
    assert_eq!(encoded.len(), 1);

    // lost, corrupted, delivered with ACK lost, delivered with ACK, checksum corrupted
    let mut source = ScriptedSource::new([0.01, 0.25, 0.95, 0.05, 0.95, 0.95, 0.0]);
    let mut steps = vec![];
    let stats = StopAndWait::new(&encoded, ChannelProfile::default())
        .run(&mut source, &InstantPacer::default(), |step| {
            steps.push(step.clone())
        })
        .await;

    let sends: Vec<_> = steps
        .iter()
        .filter_map(|step| match step {
            Step::Sending { index, attempt } => Some((*index, *attempt)),
            _ => None,
        })
        .collect();
    assert_eq!(sends, [(0, 1), (0, 2), (0, 3), (0, 4)]);
    assert_eq!(stats.checksum_accepted, Some(false));
    assert!(matches!(
        steps.last(),
        Some(Step::ChecksumRejected { checksum }) if *checksum == encoded.checksum
    ));
    assert_ne!(encoded.checksum, Checksum(0));
}
