use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crc_arq::config::SimulationConfig;
use crc_arq::engine::{StopAndWait, Timing};
use crc_arq::protocol::{CrcEngine, Encoded};
use crc_arq::transmission::real::SeededSource;
use crc_arq::util::file::map_input;
use crc_arq::util::human_size;
use crc_arq::util::timer::{InstantPacer, Pacer, TokioPacer};
use crc_arq::util::timer_logger::{print_checksum, print_crcs, print_step, print_summary};

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate Stop-and-Wait transmission of CRC-16 protected frames.", long_about = None)]
struct Args {
    /// The path to the file to transmit.
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Simulation config (TOML). Defaults to the per-user config file if present.
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed for the channel's random stream.
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many per-frame CRCs to print before the simulation.
    #[arg(long, value_name = "N")]
    report_frames: Option<usize>,

    /// Skip the pacing delays.
    #[arg(long)]
    no_delay: bool,

    /// Also append log records to this file.
    #[arg(long, value_name = "LOG_FILE")]
    log_file: Option<PathBuf>,

    /// More logging (-v: info, -vv: debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    crc_arq::util::log::init(level(args.verbose), args.log_file.as_deref())?;

    let mut config = SimulationConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(report_frames) = args.report_frames {
        config.report_frames = report_frames;
    }
    if args.no_delay {
        config.timing = Timing::NONE;
    }

    let input = map_input(&args.file)?;
    println!(
        "Read {} from {}.",
        human_size(input.len() as u64).yellow(),
        args.file.display()
    );

    let encoded = Encoded::new(&input, &CrcEngine::default());
    drop(input);

    println!("{} frames of 100 bits.", encoded.len().blue());
    print_crcs(&encoded.crcs, config.report_frames);
    print_checksum(encoded.checksum);

    let mut source = SeededSource::new(config.seed);
    if let Some(seed) = source.seed() {
        log::info!("channel seed {seed}");
    }

    let pacer: Box<dyn Pacer> = if args.no_delay {
        Box::new(InstantPacer::default())
    } else {
        Box::new(TokioPacer)
    };

    println!("\n--- Transmission started (Stop-and-Wait) ---\n");
    let stats = StopAndWait::new(&encoded, config.channel)
        .with_timing(config.timing)
        .run(&mut source, pacer.as_ref(), print_step)
        .await;
    print_summary(&stats);

    Ok(())
}
