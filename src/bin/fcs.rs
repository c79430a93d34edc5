use clap::Parser;
use std::path::PathBuf;

use crc_arq::constants::DEFAULT_REPORT_FRAMES;
use crc_arq::protocol::{CrcEngine, Encoded};
use crc_arq::util::file::map_input;
use crc_arq::util::report::FcsReport;
use crc_arq::util::timer_logger::{print_checksum, print_crcs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute per-frame CRC-16 values and the closing checksum of a file.", long_about = None)]
struct Args {
    /// The path to the file to read.
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// How many per-frame CRCs to print.
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_REPORT_FRAMES)]
    report_frames: usize,

    /// Print every frame as a TOML report instead.
    #[arg(long)]
    toml: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let input = map_input(&args.file)?;
    let encoded = Encoded::new(&input, &CrcEngine::default());

    if args.toml {
        let file_name = args
            .file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let report = FcsReport::new(file_name, input.len() as u64, &encoded);
        println!("{}", toml::to_string_pretty(&report)?);
        return Ok(());
    }

    print_crcs(&encoded.crcs, args.report_frames);
    print_checksum(encoded.checksum);

    Ok(())
}
