//! Command-line front end: align camera record directories and write the
//! synchronized frames as JSON.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use log::{info, LevelFilter};

use calib_sync::core::init_with_level;
use calib_sync::{sync_from_dirs, AlignedFrame, SyncConfig};

#[derive(Parser, Debug)]
#[command(name = "calib-sync", about = "Synchronize multi-camera calibration records")]
struct Args {
    /// Record directories, one per camera, in camera-index order.
    #[arg(required = true, num_args = 2..)]
    data_dirs: Vec<PathBuf>,

    /// Optional JSON config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path for the aligned frames (JSON).
    #[arg(long, default_value = "aligned_frames.json")]
    output: PathBuf,

    /// Keep frames whose common marker set is empty.
    #[arg(long)]
    keep_empty: bool,

    /// Also load records flagged as not detected.
    #[arg(long)]
    all_records: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = LevelFilter::from_str(&args.log_level).unwrap_or(LevelFilter::Info);
    init_with_level(level)?;

    let mut config = match &args.config {
        Some(path) => SyncConfig::load_json(path)?,
        None => SyncConfig::default(),
    };
    if args.keep_empty {
        config.keep_empty_intersections = true;
    }
    if args.all_records {
        config.detected_only = false;
    }

    let frames: Vec<AlignedFrame> = sync_from_dirs(&args.data_dirs, &config)?;
    info!(
        "{} cameras -> {} synchronized frames",
        args.data_dirs.len(),
        frames.len()
    );

    if let Some(parent) = args.output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.output, serde_json::to_string_pretty(&frames)?)?;
    println!("wrote {} frames to {}", frames.len(), args.output.display());
    Ok(())
}
