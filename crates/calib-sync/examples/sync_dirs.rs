use std::{env, fs, path::PathBuf, str::FromStr};

use log::{info, warn, LevelFilter};
use serde::{Deserialize, Serialize};

use calib_sync::core::init_with_level;
use calib_sync::{sync_from_dirs, AlignedFrame, SyncConfig};

#[derive(Debug, Deserialize)]
struct ExampleConfig {
    data_dirs: Vec<PathBuf>,
    #[serde(default)]
    output_path: Option<String>,
    #[serde(default)]
    sync: Option<SyncConfig>,
}

#[derive(Debug, Serialize)]
struct ExampleReport {
    config_path: String,
    num_cameras: usize,
    num_frames: usize,
    timestamps: Vec<u64>,
    frames: Vec<AlignedFrame>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_level = LevelFilter::from_str("info").unwrap_or(LevelFilter::Info);
    init_with_level(log_level)?;

    let config_path = parse_config_path();
    let cfg = load_config(&config_path)?;
    let sync_cfg = cfg.sync.unwrap_or_default();

    let frames: Vec<AlignedFrame> = sync_from_dirs(&cfg.data_dirs, &sync_cfg)?;
    info!(
        "{} cameras -> {} synchronized frames",
        cfg.data_dirs.len(),
        frames.len()
    );
    if frames.is_empty() {
        warn!("no overlapping timestamps with common markers");
    }

    let report = ExampleReport {
        config_path: config_path.to_string_lossy().into_owned(),
        num_cameras: cfg.data_dirs.len(),
        num_frames: frames.len(),
        timestamps: frames.iter().map(|f| f.timestamp).collect(),
        frames,
    };
    write_report(cfg.output_path.as_deref(), report)
}

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/sync_dirs_config.json"))
}

fn load_config(path: &PathBuf) -> Result<ExampleConfig, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_report(
    path: Option<&str>,
    report: ExampleReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let out_path = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tmpdata/sync_dirs_report.json"));
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&out_path, json)?;
    println!("wrote report JSON to {}", out_path.display());
    Ok(())
}
