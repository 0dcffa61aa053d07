use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ovt_apps::{utils::init_tracing, Error, ToolConfig};
use ovt_recorder::{InstanceLock, RecorderSettings, RecordingController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

/// An open vehicle tool to record driven waypoints to a file.
#[derive(Parser, Debug)]
#[command(name = env!("CARGO_BIN_NAME"))]
struct WaypointRecorderArgs {
    /// Path to the setting file.
    #[arg(short, long)]
    config_path: Option<PathBuf>,
    /// File to record waypoints into. Falls back to the path used by the
    /// previous run.
    #[arg(short, long)]
    save_path: Option<PathBuf>,
    /// Prints the default setting as TOML.
    #[arg(long)]
    show_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = WaypointRecorderArgs::parse();
    info!("ParsedArgs {:?}", args);

    if args.show_default_config {
        print!("{}", toml::to_string(&ToolConfig::default()).unwrap());
        return Ok(());
    }

    let config_path = ovt_apps::utils::get_apps_tool_config(args.config_path);
    let config = match config_path {
        Some(path) => ToolConfig::try_new(path)?,
        None => ToolConfig::default(),
    };

    let lock = InstanceLock::try_acquire(&config.recorder.lock_path)?;

    let settings_path = &config.recorder.settings_path;
    let mut settings = RecorderSettings::load(settings_path)?;
    let save_path = args
        .save_path
        .or_else(|| settings.save_path.clone())
        .ok_or(Error::NoSavePath)?;

    let controller = RecordingController::new(config.create_waypoint_saver());
    controller.start_record(&save_path)?;
    println!(
        "Recording waypoints to {}. Press Enter to stop.",
        save_path.display()
    );

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    controller.finish_record()?;

    settings.save_path = Some(save_path);
    if let Err(e) = settings.save(settings_path) {
        error!("failed to save settings: {e}");
    }
    lock.release()?;
    Ok(())
}
