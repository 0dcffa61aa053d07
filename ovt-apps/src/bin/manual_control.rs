use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use ovt_apps::{utils::init_tracing, ToolConfig};
use ovt_manual_control::ManualCommandSender;
use tracing::info;

/// An open vehicle tool to send a manual velocity command at a fixed rate.
#[derive(Parser, Debug)]
#[command(name = env!("CARGO_BIN_NAME"))]
struct ManualControlArgs {
    /// Path to the setting file.
    #[arg(short, long)]
    config_path: Option<PathBuf>,
    /// Commanded linear velocity in km/h.
    #[arg(long, default_value_t = 0.0)]
    velocity: f64,
    /// Commanded steering angle in degrees.
    #[arg(long, default_value_t = 0.0)]
    steering_angle: f64,
    /// How long to keep sending the command, in seconds.
    #[arg(long, default_value_t = 3.0)]
    duration: f64,
    /// Prints the default setting as TOML.
    #[arg(long)]
    show_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = ManualControlArgs::parse();
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
    let sink = config.create_vehicle_cmd_sink()?;

    let sender = ManualCommandSender::new(sink, config.send_period());
    sender.set_velocity(args.velocity, args.steering_angle);
    sender.start();
    info!(
        "sending velocity {} km/h, steering angle {} deg for {} s",
        args.velocity, args.steering_angle, args.duration
    );
    tokio::time::sleep(Duration::from_secs_f64(args.duration)).await;
    sender.stop_now()?;
    Ok(())
}
