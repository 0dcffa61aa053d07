use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::filter::EnvFilter;

const OVT_APPS_CONFIG_ENV_NAME: &str = "OVT_APPS_TOOL_CONFIG_PATH";

/// Get tool config from input or env OVT_APPS_TOOL_CONFIG_PATH
pub fn get_apps_tool_config(config: Option<PathBuf>) -> Option<PathBuf> {
    if config.is_some() {
        config
    } else {
        std::env::var(OVT_APPS_CONFIG_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {} is used ###", s);
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Do something needed to start the program
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
