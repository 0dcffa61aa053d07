use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use avci::VehicleCmdSink;
use avci_web::{WebVehicleCmdSink, WebVehicleCmdSinkConfig};
use fs_err as fs;
use ovt_recorder::{DummyWaypointSaver, LocalCommandWaypointSaver, WaypointSaver};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(tag = "type", content = "args")]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub enum VehicleCmdSinkConfig {
    Dummy,
    Web { config: WebVehicleCmdSinkConfig },
}

impl Default for VehicleCmdSinkConfig {
    fn default() -> Self {
        VehicleCmdSinkConfig::Dummy
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RecorderConfig {
    #[serde(default = "default_lock_path")]
    pub lock_path: PathBuf,
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
    /// Local command starting the external waypoint saver. The save path is
    /// appended as the last argument.
    #[serde(default)]
    pub start_command: Vec<String>,
    /// Local command finishing the external waypoint saver.
    #[serde(default)]
    pub finish_command: Vec<String>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            lock_path: default_lock_path(),
            settings_path: default_settings_path(),
            start_command: vec![],
            finish_command: vec![],
        }
    }
}

fn default_lock_path() -> PathBuf {
    PathBuf::from("/tmp/ovt_waypoint_recorder.lock")
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("ovt_waypoint_recorder.toml")
}

fn default_send_period_secs() -> f64 {
    ovt_manual_control::DEFAULT_SEND_PERIOD.as_secs_f64()
}

// TOML format has a restriction that if a table itself contains tables,
// all keys with non-table values must be emitted first.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Period between two command sends, in seconds.
    #[serde(default = "default_send_period_secs")]
    pub send_period_secs: f64,
    #[serde(default)]
    pub vehicle_cmd_sink: VehicleCmdSinkConfig,
    #[serde(default)]
    pub recorder: RecorderConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            send_period_secs: default_send_period_secs(),
            vehicle_cmd_sink: VehicleCmdSinkConfig::default(),
            recorder: RecorderConfig::default(),
        }
    }
}

impl ToolConfig {
    pub fn try_new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|e| Error::NoFile(path.to_owned(), e))?;
        Self::from_str(&s, path)
    }

    pub fn from_str(s: &str, path: impl Into<PathBuf>) -> Result<Self, Error> {
        let config: ToolConfig =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.into(), e))?;
        debug!("loaded config {:?}", config);
        Ok(config)
    }

    pub fn send_period(&self) -> Duration {
        Duration::from_secs_f64(self.send_period_secs)
    }

    pub fn create_vehicle_cmd_sink(&self) -> Result<Box<dyn VehicleCmdSink>, Error> {
        Ok(match &self.vehicle_cmd_sink {
            VehicleCmdSinkConfig::Dummy => Box::new(avci::DummyVehicleCmdSink::new()),
            VehicleCmdSinkConfig::Web { config } => {
                Box::new(WebVehicleCmdSink::try_new(&config.url)?)
            }
        })
    }

    pub fn create_waypoint_saver(&self) -> Box<dyn WaypointSaver> {
        if self.recorder.start_command.is_empty() && self.recorder.finish_command.is_empty() {
            Box::new(DummyWaypointSaver::new())
        } else {
            Box::new(LocalCommandWaypointSaver::new(
                self.recorder.start_command.clone(),
                self.recorder.finish_command.clone(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ToolConfig::from_str("", "empty.toml").unwrap();
        assert!(matches!(
            config.vehicle_cmd_sink,
            VehicleCmdSinkConfig::Dummy
        ));
        assert_eq!(config.send_period(), Duration::from_millis(100));
        assert_eq!(
            config.recorder.lock_path,
            PathBuf::from("/tmp/ovt_waypoint_recorder.lock")
        );
    }

    #[test]
    fn test_web_sink_config() {
        let s = r#"
            send_period_secs = 0.05

            [vehicle_cmd_sink]
            type = "Web"

            [vehicle_cmd_sink.args.config]
            url = "http://127.0.0.1:7777"
        "#;
        let config = ToolConfig::from_str(s, "web.toml").unwrap();
        assert_eq!(config.send_period(), Duration::from_millis(50));
        match &config.vehicle_cmd_sink {
            VehicleCmdSinkConfig::Web { config } => {
                assert_eq!(config.url, "http://127.0.0.1:7777");
            }
            other => panic!("unexpected sink config {other:?}"),
        }
        config.create_vehicle_cmd_sink().unwrap();
    }

    #[test]
    fn test_unknown_field_is_refused() {
        assert!(matches!(
            ToolConfig::from_str("unknown_field = 1", "broken.toml"),
            Err(Error::TomlParseFailure(..))
        ));
    }
}
