use avci::{VehicleCmd, VehicleCmdSink};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::utils::*;

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WebVehicleCmdSinkConfig {
    pub url: String,
}

/// A [`VehicleCmdSink`] that POSTs each command as JSON to
/// `<base_url>/send_vehicle_cmd`.
#[derive(Debug, Clone)]
pub struct WebVehicleCmdSink {
    base_url: Url,
}

impl WebVehicleCmdSink {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn try_new(url: &str) -> Result<Self, avci::Error> {
        let base_url = Url::parse(url).map_err(|e| avci::Error::Connection {
            message: format!("url:{}: {}", url, e),
        })?;
        Ok(Self::new(base_url))
    }
}

impl VehicleCmdSink for WebVehicleCmdSink {
    fn send_vehicle_cmd(&self, cmd: &VehicleCmd) -> Result<(), avci::Error> {
        debug!("sending {cmd:?} to {}", self.base_url);
        let result: RpcResult = post(self.base_url.join("send_vehicle_cmd").unwrap(), cmd)?;
        if result.is_ok {
            Ok(())
        } else {
            Err(avci::Error::Connection {
                message: result.reason,
            })
        }
    }
}
