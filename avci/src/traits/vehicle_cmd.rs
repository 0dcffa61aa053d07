use auto_impl::auto_impl;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

/// Control-command representation: commanded linear velocity in m/s and
/// steering angle in degrees.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ControlCommand {
    pub linear_velocity: f64,
    pub steering_angle: f64,
}

/// Vehicle command message.
///
/// Downstream consumers read the commanded linear velocity from two places,
/// `ctrl_cmd.linear_velocity` and `twist_cmd.linear.x`. Both must carry the
/// same value.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct VehicleCmd {
    pub ctrl_cmd: ControlCommand,
    pub twist_cmd: Twist,
}

impl VehicleCmd {
    /// Creates a command carrying `linear_velocity` (m/s) in both velocity
    /// representations, with the given steering angle in degrees.
    ///
    /// # Example
    ///
    /// ```
    /// use assert_approx_eq::assert_approx_eq;
    /// use avci::VehicleCmd;
    ///
    /// let cmd = VehicleCmd::from_velocity(10.0, 15.0);
    /// assert_approx_eq!(cmd.ctrl_cmd.linear_velocity, 10.0);
    /// assert_approx_eq!(cmd.twist_cmd.linear.x, 10.0);
    /// assert_approx_eq!(cmd.ctrl_cmd.steering_angle, 15.0);
    /// ```
    pub fn from_velocity(linear_velocity: f64, steering_angle: f64) -> Self {
        Self {
            ctrl_cmd: ControlCommand {
                linear_velocity,
                steering_angle,
            },
            twist_cmd: Twist {
                linear: Vector3 {
                    x: linear_velocity,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }
}

#[auto_impl(Box, Arc)]
pub trait VehicleCmdSink: Send + Sync {
    fn send_vehicle_cmd(&self, cmd: &VehicleCmd) -> Result<(), Error>;
}
