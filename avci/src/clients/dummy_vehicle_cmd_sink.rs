use std::sync::Mutex;

use crate::error::Error;
use crate::traits::{VehicleCmd, VehicleCmdSink};

/// Dummy VehicleCmdSink for debug or tests.
///
/// Records every command it is given.
#[derive(Debug, Default)]
pub struct DummyVehicleCmdSink {
    pub commands: Mutex<Vec<VehicleCmd>>,
}

impl DummyVehicleCmdSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_commands(&self) -> Vec<VehicleCmd> {
        self.commands.lock().unwrap().clone()
    }

    pub fn last_command(&self) -> Option<VehicleCmd> {
        self.commands.lock().unwrap().last().copied()
    }
}

impl VehicleCmdSink for DummyVehicleCmdSink {
    fn send_vehicle_cmd(&self, cmd: &VehicleCmd) -> Result<(), Error> {
        self.commands.lock().unwrap().push(*cmd);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_send() {
        let sink = DummyVehicleCmdSink::new();

        assert!(sink.last_command().is_none());
        sink.send_vehicle_cmd(&VehicleCmd::from_velocity(1.5, -2.0))
            .unwrap();
        sink.send_vehicle_cmd(&VehicleCmd::from_velocity(0.5, 3.0))
            .unwrap();

        let commands = sink.sent_commands();
        assert_eq!(commands.len(), 2);
        assert_approx_eq!(commands[0].ctrl_cmd.linear_velocity, 1.5);
        assert_approx_eq!(commands[0].twist_cmd.linear.x, 1.5);
        assert_approx_eq!(commands[0].ctrl_cmd.steering_angle, -2.0);

        let last = sink.last_command().unwrap();
        assert_approx_eq!(last.ctrl_cmd.linear_velocity, 0.5);
        assert_approx_eq!(last.twist_cmd.linear.x, 0.5);
        assert_approx_eq!(last.ctrl_cmd.steering_angle, 3.0);
    }
}
