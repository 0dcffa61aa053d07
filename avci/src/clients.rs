mod dummy_vehicle_cmd_sink;

pub use dummy_vehicle_cmd_sink::*;
