mod vehicle_cmd;

pub use vehicle_cmd::*;
