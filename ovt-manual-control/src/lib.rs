mod manual_command_sender;

pub use manual_command_sender::*;
