mod sink;
mod utils;

pub use sink::*;
