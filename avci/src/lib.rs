mod clients;
mod error;
mod traits;

pub use clients::*;
pub use error::*;
pub use traits::*;
