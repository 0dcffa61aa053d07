use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("avci: Connection error : {}", message)]
    Connection { message: String },
    #[error("avci: Uninitialized : {}", message)]
    Uninitialized { message: String },
    #[error("avci: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}
