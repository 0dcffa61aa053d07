use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("ovt-apps: No SavePath is specified.")]
    NoSavePath,
    #[error("ovt-apps: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("ovt-apps: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("ovt-apps: avci: {:?}", .0)]
    Avci(#[from] avci::Error),
    #[error("ovt-apps: ovt-recorder: {:?}", .0)]
    Recorder(#[from] ovt_recorder::Error),
}
