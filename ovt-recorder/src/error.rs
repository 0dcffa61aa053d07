use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(
        "ovt-recorder: Another instance holds the lock file {:?}. If no other instance is running, delete it.",
        .0
    )]
    LockHeld(PathBuf),
    #[error("ovt-recorder: Failed to access {:?} ({})", .0, .1)]
    Io(PathBuf, #[source] io::Error),
    #[error("ovt-recorder: Failed to parse {:?} as toml ({})", .0, .1)]
    SettingsParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("ovt-recorder: Failed to serialize settings ({})", .0)]
    SettingsSerializeFailure(#[source] toml::ser::Error),
    #[error("ovt-recorder: Save file {:?} already exists. Choose another name.", .0)]
    SaveFileExists(PathBuf),
    #[error("ovt-recorder: Waypoint recording is already running.")]
    AlreadyRecording,
    #[error("ovt-recorder: Waypoint recording is not running.")]
    NotRecording,
    #[error("ovt-recorder: Saver command {:?} failed ({})", .0, .1)]
    SaverCommand(String, #[source] io::Error),
}
