use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::info;

use crate::{error::Error, saver::WaypointSaver};

/// Start/stop orchestration for waypoint recording.
///
/// Refuses to overwrite an existing save file, and keeps the recording state
/// so that start and finish always alternate.
#[derive(Debug)]
pub struct RecordingController<S>
where
    S: WaypointSaver,
{
    saver: S,
    recording_path: Mutex<Option<PathBuf>>,
}

impl<S> RecordingController<S>
where
    S: WaypointSaver,
{
    pub fn new(saver: S) -> Self {
        Self {
            saver,
            recording_path: Mutex::new(None),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording_path.lock().is_some()
    }

    pub fn start_record(&self, save_path: impl AsRef<Path>) -> Result<(), Error> {
        let save_path = save_path.as_ref();
        let mut recording_path = self.recording_path.lock();
        if recording_path.is_some() {
            return Err(Error::AlreadyRecording);
        }
        if save_path.exists() {
            return Err(Error::SaveFileExists(save_path.to_owned()));
        }
        self.saver.start_record(save_path)?;
        *recording_path = Some(save_path.to_owned());
        info!("waypoint recording started ({:?})", save_path);
        Ok(())
    }

    pub fn finish_record(&self) -> Result<(), Error> {
        let mut recording_path = self.recording_path.lock();
        if recording_path.is_none() {
            return Err(Error::NotRecording);
        }
        self.saver.finish_record()?;
        info!("waypoint recording finished ({:?})", recording_path.take());
        Ok(())
    }
}
