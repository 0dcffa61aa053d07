use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};

use auto_impl::auto_impl;
use parking_lot::Mutex;
use tracing::info;

use crate::error::Error;

/// Backend that does the actual waypoint recording.
///
/// Recording is performed by an external system; implementations only
/// forward the start and finish requests.
#[auto_impl(Box, Arc)]
pub trait WaypointSaver: Send + Sync {
    fn start_record(&self, path: &Path) -> Result<(), Error>;
    fn finish_record(&self) -> Result<(), Error>;
}

/// A [`WaypointSaver`] that runs configured local commands.
///
/// The save path is appended to the start command's arguments. A command
/// exiting with a non-success status is an error.
#[derive(Debug, Clone)]
pub struct LocalCommandWaypointSaver {
    start_command: Vec<String>,
    finish_command: Vec<String>,
}

impl LocalCommandWaypointSaver {
    pub fn new(start_command: Vec<String>, finish_command: Vec<String>) -> Self {
        Self {
            start_command,
            finish_command,
        }
    }

    fn run(command: &[String], extra_arg: Option<&Path>) -> Result<(), Error> {
        let (program, args) = command.split_first().ok_or_else(|| {
            Error::SaverCommand(
                String::new(),
                io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
            )
        })?;
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(path) = extra_arg {
            cmd.arg(path);
        }
        let status = cmd
            .status()
            .map_err(|e| Error::SaverCommand(program.clone(), e))?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::SaverCommand(
                program.clone(),
                io::Error::new(io::ErrorKind::Other, format!("exited with {status}")),
            ))
        }
    }
}

impl WaypointSaver for LocalCommandWaypointSaver {
    fn start_record(&self, path: &Path) -> Result<(), Error> {
        info!("starting waypoint record to {:?}", path);
        Self::run(&self.start_command, Some(path))
    }

    fn finish_record(&self) -> Result<(), Error> {
        info!("finishing waypoint record");
        Self::run(&self.finish_command, None)
    }
}

/// Dummy WaypointSaver for debug or tests.
#[derive(Debug, Default)]
pub struct DummyWaypointSaver {
    pub recording_path: Mutex<Option<PathBuf>>,
}

impl DummyWaypointSaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.recording_path.lock().clone()
    }
}

impl WaypointSaver for DummyWaypointSaver {
    fn start_record(&self, path: &Path) -> Result<(), Error> {
        self.recording_path.lock().replace(path.to_owned());
        Ok(())
    }

    fn finish_record(&self) -> Result<(), Error> {
        self.recording_path.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_saver() {
        let saver = DummyWaypointSaver::new();
        assert!(saver.current_path().is_none());
        saver.start_record(Path::new("/tmp/a.csv")).unwrap();
        assert_eq!(saver.current_path().unwrap(), Path::new("/tmp/a.csv"));
        saver.finish_record().unwrap();
        assert!(saver.current_path().is_none());
    }

    #[test]
    fn test_local_command_saver() {
        let saver = LocalCommandWaypointSaver::new(
            vec!["true".to_owned()],
            vec!["false".to_owned()],
        );
        saver.start_record(Path::new("/tmp/a.csv")).unwrap();
        assert!(matches!(
            saver.finish_record(),
            Err(Error::SaverCommand(..))
        ));
    }

    #[test]
    fn test_empty_command_is_an_error() {
        let saver = LocalCommandWaypointSaver::new(vec![], vec![]);
        assert!(saver.start_record(Path::new("/tmp/a.csv")).is_err());
    }
}
