use crate::model::error::Error;
use crate::model::error::io::IOError;
use crate::model::error::system::SystemError;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "DirectoryBackup";
const DEFAULT_FILTER: &str = "info";

pub struct Logging;

impl Logging {
    /// Routes `tracing` events (and panics) to a daily file under `directory`.
    /// The console stays free for the setup dialogue. Keep the guard alive
    /// until exit or buffered lines are lost.
    pub fn initialize(directory: &Path) -> Result<WorkerGuard, Error> {
        fs::create_dir_all(directory)
            .map_err(|err| IOError::CreateDirectoryFailed(directory, err))?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix("log")
            .build(directory)
            .map_err(SystemError::LoggingInitFailed)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .try_init()
            .map_err(SystemError::LoggingInitFailed)?;

        log_panics::init();
        Ok(guard)
    }
}
