use crate::model::schedule::Schedule;
use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupJobConfig {
    pub source_directory: PathBuf,
    pub destination_directory: PathBuf,
    pub max_backups: NonZeroU32,
    pub schedule: Schedule,
}
