use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct ConfigTable {
    #[serde(rename = "Config")]
    pub config: Config,
}

/// Identity of the installed job plus the tools used to install it.
/// Every field is optional in `config.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub task_name: String,
    /// Defaults to `BackupScript.ps1` in the shared application data folder.
    pub script_path: Option<PathBuf>,
    pub interpreter: String,
    pub scheduler: String,
    pub archive_prefix: String,
    /// Relative paths resolve against the executable's directory.
    pub log_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task_name: "DirectoryBackupTask".to_string(),
            script_path: None,
            interpreter: "powershell.exe".to_string(),
            scheduler: "schtasks.exe".to_string(),
            archive_prefix: "Backup_".to_string(),
            log_directory: PathBuf::from("logs"),
        }
    }
}
