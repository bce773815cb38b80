use crate::model::config::{Config, ConfigTable};
use crate::model::error::Error;
use crate::model::error::system::SystemError;
use crate::model::log::system::SystemLog;
use crate::platform::known_folder;
use macros::log;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::{env, fs};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SCRIPT_FILE_NAME: &str = "BackupScript.ps1";

// Would break the quoting of the scheduler command line or the archive filter.
const FORBIDDEN_IN_NAMES: [char; 1] = ['"'];
const FORBIDDEN_IN_PREFIX: [char; 9] = ['"', '*', '?', '/', '\\', ':', '<', '>', '|'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    config: Config,
    script_path: PathBuf,
    log_directory: PathBuf,
    origin: ConfigOrigin,
}

impl AppConfig {
    /// Reads `config.toml` beside the executable. The elevated relaunch starts
    /// in a different working directory, so the executable's directory is the
    /// only stable anchor.
    pub fn load() -> Result<Self, Error> {
        let exe = env::current_exe().map_err(SystemError::CurrentExeNotFound)?;
        let base = exe.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::load_from(&base)
    }

    pub fn load_from(base: &Path) -> Result<Self, Error> {
        let path = base.join(CONFIG_FILE_NAME);
        let (config, origin) = match fs::read_to_string(&path) {
            Ok(toml_string) => {
                let config = toml::from_str::<ConfigTable>(&toml_string)
                    .map_err(|err| SystemError::InvalidConfig(&path, err))?
                    .config;
                (config, ConfigOrigin::File(path))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                (Config::default(), ConfigOrigin::Defaults(path))
            }
            Err(err) => Err(SystemError::ConfigReadFailed(&path, err))?,
        };
        Self::from_config(config, base, origin)
    }

    pub fn from_config(config: Config, base: &Path, origin: ConfigOrigin) -> Result<Self, Error> {
        Self::validate(&config)?;

        let script_path = match &config.script_path {
            Some(path) => base.join(path),
            None => known_folder::program_data()?.join(SCRIPT_FILE_NAME),
        };
        Self::validate_text("script_path", &script_path.to_string_lossy(), &FORBIDDEN_IN_NAMES)?;
        let log_directory = base.join(&config.log_directory);

        Ok(Self {
            config,
            script_path,
            log_directory,
            origin,
        })
    }

    /// Called once logging is up, since logging itself depends on the config.
    pub fn log_origin(&self) {
        match &self.origin {
            ConfigOrigin::File(path) => log!(SystemLog::ConfigLoaded { path: path.clone() }),
            ConfigOrigin::Defaults(path) => log!(SystemLog::ConfigDefaulted { path: path.clone() }),
        }
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    pub fn log_directory(&self) -> &Path {
        &self.log_directory
    }

    fn validate(config: &Config) -> Result<(), SystemError> {
        Self::validate_text("task_name", &config.task_name, &FORBIDDEN_IN_NAMES)?;
        Self::validate_text("interpreter", &config.interpreter, &FORBIDDEN_IN_NAMES)?;
        Self::validate_text("scheduler", &config.scheduler, &FORBIDDEN_IN_NAMES)?;
        Self::validate_text("archive_prefix", &config.archive_prefix, &FORBIDDEN_IN_PREFIX)?;
        Ok(())
    }

    fn validate_text(field: &str, value: &str, forbidden: &[char]) -> Result<(), SystemError> {
        if value.trim().is_empty() {
            return Err(SystemError::InvalidConfigValue(field, "must not be empty"));
        }
        if let Some(ch) = value
            .chars()
            .find(|ch| forbidden.contains(ch) || ch.is_control())
        {
            return Err(SystemError::InvalidConfigValue(
                field,
                format!("must not contain {ch:?}"),
            ));
        }
        Ok(())
    }
}

impl Deref for AppConfig {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
