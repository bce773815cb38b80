use macros::traceable;
use std::path::PathBuf;

traceable! {
    SystemError {
        #[error("Unable to locate the running executable: {err}")]
        CurrentExeNotFound => tracing::Level::ERROR,

        #[error("Failed to read configuration {path}: {err}")]
        ConfigReadFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Invalid configuration {path}: {err}")]
        InvalidConfig { path: PathBuf } => tracing::Level::ERROR,

        #[no_source]
        #[error("Invalid configuration value for {field}: {reason}")]
        InvalidConfigValue { field: String, reason: String } => tracing::Level::ERROR,

        #[error("Unable to resolve the shared application data folder: {err}")]
        ResolveProgramDataFailed => tracing::Level::ERROR,

        #[error("Unable to run as administrator: {err}")]
        RunAsAdminFailed => tracing::Level::ERROR,

        #[error("Unable to read the exit code of the elevated process: {err}")]
        RelaunchStatusFailed => tracing::Level::ERROR,

        #[no_source]
        #[error("Failed to free object")]
        ObjectFreeFailed => tracing::Level::ERROR,

        #[error("Failed to initialize logging: {err}")]
        LoggingInitFailed => tracing::Level::ERROR,
    }
}
