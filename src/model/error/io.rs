use macros::traceable;
use std::path::PathBuf;

traceable! {
    IOError {
        #[error("Failed to delete backup script {path}: {err}")]
        DeleteScriptFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to save backup script {path}: {err}")]
        WriteScriptFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to check for backup script {path}: {err}")]
        ProbeScriptFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to create directory {path}: {err}")]
        CreateDirectoryFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to read directory {path}: {err}")]
        ReadDirectoryFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to get file metadata {path}: {err}")]
        GetMetadataFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to read from the console: {err}")]
        ReadInputFailed => tracing::Level::ERROR,

        #[error("Failed to write to the console: {err}")]
        WriteOutputFailed => tracing::Level::ERROR,

        #[no_source]
        #[error("Input closed before setup finished")]
        InputClosed => tracing::Level::ERROR,
    }
}
