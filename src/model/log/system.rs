use macros::loggable;
use std::path::PathBuf;

loggable! {
    SystemLog {
        #[error("Rerun the program as administrator")]
        ReRunAsAdmin => tracing::Level::WARN,

        #[error("Elevated process exited with code {code}")]
        RelaunchFinished { code: u8 } => tracing::Level::INFO,

        #[error("Initializing")]
        Initializing => tracing::Level::INFO,

        #[error("Initialization completed")]
        InitializeComplete => tracing::Level::INFO,

        #[error("Loaded configuration from {path}")]
        ConfigLoaded { path: PathBuf } => tracing::Level::INFO,

        #[error("No configuration at {path}, using defaults")]
        ConfigDefaulted { path: PathBuf } => tracing::Level::INFO,

        #[error("Termination in process")]
        Terminating => tracing::Level::INFO,

        #[error("Termination completed")]
        TerminateComplete => tracing::Level::INFO,
    }
}
