use macros::loggable;
use std::path::PathBuf;

loggable! {
    SetupLog {
        #[error("Setup entered state {state}")]
        StateEntered { state: String } => tracing::Level::DEBUG,

        #[error("Found existing backup script at {path}")]
        ExistingScriptFound { path: PathBuf } => tracing::Level::INFO,

        #[error("Existing backup script retained")]
        ExistingScriptRetained => tracing::Level::INFO,

        #[error("Deleted backup script {path}")]
        ScriptDeleted { path: PathBuf } => tracing::Level::INFO,

        #[error("Unregistered scheduled task {task}")]
        TaskUnregistered { task: String } => tracing::Level::INFO,

        #[error("Scheduler reported {status} while unregistering {task}")]
        UnregisterNotConfirmed { task: String, status: String } => tracing::Level::WARN,

        #[error("Collected {kind} backup job ({schedule}), keeping {max_backups} archives")]
        JobCollected { kind: String, schedule: String, max_backups: u32 } => tracing::Level::INFO,

        #[error("Destination holds {existing} archives, next run prunes {pruned}")]
        RetentionPreview { existing: usize, pruned: usize } => tracing::Level::INFO,

        #[error("Skipped retention preview for {path}")]
        RetentionPreviewSkipped { path: PathBuf } => tracing::Level::WARN,

        #[error("Saved backup script to {path}")]
        ScriptWritten { path: PathBuf } => tracing::Level::INFO,

        #[error("Registered scheduled task {task}")]
        TaskRegistered { task: String } => tracing::Level::INFO,
    }
}
