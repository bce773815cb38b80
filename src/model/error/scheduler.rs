use macros::traceable;

traceable! {
    SchedulerError {
        #[error("Failed to launch {tool}: {err}")]
        LaunchFailed { tool: String } => tracing::Level::ERROR,

        #[no_source]
        #[error("{tool} could not {action} the scheduled task ({status}): {output}")]
        Rejected { tool: String, action: String, status: String, output: String } => tracing::Level::ERROR,
    }
}
