use macros::loggable;

loggable! {
    SchedulerLog {
        #[error("Launching {tool} to {action} task {task}")]
        Launching { tool: String, action: String, task: String } => tracing::Level::INFO,

        #[error("{tool} exited with {status}")]
        Exited { tool: String, status: String } => tracing::Level::DEBUG,
    }
}
