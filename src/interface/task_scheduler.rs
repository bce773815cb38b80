use crate::model::error::Error;
use crate::model::schedule::Schedule;
use crate::model::tool_output::ToolOutput;
use async_trait::async_trait;
use std::path::Path;

/// The OS facility that owns the scheduled job. Each call is one blocking
/// invocation with no retry.
#[async_trait]
pub trait TaskScheduler {
    /// Creates or replaces `task_name` so it runs `script_path` per `schedule`.
    /// A rejected request is an error.
    async fn register(
        &self,
        task_name: &str,
        script_path: &Path,
        schedule: &Schedule,
    ) -> Result<ToolOutput, Error>;

    /// Deletes `task_name` without confirmation. A non-zero exit, such as the
    /// task already being gone, comes back as an unsuccessful output rather
    /// than an error; only a failure to run the tool is an error.
    async fn unregister(&self, task_name: &str) -> Result<ToolOutput, Error>;
}
