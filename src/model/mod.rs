pub mod archive;
pub mod backup_job;
pub mod config;
pub mod error;
pub mod log;
pub mod schedule;
pub mod setup_state;
pub mod tool_output;
