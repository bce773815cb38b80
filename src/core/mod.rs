pub mod app_config;
pub mod retention;
pub mod script_generator;
pub mod setup;
pub mod system;
pub mod task_scheduler;
