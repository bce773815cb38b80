pub mod task_scheduler;
