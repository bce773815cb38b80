pub mod scheduler;
pub mod setup;
pub mod system;
