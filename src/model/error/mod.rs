pub mod input;
pub mod io;
pub mod scheduler;
pub mod system;

use crate::model::error::input::InputError;
use crate::model::error::io::IOError;
use crate::model::error::scheduler::SchedulerError;
use crate::model::error::system::SystemError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(InputError),
    #[error(transparent)]
    IO(IOError),
    #[error(transparent)]
    Scheduler(SchedulerError),
    #[error(transparent)]
    System(SystemError),
}

impl Error {
    pub fn level(&self) -> tracing::Level {
        match self {
            Self::Input(error) => error.level(),
            Self::IO(error) => error.level(),
            Self::Scheduler(error) => error.level(),
            Self::System(error) => error.level(),
        }
    }
}

impl From<InputError> for Error {
    fn from(error: InputError) -> Self {
        Self::Input(error)
    }
}

impl From<IOError> for Error {
    fn from(error: IOError) -> Self {
        Self::IO(error)
    }
}

impl From<SchedulerError> for Error {
    fn from(error: SchedulerError) -> Self {
        Self::Scheduler(error)
    }
}

impl From<SystemError> for Error {
    fn from(error: SystemError) -> Self {
        Self::System(error)
    }
}
