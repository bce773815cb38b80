use crate::model::error::Error;
use std::fmt::{self, Display, Formatter};
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupState {
    Idle,
    DetectExisting,
    OfferUninstall,
    Uninstalling,
    OfferReinstall,
    Collecting,
    Generating,
    Writing,
    Registering,
    Done,
    Failed,
}

impl Display for SetupState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            SetupState::Idle => "Idle",
            SetupState::DetectExisting => "DetectExisting",
            SetupState::OfferUninstall => "OfferUninstall",
            SetupState::Uninstalling => "Uninstalling",
            SetupState::OfferReinstall => "OfferReinstall",
            SetupState::Collecting => "Collecting",
            SetupState::Generating => "Generating",
            SetupState::Writing => "Writing",
            SetupState::Registering => "Registering",
            SetupState::Done => "Done",
            SetupState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Installed,
    Uninstalled,
    NoChanges,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done(Completion),
    Failed { during: SetupState, error: Error },
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Done(_) => ExitCode::SUCCESS,
            Outcome::Failed { .. } => ExitCode::FAILURE,
        }
    }
}
