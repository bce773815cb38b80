use crate::core::app_config::AppConfig;
use crate::core::setup::SetupOrchestrator;
use crate::core::task_scheduler::Schtasks;
use crate::model::error::Error;
use crate::model::log::system::SystemLog;
use crate::model::setup_state::Outcome;
use crate::platform::elevate::elevate;
use crate::ui::console::Console;
use crate::utils::logging::Logging;
use macros::log;
use privilege::user::privileged;
use tracing_appender::non_blocking::WorkerGuard;

pub enum Startup {
    Ready(System),
    /// An elevated copy ran the session and exited with this code.
    Relaunched(u8),
}

pub struct System {
    config: AppConfig,
    _guard: WorkerGuard,
}

impl System {
    pub fn initialize() -> Result<Startup, Error> {
        let config = AppConfig::load()?;
        let guard = Logging::initialize(config.log_directory())?;
        log!(SystemLog::Initializing);
        config.log_origin();

        if !privileged() {
            log!(SystemLog::ReRunAsAdmin);
            let code = elevate()?;
            log!(SystemLog::RelaunchFinished { code });
            return Ok(Startup::Relaunched(code));
        }

        #[cfg(windows)]
        let _ = colored::control::set_virtual_terminal(true);

        log!(SystemLog::InitializeComplete);
        Ok(Startup::Ready(Self {
            config,
            _guard: guard,
        }))
    }

    pub async fn run(&self) -> Outcome {
        let scheduler = Schtasks::from_config(&self.config);
        let mut console = Console::stdio();
        SetupOrchestrator::new(&self.config, &scheduler, &mut console)
            .run()
            .await
    }

    pub fn terminate(self) {
        log!(SystemLog::Terminating);
        log!(SystemLog::TerminateComplete);
    }
}
