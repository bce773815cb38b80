use crate::core::app_config::AppConfig;
use crate::core::retention::Retention;
use crate::core::script_generator::ScriptGenerator;
use crate::interface::task_scheduler::TaskScheduler;
use crate::model::archive::ArchiveNaming;
use crate::model::backup_job::BackupJobConfig;
use crate::model::error::Error;
use crate::model::error::io::IOError;
use crate::model::log::setup::SetupLog;
use crate::model::schedule::{DayOfWeek, RawSchedule, Schedule, ScheduleKind};
use crate::model::setup_state::{Completion, Outcome, SetupState};
use crate::ui::console::Console;
use crate::utils::validator;
use macros::log;
use std::io::{BufRead, ErrorKind, Write};
use std::path::PathBuf;
use tokio::fs;

const INVALID_TIME: &str = "Invalid time. Please enter in HH:mm (24-hour format).";
const INVALID_DATE: &str = "Invalid date. Use format yyyy-MM-dd.";
const INVALID_DAY_OF_MONTH: &str = "Invalid day. Enter a number from 1 to 31.";
const INVALID_MAX_BACKUPS: &str = "Invalid number. Enter a whole number of at least 1.";

/// One interactive install/uninstall session. Nothing is rolled back: a
/// failure leaves whatever the earlier steps already changed.
pub struct SetupOrchestrator<'a, S, R, W> {
    config: &'a AppConfig,
    scheduler: &'a S,
    console: &'a mut Console<R, W>,
    state: SetupState,
}

impl<'a, S, R, W> SetupOrchestrator<'a, S, R, W>
where
    S: TaskScheduler,
    R: BufRead,
    W: Write,
{
    pub fn new(config: &'a AppConfig, scheduler: &'a S, console: &'a mut Console<R, W>) -> Self {
        Self {
            config,
            scheduler,
            console,
            state: SetupState::Idle,
        }
    }

    pub async fn run(mut self) -> Outcome {
        match self.drive().await {
            Ok(completion) => {
                self.enter(SetupState::Done);
                Outcome::Done(completion)
            }
            Err(error) => {
                let during = self.state;
                self.enter(SetupState::Failed);
                log!(error);

                let headline = match during {
                    SetupState::Uninstalling => "Error during uninstall",
                    SetupState::Writing => "Failed to save backup script",
                    SetupState::Registering => "Failed to register task",
                    _ => "Setup failed",
                };
                if let Err(write_error) = self.console.error(&format!("{headline}: {error}")) {
                    log!(write_error);
                }
                Outcome::Failed { during, error }
            }
        }
    }

    fn enter(&mut self, state: SetupState) {
        self.state = state;
        log!(SetupLog::StateEntered {
            state: state.to_string()
        });
    }

    async fn drive(&mut self) -> Result<Completion, Error> {
        let config = self.config;
        let script_path = config.script_path();

        self.enter(SetupState::DetectExisting);
        // A path through a regular file cannot name an installed script.
        let exists = match fs::try_exists(script_path).await {
            Ok(exists) => exists,
            Err(err) if err.kind() == ErrorKind::NotADirectory => false,
            Err(err) => Err(IOError::ProbeScriptFailed(script_path, err))?,
        };

        if exists {
            log!(SetupLog::ExistingScriptFound {
                path: script_path.to_path_buf()
            });
            self.enter(SetupState::OfferUninstall);
            self.console.warning(&format!(
                "A backup script already exists at {}.",
                script_path.display()
            ))?;
            if !self
                .console
                .confirm("Do you want to remove it and unregister the scheduled task?", false)?
            {
                log!(SetupLog::ExistingScriptRetained);
                self.console.info("Backup script retained. No changes made.")?;
                return Ok(Completion::NoChanges);
            }

            self.uninstall().await?;

            self.enter(SetupState::OfferReinstall);
            if !self
                .console
                .confirm("Would you like to create a new backup task?", true)?
            {
                self.console.info("Exiting setup.")?;
                return Ok(Completion::Uninstalled);
            }
        }

        self.enter(SetupState::Collecting);
        let job = self.collect()?;
        log!(SetupLog::JobCollected {
            kind: job.schedule.kind().to_string(),
            schedule: job.schedule.to_string(),
            max_backups: job.max_backups.get(),
        });
        self.preview_retention(&job).await?;

        self.enter(SetupState::Generating);
        let script = ScriptGenerator::new(self.naming()).generate(&job);

        self.enter(SetupState::Writing);
        self.write_script(&script).await?;

        self.enter(SetupState::Registering);
        self.console.info("Registering scheduled task...")?;
        let output = self
            .scheduler
            .register(&config.task_name, script_path, &job.schedule)
            .await?;
        let printed = output.combined();
        if !printed.is_empty() {
            self.console.line(&printed)?;
        }
        log!(SetupLog::TaskRegistered {
            task: config.task_name.clone()
        });
        self.console.success("Setup complete.")?;

        Ok(Completion::Installed)
    }

    /// Script first, then the scheduler entry. An entry the scheduler no
    /// longer knows is only a warning.
    async fn uninstall(&mut self) -> Result<(), Error> {
        let config = self.config;
        let script_path = config.script_path();

        self.enter(SetupState::Uninstalling);
        fs::remove_file(script_path)
            .await
            .map_err(|err| IOError::DeleteScriptFailed(script_path, err))?;
        log!(SetupLog::ScriptDeleted {
            path: script_path.to_path_buf()
        });
        self.console.success("Backup script deleted.")?;

        let output = self.scheduler.unregister(&config.task_name).await?;
        if output.success {
            log!(SetupLog::TaskUnregistered {
                task: config.task_name.clone()
            });
            self.console.success("Scheduled task unregistered.")?;
        } else {
            log!(SetupLog::UnregisterNotConfirmed {
                task: config.task_name.clone(),
                status: output.status.clone(),
            });
            let detail = output.combined();
            self.console.warning(&format!(
                "The scheduler did not remove task {} ({}).",
                config.task_name, output.status
            ))?;
            if !detail.is_empty() {
                self.console.muted(&detail)?;
            }
        }
        Ok(())
    }

    fn collect(&mut self) -> Result<BackupJobConfig, Error> {
        let source = self.console.ask("Enter source directory:")?;
        let destination = self.console.ask("Enter destination directory:")?;
        let max_backups = self.console.ask_with(
            "Enter maximum number of backups to keep:",
            validator::parse_max_backups,
            INVALID_MAX_BACKUPS,
        )?;

        let kind = self
            .console
            .select("Choose schedule type:", &ScheduleKind::ALL)?;
        let mut raw = RawSchedule::default();
        match kind {
            ScheduleKind::Daily => {
                raw.time = Some(self.ask_time("Enter time to run the task (HH:mm):")?);
            }
            ScheduleKind::Weekly => {
                raw.day_of_week = Some(self.console.select("Select day of week:", &DayOfWeek::ALL)?);
                raw.time = Some(self.ask_time("Enter time to run the task (HH:mm):")?);
            }
            ScheduleKind::Monthly => {
                raw.day_of_month = Some(self.console.ask_with(
                    "Enter day of the month (1-31):",
                    |answer| validator::parse_day_of_month(answer).map(|_| answer.to_string()),
                    INVALID_DAY_OF_MONTH,
                )?);
                raw.time = Some(self.ask_time("Enter time to run the task (HH:mm):")?);
            }
            ScheduleKind::AtLogon => {}
            ScheduleKind::OneTime => {
                raw.date = Some(self.console.ask_with(
                    "Enter date to run the task (yyyy-MM-dd):",
                    |answer| validator::validate_date(answer).then(|| answer.to_string()),
                    INVALID_DATE,
                )?);
                raw.time = Some(self.ask_time("Enter time (HH:mm):")?);
            }
        }

        Ok(BackupJobConfig {
            source_directory: PathBuf::from(source),
            destination_directory: PathBuf::from(destination),
            max_backups,
            schedule: Schedule::build(kind, &raw)?,
        })
    }

    fn ask_time(&mut self, question: &str) -> Result<String, Error> {
        self.console.ask_with(
            question,
            |answer| validator::validate_time(answer).then(|| answer.to_string()),
            INVALID_TIME,
        )
    }

    /// Informational only; a destination that cannot be read never stops
    /// the install.
    async fn preview_retention(&mut self, job: &BackupJobConfig) -> Result<(), Error> {
        let destination = &job.destination_directory;
        match Retention::preview(destination, &self.naming(), job.max_backups).await {
            Ok(None) => self
                .console
                .muted("The destination does not exist yet. The first run will create it."),
            Ok(Some(plan)) => {
                let existing = plan.keep.len() + plan.remove.len();
                let pruned = plan.remove.len();
                log!(SetupLog::RetentionPreview { existing, pruned });
                if pruned == 0 {
                    self.console.muted(&format!(
                        "The destination holds {existing} archives. The next run prunes none of them."
                    ))
                } else {
                    self.console.warning(&format!(
                        "The next run will delete {pruned} of the {existing} existing archives in {}.",
                        destination.display()
                    ))
                }
            }
            Err(error) => {
                log!(SetupLog::RetentionPreviewSkipped {
                    path: destination.clone()
                });
                log!(error);
                self.console
                    .warning(&format!("Could not inspect the destination: {error}"))
            }
        }
    }

    async fn write_script(&mut self, script: &str) -> Result<(), Error> {
        let script_path = self.config.script_path();
        if let Some(parent) = script_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| IOError::CreateDirectoryFailed(parent, err))?;
        }
        fs::write(script_path, script)
            .await
            .map_err(|err| IOError::WriteScriptFailed(script_path, err))?;

        log!(SetupLog::ScriptWritten {
            path: script_path.to_path_buf()
        });
        self.console.success(&format!(
            "Backup script saved to: {}",
            script_path.display()
        ))
    }

    fn naming(&self) -> ArchiveNaming {
        ArchiveNaming::new(self.config.archive_prefix.as_str())
    }
}
