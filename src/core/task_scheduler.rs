use crate::core::app_config::AppConfig;
use crate::interface::task_scheduler::TaskScheduler;
use crate::model::error::Error;
use crate::model::error::scheduler::SchedulerError;
use crate::model::log::scheduler::SchedulerLog;
use crate::model::schedule::{DATE_FORMAT, Schedule, TIME_FORMAT};
use crate::model::tool_output::ToolOutput;
use async_trait::async_trait;
use macros::log;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Windows Task Scheduler driven through `schtasks.exe`. Arguments are passed
/// as a vector; no shell ever sees them.
pub struct Schtasks {
    scheduler: String,
    interpreter: String,
}

impl Schtasks {
    pub fn new(scheduler: impl Into<String>, interpreter: impl Into<String>) -> Self {
        Self {
            scheduler: scheduler.into(),
            interpreter: interpreter.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.scheduler, &config.interpreter)
    }

    pub fn create_arguments(
        &self,
        task_name: &str,
        script_path: &Path,
        schedule: &Schedule,
    ) -> Vec<OsString> {
        let mut arguments: Vec<OsString> = vec!["/Create".into(), "/F".into()];
        arguments.extend(Self::trigger_arguments(schedule).into_iter().map(OsString::from));
        arguments.push("/TN".into());
        arguments.push(task_name.into());
        arguments.push("/TR".into());
        arguments.push(self.run_target(script_path));
        arguments.push("/RL".into());
        arguments.push("HIGHEST".into());
        arguments
    }

    pub fn delete_arguments(task_name: &str) -> Vec<OsString> {
        vec!["/Delete".into(), "/TN".into(), task_name.into(), "/F".into()]
    }

    pub fn trigger_arguments(schedule: &Schedule) -> Vec<String> {
        let time = |at: &chrono::NaiveTime| at.format(TIME_FORMAT).to_string();
        match schedule {
            Schedule::Daily { at } => vec!["/SC".into(), "DAILY".into(), "/ST".into(), time(at)],
            Schedule::Weekly { day, at } => vec![
                "/SC".into(),
                "WEEKLY".into(),
                "/D".into(),
                day.code().into(),
                "/ST".into(),
                time(at),
            ],
            Schedule::Monthly { day, at } => vec![
                "/SC".into(),
                "MONTHLY".into(),
                "/D".into(),
                day.to_string(),
                "/ST".into(),
                time(at),
            ],
            Schedule::AtLogon => vec!["/SC".into(), "ONLOGON".into()],
            Schedule::OneTime { date, at } => vec![
                "/SC".into(),
                "ONCE".into(),
                "/SD".into(),
                date.format(DATE_FORMAT).to_string(),
                "/ST".into(),
                time(at),
            ],
        }
    }

    /// The `/TR` value: the interpreter, hidden and profile-less, pointed at
    /// the script. The script path is quoted so spaces survive.
    pub fn run_target(&self, script_path: &Path) -> OsString {
        let mut target = OsString::from(&self.interpreter);
        target.push(" -NoProfile -WindowStyle Hidden -ExecutionPolicy Bypass -File \"");
        target.push(script_path.as_os_str());
        target.push("\"");
        target
    }

    async fn invoke(
        &self,
        action: &str,
        task_name: &str,
        arguments: Vec<OsString>,
    ) -> Result<ToolOutput, Error> {
        log!(SchedulerLog::Launching {
            tool: self.scheduler.clone(),
            action: action.to_string(),
            task: task_name.to_string(),
        });

        let output = Command::new(&self.scheduler)
            .args(arguments)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|err| SchedulerError::LaunchFailed(&self.scheduler, err))?;
        let output = ToolOutput::from(output);

        log!(SchedulerLog::Exited {
            tool: self.scheduler.clone(),
            status: output.status.clone(),
        });
        Ok(output)
    }
}

#[async_trait]
impl TaskScheduler for Schtasks {
    async fn register(
        &self,
        task_name: &str,
        script_path: &Path,
        schedule: &Schedule,
    ) -> Result<ToolOutput, Error> {
        let arguments = self.create_arguments(task_name, script_path, schedule);
        let output = self.invoke("create", task_name, arguments).await?;
        if !output.success {
            Err(SchedulerError::Rejected(
                &self.scheduler,
                "create",
                &output.status,
                output.combined(),
            ))?
        }
        Ok(output)
    }

    async fn unregister(&self, task_name: &str) -> Result<ToolOutput, Error> {
        self.invoke("delete", task_name, Self::delete_arguments(task_name))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::{DayOfMonth, DayOfWeek};
    use chrono::{NaiveDate, NaiveTime, Weekday};

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn strings(arguments: Vec<OsString>) -> Vec<String> {
        arguments
            .into_iter()
            .map(|argument| argument.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn weekly_friday_trigger() {
        let schtasks = Schtasks::new("schtasks.exe", "powershell.exe");
        let schedule = Schedule::Weekly {
            day: DayOfWeek(Weekday::Fri),
            at: at(18, 30),
        };
        let arguments = strings(schtasks.create_arguments(
            "DirectoryBackupTask",
            Path::new(r"C:\ProgramData\BackupScript.ps1"),
            &schedule,
        ));

        assert_eq!(
            arguments,
            vec![
                "/Create",
                "/F",
                "/SC",
                "WEEKLY",
                "/D",
                "FRI",
                "/ST",
                "18:30",
                "/TN",
                "DirectoryBackupTask",
                "/TR",
                r#"powershell.exe -NoProfile -WindowStyle Hidden -ExecutionPolicy Bypass -File "C:\ProgramData\BackupScript.ps1""#,
                "/RL",
                "HIGHEST",
            ]
        );
    }

    #[test]
    fn every_trigger_form() {
        assert_eq!(
            Schtasks::trigger_arguments(&Schedule::Daily { at: at(2, 0) }),
            vec!["/SC", "DAILY", "/ST", "02:00"]
        );
        assert_eq!(
            Schtasks::trigger_arguments(&Schedule::Monthly {
                day: DayOfMonth::new(15).unwrap(),
                at: at(6, 5)
            }),
            vec!["/SC", "MONTHLY", "/D", "15", "/ST", "06:05"]
        );
        assert_eq!(
            Schtasks::trigger_arguments(&Schedule::AtLogon),
            vec!["/SC", "ONLOGON"]
        );
        assert_eq!(
            Schtasks::trigger_arguments(&Schedule::OneTime {
                date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
                at: at(23, 59)
            }),
            vec!["/SC", "ONCE", "/SD", "2025-12-24", "/ST", "23:59"]
        );
    }

    #[test]
    fn delete_is_forced() {
        assert_eq!(
            strings(Schtasks::delete_arguments("Nightly")),
            vec!["/Delete", "/TN", "Nightly", "/F"]
        );
    }

    #[tokio::test]
    async fn missing_tool_is_a_launch_failure() {
        let schtasks = Schtasks::new("definitely-not-a-scheduler-binary", "powershell.exe");
        let error = schtasks.unregister("Nightly").await.unwrap_err();
        assert!(matches!(
            error,
            Error::Scheduler(SchedulerError::LaunchFailed { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_rejects_registration() {
        let schtasks = Schtasks::new("false", "powershell.exe");
        let error = schtasks
            .register("Nightly", Path::new("/tmp/job.ps1"), &Schedule::AtLogon)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Scheduler(SchedulerError::Rejected { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_reported_not_raised_on_delete() {
        let schtasks = Schtasks::new("false", "powershell.exe");
        let output = schtasks.unregister("Nightly").await.unwrap();
        assert!(!output.success);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn zero_exit_registers() {
        let schtasks = Schtasks::new("true", "powershell.exe");
        let output = schtasks
            .register("Nightly", Path::new("/tmp/job.ps1"), &Schedule::AtLogon)
            .await
            .unwrap();
        assert!(output.success);
    }
}
