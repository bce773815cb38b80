use crate::model::error::Error;
use crate::model::error::system::SystemError;
use crate::platform::relaunch_exit_code;
use std::env;
use std::process::Command;

/// Re-runs the current executable under `sudo`, waits for it and returns
/// its exit code.
pub fn elevate() -> Result<u8, Error> {
    let exe = env::current_exe().map_err(SystemError::CurrentExeNotFound)?;
    let args: Vec<String> = env::args().skip(1).collect();

    let status = Command::new("sudo")
        .arg("--")
        .arg(exe)
        .args(&args)
        .status()
        .map_err(SystemError::RunAsAdminFailed)?;

    Ok(relaunch_exit_code(status.code().map(i64::from)))
}
