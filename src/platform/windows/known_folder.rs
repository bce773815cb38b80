use crate::model::error::Error;
use crate::model::error::system::SystemError;
use std::path::PathBuf;
use windows::Win32::System::Com::CoTaskMemFree;
use windows::Win32::UI::Shell::{FOLDERID_ProgramData, KF_FLAG_DEFAULT, SHGetKnownFolderPath};

/// `%ProgramData%` as reported by the shell, not by the environment.
pub fn program_data() -> Result<PathBuf, Error> {
    unsafe {
        let raw = SHGetKnownFolderPath(&FOLDERID_ProgramData, KF_FLAG_DEFAULT, None)
            .map_err(SystemError::ResolveProgramDataFailed)?;
        let path = raw.to_string();
        CoTaskMemFree(Some(raw.0 as *const _));
        let path = path.map_err(SystemError::ResolveProgramDataFailed)?;
        Ok(PathBuf::from(path))
    }
}
