use crate::model::error::Error;
use crate::model::error::system::SystemError;
use crate::platform::relaunch_exit_code;
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::{env, io, mem};
use windows::core::PCWSTR;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Com::{CoInitializeEx, COINIT_APARTMENTTHREADED, COINIT_DISABLE_OLE1DDE};
use windows::Win32::System::Threading::{GetExitCodeProcess, INFINITE, WaitForSingleObject};
use windows::Win32::UI::Shell::{SEE_MASK_NOCLOSEPROCESS, SHELLEXECUTEINFOW, ShellExecuteExW};
use windows::Win32::UI::WindowsAndMessaging::SW_NORMAL;

/// Relaunches the current executable through the `runas` verb (UAC prompt),
/// blocks until the elevated copy exits and returns its exit code.
pub fn elevate() -> Result<u8, Error> {
    let exe = env::current_exe().map_err(SystemError::CurrentExeNotFound)?;
    let params = env::args().skip(1).collect::<Vec<_>>().join(" ");

    let file = wide(exe.as_os_str());
    let params = wide(OsStr::new(&params));

    unsafe { run_as(&file, &params) }
}

fn wide(value: &OsStr) -> Vec<u16> {
    value.encode_wide().chain(Some(0)).collect()
}

unsafe fn run_as(file: &[u16], params: &[u16]) -> Result<u8, Error> {
    unsafe {
        let mut sei: SHELLEXECUTEINFOW = mem::zeroed();
        let verb = wide(OsStr::new("runas"));

        CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE)
            .ok()
            .map_err(SystemError::RunAsAdminFailed)?;

        sei.fMask = SEE_MASK_NOCLOSEPROCESS;
        sei.cbSize = size_of::<SHELLEXECUTEINFOW>() as u32;
        sei.lpVerb = PCWSTR(verb.as_ptr());
        sei.lpFile = PCWSTR(file.as_ptr());
        sei.lpParameters = PCWSTR(params.as_ptr());
        sei.nShow = SW_NORMAL.0;

        ShellExecuteExW(&mut sei).map_err(SystemError::RunAsAdminFailed)?;
        if sei.hProcess.is_invalid() {
            Err(SystemError::RunAsAdminFailed(io::Error::last_os_error()))?
        }

        WaitForSingleObject(sei.hProcess, INFINITE);
        let mut code = 0u32;
        let status = GetExitCodeProcess(sei.hProcess, &mut code)
            .map_err(SystemError::RelaunchStatusFailed);
        CloseHandle(sei.hProcess).map_err(|_| SystemError::ObjectFreeFailed)?;
        status?;

        Ok(relaunch_exit_code(Some(i64::from(code))))
    }
}
