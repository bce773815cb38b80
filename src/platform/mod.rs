#[cfg(not(windows))]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
pub use unix::*;
#[cfg(windows)]
pub use windows::*;

/// Exit status of the elevated copy, narrowed to what a process exit code
/// carries. A missing or out-of-range status reads as failure.
pub fn relaunch_exit_code(code: Option<i64>) -> u8 {
    code.and_then(|code| u8::try_from(code).ok()).unwrap_or(1)
}
