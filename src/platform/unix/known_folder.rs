use crate::model::error::Error;
use std::path::PathBuf;

/// Machine-wide application data; `/var/lib` stands in for `%ProgramData%`.
pub fn program_data() -> Result<PathBuf, Error> {
    Ok(PathBuf::from("/var/lib"))
}
