use std::path::PathBuf;
use std::time::SystemTime;

pub const ARCHIVE_EXTENSION: &str = "zip";

/// `<prefix><yyyyMMdd_HHmmss>.zip`. Matching is ASCII case-insensitive, the
/// way the file system the archives live on compares names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveNaming {
    prefix: String,
}

impl ArchiveNaming {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Wildcard form for `Get-ChildItem -Filter`.
    pub fn filter(&self) -> String {
        format!("{}*.{}", self.prefix, ARCHIVE_EXTENSION)
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let suffix = format!(".{ARCHIVE_EXTENSION}");
        let name = file_name.as_bytes();
        name.len() >= self.prefix.len() + suffix.len()
            && name[..self.prefix.len()].eq_ignore_ascii_case(self.prefix.as_bytes())
            && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Split of an archive set into what survives a run and what it deletes.
/// `keep` is ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrunePlan {
    pub keep: Vec<ArchiveEntry>,
    pub remove: Vec<ArchiveEntry>,
}
