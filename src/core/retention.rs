use crate::model::archive::{ArchiveEntry, ArchiveNaming, PrunePlan};
use crate::model::error::Error;
use crate::model::error::io::IOError;
use std::io::ErrorKind;
use std::num::NonZeroU32;
use std::path::Path;
use tokio::fs;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;

/// The pruning rule the generated script applies after every archive: order
/// by modification time, newest first, and drop everything past the limit.
/// Ties keep directory-listing order, which is unspecified.
pub struct Retention;

impl Retention {
    pub fn plan(mut archives: Vec<ArchiveEntry>, limit: usize) -> PrunePlan {
        archives.sort_by(|a, b| b.modified.cmp(&a.modified));
        let remove = if archives.len() > limit {
            archives.split_off(limit)
        } else {
            Vec::new()
        };
        PrunePlan {
            keep: archives,
            remove,
        }
    }

    /// Regular files in `directory` named like archives.
    pub async fn scan(directory: &Path, naming: &ArchiveNaming) -> Result<Vec<ArchiveEntry>, Error> {
        let reader = fs::read_dir(directory)
            .await
            .map_err(|err| IOError::ReadDirectoryFailed(directory, err))?;
        let mut entries = ReadDirStream::new(reader);

        let mut archives = Vec::new();
        while let Some(entry) = entries.next().await {
            let entry = entry.map_err(|err| IOError::ReadDirectoryFailed(directory, err))?;
            let path = entry.path();
            if !naming.matches(&entry.file_name().to_string_lossy()) {
                continue;
            }
            let metadata = entry
                .metadata()
                .await
                .map_err(|err| IOError::GetMetadataFailed(&path, err))?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata
                .modified()
                .map_err(|err| IOError::GetMetadataFailed(&path, err))?;
            archives.push(ArchiveEntry { path, modified });
        }
        Ok(archives)
    }

    /// What the next run would prune if it found the destination as it is
    /// now. That run adds one archive first, so only `max_backups - 1` of the
    /// existing ones survive. `None` when the destination does not exist yet.
    pub async fn preview(
        directory: &Path,
        naming: &ArchiveNaming,
        max_backups: NonZeroU32,
    ) -> Result<Option<PrunePlan>, Error> {
        match fs::metadata(directory).await {
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => Err(IOError::GetMetadataFailed(directory, err))?,
            Ok(_) => {}
        }
        let archives = Self::scan(directory, naming).await?;
        let limit = usize::try_from(max_backups.get() - 1).unwrap_or(usize::MAX);
        Ok(Some(Self::plan(archives, limit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn max(count: u32) -> NonZeroU32 {
        NonZeroU32::new(count).unwrap()
    }

    fn limit(count: u32) -> usize {
        max(count).get() as usize
    }

    fn at(seconds: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + seconds)
    }

    fn entry(name: &str, seconds: u64) -> ArchiveEntry {
        ArchiveEntry {
            path: PathBuf::from(name),
            modified: at(seconds),
        }
    }

    fn names(entries: &[ArchiveEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| entry.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    fn touch(dir: &Path, name: &str, seconds: u64) {
        let file = File::create(dir.join(name)).unwrap();
        file.set_modified(at(seconds)).unwrap();
    }

    #[test]
    fn keeps_newest_and_removes_the_rest() {
        // Listed out of order on purpose.
        let archives = vec![
            entry("b3", 3),
            entry("b7", 7),
            entry("b1", 1),
            entry("b5", 5),
            entry("b2", 2),
            entry("b6", 6),
            entry("b4", 4),
        ];

        let plan = Retention::plan(archives, limit(5));
        assert_eq!(names(&plan.keep), vec!["b7", "b6", "b5", "b4", "b3"]);
        assert_eq!(names(&plan.remove), vec!["b2", "b1"]);
    }

    #[test]
    fn nothing_removed_at_or_under_the_limit() {
        let plan = Retention::plan(vec![entry("a", 1), entry("b", 2)], limit(2));
        assert_eq!(plan.keep.len(), 2);
        assert!(plan.remove.is_empty());

        let plan = Retention::plan(Vec::new(), limit(3));
        assert_eq!(plan, PrunePlan::default());
    }

    #[test]
    fn limit_of_one_keeps_only_the_newest() {
        let plan = Retention::plan(vec![entry("old", 1), entry("new", 9), entry("mid", 5)], limit(1));
        assert_eq!(names(&plan.keep), vec!["new"]);
        assert_eq!(plan.remove.len(), 2);
    }

    #[test]
    fn archive_naming_follows_the_filter() {
        let naming = ArchiveNaming::new("Backup_");
        assert_eq!(naming.filter(), "Backup_*.zip");
        assert!(naming.matches("Backup_20250101_020000.zip"));
        assert!(naming.matches("backup_20250101_020000.ZIP"));
        assert!(naming.matches("Backup_.zip"));
        assert!(!naming.matches("Backup_20250101_020000.zip.tmp"));
        assert!(!naming.matches("Photos_20250101_020000.zip"));
        assert!(!naming.matches("Backup.zip"));
    }

    #[tokio::test]
    async fn scan_picks_only_archive_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Backup_20250101_020000.zip", 1);
        touch(dir.path(), "Backup_20250102_020000.zip", 2);
        touch(dir.path(), "notes.txt", 3);
        touch(dir.path(), "Backup_20250103_020000.tmp", 4);
        std::fs::create_dir(dir.path().join("Backup_folder.zip")).unwrap();

        let mut found = names(&Retention::scan(dir.path(), &ArchiveNaming::new("Backup_")).await.unwrap());
        found.sort();
        assert_eq!(
            found,
            vec!["Backup_20250101_020000.zip", "Backup_20250102_020000.zip"]
        );
    }

    #[tokio::test]
    async fn seven_prior_archives_with_limit_five() {
        let dir = TempDir::new().unwrap();
        for day in 1..=7u64 {
            touch(dir.path(), &format!("Backup_2025010{day}_020000.zip"), day * 86_400);
        }

        let archives = Retention::scan(dir.path(), &ArchiveNaming::new("Backup_"))
            .await
            .unwrap();
        let plan = Retention::plan(archives, limit(5));
        assert_eq!(
            names(&plan.keep),
            vec![
                "Backup_20250107_020000.zip",
                "Backup_20250106_020000.zip",
                "Backup_20250105_020000.zip",
                "Backup_20250104_020000.zip",
                "Backup_20250103_020000.zip",
            ]
        );
        assert_eq!(
            names(&plan.remove),
            vec!["Backup_20250102_020000.zip", "Backup_20250101_020000.zip"]
        );
    }

    #[tokio::test]
    async fn preview_leaves_room_for_the_next_archive() {
        let dir = TempDir::new().unwrap();
        for day in 1..=7u64 {
            touch(dir.path(), &format!("Backup_2025010{day}_020000.zip"), day * 86_400);
        }

        let plan = Retention::preview(dir.path(), &ArchiveNaming::new("Backup_"), max(5))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(plan.keep.len(), 4);
        assert_eq!(
            names(&plan.remove),
            vec![
                "Backup_20250103_020000.zip",
                "Backup_20250102_020000.zip",
                "Backup_20250101_020000.zip",
            ]
        );
    }

    #[tokio::test]
    async fn preview_with_limit_one_removes_everything_present() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Backup_20250101_020000.zip", 1);
        touch(dir.path(), "Backup_20250102_020000.zip", 2);

        let plan = Retention::preview(dir.path(), &ArchiveNaming::new("Backup_"), max(1))
            .await
            .unwrap()
            .unwrap();
        assert!(plan.keep.is_empty());
        assert_eq!(plan.remove.len(), 2);
    }

    #[tokio::test]
    async fn missing_destination_has_no_preview() {
        let dir = TempDir::new().unwrap();
        let plan = Retention::preview(&dir.path().join("absent"), &ArchiveNaming::new("Backup_"), max(5))
            .await
            .unwrap();
        assert!(plan.is_none());
    }
}
