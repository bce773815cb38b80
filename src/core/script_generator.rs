use crate::model::archive::{ARCHIVE_EXTENSION, ArchiveNaming};
use crate::model::backup_job::BackupJobConfig;
use crate::utils::powershell::quote_literal;

/// `Get-Date -Format` pattern for archive names: local time, one-second
/// resolution. Two runs in the same second write the same name and the later
/// one wins.
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "yyyyMMdd_HHmmss";

const SCRIPT_BODY: &str = r#"
$timestamp = Get-Date -Format $timestampFormat
$archiveName = "$archivePrefix$timestamp.$archiveExtension"
$scratchPath = Join-Path -Path ([System.IO.Path]::GetTempPath()) -ChildPath $archiveName

$sourceItems = @(Get-ChildItem -LiteralPath $sourceDir -Force)
Compress-Archive -LiteralPath $sourceItems.FullName -DestinationPath $scratchPath -Force

if (-not (Test-Path -LiteralPath $destinationDir)) {
    New-Item -ItemType Directory -Path $destinationDir -Force | Out-Null
}

$finalPath = Join-Path -Path $destinationDir -ChildPath $archiveName
Copy-Item -LiteralPath $scratchPath -Destination $finalPath -Force
Remove-Item -LiteralPath $scratchPath -Force

$archives = @(Get-ChildItem -LiteralPath $destinationDir -Filter $archiveFilter -File |
    Sort-Object -Property LastWriteTime -Descending)

if ($archives.Count -gt $maxBackups) {
    $archives | Select-Object -Skip $maxBackups | ForEach-Object {
        Remove-Item -LiteralPath $_.FullName -Force
    }
}
"#;

/// Renders the archive-then-prune script the scheduler runs. Operator values
/// only ever appear as single-quoted literals or integers in the variable
/// block; the body refers to them by variable.
pub struct ScriptGenerator {
    naming: ArchiveNaming,
}

impl ScriptGenerator {
    pub fn new(naming: ArchiveNaming) -> Self {
        Self { naming }
    }

    pub fn generate(&self, job: &BackupJobConfig) -> String {
        let source = job.source_directory.to_string_lossy();
        let destination = job.destination_directory.to_string_lossy();

        let mut script = String::new();
        script.push_str("# Directory backup: archive the source, then keep the newest archives.\n");
        script.push_str(&format!("# Schedule: {}\n", job.schedule));
        script.push_str("$ErrorActionPreference = 'Stop'\n\n");
        script.push_str(&format!("$sourceDir = {}\n", quote_literal(&source)));
        script.push_str(&format!("$destinationDir = {}\n", quote_literal(&destination)));
        script.push_str(&format!("$maxBackups = {}\n", job.max_backups.get()));
        script.push_str(&format!(
            "$archivePrefix = {}\n",
            quote_literal(self.naming.prefix())
        ));
        script.push_str(&format!(
            "$archiveExtension = {}\n",
            quote_literal(ARCHIVE_EXTENSION)
        ));
        script.push_str(&format!(
            "$archiveFilter = {}\n",
            quote_literal(&self.naming.filter())
        ));
        script.push_str(&format!(
            "$timestampFormat = {}\n",
            quote_literal(ARCHIVE_TIMESTAMP_FORMAT)
        ));
        script.push_str(SCRIPT_BODY);
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::Schedule;
    use chrono::NaiveTime;
    use std::num::NonZeroU32;
    use std::path::PathBuf;

    fn job(source: &str, destination: &str, max_backups: u32) -> BackupJobConfig {
        BackupJobConfig {
            source_directory: PathBuf::from(source),
            destination_directory: PathBuf::from(destination),
            max_backups: NonZeroU32::new(max_backups).unwrap(),
            schedule: Schedule::Daily {
                at: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
            },
        }
    }

    fn generator() -> ScriptGenerator {
        ScriptGenerator::new(ArchiveNaming::new("Backup_"))
    }

    #[test]
    fn embeds_configuration_as_literals() {
        let script = generator().generate(&job(r"C:\Data", r"D:\Backups", 5));

        assert!(script.contains("$sourceDir = 'C:\\Data'\n"));
        assert!(script.contains("$destinationDir = 'D:\\Backups'\n"));
        assert!(script.contains("$maxBackups = 5\n"));
        assert!(script.contains("$archivePrefix = 'Backup_'\n"));
        assert!(script.contains("$timestampFormat = 'yyyyMMdd_HHmmss'\n"));
        assert!(script.contains("# Schedule: daily at 02:00\n"));
        assert!(script.starts_with("# Directory backup"));
    }

    #[test]
    fn identical_jobs_render_identically() {
        let first = generator().generate(&job(r"C:\Data", r"D:\Backups", 5));
        let second = generator().generate(&job(r"C:\Data", r"D:\Backups", 5));
        assert_eq!(first, second);
    }

    #[test]
    fn stops_before_pruning_when_a_step_fails() {
        let script = generator().generate(&job(r"C:\Data", r"D:\Backups", 5));
        let stop = script.find("$ErrorActionPreference = 'Stop'").unwrap();
        let compress = script.find("Compress-Archive").unwrap();
        let prune = script.find("Select-Object -Skip $maxBackups").unwrap();
        assert!(stop < compress && compress < prune);
    }

    #[test]
    fn prunes_oldest_by_modification_time() {
        let script = generator().generate(&job(r"C:\Data", r"D:\Backups", 3));
        assert!(script.contains("Sort-Object -Property LastWriteTime -Descending"));
        assert!(script.contains("if ($archives.Count -gt $maxBackups)"));
        assert!(script.contains("$archiveFilter = 'Backup_*.zip'\n"));
        assert!(script.contains("-Filter $archiveFilter -File"));
    }

    #[test]
    fn hostile_paths_cannot_escape_their_literal() {
        let script = generator().generate(&job(
            r"C:\Data'; Remove-Item C:\ -Recurse; '",
            "D:\\$(Stop-Computer)\\\u{2019}x",
            5,
        ));

        assert!(script.contains("$sourceDir = 'C:\\Data''; Remove-Item C:\\ -Recurse; '''\n"));
        assert!(script.contains("$destinationDir = 'D:\\$(Stop-Computer)\\\u{2019}\u{2019}x'\n"));
        // No line other than the variable block mentions the raw values.
        let mentions = script
            .lines()
            .filter(|line| line.contains("Remove-Item C:\\ -Recurse"))
            .count();
        assert_eq!(mentions, 1);
    }

    #[test]
    fn custom_prefix_flows_into_the_script() {
        let script = ScriptGenerator::new(ArchiveNaming::new("Photos_"))
            .generate(&job(r"C:\Photos", r"E:\Archive", 10));
        assert!(script.contains("$archivePrefix = 'Photos_'\n"));
        assert!(script.contains("$maxBackups = 10\n"));
    }

    /// Runs the rendered script with a real PowerShell:
    /// `cargo test -- --ignored script_keeps_the_newest_archives_when_run`
    #[test]
    #[ignore = "runs the generated script with pwsh"]
    fn script_keeps_the_newest_archives_when_run() {
        use std::fs::File;
        use std::process::Command;
        use std::time::{Duration, SystemTime};

        let pwsh = which::which("pwsh").expect("pwsh on PATH");

        let root = tempfile::TempDir::new().unwrap();
        let source = root.path().join("source");
        let destination = root.path().join("destination");
        std::fs::create_dir_all(source.join("nested")).unwrap();
        std::fs::write(source.join("report.txt"), "quarterly numbers").unwrap();
        std::fs::write(source.join("nested").join("photo.raw"), [7u8; 64]).unwrap();
        std::fs::create_dir_all(&destination).unwrap();

        let base = SystemTime::now() - Duration::from_secs(30 * 86_400);
        for day in 1..=7u64 {
            let file = File::create(destination.join(format!("Backup_2020010{day}_000000.zip"))).unwrap();
            file.set_modified(base + Duration::from_secs(day * 86_400)).unwrap();
        }
        std::fs::write(destination.join("unrelated.txt"), "keep me").unwrap();

        let script_path = root.path().join("BackupScript.ps1");
        let script = generator().generate(&job(
            &source.to_string_lossy(),
            &destination.to_string_lossy(),
            5,
        ));
        std::fs::write(&script_path, script).unwrap();

        let status = Command::new(pwsh)
            .args(["-NoProfile", "-NonInteractive", "-File"])
            .arg(&script_path)
            .status()
            .unwrap();
        assert!(status.success());

        let naming = ArchiveNaming::new("Backup_");
        let mut archives: Vec<String> = std::fs::read_dir(&destination)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| naming.matches(name))
            .collect();
        archives.sort();

        assert_eq!(archives.len(), 5);
        for day in 1..=3 {
            assert!(!archives.contains(&format!("Backup_2020010{day}_000000.zip")));
        }
        for day in 4..=7 {
            assert!(archives.contains(&format!("Backup_2020010{day}_000000.zip")));
        }
        assert!(destination.join("unrelated.txt").exists());
    }
}
