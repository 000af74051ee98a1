//! Timestamped backups of a previous output file.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Timestamp layout inserted between stem and extension.
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Returns `<stem>.<YYYYMMDD_HHMMSS>.<ext>` next to `path`.
pub fn backup_path(path: &Path, timestamp: DateTime<Local>) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stamp = timestamp.format(BACKUP_TIMESTAMP_FORMAT);

    let file_name = match path.extension() {
        Some(ext) => format!("{stem}.{stamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{stamp}"),
    };
    path.with_file_name(file_name)
}

/// Moves an existing file at `path` aside, returning where it went.
///
/// Returns `Ok(None)` when there is nothing to back up.
pub fn backup_existing(path: &Path) -> std::io::Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let target = backup_path(path, Local::now());
    std::fs::rename(path, &target)?;
    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn inserts_timestamp_before_extension() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let path = backup_path(Path::new("out/repositories.json"), timestamp);

        assert_eq!(path, Path::new("out/repositories.20240307_090501.json"));
    }

    #[test]
    fn handles_missing_extension() {
        let timestamp = Local.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let path = backup_path(Path::new("report"), timestamp);

        assert_eq!(path, Path::new("report.20241231_235959"));
    }

    #[test]
    fn nothing_to_back_up() {
        let dir = tempfile::tempdir().unwrap();
        let result = backup_existing(&dir.path().join("absent.json")).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn moves_existing_file_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repositories.json");
        std::fs::write(&path, "{}").unwrap();

        let backup = backup_existing(&path).unwrap().unwrap();

        assert!(!path.exists());
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{}");
    }
}
