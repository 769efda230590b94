use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use winwatch_core::{Image, MonitorError, SaveError, ScreenshotSink};

/// Create `<root>/<prefix>_<yyyy-MM-dd_HH-mm-ss>`
pub fn create_screenshot_folder(
    root: &Path,
    prefix: &str,
    now: DateTime<Local>,
) -> Result<PathBuf, MonitorError> {
    let folder = root.join(format!("{}_{}", prefix, now.format("%Y-%m-%d_%H-%M-%S")));

    fs::create_dir_all(&folder).map_err(|source| MonitorError::FolderCreationFailed {
        path: folder.clone(),
        source,
    })?;

    tracing::info!("screenshot folder: {}", folder.display());
    Ok(folder)
}

/// Writes one PNG per tick into a folder
pub struct FolderSink {
    folder: PathBuf,
}

impl FolderSink {
    pub fn new(folder: PathBuf) -> Self {
        Self { folder }
    }

    pub fn file_name(index: u64, now: DateTime<Local>) -> String {
        format!("screenshot_{:04}_{}.png", index, now.format("%H-%M-%S-%3f"))
    }
}

impl ScreenshotSink for FolderSink {
    fn save(&mut self, index: u64, image: &Image) -> Result<PathBuf, SaveError> {
        let png = winwatch_capture::encode_png(image)?;
        let path = self.folder.join(Self::file_name(index, Local::now()));

        fs::write(&path, png).map_err(|source| SaveError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("winwatch-{}-{name}", std::process::id()))
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, h, m, s).unwrap()
    }

    #[test]
    fn test_folder_name_is_timestamped() {
        let root = scratch_dir("folder");
        let folder = create_screenshot_folder(&root, "AppMonitor", at(7, 5, 3)).unwrap();

        assert!(folder.is_dir());
        assert_eq!(folder.file_name().unwrap(), "AppMonitor_2024-03-09_07-05-03");

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_folder_creation_failure_is_fatal_error() {
        // A regular file where a directory is needed
        let blocker = scratch_dir("blocker");
        fs::write(&blocker, b"x").unwrap();

        let err = create_screenshot_folder(&blocker, "AppMonitor", at(1, 2, 3)).unwrap_err();
        fs::remove_file(&blocker).ok();

        assert!(matches!(err, MonitorError::FolderCreationFailed { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_file_names_are_sequential() {
        assert_eq!(
            FolderSink::file_name(7, at(13, 4, 59)),
            "screenshot_0007_13-04-59-000.png"
        );
        assert_eq!(
            FolderSink::file_name(12345, at(0, 0, 0)),
            "screenshot_12345_00-00-00-000.png"
        );
    }

    #[test]
    fn test_sink_writes_png() {
        let folder = scratch_dir("sink");
        fs::create_dir_all(&folder).unwrap();

        let mut sink = FolderSink::new(folder.clone());
        let path = sink.save(1, &Image::new(8, 6)).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("screenshot_0001_"));

        fs::remove_dir_all(&folder).ok();
    }

    #[test]
    fn test_sink_reports_write_failure() {
        let mut sink = FolderSink::new(scratch_dir("missing").join("nested"));

        let err = sink.save(1, &Image::new(2, 2)).unwrap_err();
        assert!(matches!(err, SaveError::Write { .. }));
    }
}
