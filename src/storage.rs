use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Durable store for the ordered command list, oldest entry first.
/// Every write replaces the previous contents in full.
pub trait HistoryStorage {
    fn read_all(&mut self) -> Result<Vec<String>>;
    fn write_all(&mut self, entries: &[String]) -> Result<()>;
}

/// Plain-text backend: one command per line, oldest first, UTF-8.
#[derive(Debug)]
pub struct FileHistoryStorage {
    path: PathBuf,
}

impl FileHistoryStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStorage for FileHistoryStorage {
    fn read_all(&mut self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("read history file: {}", self.path.display()))?;
        Ok(data.lines().map(str::to_string).collect())
    }

    fn write_all(&mut self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create history dir: {}", parent.display()))?;
        }
        let tmp = self.path.with_extension("tmp");
        {
            let mut f = fs::File::create(&tmp)
                .with_context(|| format!("create tmp: {}", tmp.display()))?;
            for entry in entries {
                f.write_all(entry.as_bytes())?;
                f.write_all(b"\n")?;
            }
            f.flush()?;
        }
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("persist history to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> FileHistoryStorage {
        FileHistoryStorage::new(dir.path().join("command_history.txt"))
    }

    #[test]
    fn read_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        assert_eq!(storage.read_all().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        let entries = vec!["ls".to_string(), "cd src".to_string()];

        storage.write_all(&entries).unwrap();
        assert_eq!(storage.read_all().unwrap(), entries);
    }

    #[test]
    fn write_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);

        storage
            .write_all(&["old".to_string(), "older".to_string()])
            .unwrap();
        storage.write_all(&["only".to_string()]).unwrap();

        assert_eq!(storage.read_all().unwrap(), vec!["only".to_string()]);
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileHistoryStorage::new(dir.path().join("nested/deeper/hist.txt"));

        storage.write_all(&["add n/Alice".to_string()]).unwrap();
        assert_eq!(storage.read_all().unwrap(), vec!["add n/Alice".to_string()]);
    }

    #[test]
    fn file_layout_is_one_entry_per_line_with_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);

        storage
            .write_all(&["first".to_string(), "second".to_string()])
            .unwrap();

        let raw = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(raw, "first\nsecond\n");
    }

    #[test]
    fn no_tmp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);

        storage.write_all(&["x".to_string()]).unwrap();
        assert!(!dir.path().join("command_history.tmp").exists());
    }
}
