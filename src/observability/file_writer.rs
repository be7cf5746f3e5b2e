//! Line-oriented file writer with size-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Rotate once the trace file grows past 10 MB.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Appends lines to a file, rotating it when it grows too large.
///
/// A rotated file is renamed to `<name>.<UTC timestamp>` next to the
/// original, e.g. `mealdeck-otlp.json.20261016T091500.123456789`. Timestamps
/// sort lexically, so the oldest backups beyond the retention limit are the
/// first names in order and get removed.
///
/// The handle is opened lazily on the first write and guarded by a `Mutex`
/// because the exporter must be `Send + Sync`.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Writes `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when rotating, opening or writing
    /// fails, or when the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }
        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.9f").to_string();
        let mut backup = self.backup_path(&stamp);
        let mut n = 1;
        while backup.exists() {
            backup = self.backup_path(&format!("{stamp}-{n}"));
            n += 1;
        }

        fs::rename(&self.file_path, &backup)?;
        self.prune_backups()
    }

    fn backup_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Backups of this file, oldest first.
    fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let parent = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
        let prefix = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();
        backups.sort();
        Ok(backups)
    }

    fn prune_backups(&self) -> io::Result<()> {
        let backups = self.backups()?;
        let excess = backups.len().saturating_sub(self.max_backups);
        for old in &backups[..excess] {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_limits(path.clone(), 4, 2);

        for i in 1..=5 {
            writer.write_line(&format!("line-{i}")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line-5\n");
        let backups = writer.backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert_eq!(fs::read_to_string(&backups[1]).unwrap(), "line-4\n");
    }

    #[test]
    fn unrelated_files_are_not_pruned() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let other = dir.path().join("store.json");
        fs::write(&other, "{}").unwrap();
        let writer = FileWriter::with_limits(path, 1, 0);

        writer.write_line("one").unwrap();
        writer.write_line("two").unwrap();

        assert!(other.exists());
        assert!(writer.backups().unwrap().is_empty());
    }
}
