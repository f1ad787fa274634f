use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::model::Task;
use crate::{output, paths};

/// Whole-file persistence for the task collection.
///
/// Every call reads or rewrites the entire file. There is no locking, so two
/// processes saving at once race and the last writer wins.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `task_list.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(paths::task_file_in(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection. A missing file is created as `[]` and
    /// yields an empty collection.
    pub fn load(&self) -> Result<Vec<Task>> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.create_empty()?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        let tasks: Vec<Task> = serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
            path: self.path.clone(),
            source,
        })?;
        debug!("loaded {} task(s) from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    /// Replace the file with `tasks`. The new content goes to a temp file in
    /// the same directory which is then renamed over the old one, so the file
    /// holds either the previous or the new collection, never a mix.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let dir = self.dir();
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        output::write_json(&mut tmp, tasks).map_err(|e| Error::io(&self.path, e.into()))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| Error::io(&self.path, e))?;

        // Temp files are created 0600; keep whatever mode the old file had.
        if let Ok(meta) = fs::metadata(&self.path) {
            fs::set_permissions(tmp.path(), meta.permissions())
                .map_err(|e| Error::io(&self.path, e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;
        debug!("saved {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }

    fn create_empty(&self) -> Result<()> {
        let dir = self.dir();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        fs::write(&self.path, "[]").map_err(|e| Error::io(&self.path, e))?;
        info!("created empty task file {}", self.path.display());
        Ok(())
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    use crate::model::Status;

    fn make_task(id: u32, name: &str, status: Status) -> Task {
        let now = "2025-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        Task {
            status,
            ..Task::new(id, name, now)
        }
    }

    #[test]
    fn load_missing_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(dir.path());
        assert!(!store.path().exists());

        let tasks = store.load().unwrap();
        assert!(tasks.is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn load_missing_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested").join("tasks.json"));
        assert!(store.load().unwrap().is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn load_malformed_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(dir.path());
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(Error::Decode { .. })));
    }

    #[test]
    fn load_object_instead_of_array_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(dir.path());
        fs::write(store.path(), r#"{"tasks": []}"#).unwrap();
        assert!(matches!(store.load(), Err(Error::Decode { .. })));
    }

    #[test]
    fn load_unknown_status_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(dir.path());
        fs::write(
            store.path(),
            r#"[{"id":1,"name":"x","status":"blocked","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        assert!(matches!(store.load(), Err(Error::Decode { .. })));
    }

    #[test]
    fn load_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        assert!(matches!(store.load(), Err(Error::Io { .. })));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(dir.path());
        let tasks = vec![
            make_task(1, "first", Status::Todo),
            make_task(2, "second", Status::InProgress),
            make_task(3, "third", Status::Done),
        ];
        store.save(&tasks).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, tasks);

        store.save(&loaded).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), first);
    }

    #[test]
    fn save_fully_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(dir.path());
        store
            .save(&[
                make_task(1, "a long name that takes space", Status::Todo),
                make_task(2, "another", Status::Todo),
            ])
            .unwrap();
        store.save(&[make_task(2, "b", Status::Done)]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "b");
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(dir.path());
        store.load().unwrap();
        store.save(&[make_task(1, "a", Status::Todo)]).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(paths::TASK_FILE_NAME)]);
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(dir.path());
        store.load().unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o640)).unwrap();

        store.save(&[make_task(1, "a", Status::Todo)]).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn save_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("missing").join("tasks.json"));
        assert!(matches!(
            store.save(&[make_task(1, "a", Status::Todo)]),
            Err(Error::Io { .. })
        ));
    }
}
