//! Resolution of the task file location.
//!
//! The file lives in the current working directory under a fixed name unless
//! the caller supplies an explicit path (the `--file` option or the
//! `TASK_CLI_FILE` environment variable, both handled by clap).

use std::io;
use std::path::{Path, PathBuf};

/// File name of the task store inside its directory.
pub const TASK_FILE_NAME: &str = "task_list.json";

/// Environment variable that overrides the task file path.
pub const TASK_FILE_ENV: &str = "TASK_CLI_FILE";

/// `dir/task_list.json`.
pub fn task_file_in(dir: &Path) -> PathBuf {
    dir.join(TASK_FILE_NAME)
}

/// Use `explicit` when given, else `task_list.json` in the current directory.
pub fn resolve_task_file(explicit: Option<PathBuf>) -> io::Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p),
        None => Ok(task_file_in(&std::env::current_dir()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_fixed() {
        assert_eq!(
            task_file_in(Path::new("/work")),
            PathBuf::from("/work/task_list.json")
        );
    }

    #[test]
    fn default_is_in_cwd() {
        let path = resolve_task_file(None).unwrap();
        assert_eq!(path, std::env::current_dir().unwrap().join(TASK_FILE_NAME));
    }

    #[test]
    fn explicit_path_wins() {
        let path = resolve_task_file(Some(PathBuf::from("/tmp/other.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/other.json"));
    }
}
