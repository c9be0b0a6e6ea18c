//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::action::{Action, Key, update};
use crate::core::state::App;
use crate::fs::{DirectoryEntry, FileSystem, FsError, Mutation};

/// App rooted at `/work` with `/home/user` as home, before the first resize.
pub fn test_app() -> App {
    App::new(PathBuf::from("/work"), Some(PathBuf::from("/home/user")))
}

/// A file or directory entry under `/work`.
pub fn entry(name: &str, is_dir: bool) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        path: PathBuf::from("/work").join(name),
        is_dir,
        size: if is_dir { 4096 } else { 12 },
        modified: None,
        permissions: if is_dir { "drwxr-xr-x" } else { "-rw-r--r--" }.to_string(),
    }
}

pub fn press(key: Key) -> Action {
    Action::Key(key)
}

/// Feed every character of `text` as a key press.
pub fn type_str(mut app: App, text: &str) -> App {
    for c in text.chars() {
        (app, _) = update(app, press(Key::Char(c)));
    }
    app
}

/// Complete the latest listing of `cwd` with `entries`.
pub fn loaded(app: App, entries: Vec<DirectoryEntry>) -> App {
    let cwd = app.cwd.clone();
    loaded_at(app, cwd, entries)
}

/// Complete the latest listing, whatever it asked for, as `path`.
pub fn loaded_at(app: App, path: impl Into<PathBuf>, entries: Vec<DirectoryEntry>) -> App {
    let generation = app.listing_generation;
    let (app, _) = update(
        app,
        Action::DirectoryLoaded {
            path: path.into(),
            result: Ok(entries),
            generation,
        },
    );
    app
}

/// An 80x24 app showing `entries` in `/work`.
pub fn ready_app(entries: Vec<DirectoryEntry>) -> App {
    let mut app = test_app();
    app.init();
    let (app, _) = update(
        app,
        Action::Resize {
            width: 80,
            height: 24,
        },
    );
    loaded(app, entries)
}

/// In-memory filesystem: canned listings and file contents, and a log of
/// every mutation applied.
#[derive(Default)]
pub struct FakeFileSystem {
    pub listings: HashMap<PathBuf, Vec<DirectoryEntry>>,
    pub files: HashMap<PathBuf, Vec<u8>>,
    pub applied: Mutex<Vec<Mutation>>,
    pub fail_mutations: bool,
}

impl FakeFileSystem {
    pub fn with_listing(mut self, path: &str, entries: Vec<DirectoryEntry>) -> Self {
        self.listings.insert(PathBuf::from(path), entries);
        self
    }

    pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files.insert(PathBuf::from(path), bytes.to_vec());
        self
    }
}

#[async_trait]
impl FileSystem for FakeFileSystem {
    async fn list_directory(
        &self,
        path: &Path,
        show_hidden: bool,
    ) -> Result<Vec<DirectoryEntry>, FsError> {
        let entries = self
            .listings
            .get(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))?;
        Ok(entries
            .iter()
            .filter(|e| show_hidden || !e.is_hidden())
            .cloned()
            .collect())
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    async fn apply(&self, mutation: &Mutation) -> Result<(), FsError> {
        if self.fail_mutations {
            return Err(FsError::PermissionDenied(PathBuf::from("/work")));
        }
        self.applied.lock().unwrap().push(mutation.clone());
        Ok(())
    }
}
