//! # Filesystem Collaborator
//!
//! Everything the controller needs from the disk goes through the
//! [`FileSystem`] trait: listing a directory, reading a file for preview,
//! and applying a [`Mutation`]. The executor holds an `Arc<dyn FileSystem>`,
//! so tests swap in an in-memory fake while the binary uses
//! [`LocalFileSystem`].
//!
//! ```text
//! Effect::ListDirectory ─┐
//! Effect::ReadFile ──────┼──▶ FileSystem ──▶ Result<_, FsError> ──▶ Action
//! Effect::Mutate ────────┘
//! ```

mod entry;
mod local;
pub mod ops;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use entry::DirectoryEntry;
pub use local::LocalFileSystem;

/// Errors that can occur while talking to the filesystem.
/// Each variant keeps the path it failed on so the status bar can say which.
#[derive(Debug)]
pub enum FsError {
    NotFound(PathBuf),
    PermissionDenied(PathBuf),
    AlreadyExists(PathBuf),
    /// The request itself was malformed (empty name, copying a dir into itself).
    InvalidArgument(String),
    Io { path: PathBuf, source: io::Error },
}

impl FsError {
    /// Classify an `io::Error` against the path that produced it.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound(p) => write!(f, "not found: {}", p.display()),
            FsError::PermissionDenied(p) => write!(f, "permission denied: {}", p.display()),
            FsError::AlreadyExists(p) => write!(f, "already exists: {}", p.display()),
            FsError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            FsError::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A filesystem change requested from the command bar or a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateDirectory(PathBuf),
    CreateFile(PathBuf),
    Rename { from: PathBuf, to: PathBuf },
    MoveOrCopy { from: PathBuf, to: PathBuf, is_move: bool },
    Delete { path: PathBuf, is_dir: bool },
}

impl Mutation {
    /// Short verb used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Mutation::CreateDirectory(_) => "mkdir",
            Mutation::CreateFile(_) => "touch",
            Mutation::Rename { .. } => "rename",
            Mutation::MoveOrCopy { is_move: true, .. } => "move",
            Mutation::MoveOrCopy { is_move: false, .. } => "copy",
            Mutation::Delete { .. } => "delete",
        }
    }
}

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// List `path`, sorted by name. Dotfiles are skipped unless `show_hidden`.
    async fn list_directory(
        &self,
        path: &Path,
        show_hidden: bool,
    ) -> Result<Vec<DirectoryEntry>, FsError>;

    /// Read the whole file for previewing.
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Apply a mutation.
    async fn apply(&self, mutation: &Mutation) -> Result<(), FsError>;
}
