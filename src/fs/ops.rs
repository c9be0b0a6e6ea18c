//! Blocking mutation primitives.
//!
//! Called from `spawn_blocking` by [`LocalFileSystem`](super::LocalFileSystem);
//! every function maps `io::Error` into [`FsError`] against the path that failed.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{FsError, Mutation};

pub fn apply(mutation: &Mutation) -> Result<(), FsError> {
    debug!("Applying {}: {:?}", mutation.label(), mutation);
    match mutation {
        Mutation::CreateDirectory(path) => create_directory(path),
        Mutation::CreateFile(path) => create_file(path),
        Mutation::Rename { from, to } => rename(from, to),
        Mutation::MoveOrCopy { from, to, is_move } => move_or_copy(from, to, *is_move),
        Mutation::Delete { path, is_dir } => delete(path, *is_dir),
    }
}

pub fn create_directory(path: &Path) -> Result<(), FsError> {
    fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
}

/// Create an empty file. Fails if it already exists rather than truncating.
pub fn create_file(path: &Path) -> Result<(), FsError> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| FsError::from_io(path, e))
}

pub fn rename(from: &Path, to: &Path) -> Result<(), FsError> {
    if to.exists() {
        return Err(FsError::AlreadyExists(to.to_path_buf()));
    }
    fs::rename(from, to).map_err(|e| FsError::from_io(from, e))
}

/// Copy (or move) `from` to `to`. When `to` is an existing directory the
/// entry lands inside it under its own name.
pub fn move_or_copy(from: &Path, to: &Path, is_move: bool) -> Result<(), FsError> {
    let dest = resolve_destination(from, to)?;
    if dest.exists() {
        return Err(FsError::AlreadyExists(dest));
    }
    let from_meta = fs::metadata(from).map_err(|e| FsError::from_io(from, e))?;
    if from_meta.is_dir() && dest.starts_with(from) {
        return Err(FsError::InvalidArgument(format!(
            "cannot copy {} into itself",
            from.display()
        )));
    }

    if is_move {
        match fs::rename(from, &dest) {
            Ok(()) => return Ok(()),
            // Typically a cross-device move; fall through to copy + remove.
            Err(e) => warn!("rename {} failed ({e}), copying instead", from.display()),
        }
    }

    if from_meta.is_dir() {
        copy_dir_recursive(from, &dest)?;
    } else {
        fs::copy(from, &dest).map_err(|e| FsError::from_io(from, e))?;
    }

    if is_move {
        delete(from, from_meta.is_dir())?;
    }
    Ok(())
}

pub fn delete(path: &Path, is_dir: bool) -> Result<(), FsError> {
    let result = if is_dir {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| FsError::from_io(path, e))
}

fn resolve_destination(from: &Path, to: &Path) -> Result<PathBuf, FsError> {
    if to.is_dir() {
        let name = from
            .file_name()
            .ok_or_else(|| FsError::InvalidArgument(format!("no file name in {}", from.display())))?;
        Ok(to.join(name))
    } else {
        Ok(to.to_path_buf())
    }
}

fn copy_dir_recursive(from: &Path, to: &Path) -> Result<(), FsError> {
    fs::create_dir(to).map_err(|e| FsError::from_io(to, e))?;
    let entries = fs::read_dir(from).map_err(|e| FsError::from_io(from, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FsError::from_io(from, e))?;
        let src = entry.path();
        let dest = to.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| FsError::from_io(&src, e))?;
        if file_type.is_dir() {
            copy_dir_recursive(&src, &dest)?;
        } else {
            fs::copy(&src, &dest).map_err(|e| FsError::from_io(&src, e))?;
        }
    }
    Ok(())
}
