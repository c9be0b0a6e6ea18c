use std::path::Path;

use async_trait::async_trait;
use log::{debug, warn};

use super::{DirectoryEntry, FileSystem, FsError, Mutation, ops};

/// The real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn list_directory(
        &self,
        path: &Path,
        show_hidden: bool,
    ) -> Result<Vec<DirectoryEntry>, FsError> {
        let mut dir = tokio::fs::read_dir(path)
            .await
            .map_err(|e| FsError::from_io(path, e))?;

        let mut entries = Vec::new();
        while let Some(item) = dir
            .next_entry()
            .await
            .map_err(|e| FsError::from_io(path, e))?
        {
            let name = item.file_name().to_string_lossy().into_owned();
            if !show_hidden && name.starts_with('.') {
                continue;
            }
            let item_path = item.path();
            // Follow symlinks so a link to a directory can be entered; a
            // dangling link still gets listed from its own metadata.
            let meta = match tokio::fs::metadata(&item_path).await {
                Ok(meta) => meta,
                Err(_) => match tokio::fs::symlink_metadata(&item_path).await {
                    Ok(meta) => meta,
                    Err(e) => {
                        warn!("Skipping {}: {}", item_path.display(), e);
                        continue;
                    }
                },
            };
            entries.push(DirectoryEntry::from_metadata(name, item_path, &meta));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Listed {} ({} entries)", path.display(), entries.len());
        Ok(entries)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        tokio::fs::read(path)
            .await
            .map_err(|e| FsError::from_io(path, e))
    }

    async fn apply(&self, mutation: &Mutation) -> Result<(), FsError> {
        let mutation = mutation.clone();
        tokio::task::spawn_blocking(move || ops::apply(&mutation))
            .await
            .map_err(|e| FsError::InvalidArgument(format!("mutation task failed: {e}")))?
    }
}
