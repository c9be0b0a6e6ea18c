use std::fs::Metadata;
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Snapshot of one directory entry at listing time.
///
/// Stale as soon as the disk changes; the controller replaces the whole
/// listing rather than patching entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
    /// `ls -l` style mode string, e.g. `drwxr-xr-x`.
    pub permissions: String,
}

impl DirectoryEntry {
    pub fn from_metadata(name: String, path: PathBuf, meta: &Metadata) -> Self {
        Self {
            name,
            path,
            is_dir: meta.is_dir(),
            size: meta.len(),
            modified: meta.modified().ok(),
            permissions: mode_string(meta),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// `modified permissions size`, as shown in the status bar.
    pub fn summary(&self) -> String {
        let modified = self
            .modified
            .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        format!("{} {} {}", modified, self.permissions, human_size(self.size))
    }
}

/// Human readable byte count (1024-based, one decimal above bytes).
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["K", "M", "G", "T", "P"];
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1}{}", UNITS[unit])
}

#[cfg(unix)]
fn mode_string(meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    let kind = if meta.is_dir() {
        'd'
    } else if meta.file_type().is_symlink() {
        'l'
    } else {
        '-'
    };
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn mode_string(meta: &Metadata) -> String {
    let kind = if meta.is_dir() { 'd' } else { '-' };
    let write = if meta.permissions().readonly() { '-' } else { 'w' };
    format!("{kind}r{write}-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0B");
        assert_eq!(human_size(1023), "1023B");
        assert_eq!(human_size(1024), "1.0K");
        assert_eq!(human_size(1536), "1.5K");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0M");
    }

    #[test]
    fn test_hidden_detection() {
        let entry = DirectoryEntry {
            name: ".git".into(),
            path: "/repo/.git".into(),
            is_dir: true,
            size: 0,
            modified: None,
            permissions: "drwxr-xr-x".into(),
        };
        assert!(entry.is_hidden());
        assert_eq!(entry.summary(), "- drwxr-xr-x 0B");
    }
}
