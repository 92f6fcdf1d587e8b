// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, trace};

use super::StorageBackend;
use crate::error::PersistenceError;

const VALUE_EXTENSION: &str = "json";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// Stores each key as one `<encoded key>.json` file in a root directory.
///
/// The root is created lazily on the first write. Two processes sharing a root overwrite each
/// other's files; the last rename wins.
#[derive(Debug, Clone)]
pub struct FolderBackend {
    root: PathBuf,
    durability: WriteDurability,
}

impl FolderBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for_key(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{VALUE_EXTENSION}", encode_key_segment(key)))
    }
}

impl StorageBackend for FolderBackend {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for_key(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for_key(key);
        trace!(key = key, path = path.display().to_string(); "Writing key");
        write_atomic(&self.root, &path, value.as_bytes(), self.durability)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.path_for_key(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key = key, path = path.display().to_string(); "Removed key");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Io { path, source }),
        }
    }
}

/// Maps an arbitrary key to a file-name-safe segment.
///
/// Safe ASCII bytes pass through; everything else (including `~` itself, path separators,
/// `:` and non-ASCII) becomes `~hh`. Windows device names get their first byte escaped.
pub(crate) fn encode_key_segment(key: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let device = is_windows_device_name(key.split('.').next().unwrap_or(key));
    let mut out = String::with_capacity(key.len());
    for (index, &b) in key.as_bytes().iter().enumerate() {
        let safe = b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.');
        let trailing_dot = b == b'.' && index + 1 == key.len();
        let leading_dot = b == b'.' && index == 0;
        if safe && !(device && index == 0) && !trailing_dot && !leading_dot {
            out.push(b as char);
        } else {
            out.push('~');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0f) as usize] as char);
        }
    }
    if out.is_empty() {
        out.push('~');
    }
    out
}

fn is_windows_device_name(base: &str) -> bool {
    let base = base.to_ascii_uppercase();
    match base.as_str() {
        "CON" | "PRN" | "AUX" | "NUL" => true,
        _ => {
            if let Some(num) = base.strip_prefix("COM") {
                matches!(num, "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9")
            } else if let Some(num) = base.strip_prefix("LPT") {
                matches!(num, "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9")
            } else {
                false
            }
        }
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(
    root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), PersistenceError> {
    fs::create_dir_all(root).map_err(|source| PersistenceError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(PersistenceError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(parent) = path.parent() else {
        return Err(PersistenceError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };

    let Some(file_name) = path.file_name() else {
        return Err(PersistenceError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_path = parent.join(format!(
        ".reliagraph.tmp.{}.{}.{nanos}.{counter}",
        file_name.to_string_lossy(),
        std::process::id(),
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| PersistenceError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(PersistenceError::Io {
            path: tmp_path,
            source,
        });
    }

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| PersistenceError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| PersistenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| PersistenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::encode_key_segment;

    #[rstest]
    #[case("projects", "projects")]
    #[case("diagrams:1718000000000", "diagrams~3a1718000000000")]
    #[case("diagrams:a/b", "diagrams~3aa~2fb")]
    #[case("~home", "~7ehome")]
    #[case("CON", "~43ON")]
    #[case("trailing.", "trailing~2e")]
    #[case("", "~")]
    fn encodes_keys_into_safe_file_names(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(encode_key_segment(key), expected);
    }

    #[test]
    fn distinct_keys_map_to_distinct_segments() {
        let a = encode_key_segment("diagrams:x");
        let b = encode_key_segment("diagrams~3ax");
        assert_ne!(a, b);
    }
}
