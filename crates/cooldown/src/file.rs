// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! File-backed store: the key is a path and the timestamp is its mtime.
//!
//! Reading uses only the modification time, so a notify file maintained
//! with plain `touch` keeps working. Writing replaces the file atomically:
//!
//! ```text
//! write "<secs>\n" → .<name>.<pid>.tmp   set mtime = now   rename → <name>
//! ```
//!
//! A reader therefore sees either the old file or the new one, never a
//! half-written state.

use crate::{CooldownStore, StoreError};
use decision::Timestamp;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Cooldown store keyed by filesystem path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCooldownStore;

impl FileCooldownStore {
    pub fn new() -> Self {
        Self
    }

    fn write_atomic(path: &Path, now: Timestamp) -> io::Result<()> {
        let name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "notify path has no file name")
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = temp_sibling(path, &name.to_string_lossy());
        let result = (|| {
            let mut f = File::create(&tmp)?;
            writeln!(f, "{}", now.as_secs())?;
            f.set_modified(now.to_system_time())?;
            f.sync_all()?;
            drop(f);
            fs::rename(&tmp, path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

fn temp_sibling(path: &Path, name: &str) -> PathBuf {
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

impl CooldownStore for FileCooldownStore {
    fn try_last_notified(&self, key: &str) -> Result<Option<Timestamp>, StoreError> {
        let read_err = |source: io::Error| StoreError::Read {
            key: key.to_string(),
            source,
        };

        let metadata = match fs::metadata(key) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_err(e)),
        };
        let modified = metadata.modified().map_err(read_err)?;
        Ok(Some(Timestamp::from_system_time(modified)))
    }

    fn mark_notified(&self, key: &str, now: Timestamp) -> Result<(), StoreError> {
        Self::write_atomic(Path::new(key), now).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })?;
        tracing::debug!(key, at = %now, "recorded notification time");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a unique, not-yet-existing path under the temp directory.
    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("tempwatch_cooldown_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.{}", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_missing_file_is_never_notified() {
        let p = temp_path("missing");
        let store = FileCooldownStore::new();
        let key = p.to_str().unwrap();
        assert!(store.try_last_notified(key).unwrap().is_none());
        assert_eq!(store.last_notified(key), Timestamp::EPOCH);
    }

    #[test]
    fn test_mark_then_read() {
        let p = temp_path("mark");
        let key = p.to_str().unwrap();
        let store = FileCooldownStore::new();
        let t = Timestamp::from_secs(1_700_000_000);

        store.mark_notified(key, t).unwrap();
        assert_eq!(store.last_notified(key), t);
        assert_eq!(fs::read_to_string(&p).unwrap().trim(), "1700000000");
        let _ = fs::remove_file(&p);
    }

    #[test]
    fn test_mark_is_idempotent() {
        let p = temp_path("idem");
        let key = p.to_str().unwrap();
        let store = FileCooldownStore::new();
        let t = Timestamp::from_secs(1_700_000_500);

        store.mark_notified(key, t).unwrap();
        store.mark_notified(key, t).unwrap();
        assert_eq!(store.last_notified(key), t);
        let _ = fs::remove_file(&p);
    }

    #[test]
    fn test_later_mark_overwrites_earlier() {
        let p = temp_path("later");
        let key = p.to_str().unwrap();
        let store = FileCooldownStore::new();

        store.mark_notified(key, Timestamp::from_secs(1_000)).unwrap();
        store.mark_notified(key, Timestamp::from_secs(2_000)).unwrap();
        assert_eq!(store.last_notified(key), Timestamp::from_secs(2_000));
        let _ = fs::remove_file(&p);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let p = temp_path("tmpclean");
        let key = p.to_str().unwrap();
        FileCooldownStore::new()
            .mark_notified(key, Timestamp::from_secs(42))
            .unwrap();
        let name = p.file_name().unwrap().to_string_lossy().into_owned();
        assert!(!temp_sibling(&p, &name).exists());
        let _ = fs::remove_file(&p);
    }

    #[test]
    fn test_touched_file_is_honoured() {
        let p = temp_path("touched");
        File::create(&p).unwrap();
        let key = p.to_str().unwrap();
        let t = FileCooldownStore::new().last_notified(key);
        let age = Timestamp::now().seconds_since(t);
        assert!((0..60).contains(&age), "mtime of a fresh file should be recent, got {age}s");
        let _ = fs::remove_file(&p);
    }

    #[test]
    fn test_write_into_unwritable_location_fails() {
        // A regular file cannot act as a parent directory.
        let parent = temp_path("not_a_dir");
        File::create(&parent).unwrap();
        let key = parent.join("notify").to_string_lossy().into_owned();
        let result = FileCooldownStore::new().mark_notified(&key, Timestamp::from_secs(1));
        assert!(matches!(result, Err(StoreError::Write { .. })));
        let _ = fs::remove_file(&parent);
    }
}
