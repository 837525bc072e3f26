// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The append-only run log.

use crate::RecorderError;
use decision::RunRecord;
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Sink for [`RunRecord`]s, one line per run.
pub trait RunRecorder {
    /// Appends one record.
    fn record(&self, record: &RunRecord) -> Result<(), RecorderError>;

    /// The last `n` lines, oldest first.
    fn tail(&self, n: usize) -> Result<Vec<String>, RecorderError>;
}

impl<T: RunRecorder + ?Sized> RunRecorder for &T {
    fn record(&self, record: &RunRecord) -> Result<(), RecorderError> {
        (**self).record(record)
    }

    fn tail(&self, n: usize) -> Result<Vec<String>, RecorderError> {
        (**self).tail(n)
    }
}

/// Run log in a plain text file.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunRecorder for RunLog {
    fn record(&self, record: &RunRecord) -> Result<(), RecorderError> {
        let write_err = |source: io::Error| RecorderError::Write {
            path: self.path.clone(),
            source,
        };
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        // A single write keeps concurrent appenders from interleaving lines.
        f.write_all(format!("{}\n", record.to_line()).as_bytes())
            .map_err(write_err)
    }

    /// A missing log yields no lines.
    fn tail(&self, n: usize) -> Result<Vec<String>, RecorderError> {
        let f = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(RecorderError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut tail = VecDeque::with_capacity(n);
        for line in BufReader::new(f).lines() {
            let line = line.map_err(|source| RecorderError::Read {
                path: self.path.clone(),
                source,
            })?;
            if tail.len() == n {
                tail.pop_front();
            }
            tail.push_back(line);
        }
        Ok(tail.into())
    }
}

/// Run log held in memory.
#[derive(Debug, Default)]
pub struct MemoryRunLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryRunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RunRecorder for MemoryRunLog {
    fn record(&self, record: &RunRecord) -> Result<(), RecorderError> {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.to_line());
        Ok(())
    }

    fn tail(&self, n: usize) -> Result<Vec<String>, RecorderError> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        let start = lines.len().saturating_sub(n);
        Ok(lines[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decision::{Action, Decision, Timestamp};

    fn record(secs: i64, reading: i64) -> RunRecord {
        let d = Decision {
            in_warning: reading > 25,
            action: Action::None,
        };
        RunRecord::new(Timestamp::from_secs(secs), reading, 25, &d)
    }

    fn temp_log(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("tempwatch_recorder_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_append_and_tail() {
        let p = temp_log("tail");
        let log = RunLog::new(&p);
        for i in 0..8 {
            log.record(&record(1_700_000_000 + i, 20 + i)).unwrap();
        }

        let lines = log.tail(5).unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("\t23\t"));
        assert!(lines[4].contains("\t27\t"));
        let _ = std::fs::remove_file(&p);
    }

    #[test]
    fn test_tail_of_short_log() {
        let p = temp_log("short");
        let log = RunLog::new(&p);
        log.record(&record(1, 20)).unwrap();
        assert_eq!(log.tail(5).unwrap().len(), 1);
        let _ = std::fs::remove_file(&p);
    }

    #[test]
    fn test_missing_log_is_empty() {
        let log = RunLog::new(temp_log("missing"));
        assert!(log.tail(5).unwrap().is_empty());
    }

    #[test]
    fn test_unwritable_log() {
        let log = RunLog::new("/nonexistent/dir/run.log");
        assert!(matches!(
            log.record(&record(1, 20)),
            Err(RecorderError::Write { .. })
        ));
    }

    #[test]
    fn test_memory_log_tail() {
        let log = MemoryRunLog::new();
        for i in 0..3 {
            log.record(&record(i, 20)).unwrap();
        }
        assert_eq!(log.tail(2).unwrap().len(), 2);
        assert_eq!(log.tail(10).unwrap().len(), 3);
    }
}
