// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host identity used in notification messages.

use std::path::Path;

const KERNEL_HOSTNAME: &str = "/proc/sys/kernel/hostname";

/// The node name, from procfs, then `$HOSTNAME`, then `localhost`.
pub fn hostname() -> String {
    read_trimmed(Path::new(KERNEL_HOSTNAME))
        .or_else(|| non_empty_env("HOSTNAME"))
        .unwrap_or_else(|| "localhost".to_string())
}

/// The invoking user, from `$USER` or `$LOGNAME`.
pub fn username() -> String {
    non_empty_env("USER")
        .or_else(|| non_empty_env("LOGNAME"))
        .unwrap_or_else(|| "tempwatch".to_string())
}

fn read_trimmed(path: &Path) -> Option<String> {
    let s = std::fs::read_to_string(path).ok()?;
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_never_empty() {
        assert!(!hostname().is_empty());
    }

    #[test]
    fn test_username_never_empty() {
        assert!(!username().is_empty());
    }

    #[test]
    fn test_read_trimmed_missing() {
        assert_eq!(read_trimmed(Path::new("/nonexistent/hostname")), None);
    }
}
