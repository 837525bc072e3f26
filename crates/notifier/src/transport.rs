// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Mail transports.

use crate::{Message, TransportError};
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default location of the local MTA's sendmail interface.
pub const DEFAULT_SENDMAIL: &str = "/usr/sbin/sendmail";

/// Upper bound on a single delivery attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers a rendered [`Message`].
///
/// Implementations must bound the time spent on a delivery and report an
/// overrun as [`TransportError::Timeout`]. They never retry.
pub trait NotificationTransport {
    fn name(&self) -> &str;

    fn send(&self, message: &Message) -> impl Future<Output = Result<(), TransportError>> + Send;
}

impl<T: NotificationTransport + ?Sized> NotificationTransport for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn send(&self, message: &Message) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).send(message)
    }
}

/// Hands messages to the local MTA via `sendmail -t -oi`.
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl SendmailTransport {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: vec!["-t".to_string(), "-oi".to_string()],
            timeout,
        }
    }

    /// Replaces the argument list passed to the program.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SENDMAIL, DEFAULT_TIMEOUT)
    }
}

impl NotificationTransport for SendmailTransport {
    fn name(&self) -> &str {
        "sendmail"
    }

    async fn send(&self, message: &Message) -> Result<(), TransportError> {
        let program = self.program.display().to_string();
        let payload = message.to_rfc5322();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TransportError::Spawn {
                program: program.clone(),
                source,
            })?;

        let exchange = async move {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(payload.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            child.wait_with_output().await
        };

        let output = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result.map_err(|source| TransportError::Io {
                program: program.clone(),
                source,
            })?,
            Err(_) => {
                return Err(TransportError::Timeout {
                    program,
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(TransportError::Rejected {
                program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::debug!(program = %program, recipients = message.to.len(), "message handed to MTA");
        Ok(())
    }
}

/// Captures messages instead of sending them; can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Message>>,
    fail: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every send fails with [`TransportError::Rejected`].
    pub fn failing() -> Self {
        let t = Self::new();
        t.set_failing(true);
        t
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl NotificationTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, message: &Message) -> Result<(), TransportError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected {
                program: "recording".to_string(),
                status: "simulated failure".to_string(),
                stderr: String::new(),
            });
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> Message {
        Message {
            from: "probe@host".into(),
            to: vec!["ops@example.com".into()],
            subject: "Temperature 30 exceeds max (host: host)".into(),
            body: "body\n".into(),
        }
    }

    #[tokio::test]
    async fn test_recording_captures() {
        let t = RecordingTransport::new();
        t.send(&message()).await.unwrap();
        assert_eq!(t.sent(), vec![message()]);
    }

    #[tokio::test]
    async fn test_recording_failure() {
        let t = RecordingTransport::failing();
        assert!(t.send(&message()).await.is_err());
        assert!(t.sent().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sendmail_success() {
        // `cat` consumes stdin and exits 0, standing in for an MTA.
        let t = SendmailTransport::new("cat", Duration::from_secs(5)).with_args(vec![]);
        t.send(&message()).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sendmail_rejected() {
        let t = SendmailTransport::new("sh", Duration::from_secs(5)).with_args(vec![
            "-c".into(),
            "cat >/dev/null; echo 'relay denied' >&2; exit 75".into(),
        ]);
        let err = t.send(&message()).await.unwrap_err();
        assert!(matches!(err, TransportError::Rejected { .. }));
        assert!(err.to_string().contains("relay denied"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sendmail_timeout() {
        let t = SendmailTransport::new("sh", Duration::from_millis(100))
            .with_args(vec!["-c".into(), "sleep 5".into()]);
        let err = t.send(&message()).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_sendmail_missing_program() {
        let t = SendmailTransport::new("/nonexistent/sendmail", DEFAULT_TIMEOUT);
        let err = t.send(&message()).await.unwrap_err();
        assert!(matches!(err, TransportError::Spawn { .. }));
    }
}
