// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The over-temperature alert message.

/// Everything the alert template needs.
#[derive(Debug, Clone, Copy)]
pub struct Alert<'a> {
    pub reading: i64,
    pub threshold: i64,
    pub hostname: &'a str,
    /// The most recent run-log lines, oldest first.
    pub recent_log_lines: &'a [String],
    pub recipients: &'a [String],
}

/// A rendered mail message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Message {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl Message {
    /// Renders the alert for `sender`.
    pub fn render(alert: &Alert<'_>, sender: &str) -> Self {
        let subject = format!(
            "Temperature {} exceeds max (host: {})",
            alert.reading, alert.hostname
        );

        let body = format!(
            "WARNING: temperature on host {host} is currently at {reading}C which is\n\
             greater than the maximum temperature ({threshold}C).\n\
             \n\
             Last few lines of temperature log:\n\
             \n\
             {lines}\n",
            host = alert.hostname,
            reading = alert.reading,
            threshold = alert.threshold,
            lines = alert.recent_log_lines.join("\n"),
        );

        Self {
            from: sender.to_string(),
            to: alert.recipients.to_vec(),
            subject,
            body,
        }
    }

    /// Serialises as an RFC 5322 message suitable for `sendmail -t`.
    pub fn to_rfc5322(&self) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{}",
            sanitize_header(&self.from),
            sanitize_header(&self.to.join(", ")),
            sanitize_header(&self.subject),
            self.body.replace('\n', "\r\n"),
        )
    }
}

/// Header values must stay on one line.
fn sanitize_header(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
