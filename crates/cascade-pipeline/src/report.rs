//! Error aggregation
//!
//! Merges validation messages into one [`ErrorReport`]: empty messages are
//! dropped, order is preserved, repeated text is kept once, and the result
//! is rendered as a header line followed by one bullet per message.

use std::fmt;

use ahash::AHashSet;

use crate::message::ValidationMessage;

/// Report layout
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportFormat {
    /// First line of a non-empty report
    pub header: String,
    /// Prefix of each message line
    pub bullet: String,
    /// Line separator
    pub separator: String,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            header: "ERROR:".to_string(),
            bullet: " • ".to_string(),
            separator: "\n".to_string(),
        }
    }
}

/// Aggregated validation failures for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorReport {
    messages: Vec<ValidationMessage>,
    combined: String,
}

impl ErrorReport {
    /// Build a report from messages in argument declaration order
    pub fn aggregate<'a, I>(messages: I, format: &ReportFormat) -> Self
    where
        I: IntoIterator<Item = &'a ValidationMessage>,
    {
        let mut seen = AHashSet::new();
        let messages: Vec<ValidationMessage> = messages
            .into_iter()
            .filter(|m| !m.is_valid())
            .filter(|m| seen.insert(m.text.clone()))
            .cloned()
            .collect();

        let combined = if messages.is_empty() {
            String::new()
        } else {
            let mut text = format.header.clone();
            for message in &messages {
                text.push_str(&format.separator);
                text.push_str(&format.bullet);
                text.push_str(&message.text);
            }
            text
        };

        Self { messages, combined }
    }

    /// Check if there are no errors
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of distinct error messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// The non-empty, deduplicated messages in order
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// Message texts in order
    pub fn ordered_messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|m| m.text.as_str())
    }

    /// Rendered report, `""` when there are no errors
    pub fn combined_text(&self) -> &str {
        &self.combined
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.combined)
    }
}
