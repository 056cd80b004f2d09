//! Validation messages

use std::fmt;

/// Message severity
///
/// Every message the pipeline emits is an error; the type exists so the
/// report format can grow other levels without changing message shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    #[default]
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
        }
    }
}

/// The outcome of validating one argument (or one group of arguments)
///
/// Empty `text` is the "valid" signal. It never reaches an error report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationMessage {
    /// Name of the argument the message is about
    pub argument: String,
    /// Message text, empty when the argument is valid
    pub text: String,
    /// Severity
    pub severity: Severity,
}

impl ValidationMessage {
    /// A "no error" message for an argument
    pub fn valid(argument: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
            text: String::new(),
            severity: Severity::Error,
        }
    }

    /// A message with fully formed text
    pub fn error(argument: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
            text: text.into(),
            severity: Severity::Error,
        }
    }

    /// A message of the form `[name] argument <phrase>`
    pub fn argument_error(argument: impl Into<String>, phrase: impl fmt::Display) -> Self {
        let argument = argument.into();
        let text = format!("[{}] argument {}", argument, phrase);
        Self::error(argument, text)
    }

    /// Check if this message signals "no error"
    pub fn is_valid(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
