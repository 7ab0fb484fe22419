//! Channel payload builders.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a notification hands to a channel for delivery.
///
/// Built by [`Notification::payload`](super::traits::Notification::payload)
/// with an explicit match on the channel name. The dispatcher itself never
/// looks inside a payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// A structured mail message for the mail channel family.
    Mail(MailMessage),
    /// Arbitrary structured data (database records, broadcast bodies).
    Record(Value),
    /// No channel-specific payload.
    #[default]
    Empty,
}

/// Severity level of a mail message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageLevel::Info => write!(f, "info"),
            MessageLevel::Success => write!(f, "success"),
            MessageLevel::Warning => write!(f, "warning"),
            MessageLevel::Error => write!(f, "error"),
        }
    }
}

/// Fluent builder for mail payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MailMessage {
    pub subject: Option<String>,
    pub greeting: Option<String>,
    pub intro_lines: Vec<String>,
    pub outro_lines: Vec<String>,
    pub action_text: Option<String>,
    pub action_url: Option<String>,
    pub level: MessageLevel,
    pub salutation: Option<String>,
}

impl MailMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Append an intro line. Lines added after `action` land in the outro.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        if self.action_text.is_some() {
            self.outro_lines.push(line.into());
        } else {
            self.intro_lines.push(line.into());
        }
        self
    }

    pub fn action(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.action_text = Some(text.into());
        self.action_url = Some(url.into());
        self
    }

    pub fn level(mut self, level: MessageLevel) -> Self {
        self.level = level;
        self
    }

    pub fn salutation(mut self, salutation: impl Into<String>) -> Self {
        self.salutation = Some(salutation.into());
        self
    }

    pub fn error(self) -> Self {
        self.level(MessageLevel::Error)
    }

    pub fn success(self) -> Self {
        self.level(MessageLevel::Success)
    }

    pub fn warning(self) -> Self {
        self.level(MessageLevel::Warning)
    }

    pub fn info(self) -> Self {
        self.level(MessageLevel::Info)
    }
}

/// Merge-style builder for database payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseMessage {
    pub data: Map<String, Value>,
}

impl DatabaseMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the given entries into the message data. Existing keys are
    /// overwritten by later calls.
    pub fn data(mut self, data: Map<String, Value>) -> Self {
        self.data.extend(data);
        self
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }
}
