//! User-visible notices surfaced through the host shell.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How long the shell should keep a notice on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeDuration {
    Short,
    Long,
}

/// A short user-facing message, shown when a session cannot continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNotice {
    pub text: String,
    pub duration: NoticeDuration,
}

impl UserNotice {
    /// A briefly shown notice.
    pub fn short(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: NoticeDuration::Short,
        }
    }

    /// A notice kept on screen longer.
    pub fn long(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: NoticeDuration::Long,
        }
    }
}

impl fmt::Display for UserNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
