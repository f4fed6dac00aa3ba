//! Short user-facing notices, logged as they are raised.

use std::fmt;

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
}

impl Level {
    fn icon(&self) -> &'static str {
        match self {
            Level::Success => "✅",
            Level::Error => "❌",
            Level::Warning => "⚠️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    fn emit(level: Level, text: impl Into<String>) -> Self {
        let text = text.into();
        match level {
            Level::Success => info!("{}", text),
            Level::Error => error!("{}", text),
            Level::Warning => warn!("{}", text),
        }
        Self { level, text }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.icon(), self.text)
    }
}

pub fn success(text: impl Into<String>) -> Message {
    Message::emit(Level::Success, text)
}

pub fn error(text: impl Into<String>) -> Message {
    Message::emit(Level::Error, text)
}

pub fn warning(text: impl Into<String>) -> Message {
    Message::emit(Level::Warning, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_icon() {
        assert_eq!(success("Booked").to_string(), "✅ Booked");
        assert_eq!(error("Failed").to_string(), "❌ Failed");
        assert_eq!(warning("Careful").to_string(), "⚠️ Careful");
    }

    #[test]
    fn test_level_is_kept() {
        assert_eq!(warning("x").level, Level::Warning);
    }
}
