use std::collections::VecDeque;

use crate::constants::MESSAGE_HISTORY_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

impl MessageLevel {
    /// CSS class used by the message panel
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Info => "msg info",
            Self::Error => "msg error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
    pub time: String,
}

/// User-visible status history shown in the message panel
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLog {
    entries: VecDeque<Message>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::with_capacity(MESSAGE_HISTORY_LIMIT)
    }
}

impl MessageLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(MessageLevel::Info, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        leptos::logging::warn!("{text}");
        self.push(MessageLevel::Error, text);
    }

    fn push(&mut self, level: MessageLevel, text: String) {
        crate::log!("[{:?}] {}", level, text);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Message {
            level,
            text,
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
