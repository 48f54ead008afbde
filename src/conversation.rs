//! Conversation Buffer
//!
//! In-memory, capacity-bounded message log for one chat session. When the log
//! grows past its capacity the first message (usually the system framing) is
//! kept together with the newest messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single (role, content) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Point-in-time view of buffer occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextSummary {
    pub message_count: usize,
    pub max_messages: usize,
    pub is_at_limit: bool,
    pub has_messages: bool,
}

/// Ordered, capacity-bounded message log.
///
/// Invariant: `len() <= capacity()` after every operation. A capacity of zero
/// retains nothing.
#[derive(Debug, Clone)]
pub struct ConversationBuffer {
    messages: Vec<Message>,
    capacity: usize,
}

impl ConversationBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message, truncating if the buffer is over capacity.
    ///
    /// With capacity > 1 and more than one message, the first message is
    /// retained along with the newest `capacity - 1`. Otherwise only the
    /// newest `capacity` messages are kept.
    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
        if self.messages.len() > self.capacity {
            self.truncate();
        }
    }

    fn truncate(&mut self) {
        let len = self.messages.len();
        if self.capacity > 1 && len > 1 {
            // Drop the middle: keep [0] and the tail of capacity - 1.
            let tail_start = len - (self.capacity - 1);
            self.messages.drain(1..tail_start);
        } else {
            self.messages.drain(..len - self.capacity);
        }
    }

    /// Copy of the full ordered history.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// The last `n` messages, or all of them if fewer exist.
    pub fn recent(&self, n: usize) -> Vec<Message> {
        let start = self.messages.len().saturating_sub(n);
        self.messages[start..].to_vec()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            message_count: self.messages.len(),
            max_messages: self.capacity,
            is_at_limit: self.messages.len() >= self.capacity,
            has_messages: !self.messages.is_empty(),
        }
    }
}
