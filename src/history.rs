//! UI-agnostic conversation state
//!
//! One session holds one `ConversationHistory`, ordered newest-first: the
//! head of the list is always the most recent entry. Entries are never
//! mutated after insertion, only removed.

/// Who produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
    Error,
}

/// One conversational turn or error record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
}

impl ChatEntry {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }
}

/// Newest-first list of chat entries for the lifetime of one session.
#[derive(Debug, Default)]
pub struct ConversationHistory {
    entries: Vec<ChatEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entries` at the head, preserving their relative order: a
    /// `[User, Assistant]` batch keeps User directly above Assistant in
    /// display order. This is the only way entries get in, so a turn and
    /// its reply always land as one atomic batch.
    pub fn prepend(&mut self, entries: Vec<ChatEntry>) {
        for entry in entries.into_iter().rev() {
            self.entries.insert(0, entry);
        }
    }

    /// Removes the entry at `index`. Out-of-bounds indices are a silent
    /// no-op; callers must only pass indices from the latest snapshot.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read-only view of the current entries, newest first.
    pub fn snapshot(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
