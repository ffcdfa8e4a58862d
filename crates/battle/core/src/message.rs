//! Battle message log and typewriter display.
use std::collections::VecDeque;

/// Ring of the most recent battle messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLog {
    entries: VecDeque<String>,
    capacity: usize,
    pushed: u64,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
            pushed: 0,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
        self.pushed += 1;
    }

    /// Messages pushed since creation, evicted ones included.
    pub fn total(&self) -> u64 {
        self.pushed
    }

    /// Messages pushed after the first `seen`, oldest first.
    ///
    /// Lets a driver that remembers [`MessageLog::total`] stream new lines.
    /// Entries already evicted are skipped.
    pub fn since(&self, seen: u64) -> impl Iterator<Item = &str> {
        let fresh = self.pushed.saturating_sub(seen);
        let skip = self
            .entries
            .len()
            .saturating_sub(usize::try_from(fresh).unwrap_or(usize::MAX));
        self.entries.iter().skip(skip).map(String::as_str)
    }

    /// Messages from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Newest first, at most `limit`.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().take(limit).map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Text revealed a few characters per tick.
///
/// The animation gate refuses to advance while the current text is still
/// typing, so `speed` effectively paces the whole battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypewriterText {
    text: String,
    revealed: usize,
    total: usize,
    speed: u32,
}

impl TypewriterText {
    pub fn new(speed: u32) -> Self {
        Self {
            text: String::new(),
            revealed: 0,
            total: 0,
            speed,
        }
    }

    /// Replaces the text and restarts the reveal.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.total = self.text.chars().count();
        self.revealed = if self.speed == 0 { self.total } else { 0 };
    }

    pub fn tick(&mut self) {
        if self.speed == 0 {
            self.revealed = self.total;
            return;
        }
        self.revealed = self
            .revealed
            .saturating_add(self.speed as usize)
            .min(self.total);
    }

    /// Reveals the rest of the text immediately.
    pub fn skip(&mut self) {
        self.revealed = self.total;
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }

    /// The full text, typed or not.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The part revealed so far.
    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}
