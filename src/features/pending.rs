//! Open key presses awaiting their release.
//!
//! Presses are stacked per key so a release always closes the most recently opened press
//! of that key. Auto-repeat fires several keydowns before a single keyup; the newest press
//! is the one that closes first. Sequence ids record insertion order, which is the only
//! tie-break between presses sharing a timestamp.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingKeyDown<'a> {
    pub sequence_id: u64,
    pub key: &'a str,
    pub down_timestamp_ms: f64,
}

#[derive(Debug, Default)]
pub struct PendingPresses<'a> {
    by_key: HashMap<&'a str, Vec<PendingKeyDown<'a>>>,
    next_sequence_id: u64,
}

impl<'a> PendingPresses<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a press; returns its sequence id
    pub fn open(&mut self, key: &'a str, down_timestamp_ms: f64) -> u64 {
        let sequence_id = self.next_sequence_id;
        self.next_sequence_id += 1;
        self.by_key.entry(key).or_default().push(PendingKeyDown {
            sequence_id,
            key,
            down_timestamp_ms,
        });
        sequence_id
    }

    /// Remove and return the newest open press of `key`, if any.
    pub fn close(&mut self, key: &str) -> Option<PendingKeyDown<'a>> {
        let stack = self.by_key.get_mut(key)?;
        let press = stack.pop();
        if stack.is_empty() {
            self.by_key.remove(key);
        }
        press
    }

    /// Presses still open
    pub fn len(&self) -> usize {
        self.by_key.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
