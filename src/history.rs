//! Sent-frame history for debugging and diagnostics.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::frame::Frame;

/// A frame handed to the transport.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub operation: String,
    pub group: Option<u8>,
    pub frame: Frame,
    /// Seconds since history creation
    pub timestamp: f64,
}

/// Tracks the frames a controller sent.
#[derive(Debug, Clone)]
pub struct FrameHistory {
    per_operation: HashMap<String, usize>,
    sent: usize,
    last_error: Option<String>,
    start_time: Instant,
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl Default for FrameHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHistory {
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    pub fn new() -> Self {
        Self {
            per_operation: HashMap::new(),
            sent: 0,
            last_error: None,
            start_time: Instant::now(),
            entries: Vec::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::new()
        }
    }

    pub fn record(&mut self, operation: &str, group: Option<u8>, frame: Frame) {
        *self.per_operation.entry(operation.to_string()).or_default() += 1;
        self.sent += 1;

        self.entries.push(HistoryEntry {
            operation: operation.to_string(),
            group,
            frame,
            timestamp: self.start_time.elapsed().as_secs_f64(),
        });

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn record_error(&mut self, error: &str) {
        self.last_error = Some(error.to_string());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Frames sent since creation (or the last clear), including evicted ones.
    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.per_operation.clear();
        self.entries.clear();
        self.sent = 0;
        self.last_error = None;
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            frames_sent: self.sent,
            per_operation: self.per_operation.clone(),
            total_entries: self.entries.len(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Summary of frame history for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub frames_sent: usize,
    pub per_operation: HashMap<String, usize>,
    pub total_entries: usize,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandSpec;

    #[test]
    fn test_record_frame() {
        let mut history = FrameHistory::new();
        history.record("on", Some(1), Frame::encode(CommandSpec::Opcode(0x45)));

        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].operation, "on");
        assert_eq!(history.summary().per_operation.get("on"), Some(&1));
    }

    #[test]
    fn test_record_error() {
        let mut history = FrameHistory::new();
        history.record_error("Network unreachable");
        assert_eq!(history.last_error(), Some("Network unreachable"));
    }

    #[test]
    fn test_max_entries() {
        let mut history = FrameHistory::with_max_entries(2);
        for i in 0..5 {
            history.record("disco", None, Frame::encode(CommandSpec::Opcode(i)));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.sent(), 5);
        assert_eq!(history.entries()[1].frame.as_bytes()[0], 4);
    }

    #[test]
    fn test_clear() {
        let mut history = FrameHistory::new();
        history.record("off", None, Frame::encode(CommandSpec::Opcode(0x41)));
        history.record_error("boom");
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.sent(), 0);
        assert_eq!(history.last_error(), None);
    }
}
