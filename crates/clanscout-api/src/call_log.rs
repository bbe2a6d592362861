//! Diagnostic log of outbound API calls.
//!
//! The log is purely observational: the client appends to it after each
//! attempt and never reads it back.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Response bodies are truncated to this many characters.
const SNIPPET_CHARS: usize = 100;

/// Default number of records retained.
const DEFAULT_CAPACITY: usize = 1000;

/// One attempt against the API.
#[derive(Debug, Clone, Serialize)]
pub struct ApiCallRecord {
    /// Full request URL without query string
    pub url: String,
    /// HTTP status, `None` on transport failure
    pub status: Option<u16>,
    /// Whether the attempt returned 200
    pub success: bool,
    /// Truncated response body or error message
    pub response: String,
    /// Attempt number for this call, starting at 1
    pub attempt: u32,
    /// When the attempt finished
    pub at: DateTime<Utc>,
}

impl ApiCallRecord {
    /// Build a record, truncating `response` to a short snippet.
    #[must_use]
    pub fn new(url: &str, status: Option<u16>, response: &str, attempt: u32) -> Self {
        Self {
            url: url.to_string(),
            status,
            success: status == Some(200),
            response: snippet(response),
            attempt,
            at: Utc::now(),
        }
    }
}

fn snippet(text: &str) -> String {
    if text.chars().count() > SNIPPET_CHARS {
        let head: String = text.chars().take(SNIPPET_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Bounded, thread-safe call log. Oldest records are dropped first.
#[derive(Debug)]
pub struct ApiCallLog {
    records: Mutex<VecDeque<ApiCallRecord>>,
    capacity: usize,
}

impl ApiCallLog {
    /// Create a log retaining the last 1000 records.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a log retaining at most `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY))),
            capacity: capacity.max(1),
        }
    }

    /// Append a record.
    pub fn push(&self, record: ApiCallRecord) {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Copy of all retained records, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ApiCallRecord> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Retained records that did not return 200.
    #[must_use]
    pub fn failures(&self) -> Vec<ApiCallRecord> {
        self.snapshot().into_iter().filter(|r| !r.success).collect()
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all records.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }
}

impl Default for ApiCallLog {
    fn default() -> Self {
        Self::new()
    }
}
