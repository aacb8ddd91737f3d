// src/capture.rs
//! Bounded capture of DLL log callback output.
//!
//! The nrfjprog DLL reports diagnostics through a log callback that may fire
//! many times per operation, sometimes from the DLL's own worker thread. The
//! binding collects those lines here and attaches them to the next error as
//! its `output` field.
//!
//! # Design
//!
//! - **Bounded memory**: fixed line count, fixed bytes per line
//! - **FIFO eviction**: the oldest line is dropped first, the lines closest
//!   to the failure survive
//! - **RwLock-based**: recording takes the write lock, rendering the read lock;
//!   a poisoned lock is recovered rather than propagated
//!
//! # Example
//!
//! ```rust
//! use nrfjprog_errors::{CaptureConfig, LogCapture};
//!
//! let capture = LogCapture::new(CaptureConfig { max_lines: 2, max_line_bytes: 64 });
//! capture.record("Opening J-Link");
//! capture.record("Connecting to target");
//! capture.record("Target voltage too low\n");
//!
//! assert_eq!(capture.output(), "Connecting to target\nTarget voltage too low");
//! assert_eq!(capture.eviction_count(), 1);
//! ```

use crate::convenience::sanitize_line;
use crate::logging::floor_char_boundary;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Sizing for a [`LogCapture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Lines kept before the oldest is evicted. Clamped to at least 1.
    pub max_lines: usize,
    /// Bytes kept per line; longer lines are cut on a char boundary.
    pub max_line_bytes: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_lines: 256,
            max_line_bytes: 512,
        }
    }
}

/// Fixed-size ring of lines, allocated once.
struct Ring {
    slots: Box<[Option<Arc<str>>]>,
    /// Write position
    tail: usize,
    /// Oldest entry
    head: usize,
    len: usize,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            tail: 0,
            head: 0,
            len: 0,
        }
    }

    /// Push a line, returning `true` if an older line was evicted.
    fn push(&mut self, line: Arc<str>) -> bool {
        let evicted = self.slots[self.tail].replace(line).is_some();
        self.tail = (self.tail + 1) % self.slots.len();

        if self.len < self.slots.len() {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % self.slots.len();
        }

        evicted
    }

    /// Oldest to newest.
    fn iter(&self) -> impl Iterator<Item = &str> {
        let (head, cap) = (self.head, self.slots.len());
        (0..self.len).filter_map(move |i| self.slots[(head + i) % cap].as_deref())
    }

    fn render(&self) -> String {
        let lines: SmallVec<[&str; 16]> = self.iter().collect();
        lines.join("\n")
    }

    fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }
}

/// Collects DLL log lines for attachment to the next [`BindingError`](crate::BindingError).
///
/// Cloning is cheap and shares the same buffer, so one handle can live in the
/// DLL callback while another is passed to [`check_vendor`](crate::check_vendor).
#[derive(Clone)]
pub struct LogCapture {
    ring: Arc<RwLock<Ring>>,
    config: CaptureConfig,
    evictions: Arc<AtomicU64>,
}

impl LogCapture {
    /// Create an empty capture.
    pub fn new(config: CaptureConfig) -> Self {
        let config = CaptureConfig {
            max_lines: config.max_lines.max(1),
            ..config
        };
        Self {
            ring: Arc::new(RwLock::new(Ring::new(config.max_lines))),
            config,
            evictions: Arc::new(AtomicU64::new(0)),
        }
    }

    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, Ring> {
        match self.ring.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, Ring> {
        match self.ring.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Record one line from the DLL log callback.
    pub fn record(&self, line: &str) {
        let line = sanitize_line(line);
        let cut = floor_char_boundary(&line, self.config.max_line_bytes);
        let entry: Arc<str> = Arc::from(&line[..cut]);

        if self.write().push(entry) {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// All captured lines, oldest first, joined with `\n`.
    pub fn output(&self) -> String {
        self.read().render()
    }

    /// Like [`output`](Self::output), then clear the capture.
    ///
    /// Rendering and clearing happen under one lock, so a line recorded
    /// concurrently lands either in the result or in the next capture.
    pub fn take_output(&self) -> String {
        let mut ring = self.write();
        let output = ring.render();
        ring.clear();
        output
    }

    /// Number of lines currently held.
    pub fn len(&self) -> usize {
        self.read().len
    }

    /// Whether no lines are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of lines held.
    pub fn capacity(&self) -> usize {
        self.config.max_lines
    }

    /// Effective configuration (after clamping).
    pub fn config(&self) -> CaptureConfig {
        self.config
    }

    /// Lines dropped to make room since creation.
    pub fn eviction_count(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Drop all held lines. The eviction count is kept.
    pub fn clear(&self) {
        self.write().clear();
    }
}

impl Default for LogCapture {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}

impl std::fmt::Debug for LogCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogCapture")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("evictions", &self.eviction_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn empty_capture_renders_empty() {
        let capture = LogCapture::default();
        assert!(capture.is_empty());
        assert_eq!(capture.output(), "");
        assert_eq!(capture.take_output(), "");
    }

    #[test]
    fn lines_render_oldest_first() {
        let capture = LogCapture::default();
        capture.record("one");
        capture.record("two");
        assert_eq!(capture.output(), "one\ntwo");
        assert_eq!(capture.len(), 2);
    }

    #[test]
    fn fifo_eviction_when_full() {
        let capture = LogCapture::new(CaptureConfig { max_lines: 3, max_line_bytes: 64 });
        for i in 0..5 {
            capture.record(&format!("line {i}"));
        }
        assert_eq!(capture.len(), 3);
        assert_eq!(capture.eviction_count(), 2);
        assert_eq!(capture.output(), "line 2\nline 3\nline 4");
    }

    #[test]
    fn zero_lines_is_clamped() {
        let capture = LogCapture::new(CaptureConfig { max_lines: 0, max_line_bytes: 64 });
        assert_eq!(capture.capacity(), 1);
        capture.record("a");
        capture.record("b");
        assert_eq!(capture.output(), "b");
    }

    #[test]
    fn long_lines_are_cut_on_char_boundary() {
        let capture = LogCapture::new(CaptureConfig { max_lines: 4, max_line_bytes: 5 });
        capture.record("abcdefgh");
        capture.record("aйй");
        assert_eq!(capture.output(), "abcde\naйй");

        capture.clear();
        capture.record("ййй");
        assert_eq!(capture.output(), "йй");
    }

    #[test]
    fn terminal_sequences_keep_the_log_text() {
        let capture = LogCapture::default();
        capture.record("\u{1b}[2KProgramming failed at 0x1000");
        capture.record("\u{1b}[Jcould not connect");
        capture.record("ESC\u{1b} then verify error at page 4");
        assert_eq!(
            capture.output(),
            "Programming failed at 0x1000\ncould not connect\nESC? then verify error at page 4"
        );
    }

    #[test]
    fn take_output_clears_but_keeps_evictions() {
        let capture = LogCapture::new(CaptureConfig { max_lines: 1, max_line_bytes: 64 });
        capture.record("first");
        capture.record("second");
        assert_eq!(capture.take_output(), "second");
        assert!(capture.is_empty());
        assert_eq!(capture.eviction_count(), 1);

        capture.record("third");
        assert_eq!(capture.output(), "third");
    }

    #[test]
    fn clones_share_the_buffer() {
        let capture = LogCapture::default();
        let callback_side = capture.clone();
        callback_side.record("from callback");
        assert_eq!(capture.output(), "from callback");
    }

    #[test]
    fn concurrent_recording_is_bounded() {
        let capture = LogCapture::new(CaptureConfig { max_lines: 32, max_line_bytes: 64 });
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let capture = capture.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        capture.record(&format!("t{t} #{i}"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(capture.len(), 32);
        assert_eq!(capture.eviction_count(), 400 - 32);
    }
}
