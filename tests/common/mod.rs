//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use debug_bridge::{JsonLogger, Level};
use serde_json::Value;

/// In-memory writer collecting JSON log lines.
#[derive(Clone, Default)]
pub struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CaptureBuffer {
    /// Parsed records written so far.
    pub fn records(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

/// A JSON sink writing into a fresh capture buffer.
pub fn capture_logger(min_level: Level) -> (Arc<JsonLogger<CaptureBuffer>>, CaptureBuffer) {
    let buffer = CaptureBuffer::default();
    (Arc::new(JsonLogger::new(buffer.clone(), min_level)), buffer)
}
