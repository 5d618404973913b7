//! Newline-delimited JSON sink.
//!
//! Record layout:
//! `{"level":30,"time":1700000000000,"pid":42,"ns":"app","msg":"hello"}`
//! with bindings and structured fields between `pid` and `msg`.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::level::Level;
use crate::sink::{merged, Fields, StructuredLogger};

pub struct JsonLogger<W> {
    writer: Arc<Mutex<W>>,
    min_level: Level,
    bindings: Fields,
}

impl JsonLogger<io::Stdout> {
    /// Write to standard output.
    pub fn stdout(min_level: Level) -> Self {
        Self::new(io::stdout(), min_level)
    }
}

impl<W: Write + Send + 'static> JsonLogger<W> {
    /// Records below `min_level` are dropped.
    pub fn new(writer: W, min_level: Level) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            min_level,
            bindings: Fields::new(),
        }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    fn render(&self, level: Level, fields: Fields, message: &str) -> Fields {
        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let mut record = Fields::new();
        record.insert("level".into(), Value::from(level.weight()));
        record.insert("time".into(), Value::from(time));
        record.insert("pid".into(), Value::from(std::process::id()));
        record.extend(merged(&self.bindings, fields));
        record.insert("msg".into(), Value::from(message));
        record
    }

    fn write_line(&self, record: &Fields) -> io::Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        writer.write_all(&line)?;
        writer.flush()
    }
}

impl<W: Write + Send + 'static> StructuredLogger for JsonLogger<W> {
    fn child(&self, bindings: Fields) -> Arc<dyn StructuredLogger> {
        Arc::new(Self {
            writer: Arc::clone(&self.writer),
            min_level: self.min_level,
            bindings: merged(&self.bindings, bindings),
        })
    }

    fn log(&self, level: Level, fields: Fields, message: &str) {
        if level < self.min_level {
            return;
        }
        let record = self.render(level, fields, message);
        if let Err(e) = self.write_line(&record) {
            ::tracing::warn!(error = %e, "Failed to write log record");
        }
    }
}

impl<W> fmt::Debug for JsonLogger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonLogger")
            .field("min_level", &self.min_level)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn lines(&self) -> Vec<Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

    #[test]
    fn test_record_layout() {
        let buffer = Buffer::default();
        let logger = JsonLogger::new(buffer.clone(), Level::Debug);
        let mut bindings = Fields::new();
        bindings.insert("ns".into(), json!("app"));
        let child = logger.child(bindings);

        let mut fields = Fields::new();
        fields.insert("user".into(), json!(7));
        child.warn(fields, "careful");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        let record = &lines[0];
        assert_eq!(record["level"], 40);
        assert_eq!(record["ns"], "app");
        assert_eq!(record["user"], 7);
        assert_eq!(record["msg"], "careful");
        assert!(record["time"].as_u64().unwrap() > 0);
        assert!(record.get("pid").is_some());
    }

    #[test]
    fn test_drops_records_below_min_level() {
        let buffer = Buffer::default();
        let logger = JsonLogger::new(buffer.clone(), Level::Info);
        logger.debug(Fields::new(), "hidden");
        logger.trace(Fields::new(), "hidden");
        logger.info(Fields::new(), "shown");
        logger.fatal(Fields::new(), "shown");

        let levels: Vec<u64> = buffer.lines().iter().map(|r| r["level"].as_u64().unwrap()).collect();
        assert_eq!(levels, vec![30, 60]);
    }

    #[test]
    fn test_child_does_not_change_parent() {
        let buffer = Buffer::default();
        let logger = JsonLogger::new(buffer.clone(), Level::Trace);
        let mut bindings = Fields::new();
        bindings.insert("ns".into(), json!("child"));
        let _child = logger.child(bindings);
        logger.info(Fields::new(), "root");

        let lines = buffer.lines();
        assert!(lines[0].get("ns").is_none());
    }
}
