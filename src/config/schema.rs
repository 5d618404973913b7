//! Configuration schema definitions.
//!
//! This module defines the configuration accepted by `install`.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::level::Level;

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Pattern → level routing map.
    pub map: LevelMap,

    /// Enable every pattern in `map` on install.
    pub auto: bool,

    /// Namespaces to disable regardless of `auto` and `DEBUG`.
    pub skip: Vec<String>,

    /// Sink settings used by the binary.
    pub logger: LoggerConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            map: LevelMap::default(),
            auto: true,
            skip: Vec::new(),
            logger: LoggerConfig::default(),
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route namespaces matching `pattern` to `level`.
    pub fn with_route(mut self, pattern: impl Into<String>, level: Level) -> Self {
        self.map.insert(pattern, level);
        self
    }

    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    pub fn with_skip(mut self, namespace: impl Into<String>) -> Self {
        self.skip.push(namespace.into());
        self
    }
}

/// Output format of the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable `tracing` output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LogFormat,

    /// Records below this level are dropped by the sink.
    pub level: Level,

    /// Optional `tracing` filter directive for the subscriber
    /// (e.g. "debug_bridge=trace"). Falls back to `RUST_LOG`.
    pub filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: Level::Debug,
            filter: None,
        }
    }
}

/// Ordered pattern → level map.
///
/// Order matters: equally precise patterns are tried in the order they
/// were written, so this keeps document order instead of sorting keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMap {
    entries: Vec<(String, Level)>,
}

impl LevelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a pattern. Updating keeps the original position.
    pub fn insert(&mut self, pattern: impl Into<String>, level: Level) {
        let pattern = pattern.into();
        match self.entries.iter_mut().find(|(p, _)| *p == pattern) {
            Some(entry) => entry.1 = level,
            None => self.entries.push((pattern, level)),
        }
    }

    pub fn get(&self, pattern: &str) -> Option<Level> {
        self.entries
            .iter()
            .find(|(p, _)| p == pattern)
            .map(|(_, level)| *level)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Level)> + '_ {
        self.entries.iter().map(|(p, level)| (p.as_str(), *level))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Level)> for LevelMap {
    fn from_iter<I: IntoIterator<Item = (K, Level)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (pattern, level) in iter {
            map.insert(pattern, level);
        }
        map
    }
}

impl Serialize for LevelMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (pattern, level) in &self.entries {
            map.serialize_entry(pattern, level)?;
        }
        map.end()
    }
}

struct LevelMapVisitor;

impl<'de> Visitor<'de> for LevelMapVisitor {
    type Value = LevelMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of namespace patterns to level names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = LevelMap::new();
        while let Some((pattern, level)) = access.next_entry::<String, Level>()? {
            map.insert(pattern, level);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for LevelMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LevelMapVisitor)
    }
}
