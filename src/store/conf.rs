// src/store/conf.rs

//! Process configuration trees and the deep-merge that combines them.
//!
//! Configuration files are JSON objects with one extension: lines whose
//! trimmed content starts with `#` are stripped before parsing. Only
//! whole-line comments are supported; an inline trailing comment on a data
//! line breaks JSON parsing (documented limitation).

use serde::Serialize;
use serde_json::{Map, Value};

/// A configuration object for one process name.
///
/// A thin typed wrapper over a JSON object with "missing key behaves as
/// absent" accessors, so callers never reach through raw `Value` trees.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration file's text: strip whole-line `#` comments,
    /// then JSON-parse the remainder. The top level must be an object.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let stripped = strip_comments(text);
        let map: Map<String, Value> = serde_json::from_str(&stripped)?;
        Ok(Self(map))
    }

    /// Deep-merge `fragment` into `self`.
    ///
    /// For every key in the fragment:
    /// - nested object: recursively merged into the (possibly newly created)
    ///   nested object; a non-object base value at that key is replaced by an
    ///   empty object first;
    /// - `null`: the key is removed from the base (no error if absent);
    /// - anything else: set/overwrite wholesale. Lists are replaced, never
    ///   merged element-wise.
    pub fn merge_fragment(&mut self, fragment: Config) {
        merge_into(&mut self.0, fragment.0);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a dotted path, descending through nested objects.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path)?.as_str()
    }

    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get_path(path)?.as_u64()
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get_path(path)?.as_bool()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn merge_into(base: &mut Map<String, Value>, fragment: Map<String, Value>) {
    for (key, value) in fragment {
        match value {
            Value::Null => {
                base.remove(&key);
            }
            Value::Object(frag_obj) => {
                let slot = base.entry(key).or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(base_obj) = slot {
                    merge_into(base_obj, frag_obj);
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

/// Drop every line whose trimmed content starts with `#`.
fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}
