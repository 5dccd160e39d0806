//! JSON artifacts handed from one phase to the next.
//!
//! Every artifact is written to a temporary file beside its target and then
//! renamed over it, so a failed run never leaves a half-written file.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::detection::types::PortableDetection;
use crate::detection::DetectionSet;
use crate::error::{Result, V2sError};

/// Conversion into the portable JSON representation written to artifacts.
///
/// The provided method encodes the value structurally through `Serialize`.
/// Entities with a dedicated on-disk shape override it.
pub trait ToPortable: Serialize {
    fn to_portable(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T: ToPortable> ToPortable for [T] {
    fn to_portable(&self) -> Result<Value> {
        let items = self
            .iter()
            .map(ToPortable::to_portable)
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Array(items))
    }
}

impl<T: ToPortable> ToPortable for Vec<T> {
    fn to_portable(&self) -> Result<Value> {
        self.as_slice().to_portable()
    }
}

/// Serialize `value` as pretty-printed JSON with sorted keys and atomically
/// replace `path` with it.
pub fn write_artifact<T: ToPortable + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let portable = sort_keys(value.to_portable()?);
    let text = serde_json::to_string_pretty(&portable)?;
    write_atomic(path, text.as_bytes())?;
    debug!(path = %path.display(), bytes = text.len(), "Wrote artifact");
    Ok(())
}

/// Atomically replace `path` with one line per item.
pub fn write_lines<S: AsRef<str>>(lines: &[S], path: &Path) -> Result<()> {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    write_atomic(path, text.as_bytes())
}

/// Read a detection artifact back into a [`DetectionSet`].
///
/// Every entry must carry an opacity score.
pub fn read_detections(path: &Path) -> Result<DetectionSet> {
    let entries: Vec<PortableDetection> = read_json(path)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry.into_detection(index))
        .collect()
}

/// Parse a JSON artifact. Shape errors name the offending file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| V2sError::Artifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Rebuild every object with its keys in sorted order. Holds even when
/// `serde_json` is built with `preserve_order`.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
