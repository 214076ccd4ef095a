// ── Ambient temperature sources ──

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::ports::{DeviceError, EnvironmentSensor};

/// Reads `{ "<partition>": { "temperature": <number> } }` from a JSON file.
///
/// The file is re-read on every call so an external logger can keep it
/// current. Temperatures stored as numeric strings are accepted.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    path: PathBuf,
    partition: String,
}

impl ReadingStore {
    pub fn new(path: impl Into<PathBuf>, partition: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            partition: partition.into(),
        }
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    fn no_reading(&self) -> DeviceError {
        DeviceError::NoReading {
            partition: self.partition.clone(),
        }
    }
}

impl EnvironmentSensor for ReadingStore {
    fn temperature(&self) -> Result<f64, DeviceError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DeviceError::Unreachable(format!(
                    "reading store {} does not exist",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let doc: Value = serde_json::from_str(&raw)
            .map_err(|e| DeviceError::InvalidData(format!("{}: {e}", self.path.display())))?;

        let item = doc.get(&self.partition).ok_or_else(|| self.no_reading())?;
        let reading = item.get("temperature").ok_or_else(|| self.no_reading())?;
        let celsius = match reading {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| DeviceError::InvalidData(format!("temperature is not numeric: {reading}")))?;

        debug!(partition = %self.partition, celsius, "read stored temperature");
        Ok(celsius)
    }
}

/// A sensor that always reports the same temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedReading(pub f64);

impl EnvironmentSensor for FixedReading {
    fn temperature(&self) -> Result<f64, DeviceError> {
        Ok(self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store(contents: &str, partition: &str) -> (tempfile::TempDir, ReadingStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.json");
        std::fs::write(&path, contents).unwrap();
        (dir, ReadingStore::new(path, partition))
    }

    #[test]
    fn reads_numbers_and_numeric_strings() {
        let (_dir, s) = store(r#"{"home": {"temperature": 22.5}, "attic": {"temperature": "31"}}"#, "home");
        assert!((s.temperature().unwrap() - 22.5).abs() < f64::EPSILON);
        let attic = ReadingStore::new(s.path.clone(), "attic");
        assert!((attic.temperature().unwrap() - 31.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_partition_is_no_reading() {
        let (_dir, s) = store(r#"{"home": {"temperature": 22.5}}"#, "garage");
        assert_eq!(
            s.temperature().unwrap_err(),
            DeviceError::NoReading {
                partition: "garage".into()
            }
        );
    }

    #[test]
    fn missing_file_is_unreachable() {
        let s = ReadingStore::new("/nonexistent/readings.json", "home");
        assert!(matches!(s.temperature(), Err(DeviceError::Unreachable(_))));
    }

    #[test]
    fn non_numeric_reading_is_invalid() {
        let (_dir, s) = store(r#"{"home": {"temperature": true}}"#, "home");
        assert!(matches!(s.temperature(), Err(DeviceError::InvalidData(_))));
    }
}
