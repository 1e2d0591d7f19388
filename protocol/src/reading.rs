use crate::kind::MeasurementKind;
use serde::{Serialize, Serializer};

/// A single value reported by the device.
///
/// Serializes as the bare value string, the kind is implied by the store it
/// lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    kind: MeasurementKind,
    value: String,
}

impl Reading {
    /// Decodes a reply line, keeping at most [`MeasurementKind::max_reading_len`]
    /// characters of it.
    pub fn from_line(kind: MeasurementKind, line: &str) -> Self {
        let value = line
            .trim_end_matches(['\r', '\n'])
            .chars()
            .take(kind.max_reading_len())
            .collect();

        Self { kind, value }
    }

    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl core::fmt::Display for Reading {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.value)
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}
