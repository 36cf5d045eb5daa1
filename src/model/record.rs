//! The substance record: one normalized output entry per UN number.

use serde::{Deserialize, Serialize};

/// A single extracted substance entry.
///
/// Serializes with the JSON key set consumed by downstream index tooling:
/// `number`, `description`, `class`, `classCode`, `tunnel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// UN number: exactly 4 ASCII digits, zero-padded on the left.
    #[serde(rename = "number")]
    pub identifier: String,

    /// Substance name, whitespace-normalized. May be empty.
    pub description: String,

    /// Primary hazard class. May be empty.
    #[serde(rename = "class")]
    pub classification: String,

    /// Secondary classification code (e.g. "F1"). May be empty.
    #[serde(rename = "classCode", default)]
    pub classification_code: String,

    /// Tunnel restriction code: `A`-`E`, optionally `/` and a second
    /// letter. Empty when no restriction applies.
    #[serde(rename = "tunnel")]
    pub tunnel_code: String,
}

impl Record {
    /// Create a record with the given identifier and empty fields.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: String::new(),
            classification: String::new(),
            classification_code: String::new(),
            tunnel_code: String::new(),
        }
    }

    /// File name for this record in the output directory.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = Record::new("1203");
        assert_eq!(record.identifier, "1203");
        assert!(record.description.is_empty());
        assert!(record.tunnel_code.is_empty());
    }

    #[test]
    fn test_record_file_name() {
        assert_eq!(Record::new("0004").file_name(), "0004.json");
    }

    #[test]
    fn test_record_json_keys() {
        let record = Record {
            identifier: "1203".to_string(),
            description: "PETROL".to_string(),
            classification: "3".to_string(),
            classification_code: "F1".to_string(),
            tunnel_code: "D/E".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"number\":\"1203\""));
        assert!(json.contains("\"class\":\"3\""));
        assert!(json.contains("\"classCode\":\"F1\""));
        assert!(json.contains("\"tunnel\":\"D/E\""));
        assert!(!json.contains("identifier"));
    }

    #[test]
    fn test_record_json_non_ascii_preserved() {
        let mut record = Record::new("3082");
        record.description = "UMWELTGEFÄHRDENDER STOFF, flüssig".to_string();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("UMWELTGEFÄHRDENDER STOFF, flüssig"));
        assert!(!json.contains("\\u"));
    }
}
