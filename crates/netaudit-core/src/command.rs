// ── Command results and field access ──
//
// A command run on a device yields either a parsed structured tree (when
// a device-side parser exists for it) or raw text. The two forms are
// kept behind one tagged type so extraction code states which strategy
// it is using: optional-path lookup for structured payloads, anchored
// substring extraction for raw text.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Tagged result of running one command on one device.
///
/// Serialized form matches capture files produced by the collection
/// layer: `{"type": "parsed", "output": {...}}` or
/// `{"type": "raw", "output": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "output", rename_all = "lowercase")]
pub enum CommandResult {
    /// Structured output from a device-side parser (a nested mapping).
    Parsed(Value),
    /// Plain text; fields must be pulled out by substring extraction.
    Raw(String),
}

impl CommandResult {
    /// The structured payload, if this result was parsed.
    pub fn as_parsed(&self) -> Option<&Value> {
        match self {
            Self::Parsed(v) => Some(v),
            Self::Raw(_) => None,
        }
    }

    /// The raw text, if this result was not parsed.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Parsed(_) => None,
            Self::Raw(s) => Some(s),
        }
    }
}

// ── Optional-path lookup (structured strategy) ───────────────────────

/// Walk a key path into a nested mapping.
///
/// Returns `None` as soon as any segment is missing or the current node
/// is not an object — a missing inventory field is an expected condition
/// and must never abort a run.
pub fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut node = root;
    for key in path {
        node = node.get(key)?;
    }
    Some(node)
}

/// Path lookup returning a string slice.
pub fn lookup_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(root, path).and_then(Value::as_str)
}

/// Path lookup returning an unsigned integer.
pub fn lookup_u64(root: &Value, path: &[&str]) -> Option<u64> {
    lookup(root, path).and_then(Value::as_u64)
}

// ── Anchored substring extraction (raw strategy) ─────────────────────

/// An anchor string was not found in the command output.
///
/// Raw-text extraction is inherently coupled to exact firmware wording;
/// when the wording changes, this is the distinguishable "pattern not
/// found" condition callers degrade on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("anchor {anchor:?} not found in command output")]
pub struct AnchorNotFound {
    pub anchor: String,
}

/// Extract the text between two anchor strings.
///
/// Finds the first occurrence of `left`, then the first occurrence of
/// `right` after it, and returns the slice in between. Either anchor
/// being absent is an [`AnchorNotFound`] error, never a panic.
pub fn between<'a>(text: &'a str, left: &str, right: &str) -> Result<&'a str, AnchorNotFound> {
    let start = text.find(left).ok_or_else(|| AnchorNotFound {
        anchor: left.to_owned(),
    })? + left.len();

    let end = text[start..].find(right).ok_or_else(|| AnchorNotFound {
        anchor: right.to_owned(),
    })? + start;

    Ok(&text[start..end])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_walks_nested_keys() {
        let tree = json!({"version": {"chassis": "CSR1000V", "uptime": "1 hour, 58 minutes"}});
        assert_eq!(
            lookup_str(&tree, &["version", "chassis"]),
            Some("CSR1000V")
        );
    }

    #[test]
    fn lookup_missing_segment_is_none() {
        let tree = json!({"version": {"chassis": "CSR1000V"}});
        assert_eq!(lookup(&tree, &["version", "serial"]), None);
        assert_eq!(lookup(&tree, &["inventory", "chassis"]), None);
    }

    #[test]
    fn lookup_through_non_object_is_none() {
        let tree = json!({"version": "16.11.1b"});
        assert_eq!(lookup(&tree, &["version", "uptime"]), None);
    }

    #[test]
    fn between_extracts_first_match() {
        let text = "Cisco Adaptive Security Appliance Software Version 9.12(2) \r\nmore";
        assert_eq!(
            between(text, "Software Version ", "\r\n"),
            Ok("9.12(2) ")
        );
    }

    #[test]
    fn between_missing_left_anchor_fails() {
        let err = between("no anchors here", "Software Version ", "\r\n").unwrap_err();
        assert_eq!(err.anchor, "Software Version ");
    }

    #[test]
    fn between_missing_right_anchor_fails() {
        let err = between("Software Version 9.12(2)", "Software Version ", "\r\n").unwrap_err();
        assert_eq!(err.anchor, "\r\n");
    }

    #[test]
    fn command_result_capture_format_round_trips() {
        let raw: CommandResult =
            serde_json::from_str(r#"{"type":"raw","output":"some text"}"#).expect("valid capture");
        assert_eq!(raw.as_raw(), Some("some text"));

        let parsed: CommandResult =
            serde_json::from_str(r#"{"type":"parsed","output":{"version":{}}}"#)
                .expect("valid capture");
        assert!(parsed.as_parsed().is_some());
    }
}
