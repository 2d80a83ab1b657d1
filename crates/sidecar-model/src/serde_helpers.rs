//! Lenient field decoding for the contract tree
//!
//! Optional contract fields are read the way the dashboard reads them: a
//! value of the wrong JSON type is treated as absent rather than failing
//! the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) mod number {
    use super::*;

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(Value::as_f64))
    }
}

pub(crate) mod flag {
    use super::*;

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(Value::as_bool))
    }
}

pub(crate) mod text {
    use super::*;

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(Value::as_str).map(str::to_owned))
    }
}

/// Required identifiers and names; non-strings collapse to `""`.
pub(crate) mod required_text {
    use super::*;

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::number::deserialize")]
        progress: Option<f64>,
        #[serde(default, deserialize_with = "super::flag::deserialize")]
        enabled: Option<bool>,
        #[serde(default, deserialize_with = "super::text::deserialize")]
        note: Option<String>,
        #[serde(default, deserialize_with = "super::required_text::deserialize")]
        id: String,
    }

    #[test]
    fn wrong_types_become_absent() {
        let probe: Probe = serde_json::from_str(
            r#"{"progress": "40", "enabled": "false", "note": 7, "id": null}"#,
        )
        .unwrap();
        assert_eq!(probe.progress, None);
        assert_eq!(probe.enabled, None);
        assert_eq!(probe.note, None);
        assert_eq!(probe.id, "");
    }

    #[test]
    fn well_typed_values_pass_through() {
        let probe: Probe = serde_json::from_str(
            r#"{"progress": 12.5, "enabled": false, "note": "ok", "id": "p1"}"#,
        )
        .unwrap();
        assert_eq!(probe.progress, Some(12.5));
        assert_eq!(probe.enabled, Some(false));
        assert_eq!(probe.note.as_deref(), Some("ok"));
        assert_eq!(probe.id, "p1");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.progress, None);
        assert_eq!(probe.id, "");
    }
}
