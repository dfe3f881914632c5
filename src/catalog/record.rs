//! The copilot record schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single selectable copilot record.
///
/// Records are immutable once loaded and owned by the orchestrator; the
/// selection engine only ever reads them. Fields beyond the required schema
/// (e.g. `skills`) are preserved verbatim in `extra` so that the selected
/// subset round-trips byte-for-byte through the picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Copilot {
    /// Stable identifier, non-empty and unique within a catalog.
    pub copilot_id: String,

    /// Human-readable name shown in every tier.
    pub name: String,

    /// Optional one-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Any additional fields carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Copilot {
    /// Create a record with just the required fields (mostly for tests).
    pub fn new(copilot_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            copilot_id: copilot_id.into(),
            name: name.into(),
            description: None,
            extra: Map::new(),
        }
    }

    /// Description with the conventional placeholder for missing ones.
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }

    /// Shortened id for display (first hyphen-delimited segment, or the
    /// first 8 characters).
    pub fn short_id(&self) -> &str {
        match self.copilot_id.split_once('-') {
            Some((head, _)) => head,
            None => {
                let end = self
                    .copilot_id
                    .char_indices()
                    .nth(8)
                    .map(|(i, _)| i)
                    .unwrap_or(self.copilot_id.len());
                &self.copilot_id[..end]
            }
        }
    }

    /// One display line: name, description, shortened id.
    pub fn display_line(&self, max_width: usize) -> String {
        let description = truncate(self.description_or_default(), 35);
        let line = format!("{} · {} · {}", self.name, description, self.short_id());
        truncate(&line, max_width)
    }

    /// Lowercased haystack for substring filtering.
    pub fn searchable_text(&self) -> String {
        let mut text = format!(
            "{} {} {}",
            self.name.to_lowercase(),
            self.description.as_deref().unwrap_or("").to_lowercase(),
            self.copilot_id.to_lowercase()
        );
        // Skill names ride along in `extra` and are worth matching on.
        if let Some(Value::Array(skills)) = self.extra.get("skills") {
            for skill in skills {
                if let Some(name) = skill.get("name").and_then(Value::as_str) {
                    text.push(' ');
                    text.push_str(&name.to_lowercase());
                }
            }
        }
        text
    }
}

/// Truncate to `max` characters with a trailing ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_no_description() {
        let record = Copilot::new("a1", "Alpha");
        assert_eq!(record.copilot_id, "a1");
        assert_eq!(record.name, "Alpha");
        assert_eq!(record.description, None);
        assert_eq!(record.description_or_default(), "No description");
    }

    #[test]
    fn deserializes_minimal_record() {
        let record: Copilot =
            serde_json::from_str(r#"{"copilot_id":"a1","name":"Alpha"}"#).unwrap();
        assert_eq!(record.copilot_id, "a1");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn extra_fields_round_trip() {
        let input = r#"{"copilot_id":"a1","name":"Alpha","skills":[{"name":"Forecast"}]}"#;
        let record: Copilot = serde_json::from_str(input).unwrap();
        assert!(record.extra.contains_key("skills"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::from_str::<Value>(input).unwrap());
    }

    #[test]
    fn missing_description_stays_absent_on_serialize() {
        let record = Copilot::new("a1", "Alpha");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("description"));
    }

    #[test]
    fn short_id_prefers_hyphen_segment() {
        let record = Copilot::new("1f2e3d4c-5678-90ab", "Alpha");
        assert_eq!(record.short_id(), "1f2e3d4c");
    }

    #[test]
    fn short_id_truncates_unhyphenated() {
        let record = Copilot::new("abcdefghijkl", "Alpha");
        assert_eq!(record.short_id(), "abcdefgh");
    }

    #[test]
    fn short_id_handles_short_ids() {
        let record = Copilot::new("a1", "Alpha");
        assert_eq!(record.short_id(), "a1");
    }

    #[test]
    fn display_line_contains_name_and_id() {
        let mut record = Copilot::new("a1-xyz", "Alpha");
        record.description = Some("Forecasting assistant".into());
        let line = record.display_line(80);
        assert!(line.contains("Alpha"));
        assert!(line.contains("Forecasting assistant"));
        assert!(line.contains("a1"));
    }

    #[test]
    fn display_line_truncates_to_width() {
        let mut record = Copilot::new("a1", "Alpha");
        record.description = Some("x".repeat(200));
        assert!(record.display_line(40).chars().count() <= 40);
    }

    #[test]
    fn searchable_text_includes_skill_names() {
        let record: Copilot = serde_json::from_str(
            r#"{"copilot_id":"a1","name":"Alpha","skills":[{"name":"Forecast"}]}"#,
        )
        .unwrap();
        assert!(record.searchable_text().contains("forecast"));
    }

    #[test]
    fn truncate_is_noop_when_short() {
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let out = truncate("abcdefgh", 5);
        assert_eq!(out.chars().count(), 5);
        assert!(out.ends_with('…'));
    }
}
