//! Schedule events.
//!
//! A clan's schedule is one ordered list of events that is always read and
//! written as a whole. Beyond `title` and `time` an event is opaque: every
//! other field the caller submits is carried along untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A calendar entry shown to members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub title: String,
    pub time: String,
    /// Remaining fields of the submitted object, kept verbatim.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// Why a submitted event was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event {index}: expected a JSON object")]
    NotAnObject { index: usize },

    #[error("event {index}: missing or blank field `{field}`")]
    MissingField { index: usize, field: &'static str },
}

impl ScheduleEvent {
    pub fn new(title: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
            metadata: Map::new(),
        }
    }

    /// Attach an extra field.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Validate one raw event. `index` is its position in the submitted list.
    pub fn from_value(index: usize, value: Value) -> Result<Self, EventError> {
        let Value::Object(mut fields) = value else {
            return Err(EventError::NotAnObject { index });
        };

        let title = take_text(&mut fields, "title")
            .ok_or(EventError::MissingField { index, field: "title" })?;
        let time = take_text(&mut fields, "time")
            .ok_or(EventError::MissingField { index, field: "time" })?;

        Ok(Self {
            title,
            time,
            metadata: fields,
        })
    }

    /// Validate a whole submitted list. Fails on the first bad entry.
    pub fn validate_all(values: Vec<Value>) -> Result<Vec<Self>, EventError> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Self::from_value(index, value))
            .collect()
    }
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.shift_remove(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_keeps_metadata() {
        let event = ScheduleEvent::from_value(
            0,
            json!({"title": "Siege", "time": "2024-01-06T20:00:00Z", "location": "North gate"}),
        )
        .unwrap();

        assert_eq!(event.title, "Siege");
        assert_eq!(event.metadata.get("location"), Some(&json!("North gate")));
        assert!(!event.metadata.contains_key("title"));
    }

    #[test]
    fn test_from_value_rejects_blank_title() {
        let err = ScheduleEvent::from_value(3, json!({"title": "  ", "time": "20:00"})).unwrap_err();
        assert_eq!(
            err,
            EventError::MissingField {
                index: 3,
                field: "title"
            }
        );
        assert_eq!(err.to_string(), "event 3: missing or blank field `title`");
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = ScheduleEvent::from_value(1, json!("raid night")).unwrap_err();
        assert_eq!(err, EventError::NotAnObject { index: 1 });
    }

    #[test]
    fn test_validate_all_reports_first_violation() {
        let err = ScheduleEvent::validate_all(vec![
            json!({"title": "A", "time": "1"}),
            json!({"title": "B"}),
            json!(42),
        ])
        .unwrap_err();
        assert_eq!(err, EventError::MissingField { index: 1, field: "time" });
    }

    #[test]
    fn test_serialization_flattens_metadata() {
        let event = ScheduleEvent::new("War", "Sat 20:00").with_metadata("notes", json!("bring food"));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({"title": "War", "time": "Sat 20:00", "notes": "bring food"})
        );
    }
}
