use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the ordered time block list inside a [`DayRecord`]
pub const TIME_BLOCKS_FIELD: &str = "timeBlocks";
/// Key of the opaque day plan list inside a [`DayRecord`]
pub const DAY_PLAN_FIELD: &str = "dayPlan";
/// Key of the opaque custom category list inside a [`DayRecord`]
pub const CUSTOM_CATEGORIES_FIELD: &str = "customCategories";
/// Key of the save timestamp stamped by the server
pub const LAST_MODIFIED_FIELD: &str = "lastModified";

/// The JSON document stored for one calendar date.
///
/// The server only ever looks at `lastModified` and at the `startBlock` /
/// `endBlock` bounds of each time block. Every other field the client sends
/// is stored and handed back verbatim, so the record is kept as a raw JSON
/// object rather than a typed struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayRecord(Map<String, Value>);

impl Default for DayRecord {
    /// `{timeBlocks: [], dayPlan: [], customCategories: []}`
    fn default() -> Self {
        let mut fields = Map::new();
        fields.insert(TIME_BLOCKS_FIELD.to_string(), Value::Array(Vec::new()));
        fields.insert(DAY_PLAN_FIELD.to_string(), Value::Array(Vec::new()));
        fields.insert(CUSTOM_CATEGORIES_FIELD.to_string(), Value::Array(Vec::new()));
        Self(fields)
    }
}

impl DayRecord {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Raw `timeBlocks` value, if the client sent one
    pub fn time_blocks(&self) -> Option<&Value> {
        self.0.get(TIME_BLOCKS_FIELD)
    }

    /// The `lastModified` stamp, when present and a string
    pub fn last_modified(&self) -> Option<&str> {
        self.0.get(LAST_MODIFIED_FIELD).and_then(Value::as_str)
    }

    pub fn set_last_modified(&mut self, timestamp: impl Into<String>) {
        self.0
            .insert(LAST_MODIFIED_FIELD.to_string(), Value::String(timestamp.into()));
    }
}

/// One row of the day listing returned by `GET /api/days`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: String,
    /// Number of entries in `timeBlocks`
    pub block_count: usize,
    /// Tracked time, five minutes per slot
    pub total_minutes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl DaySummary {
    /// Summary reported for a stored document that could not be read
    pub fn unreadable(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            block_count: 0,
            total_minutes: 0,
            last_modified: None,
        }
    }
}

/// Body returned by successful write endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Generic error body; detail is only ever logged server side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_record_shape() {
        let value = serde_json::to_value(DayRecord::default()).unwrap();
        assert_eq!(
            value,
            json!({ "timeBlocks": [], "dayPlan": [], "customCategories": [] })
        );
    }

    #[test]
    fn test_record_keeps_unknown_fields() {
        let raw = json!({
            "timeBlocks": [{ "startBlock": 1, "endBlock": 2, "category": "work", "note": "standup" }],
            "dayPlan": ["write report"],
            "customCategories": [{ "name": "reading", "color": "#ff0" }],
            "mood": "good"
        });

        let record: DayRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.fields().get("mood"), Some(&json!("good")));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_set_last_modified() {
        let mut record = DayRecord::default();
        assert_eq!(record.last_modified(), None);

        record.set_last_modified("2024-01-01T08:00:00.000Z");
        assert_eq!(record.last_modified(), Some("2024-01-01T08:00:00.000Z"));

        record.set_last_modified("2024-01-02T08:00:00.000Z");
        assert_eq!(record.last_modified(), Some("2024-01-02T08:00:00.000Z"));
    }

    #[test]
    fn test_summary_omits_missing_last_modified() {
        let summary = DaySummary::unreadable("2024-01-01");
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({ "date": "2024-01-01", "blockCount": 0, "totalMinutes": 0 })
        );
    }

    #[test]
    fn test_response_bodies() {
        assert_eq!(
            serde_json::to_value(SuccessResponse::ok()).unwrap(),
            json!({ "success": true })
        );
        assert_eq!(
            serde_json::to_value(ErrorResponse::new("Failed to save data")).unwrap(),
            json!({ "error": "Failed to save data" })
        );
    }
}
