use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key carried by the placeholder entry older clients wrote to initialise an empty store.
pub const SENTINEL_KEY: &str = "setup";
/// Value of [`SENTINEL_KEY`] marking the placeholder entry.
pub const SENTINEL_VALUE: &str = "temp";
/// Field wrapping the playlist array in the `wrapped` record layout.
pub const WRAPPED_FIELD: &str = "playlist_data";

/// Track entry as persisted inside the shared playlist document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackEntity {
    /// Display name of the participant who submitted the track.
    pub user: String,
    /// YouTube video identifier extracted from the link.
    pub id: String,
    /// Original link as typed by the participant (absent in some older documents).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// How the playlist array is laid out inside the store record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLayout {
    /// The record is the playlist array itself.
    #[default]
    Bare,
    /// The record is an object holding the array under [`WRAPPED_FIELD`].
    Wrapped,
}

impl RecordLayout {
    /// Extract the raw playlist items from `record`, or `None` when the record does not have
    /// the shape this layout expects.
    pub fn unwrap_record(self, record: Value) -> Option<Vec<Value>> {
        match (self, record) {
            (RecordLayout::Bare, Value::Array(items)) => Some(items),
            (RecordLayout::Wrapped, Value::Object(mut fields)) => match fields.remove(WRAPPED_FIELD) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
    }

    /// Build the record written back to the store for `tracks`.
    pub fn wrap_record(self, tracks: &[TrackEntity]) -> serde_json::Result<Value> {
        let items = serde_json::to_value(tracks)?;
        Ok(match self {
            RecordLayout::Bare => items,
            RecordLayout::Wrapped => serde_json::json!({ WRAPPED_FIELD: items }),
        })
    }
}

/// Return true when `item` is the initialisation placeholder rather than a real track.
pub fn is_sentinel(item: &Value) -> bool {
    item.get(SENTINEL_KEY).and_then(Value::as_str) == Some(SENTINEL_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(user: &str, id: &str) -> TrackEntity {
        TrackEntity {
            user: user.into(),
            id: id.into(),
            link: Some(format!("https://youtu.be/{id}")),
        }
    }

    #[test]
    fn bare_layout_only_accepts_arrays() {
        let items = RecordLayout::Bare
            .unwrap_record(json!([{"user": "Alice", "id": "abc123"}]))
            .unwrap();
        assert_eq!(items.len(), 1);
        assert!(RecordLayout::Bare.unwrap_record(json!({"test": "ok"})).is_none());
    }

    #[test]
    fn wrapped_layout_reads_playlist_data_field() {
        let record = json!({"playlist_data": [{"user": "Bob", "id": "xyz"}]});
        let items = RecordLayout::Wrapped.unwrap_record(record).unwrap();
        assert_eq!(items[0]["user"], "Bob");

        assert!(RecordLayout::Wrapped.unwrap_record(json!([])).is_none());
        assert!(RecordLayout::Wrapped.unwrap_record(json!({"other": []})).is_none());
    }

    #[test]
    fn wrapped_layout_rewraps_tracks() {
        let record = RecordLayout::Wrapped
            .wrap_record(&[track("Alice", "abc123")])
            .unwrap();
        assert_eq!(
            record,
            json!({"playlist_data": [{"user": "Alice", "id": "abc123", "link": "https://youtu.be/abc123"}]})
        );
    }

    #[test]
    fn missing_link_is_tolerated_and_omitted() {
        let entity: TrackEntity = serde_json::from_value(json!({"user": "Eve", "id": "q1"})).unwrap();
        assert_eq!(entity.link, None);
        assert_eq!(serde_json::to_value(&entity).unwrap(), json!({"user": "Eve", "id": "q1"}));
    }

    #[test]
    fn sentinel_detection() {
        assert!(is_sentinel(&json!({"setup": "temp"})));
        assert!(!is_sentinel(&json!({"setup": "done"})));
        assert!(!is_sentinel(&json!({"user": "Alice", "id": "abc"})));
    }
}
