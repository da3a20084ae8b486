use serde::Deserialize;
use serde_json::Value;

/// Envelope returned by `GET /b/<bin>`; only the record is of interest.
#[derive(Debug, Deserialize)]
pub struct BinEnvelope {
    /// Stored document; an empty array when the bin has none.
    #[serde(default = "empty_record")]
    pub record: Value,
}

fn empty_record() -> Value {
    Value::Array(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_record_defaults_to_empty_array() {
        let envelope: BinEnvelope =
            serde_json::from_value(json!({"metadata": {"id": "bin"}})).unwrap();
        assert_eq!(envelope.record, json!([]));
    }

    #[test]
    fn object_record_is_passed_through() {
        let envelope: BinEnvelope =
            serde_json::from_value(json!({"record": {"test": "ok"}})).unwrap();
        assert_eq!(envelope.record, json!({"test": "ok"}));
    }
}
