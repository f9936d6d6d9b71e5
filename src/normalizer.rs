/// Response normalization
///
/// The lookup API returns loosely structured JSON: usually one object, sometimes
/// a list of objects, occasionally a bare scalar. This module classifies the
/// payload once into a [`RecordSet`] and derives the two views the page needs:
/// 1. The summary fields shown as cards
/// 2. The CSV export (see [`crate::csv_export`])
use serde_json::{Map, Value};

/// One flat entity, field name to value, in the order the API sent them.
pub type Record = Map<String, Value>;

/// Field names shown in the summary, in display order.
pub const SUMMARY_FIELDS: [&str; 7] = ["name", "fname", "mobile", "email", "address", "circle", "id"];

/// Normalized shape of a lookup payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSet {
    /// A single object.
    Object(Record),
    /// A non-empty list of records.
    List(Vec<Record>),
    /// A non-object payload wrapped as `{"value": ...}`.
    Scalar(Record),
}

impl RecordSet {
    /// All records, in order. An `Object` or `Scalar` yields exactly one.
    pub fn records(&self) -> &[Record] {
        match self {
            RecordSet::Object(record) | RecordSet::Scalar(record) => std::slice::from_ref(record),
            RecordSet::List(records) => records,
        }
    }

    /// The record the summary is built from.
    pub fn first(&self) -> Option<&Record> {
        self.records().first()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Loose emptiness check used for "no data" and summary filtering.
///
/// Absent: null, `""`, `"0"`, numeric zero, `false`, empty array, empty object.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// True when an object's keys are exactly `"0", "1", ..., "n-1"` in order,
/// i.e. it is a sequence that was serialized as a map.
pub fn is_list_like(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .keys()
            .enumerate()
            .all(|(index, key)| *key == index.to_string())
}

/// Classifies a decoded payload into a [`RecordSet`].
///
/// Callers decide "no data" with [`is_absent`] beforehand; an empty array
/// still classifies (as a wrapped scalar) so the result is never empty.
pub fn classify(value: &Value) -> RecordSet {
    match value {
        Value::Object(map) if is_list_like(map) => {
            RecordSet::List(map.values().map(into_record).collect())
        }
        Value::Object(map) => RecordSet::Object(map.clone()),
        Value::Array(items) if !items.is_empty() => {
            RecordSet::List(items.iter().map(into_record).collect())
        }
        other => RecordSet::Scalar(wrap_scalar(other)),
    }
}

/// Objects become records as-is; anything else is wrapped.
fn into_record(value: &Value) -> Record {
    match value {
        Value::Object(map) => map.clone(),
        other => wrap_scalar(other),
    }
}

fn wrap_scalar(value: &Value) -> Record {
    let encoded = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let mut record = Record::new();
    record.insert("value".to_string(), Value::String(encoded));
    record
}

/// Whitelisted, non-absent fields of the first record, in whitelist order.
///
/// An empty result means the page shows the "no standard fields" notice.
pub fn summary_fields(record_set: &RecordSet) -> Vec<(&'static str, &Value)> {
    let Some(first) = record_set.first() else {
        return Vec::new();
    };

    SUMMARY_FIELDS
        .iter()
        .filter_map(|field| match first.get(*field) {
            Some(value) if !is_absent(value) => Some((*field, value)),
            _ => None,
        })
        .collect()
}

/// Text shown for a value in a summary card or CSV cell.
///
/// Strings are used verbatim, `true` prints as `1`, `false` and null as
/// nothing, numbers in their JSON form, nested structures as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_absent_loose_set() {
        for value in [
            json!(null),
            json!(""),
            json!("0"),
            json!(0),
            json!(0.0),
            json!(false),
            json!([]),
            json!({}),
        ] {
            assert!(is_absent(&value), "expected absent: {}", value);
        }

        for value in [
            json!("a"),
            json!("00"),
            json!(" "),
            json!(1),
            json!(-1),
            json!(0.5),
            json!(true),
            json!([0]),
            json!({"a": null}),
        ] {
            assert!(!is_absent(&value), "expected present: {}", value);
        }
    }

    #[test]
    fn test_classify_object() {
        let value = json!({"name": "A", "mobile": "1"});
        let set = classify(&value);
        assert!(matches!(set, RecordSet::Object(_)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.first().unwrap()["name"], json!("A"));
    }

    #[test]
    fn test_classify_list_of_objects() {
        let value = json!([{"name": "A"}, {"name": "B"}]);
        let set = classify(&value);
        assert!(matches!(set, RecordSet::List(_)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[1]["name"], json!("B"));
    }

    #[test]
    fn test_classify_list_of_scalars_wraps_each() {
        let set = classify(&json!([1, "two", null]));
        let values: Vec<&Value> = set.records().iter().map(|r| &r["value"]).collect();
        assert_eq!(values, vec![&json!("1"), &json!("two"), &json!("null")]);
    }

    #[test]
    fn test_classify_mixed_list() {
        let set = classify(&json!([{"name": "A"}, 7]));
        assert_eq!(set.records()[0]["name"], json!("A"));
        assert_eq!(set.records()[1]["value"], json!("7"));
    }

    #[test]
    fn test_classify_scalars() {
        assert_eq!(
            classify(&json!("not json")),
            RecordSet::Scalar(json!({"value": "not json"}).as_object().unwrap().clone())
        );
        assert_eq!(classify(&json!(42)).first().unwrap()["value"], json!("42"));
        assert_eq!(classify(&json!(true)).first().unwrap()["value"], json!("true"));
        assert_eq!(classify(&json!(null)).first().unwrap()["value"], json!("null"));
    }

    #[test]
    fn test_classify_empty_array_is_never_an_empty_list() {
        let set = classify(&json!([]));
        assert!(matches!(set, RecordSet::Scalar(_)));
        assert!(!set.is_empty());
        assert_eq!(set.first().unwrap()["value"], json!("[]"));
    }

    #[test]
    fn test_index_keyed_object_is_list_like() {
        let value = json!({"0": {"name": "A"}, "1": {"name": "B"}});
        let set = classify(&value);
        assert!(matches!(set, RecordSet::List(_)));
        assert_eq!(set.len(), 2);

        // Out of order or gapped keys stay an object
        assert!(matches!(classify(&json!({"1": "a", "0": "b"})), RecordSet::Object(_)));
        assert!(matches!(classify(&json!({"0": "a", "2": "b"})), RecordSet::Object(_)));
        assert!(matches!(classify(&json!({"00": "a"})), RecordSet::Object(_)));
    }

    #[test]
    fn test_summary_fields_whitelist_order() {
        let value = json!({
            "id": 7,
            "email": "a@example.com",
            "unknown": "x",
            "name": "A",
            "circle": "",
            "fname": null,
            "mobile": "0"
        });
        let set = classify(&value);
        let fields: Vec<&str> = summary_fields(&set).into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["name", "email", "id"]);
    }

    #[test]
    fn test_summary_uses_first_record_only() {
        let set = classify(&json!([{"name": "A"}, {"name": "B", "email": "b@example.com"}]));
        let summary = summary_fields(&set);
        assert_eq!(summary, vec![("name", &json!("A"))]);
    }

    #[test]
    fn test_summary_empty_for_scalars() {
        assert!(summary_fields(&classify(&json!(null))).is_empty());
        assert!(summary_fields(&classify(&json!(""))).is_empty());
        assert!(summary_fields(&classify(&json!({"raw": "<html>"}))).is_empty());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("x")), "x");
        assert_eq!(display_value(&json!(12)), "12");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!(true)), "1");
        assert_eq!(display_value(&json!(false)), "");
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
