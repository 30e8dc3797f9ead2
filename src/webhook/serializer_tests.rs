//! Tests for the serializer protocol and `JsonSerializer`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

use super::test_fixtures::user;
use super::{
    JsonSerializer, Mode, Payload, SerializationError, SerializeOptions, Serializer,
};

fn serialize_fields(options: &SerializeOptions) -> serde_json::Map<String, serde_json::Value> {
    let payload = JsonSerializer::new().serialize(&user(), options).unwrap();
    payload.as_fields().cloned().unwrap()
}

mod json_serializer {
    use super::*;

    #[test]
    fn config_is_json_in_json_mode() {
        let serializer = JsonSerializer::new();

        assert_eq!(serializer.config().format, "json");
        assert_eq!(serializer.config().mode, Mode::Json);
    }

    #[test]
    fn serializes_all_fields_unchanged() {
        let fields = serialize_fields(&SerializeOptions::new());

        assert_eq!(fields.len(), 4);
        assert_eq!(fields["id"], 1);
        assert_eq!(fields["name"], "John Doe");
        assert_eq!(fields["signup_ts"], "2024-01-01T00:00:00");
        assert_eq!(fields["tastes"], json!({"spicy": 5, "sweet": 3}));
    }

    #[test]
    fn preserves_declaration_order() {
        let fields = serialize_fields(&SerializeOptions::new());
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();

        assert_eq!(keys, ["id", "name", "signup_ts", "tastes"]);
    }

    #[test]
    fn exclude_removes_only_that_field() {
        let fields = serialize_fields(&SerializeOptions::new().exclude(["tastes"]));

        assert!(!fields.contains_key("tastes"));
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["id"], 1);
        assert_eq!(fields["name"], "John Doe");
        assert_eq!(fields["signup_ts"], "2024-01-01T00:00:00");
    }

    #[test]
    fn aliases_rename_output_keys() {
        let fields = serialize_fields(&SerializeOptions::new().alias("signup_ts", "signedUpAt"));

        assert_eq!(fields["signedUpAt"], "2024-01-01T00:00:00");
        assert!(!fields.contains_key("signup_ts"));
    }

    #[test]
    fn exclude_none_drops_missing_timestamp() {
        let mut record = user();
        record.signup_ts = None;

        let payload = JsonSerializer::new()
            .serialize(&record, &SerializeOptions::new().exclude_none(true))
            .unwrap();

        assert!(!payload.as_fields().unwrap().contains_key("signup_ts"));
    }

    #[test]
    fn exclude_none_reaches_nested_records() {
        #[derive(Debug, Serialize)]
        struct Address {
            street: Option<String>,
            number: u32,
        }
        #[derive(Debug, Serialize)]
        struct Customer {
            id: u64,
            address: Address,
        }

        let customer = Customer {
            id: 7,
            address: Address {
                street: None,
                number: 1,
            },
        };

        let payload = JsonSerializer::new()
            .serialize(&customer, &SerializeOptions::new().exclude_none(true))
            .unwrap();

        assert_eq!(
            serde_json::Value::Object(payload.as_fields().cloned().unwrap()),
            json!({"id": 7, "address": {"number": 1}})
        );
    }

    #[test]
    fn nested_nulls_kept_without_exclude_none() {
        #[derive(Debug, Serialize)]
        struct Inner {
            a: Option<u8>,
        }
        #[derive(Debug, Serialize)]
        struct Outer {
            x: Inner,
        }

        let fields = JsonSerializer::new()
            .serialize(&Outer { x: Inner { a: None } }, &SerializeOptions::new())
            .unwrap();

        assert!(fields.as_fields().unwrap()["x"]["a"].is_null());
    }

    #[test]
    fn format_data_is_identity() {
        let serde_json::Value::Object(fields) = json!({"a": 1}) else {
            unreachable!()
        };

        let payload = JsonSerializer::new().format_data(fields.clone()).unwrap();

        assert_eq!(payload, Payload::Fields(fields));
    }
}

mod failures {
    use super::*;

    #[test]
    fn non_mapping_record_is_rejected() {
        let result = JsonSerializer::new().serialize(&42_u32, &SerializeOptions::new());

        assert!(matches!(
            result,
            Err(SerializationError::NotAMapping { kind: "number" })
        ));
    }

    #[test]
    fn sequence_record_is_rejected() {
        let result = JsonSerializer::new().serialize(&vec![1, 2], &SerializeOptions::new());

        assert!(matches!(
            result,
            Err(SerializationError::NotAMapping { kind: "sequence" })
        ));
    }

    #[test]
    fn unrepresentable_record_reports_dump_error() {
        #[derive(Debug, Serialize)]
        struct Grid {
            cells: BTreeMap<(u8, u8), u8>,
        }

        let grid = Grid {
            cells: BTreeMap::from([((0, 0), 1)]),
        };

        let result = JsonSerializer::new().serialize(&grid, &SerializeOptions::new());

        assert!(matches!(result, Err(SerializationError::Dump(_))));
    }
}

mod payload {
    use super::*;

    #[test]
    fn fields_encode_as_json() {
        let serde_json::Value::Object(fields) = json!({"id": 1}) else {
            unreachable!()
        };

        let bytes = Payload::Fields(fields).to_bytes().unwrap();

        assert_eq!(bytes, br#"{"id":1}"#);
    }

    #[test]
    fn text_encodes_verbatim() {
        let bytes = Payload::Text("<a>1</a>".to_string()).to_bytes().unwrap();

        assert_eq!(bytes, b"<a>1</a>");
    }

    #[test]
    fn accessors_match_variant() {
        let text = Payload::Text("x".to_string());

        assert_eq!(text.as_text(), Some("x"));
        assert!(text.as_fields().is_none());
    }
}
