//! Tests for `XmlSerializer`.

use serde::Serialize;

use super::test_fixtures::user;
use super::{Mode, SerializationError, SerializeOptions, Serializer, XmlSerializer};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

fn render(record: &dyn super::Record, options: &SerializeOptions) -> String {
    XmlSerializer::new()
        .serialize(record, options)
        .unwrap()
        .as_text()
        .unwrap()
        .to_string()
}

#[test]
fn config_is_xml_in_native_mode() {
    let serializer = XmlSerializer::new();

    assert_eq!(serializer.config().format, "xml");
    assert_eq!(serializer.config().mode, Mode::Native);
    assert_eq!(serializer.root(), "webhook");
}

#[test]
fn renders_user_under_webhook_root() {
    let xml = render(&user(), &SerializeOptions::new());

    assert_eq!(
        xml,
        format!(
            "{DECLARATION}<webhook><id>1</id><name>John Doe</name>\
             <signup_ts>2024-01-01T00:00:00</signup_ts>\
             <tastes><spicy>5</spicy><sweet>3</sweet></tastes></webhook>"
        )
    );
}

#[test]
fn honours_exclude_and_aliases() {
    let options = SerializeOptions::new()
        .exclude(["tastes"])
        .alias("signup_ts", "joined");

    let xml = render(&user(), &options);

    assert!(xml.contains("<joined>2024-01-01T00:00:00</joined>"));
    assert!(!xml.contains("tastes"));
    assert!(!xml.contains("signup_ts"));
}

#[test]
fn sequences_emit_item_children() {
    #[derive(Debug, Serialize)]
    struct Tagged {
        tags: Vec<&'static str>,
    }

    let xml = render(
        &Tagged {
            tags: vec!["a", "b"],
        },
        &SerializeOptions::new(),
    );

    assert!(xml.contains("<tags><item>a</item><item>b</item></tags>"));
}

#[test]
fn nested_sequences_of_mappings_recurse() {
    #[derive(Debug, Serialize)]
    struct Point {
        x: i32,
    }
    #[derive(Debug, Serialize)]
    struct Path {
        points: Vec<Point>,
    }

    let xml = render(
        &Path {
            points: vec![Point { x: 1 }, Point { x: -2 }],
        },
        &SerializeOptions::new(),
    );

    assert!(xml.contains("<points><item><x>1</x></item><item><x>-2</x></item></points>"));
}

#[test]
fn null_renders_empty_element() {
    let mut record = user();
    record.signup_ts = None;

    let xml = render(&record, &SerializeOptions::new());

    assert!(xml.contains("<signup_ts/>"));
}

#[test]
fn booleans_and_floats_render_as_text() {
    #[derive(Debug, Serialize)]
    struct Flags {
        active: bool,
        number: f64,
    }

    let xml = render(
        &Flags {
            active: true,
            number: 42.0,
        },
        &SerializeOptions::new(),
    );

    assert!(xml.contains("<active>true</active>"));
    assert!(xml.contains("<number>42.0</number>"));
}

#[test]
fn text_is_escaped() {
    let mut record = user();
    record.name = "Tom & <Jerry>".to_string();

    let xml = render(&record, &SerializeOptions::new());

    assert!(xml.contains("<name>Tom &amp; &lt;Jerry&gt;</name>"));
}

#[test]
fn custom_root_wraps_fields() {
    let payload = XmlSerializer::with_root("signup")
        .serialize(&user(), &SerializeOptions::new().include(["id"]))
        .unwrap();

    assert_eq!(
        payload.as_text().unwrap(),
        format!("{DECLARATION}<signup><id>1</id></signup>")
    );
}

#[test]
fn invalid_element_name_is_rejected() {
    let result = XmlSerializer::new().serialize(
        &user(),
        &SerializeOptions::new().alias("name", "full name"),
    );

    assert!(matches!(
        result,
        Err(SerializationError::InvalidElementName { name }) if name == "full name"
    ));
}

#[test]
fn element_names_must_not_start_with_digit() {
    let result = XmlSerializer::new().serialize(
        &user(),
        &SerializeOptions::new().alias("id", "1id"),
    );

    assert!(matches!(
        result,
        Err(SerializationError::InvalidElementName { .. })
    ));
}

#[test]
fn control_characters_are_rejected() {
    let mut record = user();
    record.name = "a\u{1}b".to_string();

    let result = XmlSerializer::new().serialize(&record, &SerializeOptions::new());

    assert!(matches!(
        result,
        Err(SerializationError::InvalidCharacter { element, character: '\u{1}' }) if element == "name"
    ));
}

#[test]
fn whitespace_controls_are_kept() {
    let mut record = user();
    record.name = "line one\n\tline two\r".to_string();

    let xml = render(&record, &SerializeOptions::new());

    assert!(xml.contains("<name>line one\n\tline two\r</name>"));
}
