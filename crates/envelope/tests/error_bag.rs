use envelope::ErrorBag;
use serde_json::{Map, Value, json};

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn scalar_messages_become_single_element_lists() {
    let bag = ErrorBag::new(
        "Invalid.",
        obj(json!({"email": "Bad email.", "age": 42, "flag": true})),
        None,
    );

    assert_eq!(
        bag.to_value(),
        json!({
            "message": "Invalid.",
            "fields": {"email": ["Bad email."], "age": ["42"], "flag": ["true"]}
        })
    );
}

#[test]
fn non_scalar_messages_coerce_to_empty_strings() {
    let bag = ErrorBag::new(
        "Invalid.",
        obj(json!({"broken": {"a": 1}, "list": ["ok", {"b": 2}, null]})),
        None,
    );

    assert_eq!(
        bag.to_value()["fields"],
        json!({"broken": [""], "list": ["ok", "", ""]})
    );
}

#[test]
fn accessors_answer_presence_and_messages() {
    let bag = ErrorBag::new("", obj(json!({"email": ["a", "b"]})), None);

    assert!(bag.has_errors());
    assert!(bag.has("email"));
    assert!(!bag.has("name"));
    assert_eq!(bag.get("email"), [json!("a"), json!("b")]);
    assert!(bag.get("name").is_empty());
    assert_eq!(bag.all().len(), 1);
}

#[test]
fn empty_bag_reports_no_errors() {
    let bag = ErrorBag::new("", Map::new(), None);

    assert!(!bag.has_errors());
    assert_eq!(bag.to_value(), json!({"message": "", "fields": {}}));
}

#[test]
fn code_appears_only_when_set() {
    let coded = ErrorBag::new("x", Map::new(), Some("oops"));

    assert_eq!(coded.code(), Some("oops"));
    assert_eq!(coded.to_value()["code"], json!("oops"));

    let plain = ErrorBag::new("x", Map::new(), None);
    assert!(plain.to_value().get("code").is_none());
}
