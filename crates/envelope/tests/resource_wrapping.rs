use envelope::{ApiResponse, Payload, Resource};
use serde_json::{Map, json};

fn user(id: i64) -> Resource {
    Resource::new(json!({"id": id}))
}

#[test]
fn nested_resource_is_wrapped_in_data() {
    let data = Payload::map([("user", Payload::from(user(1)))]);

    let response = ApiResponse::success(data, Map::new());

    assert_eq!(
        response.to_value()["data"],
        json!({"user": {"data": {"id": 1}}})
    );
}

#[test]
fn nested_resource_without_wrapper() {
    let data = Payload::map([("user", Payload::from(user(1).without_wrapper()))]);

    let response = ApiResponse::success(data, Map::new());

    assert_eq!(response.to_value()["data"], json!({"user": {"id": 1}}));
}

#[test]
fn custom_wrapper_key_is_used() {
    let data = Payload::map([("user", Payload::from(user(1).with_wrapper("payload")))]);

    let response = ApiResponse::success(data, Map::new());

    assert_eq!(
        response.to_value()["data"],
        json!({"user": {"payload": {"id": 1}}})
    );
}

#[test]
fn empty_wrapper_behaves_like_no_wrapper() {
    let data = Payload::map([("user", Payload::from(user(1).with_wrapper("")))]);

    let response = ApiResponse::success(data, Map::new());

    assert_eq!(response.to_value()["data"], json!({"user": {"id": 1}}));
}

#[test]
fn root_resource_is_never_wrapped() {
    let response = ApiResponse::success(user(7), Map::new());

    assert_eq!(response.to_value()["data"], json!({"id": 7}));
}

#[test]
fn resources_in_lists_are_wrapped_individually() {
    let data = Payload::list([user(1), user(2)]);

    let response = ApiResponse::success(data, Map::new());

    assert_eq!(
        response.to_value()["data"],
        json!([{"data": {"id": 1}}, {"data": {"id": 2}}])
    );
}

#[test]
fn nested_resource_with_missing_body_is_dropped() {
    let gone = Resource::new(json!({})).transform(|_| Payload::Missing);
    let data = Payload::map([("user", Payload::from(gone)), ("kept", Payload::from(1))]);

    let response = ApiResponse::success(data, Map::new());

    assert_eq!(response.to_value()["data"], json!({"kept": 1}));
}
