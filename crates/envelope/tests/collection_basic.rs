use envelope::{ApiResponse, Collection, Error, Payload, Resource, Transformer};
use serde_json::{Map, Value, json};

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn user_resource(item: Payload) -> Resource {
    let Payload::Value(value) = item else {
        return Resource::new(Value::Null);
    };
    Resource::new(value)
}

#[test]
fn collection_constructs_one_resource_per_item() {
    let collection =
        Collection::new([json!({"id": 1}), json!({"id": 2})]).collects(user_resource);

    let response = ApiResponse::success(collection, Map::new());

    assert_eq!(response.to_value()["data"], json!([{"id": 1}, {"id": 2}]));
}

#[test]
fn mapper_shapes_each_item() {
    let collection = Collection::new([1, 2]).map(|item| {
        let Payload::Value(Value::Number(n)) = item else {
            return Payload::Missing;
        };
        Payload::from(n.as_i64().unwrap_or(0) * 10)
    });

    let response = ApiResponse::success(collection, Map::new());

    assert_eq!(response.to_value()["data"], json!([10, 20]));
}

#[test]
fn collection_meta_is_stored_and_merged() {
    let collection = Collection::new(Vec::<Payload>::new())
        .with_meta(obj(json!({"total": 1})))
        .merge_meta(obj(json!({"page": 2})));

    assert_eq!(
        Value::Object(collection.meta()),
        json!({"total": 1, "page": 2})
    );
}

#[test]
fn missing_items_and_entries_are_stripped() {
    let collection = Collection::new([
        Payload::map([("id", Payload::from(1)), ("secret", Payload::Missing)]),
        Payload::Missing,
        Payload::from(json!({"id": 2})),
    ]);

    let response = ApiResponse::success(collection, Map::new());

    assert_eq!(response.to_value()["data"], json!([{"id": 1}, {"id": 2}]));
}

#[test]
fn nested_collection_in_map_is_wrapped() {
    let users =
        Collection::new([json!({"id": 1}), json!({"id": 2})]).collects(user_resource);
    let data = Payload::map([
        ("users", Payload::from(users)),
        ("filters", Payload::from(json!({"active": true}))),
    ]);

    let response = ApiResponse::success(data, Map::new());

    assert_eq!(
        response.to_value()["data"],
        json!({
            "users": {"data": [{"id": 1}, {"id": 2}]},
            "filters": {"active": true}
        })
    );
}

#[test]
fn collection_input_must_be_a_list_or_page() {
    let result = Resource::collection(json!("nope"), user_resource);

    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn resource_collection_accepts_json_arrays() -> Result<(), Box<dyn std::error::Error>> {
    let collection = Resource::collection(json!([{"id": 1}]), user_resource)?;

    let response = ApiResponse::success(collection, Map::new());

    assert_eq!(response.to_value()["data"], json!([{"id": 1}]));
    Ok(())
}
