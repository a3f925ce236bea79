use gamedex_server::db::game_repo::{
    fields_from_payload, int_field, text_field, Bind, DEFAULT_IMAGE_PATH,
};
use serde_json::{json, Map, Value};

fn obj(v: Value) -> Map<String, Value> {
    v.as_object().expect("object literal").clone()
}

#[test]
fn create_fills_every_column() {
    let data = obj(json!({
        "name": "Prueba",
        "description": "d",
        "year": 2025
    }));
    let fields = fields_from_payload(&data, false);

    assert_eq!(fields.len(), 5);
    assert_eq!(text_field(&fields, "name"), Some("Prueba"));
    assert_eq!(text_field(&fields, "description"), Some("d"));
    assert_eq!(int_field(&fields, "year"), Some(2025));
    // absent url still present as NULL in create mode
    assert_eq!(text_field(&fields, "url"), None);
}

#[test]
fn create_defaults_missing_image() {
    let data = obj(json!({ "name": "g", "description": "d", "year": 2020 }));
    let fields = fields_from_payload(&data, false);
    assert_eq!(text_field(&fields, "image_path"), Some(DEFAULT_IMAGE_PATH));
}

#[test]
fn create_defaults_empty_image() {
    let data = obj(json!({ "name": "g", "description": "d", "year": 2020, "image_path": "" }));
    let fields = fields_from_payload(&data, false);
    assert_eq!(text_field(&fields, "image_path"), Some(DEFAULT_IMAGE_PATH));
}

#[test]
fn create_keeps_explicit_image() {
    let data = obj(json!({ "name": "g", "description": "d", "year": 2020,
                           "image_path": "/static/uploads/cover.png" }));
    let fields = fields_from_payload(&data, false);
    assert_eq!(
        text_field(&fields, "image_path"),
        Some("/static/uploads/cover.png")
    );
}

#[test]
fn patch_touches_only_present_keys() {
    let data = obj(json!({ "description": "d2" }));
    let fields = fields_from_payload(&data, true);

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0], ("description", Bind::Text(Some("d2".into()))));
}

#[test]
fn patch_writes_empty_image_verbatim() {
    // Update applies no default substitution, unlike create.
    let data = obj(json!({ "image_path": "" }));
    let fields = fields_from_payload(&data, true);

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0], ("image_path", Bind::Text(Some(String::new()))));
}

#[test]
fn patch_explicit_null_writes_null() {
    let data = obj(json!({ "url": null }));
    let fields = fields_from_payload(&data, true);

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0], ("url", Bind::Text(None)));
}

#[test]
fn patch_ignores_unknown_keys() {
    let data = obj(json!({ "id": 99, "is_admin": true, "drop_table": "x" }));
    let fields = fields_from_payload(&data, true);
    assert!(fields.is_empty());
}

#[test]
fn empty_patch_yields_no_fields() {
    let fields = fields_from_payload(&Map::new(), true);
    assert!(fields.is_empty());
}

#[test]
fn non_integer_year_is_absent() {
    let data = obj(json!({ "year": "2020" }));
    let fields = fields_from_payload(&data, true);
    assert_eq!(fields[0], ("year", Bind::Int(None)));
}
