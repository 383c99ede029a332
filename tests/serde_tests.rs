//! Tests for the serde representation

use dataview::{DataContainer, DataList, DataQuery, DataValue, Opaque, ResourceKey};
use serde::{Deserialize, Serialize};

#[test]
fn test_value_is_externally_tagged() {
    assert_eq!(serde_json::to_string(&DataValue::Int(5)).unwrap(), r#"{"Int":5}"#);
    assert_eq!(serde_json::to_string(&DataValue::Byte(-1)).unwrap(), r#"{"Byte":-1}"#);
    assert_eq!(
        serde_json::to_string(&DataValue::from(vec![true])).unwrap(),
        r#"{"List":[{"Boolean":true}]}"#
    );
}

#[test]
fn test_container_serializes_in_order() {
    let container = DataContainer::new();
    container.set("z", 1i64).unwrap().set("a.b", "x").unwrap();
    assert_eq!(
        serde_json::to_string(&container).unwrap(),
        r#"{"z":{"Long":1},"a":{"View":{"b":{"String":"x"}}}}"#
    );
}

#[test]
fn test_round_trip_keeps_kinds() {
    let container = DataContainer::new();
    container
        .set("b", true)
        .unwrap()
        .set("y", 3i8)
        .unwrap()
        .set("s", 3i16)
        .unwrap()
        .set("i", 3)
        .unwrap()
        .set("l", 3i64)
        .unwrap()
        .set("f", 0.5f32)
        .unwrap()
        .set("d", 0.5)
        .unwrap()
        .set("text", "hi")
        .unwrap()
        .set("deep.er.list", vec![vec![1, 2], vec![]])
        .unwrap();

    let json = serde_json::to_string(&container).unwrap();
    let decoded: DataContainer = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, container);
    assert_eq!(decoded.get("s"), Some(DataValue::Short(3)));
    assert_eq!(decoded.get("f"), Some(DataValue::Float(0.5)));
    assert_eq!(decoded.keys(true), container.keys(true));
}

#[test]
fn test_views_in_lists_round_trip() {
    let item = DataContainer::new();
    item.set("id", "minecraft:apple").unwrap();
    let container = DataContainer::new();
    container.set("items", vec![item]).unwrap();

    let json = serde_json::to_string(&container).unwrap();
    let decoded: DataContainer = serde_json::from_str(&json).unwrap();
    let items = decoded.get_view_list("items").unwrap();
    assert_eq!(items[0].get_string("id").as_deref(), Some("minecraft:apple"));
    assert!(items[0].is_container());
}

#[test]
fn test_dotted_map_key_is_one_segment() {
    let decoded: DataContainer = serde_json::from_str(r#"{"a.b":{"Int":1}}"#).unwrap();
    assert_eq!(decoded.get_int(DataQuery::from_parts(["a.b"])), Some(1));
    assert!(!decoded.contains("a"));
}

#[test]
fn test_opaque_does_not_serialize() {
    let container = DataContainer::new();
    container.set("o", Opaque::new(1u32)).unwrap();
    let error = serde_json::to_string(&container).unwrap_err();
    assert!(error.to_string().contains("u32"));
}

#[test]
fn test_unknown_kind_is_rejected() {
    assert!(serde_json::from_str::<DataValue>(r#"{"Char":"c"}"#).is_err());
    assert!(serde_json::from_str::<DataContainer>(r#"[1, 2]"#).is_err());
    assert!(serde_json::from_str::<DataValue>(r#"{"Byte":300}"#).is_err());
}

#[test]
fn test_list_serializes_as_sequence() {
    let list = DataList::from(vec![1i16, 2]);
    assert_eq!(
        serde_json::to_string(&list).unwrap(),
        r#"[{"Short":1},{"Short":2}]"#
    );
}

#[test]
fn test_query_and_resource_key() {
    let query = DataQuery::from_parts(["a.b", "c"]);
    let json = serde_json::to_string(&query).unwrap();
    assert_eq!(json, r#"["a.b","c"]"#);
    assert_eq!(serde_json::from_str::<DataQuery>(&json).unwrap(), query);

    let key = ResourceKey::sponge("game/rule").unwrap();
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, r#""sponge:game/rule""#);
    assert_eq!(serde_json::from_str::<ResourceKey>(&json).unwrap(), key);
    assert_eq!(
        serde_json::from_str::<ResourceKey>(r#""stone""#).unwrap(),
        ResourceKey::minecraft("stone").unwrap()
    );
    assert!(serde_json::from_str::<ResourceKey>(r#""Bad Key""#).is_err());
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    home: DataContainer,
    spawn: DataQuery,
    world: ResourceKey,
}

#[test]
fn test_embedded_in_derived_types() {
    let home = DataContainer::new();
    home.set("x", 1).unwrap();
    let profile = Profile {
        name: "Alex".into(),
        home,
        spawn: DataQuery::of("worlds.overworld"),
        world: ResourceKey::minecraft("overworld").unwrap(),
    };

    let json = serde_json::to_string(&profile).unwrap();
    let decoded: Profile = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, profile);
}
