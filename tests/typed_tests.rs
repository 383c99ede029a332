//! Tests for typed accessors and their coercion rules

use dataview::{DataContainer, DataList, DataValue, ResourceKey};

fn container_with(value: impl Into<DataValue>) -> DataContainer {
    let container = DataContainer::new();
    container.set("v", value).unwrap();
    container
}

#[test]
fn test_integer_widening() {
    let container = container_with(42i8);
    assert_eq!(container.get_byte("v"), Some(42));
    assert_eq!(container.get_short("v"), Some(42));
    assert_eq!(container.get_int("v"), Some(42));
    assert_eq!(container.get_long("v"), Some(42));
}

#[test]
fn test_integer_narrowing_in_range() {
    let container = container_with(100i64);
    assert_eq!(container.get_byte("v"), Some(100));
    assert_eq!(container.get_int("v"), Some(100));

    let container = container_with(300i32);
    assert_eq!(container.get_byte("v"), None);
    assert_eq!(container.get_short("v"), Some(300));

    let container = container_with(i64::MAX);
    assert_eq!(container.get_int("v"), None);
    assert_eq!(container.get_long("v"), Some(i64::MAX));
}

#[test]
fn test_floats_are_not_integers() {
    let container = container_with(3.0f64);
    assert_eq!(container.get_int("v"), None);
    assert_eq!(container.get_long("v"), None);
    assert_eq!(container.get_double("v"), Some(3.0));
    assert_eq!(container.get_float("v"), Some(3.0));

    let container = container_with(1.5f32);
    assert_eq!(container.get_byte("v"), None);
    assert_eq!(container.get_double("v"), Some(1.5));
}

#[test]
fn test_double_narrows_only_when_exact() {
    let container = container_with(0.1f64);
    assert_eq!(container.get_float("v"), None);
    assert_eq!(container.get_double("v"), Some(0.1));

    let container = container_with(f64::INFINITY);
    assert_eq!(container.get_float("v"), Some(f32::INFINITY));

    let container = container_with(f64::NAN);
    assert!(container.get_float("v").unwrap().is_nan());
}

#[test]
fn test_integers_as_floats() {
    let container = container_with(1i32 << 24);
    assert_eq!(container.get_float("v"), Some(16_777_216.0));

    let container = container_with((1i32 << 24) + 1);
    assert_eq!(container.get_float("v"), None);
    assert_eq!(container.get_double("v"), Some(16_777_217.0));

    let container = container_with((1i64 << 53) + 1);
    assert_eq!(container.get_double("v"), None);

    let container = container_with(i64::MIN);
    assert_eq!(container.get_double("v"), Some(-9_223_372_036_854_775_808.0));
}

#[test]
fn test_booleans() {
    assert_eq!(container_with(true).get_bool("v"), Some(true));
    assert_eq!(container_with(0i8).get_bool("v"), Some(false));
    assert_eq!(container_with(1i64).get_bool("v"), Some(true));
    assert_eq!(container_with(2i32).get_bool("v"), None);
    assert_eq!(container_with(1.0f64).get_bool("v"), None);
    assert_eq!(container_with("true").get_bool("v"), None);
    assert_eq!(container_with(true).get_int("v"), None);
}

#[test]
fn test_strings_and_chars() {
    let container = container_with("x");
    assert_eq!(container.get_string("v").as_deref(), Some("x"));
    assert_eq!(container.get_char("v"), Some('x'));

    let container = container_with('é');
    assert_eq!(container.get_char("v"), Some('é'));

    assert_eq!(container_with("xy").get_char("v"), None);
    assert_eq!(container_with("").get_char("v"), None);
    assert_eq!(container_with(5).get_string("v"), None);
    assert_eq!(container_with("5").get_int("v"), None);
}

#[test]
fn test_missing_path_is_absent() {
    let container = DataContainer::new();
    assert_eq!(container.get_int("nope"), None);
    assert_eq!(container.get_int_list("nope"), None);
    assert_eq!(container.get_view("nope"), None);
    assert_eq!(container.get_list("nope"), None);
}

#[test]
fn test_view_is_not_scalar() {
    let container = DataContainer::new();
    container.set("a.b", 1).unwrap();
    assert_eq!(container.get_int("a"), None);
    assert_eq!(container.get_list("a"), None);
    assert!(container.get_view("a").is_some());
}

#[test]
fn test_typed_lists() {
    let container = container_with(vec![1i8, 2, 3]);
    assert_eq!(container.get_byte_list("v"), Some(vec![1, 2, 3]));
    assert_eq!(container.get_int_list("v"), Some(vec![1, 2, 3]));
    assert_eq!(container.get_double_list("v"), Some(vec![1.0, 2.0, 3.0]));
    assert_eq!(container.get_string_list("v"), None);

    let container = container_with(vec!["a", "b"]);
    assert_eq!(container.get_string_list("v"), Some(vec!["a".to_owned(), "b".to_owned()]));
    assert_eq!(container.get_char_list("v"), Some(vec!['a', 'b']));

    let container = container_with(vec![true, false]);
    assert_eq!(container.get_bool_list("v"), Some(vec![true, false]));

    let container = container_with(Vec::<i32>::new());
    assert_eq!(container.get_long_list("v"), Some(vec![]));
}

#[test]
fn test_list_is_all_or_nothing() {
    let list = DataList::new();
    list.push(1);
    list.push("two");
    list.push(3);
    let container = container_with(list);
    assert_eq!(container.get_int_list("v"), None);
    assert_eq!(container.get_list("v").unwrap().len(), 3);

    let container = container_with(vec![1i64, 1 << 40]);
    assert_eq!(container.get_int_list("v"), None);
    assert_eq!(container.get_long_list("v"), Some(vec![1, 1 << 40]));
}

#[test]
fn test_scalar_is_not_list() {
    let container = container_with(5);
    assert_eq!(container.get_int_list("v"), None);
}

#[test]
fn test_generic_accessors() {
    let container = container_with(7i16);
    assert_eq!(container.get_as::<i64>("v"), Some(7));
    assert_eq!(container.get_as::<String>("v"), None);

    let container = container_with(vec![7i16, 8]);
    assert_eq!(container.get_list_as::<f32>("v"), Some(vec![7.0, 8.0]));
}

#[test]
fn test_resource_key() {
    let container = DataContainer::new();
    container
        .set("full", "sponge:game/rule")
        .unwrap()
        .set("bare", "stone")
        .unwrap()
        .set("bad", "Not Valid")
        .unwrap()
        .set("typed", ResourceKey::minecraft("dirt").unwrap())
        .unwrap()
        .set("number", 4)
        .unwrap();

    assert_eq!(
        container.get_resource_key("full"),
        Some(ResourceKey::sponge("game/rule").unwrap())
    );
    assert_eq!(
        container.get_resource_key("bare").unwrap().to_string(),
        "minecraft:stone"
    );
    assert_eq!(container.get_resource_key("bad"), None);
    assert_eq!(container.get_string("typed").as_deref(), Some("minecraft:dirt"));
    assert_eq!(container.get_resource_key("number"), None);
    assert_eq!(container.get_resource_key("missing"), None);
}

#[test]
fn test_resource_key_list_drops_malformed_entries() {
    let container = container_with(vec!["ok:one", "not a key!", "ok:two"]);
    let keys = container.get_resource_key_list("v").unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].to_string(), "ok:one");
    assert_eq!(keys[1].to_string(), "ok:two");
}

#[test]
fn test_resource_key_list_absent_when_nothing_survives() {
    assert_eq!(
        container_with(vec!["Bad", "worse one"]).get_resource_key_list("v"),
        None
    );
    assert_eq!(
        container_with(Vec::<String>::new()).get_resource_key_list("v"),
        None
    );
    // a non-string element fails the underlying string list
    let list = DataList::new();
    list.push("ok:one");
    list.push(1);
    assert_eq!(container_with(list).get_resource_key_list("v"), None);
}

#[test]
fn test_value_conversions() {
    assert_eq!(DataValue::from(3i64).as_::<i8>(), Some(3));
    assert_eq!(DataValue::from("abc").as_str(), Some("abc"));
    assert!(DataValue::from(vec![1, 2]).is_list());
    assert!(DataValue::from(DataContainer::new()).is_view());
    assert_eq!(DataValue::Float(1.0).as_::<f64>(), Some(1.0));
}
