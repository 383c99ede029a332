//! Serde [`Serialize`] implementations.
//!
//! Values are externally tagged with their kind, e.g. `{"Int": 5}`, so every
//! numeric width survives a round trip through self-describing formats. Views
//! and containers serialize as maps in insertion order, lists as sequences and
//! queries as sequences of their segments. Opaque objects have no serialized
//! form and fail with a custom error.
//!
//! # Example
//!
//! ```
//! use dataview::DataContainer;
//!
//! let container = DataContainer::new();
//! container.set("spawn.x", 10)?.set("name", "world")?;
//!
//! let json = serde_json::to_string(&container).unwrap();
//! assert_eq!(json, r#"{"spawn":{"View":{"x":{"Int":10}}},"name":{"String":"world"}}"#);
//! # Ok::<(), dataview::Error>(())
//! ```

use serde::{Serialize, Serializer, ser};

use crate::{DataContainer, DataList, DataQuery, DataValue, DataView, ResourceKey};

const NAME: &str = "DataValue";

impl Serialize for DataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DataValue::Boolean(value) => {
                serializer.serialize_newtype_variant(NAME, 0, "Boolean", value)
            }
            DataValue::Byte(value) => serializer.serialize_newtype_variant(NAME, 1, "Byte", value),
            DataValue::Short(value) => {
                serializer.serialize_newtype_variant(NAME, 2, "Short", value)
            }
            DataValue::Int(value) => serializer.serialize_newtype_variant(NAME, 3, "Int", value),
            DataValue::Long(value) => serializer.serialize_newtype_variant(NAME, 4, "Long", value),
            DataValue::Float(value) => {
                serializer.serialize_newtype_variant(NAME, 5, "Float", value)
            }
            DataValue::Double(value) => {
                serializer.serialize_newtype_variant(NAME, 6, "Double", value)
            }
            DataValue::String(value) => {
                serializer.serialize_newtype_variant(NAME, 7, "String", value)
            }
            DataValue::List(list) => serializer.serialize_newtype_variant(NAME, 8, "List", list),
            DataValue::View(view) => serializer.serialize_newtype_variant(NAME, 9, "View", view),
            DataValue::Object(object) => Err(ser::Error::custom(format_args!(
                "value of type {} cannot be persisted",
                object.type_name()
            ))),
        }
    }
}

impl Serialize for DataList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.borrow().iter())
    }
}

impl Serialize for DataView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.snapshot();
        serializer.collect_map(entries.iter().map(|(key, value)| (key, value)))
    }
}

impl Serialize for DataContainer {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_view().serialize(serializer)
    }
}

impl Serialize for DataQuery {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.parts().serialize(serializer)
    }
}

impl Serialize for ResourceKey {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
