//! Serde [`Deserialize`] implementations, the inverse of the `ser` module.
//!
//! Map keys become single path segments, so a key containing `'.'` is stored
//! verbatim rather than split into nested views.

use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, Visitor},
};

use crate::{DataContainer, DataQuery, DataValue, ResourceKey};

#[derive(Deserialize)]
#[serde(rename = "DataValue")]
enum Repr {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    List(Vec<DataValue>),
    View(DataContainer),
}

impl<'de> Deserialize<'de> for DataValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Boolean(value) => DataValue::Boolean(value),
            Repr::Byte(value) => DataValue::Byte(value),
            Repr::Short(value) => DataValue::Short(value),
            Repr::Int(value) => DataValue::Int(value),
            Repr::Long(value) => DataValue::Long(value),
            Repr::Float(value) => DataValue::Float(value),
            Repr::Double(value) => DataValue::Double(value),
            Repr::String(value) => DataValue::String(value),
            Repr::List(values) => DataValue::List(values.into()),
            Repr::View(container) => DataValue::View(container.into_view()),
        })
    }
}

struct ContainerVisitor;

impl<'de> Visitor<'de> for ContainerVisitor {
    type Value = DataContainer;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of data entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let container = DataContainer::new();
        while let Some((key, value)) = map.next_entry::<String, DataValue>()? {
            container
                .set(DataQuery::from_parts([key]), value)
                .map_err(de::Error::custom)?;
        }
        Ok(container)
    }
}

impl<'de> Deserialize<'de> for DataContainer {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ContainerVisitor)
    }
}

impl<'de> Deserialize<'de> for DataQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer).map(DataQuery::from_parts)
    }
}

impl<'de> Deserialize<'de> for ResourceKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let formatted = String::deserialize(deserializer)?;
        ResourceKey::resolve(&formatted).map_err(de::Error::custom)
    }
}
