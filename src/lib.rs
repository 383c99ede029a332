//! Hierarchical, path-addressed data containers.
//!
//! A [`DataContainer`] is a tree of named entries addressed by [`DataQuery`]
//! paths. Leaves hold [`DataValue`]s; inner nodes are [`DataView`]s. Typed
//! accessors coerce stored values leniently, delegates registered on a
//! [`DataManager`] build domain objects out of views, and containers persist
//! to binary NBT through [`nbt`] or to any serde format.

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;
pub use zerocopy::NativeEndian;

#[cfg(feature = "serde")]
mod de;
mod error;
mod index;
mod key;
pub mod nbt;
mod persistence;
mod query;
pub mod registry;
mod resource_key;
pub mod scalar;
#[cfg(feature = "serde")]
mod ser;
mod tag;
mod util;
mod value;
mod view;

pub use error::*;
pub use index::*;
pub use key::*;
pub use nbt::*;
pub use persistence::*;
pub use query::*;
pub use registry::*;
pub use resource_key::*;
pub use scalar::*;
pub use tag::*;
pub use util::*;
pub use value::*;
pub use view::*;
