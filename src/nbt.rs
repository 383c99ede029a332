//! Binary NBT persistence of containers.
//!
//! A container is written as a root compound with an empty name. Values map
//! onto tags as follows:
//!
//! | value | tag |
//! |-------|-----|
//! | `Boolean` | `Byte` (0 or 1) |
//! | `Byte` .. `Double` | the tag of the same name |
//! | `String` | `String` (modified UTF-8, at most 65535 bytes) |
//! | `List` | `List`, every element carrying the same tag |
//! | `View` | `Compound` |
//!
//! Opaque objects cannot be written. On input, `ByteArray`, `IntArray` and
//! `LongArray` decode to lists of bytes, ints and longs, and booleans come
//! back as bytes.
//!
//! # Example
//!
//! ```
//! use dataview::{DataContainer, nbt};
//!
//! let container = DataContainer::new();
//! container.set("pos.x", 12)?.set("name", "home")?;
//!
//! let bytes = nbt::write_container_be(&container)?;
//! let decoded = nbt::read_container_be(&bytes)?;
//! assert_eq!(decoded, container);
//! # Ok::<(), dataview::Error>(())
//! ```

mod read;
mod write;

pub use read::*;
pub use write::*;
