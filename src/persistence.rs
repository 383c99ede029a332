//! Builders and translators that turn stored data into domain objects.
//!
//! A [`DataManager`] maps a requested Rust type to the delegate able to produce
//! it. Delegates report "nothing to build here" with `Ok(None)` and keep `Err`
//! for data they recognize but cannot use; the accessors on
//! [`DataView`](crate::DataView) wrap such errors in
//! [`Error::Deserialize`](crate::Error::Deserialize).
//!
//! # Example
//!
//! ```
//! use dataview::{BoxError, DataContainer, DataManager, DataView};
//!
//! #[derive(Debug, PartialEq)]
//! struct Home {
//!     x: i32,
//!     z: i32,
//! }
//!
//! let mut manager = DataManager::new();
//! manager.register_builder(|view: &DataView| -> Result<Option<Home>, BoxError> {
//!     Ok(view
//!         .get_int("x")
//!         .zip(view.get_int("z"))
//!         .map(|(x, z)| Home { x, z }))
//! });
//!
//! let container = DataContainer::new();
//! container.set("home.x", 10)?.set("home.z", -4)?;
//! let home = container.get_serializable::<Home>("home", &manager)?;
//! assert_eq!(home, Some(Home { x: 10, z: -4 }));
//! # Ok::<(), dataview::Error>(())
//! ```

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
};

use crate::{BoxError, DataContainer, DataValue, DataView};

/// An object that can write itself into a container.
pub trait DataSerializable {
    /// Version of the layout written by [`to_container`](Self::to_container).
    fn content_version(&self) -> i32;

    fn to_container(&self) -> DataContainer;
}

/// Builds a `T` from the view it was serialized into.
pub trait DataBuilder<T> {
    fn build(&self, view: &DataView) -> Result<Option<T>, BoxError>;
}

impl<T, F> DataBuilder<T> for F
where
    F: Fn(&DataView) -> Result<Option<T>, BoxError>,
{
    #[inline]
    fn build(&self, view: &DataView) -> Result<Option<T>, BoxError> {
        self(view)
    }
}

/// Converts between raw stored values and a `T` that has no builder of its own.
pub trait DataTranslator<T> {
    /// `Ok(None)` when `value` does not describe a `T`.
    fn translate(&self, value: &DataValue) -> Result<Option<T>, BoxError>;

    fn serialize(&self, object: &T) -> DataValue;
}

type Delegate = Box<dyn Any + Send + Sync>;

/// Builders and translators keyed by the type they produce.
#[derive(Default)]
pub struct DataManager {
    builders: HashMap<TypeId, (&'static str, Delegate)>,
    translators: HashMap<TypeId, (&'static str, Delegate)>,
}

impl DataManager {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the builder for `T`, replacing any previous one.
    pub fn register_builder<T: 'static>(
        &mut self,
        builder: impl DataBuilder<T> + Send + Sync + 'static,
    ) {
        let builder: Box<dyn DataBuilder<T> + Send + Sync> = Box::new(builder);
        self.builders
            .insert(TypeId::of::<T>(), (type_name::<T>(), Box::new(builder)));
    }

    /// Registers the translator for `T`, replacing any previous one.
    pub fn register_translator<T: 'static>(
        &mut self,
        translator: impl DataTranslator<T> + Send + Sync + 'static,
    ) {
        let translator: Box<dyn DataTranslator<T> + Send + Sync> = Box::new(translator);
        self.translators
            .insert(TypeId::of::<T>(), (type_name::<T>(), Box::new(translator)));
    }

    pub fn builder<T: 'static>(&self) -> Option<&(dyn DataBuilder<T> + Send + Sync)> {
        let (_, delegate) = self.builders.get(&TypeId::of::<T>())?;
        delegate
            .downcast_ref::<Box<dyn DataBuilder<T> + Send + Sync>>()
            .map(|builder| &**builder)
    }

    pub fn translator<T: 'static>(&self) -> Option<&(dyn DataTranslator<T> + Send + Sync)> {
        let (_, delegate) = self.translators.get(&TypeId::of::<T>())?;
        delegate
            .downcast_ref::<Box<dyn DataTranslator<T> + Send + Sync>>()
            .map(|translator| &**translator)
    }
}

impl fmt::Debug for DataManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataManager")
            .field(
                "builders",
                &self.builders.values().map(|(name, _)| *name).collect::<Vec<_>>(),
            )
            .field(
                "translators",
                &self
                    .translators
                    .values()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
