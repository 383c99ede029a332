//! Registry lookups used by registry-backed accessors.
//!
//! The host server owns its registries; this module only models the shape a
//! [`DataView`](crate::DataView) needs to turn a stored resource key into a
//! registered value.

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::OnceLock,
};

use crate::ResourceKey;

/// Identifies a registry holding values of type `T`.
pub struct RegistryType<T> {
    root: ResourceKey,
    location: ResourceKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RegistryType<T> {
    pub fn new(root: ResourceKey, location: ResourceKey) -> Self {
        Self {
            root,
            location,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn root(&self) -> &ResourceKey {
        &self.root
    }

    #[inline]
    pub fn location(&self) -> &ResourceKey {
        &self.location
    }
}

impl<T> Clone for RegistryType<T> {
    fn clone(&self) -> Self {
        Self::new(self.root.clone(), self.location.clone())
    }
}

impl<T> PartialEq for RegistryType<T> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.location == other.location
    }
}

impl<T> Eq for RegistryType<T> {}

impl<T> fmt::Debug for RegistryType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistryType({} / {})", self.root, self.location)
    }
}

/// Read-only access to a set of registries.
///
/// Lookups must not have side effects; they may be called from any thread that
/// can reach the holder.
pub trait RegistryHolder {
    fn find<T: Any>(&self, registry: &RegistryType<T>, key: &ResourceKey) -> Option<&T>;
}

type Entries = HashMap<ResourceKey, Box<dyn Any + Send + Sync>>;

/// In-memory [`RegistryHolder`].
#[derive(Default)]
pub struct Registries {
    registries: HashMap<(ResourceKey, ResourceKey), Entries>,
}

impl Registries {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under `key`, returning the value it replaced.
    pub fn register<T: Any + Send + Sync>(
        &mut self,
        registry: &RegistryType<T>,
        key: ResourceKey,
        value: T,
    ) -> Option<T> {
        let entries = self
            .registries
            .entry((registry.root.clone(), registry.location.clone()))
            .or_default();
        let previous = entries.insert(key, Box::new(value))?;
        previous.downcast::<T>().ok().map(|value| *value)
    }

    /// Number of entries in `registry`.
    pub fn len<T>(&self, registry: &RegistryType<T>) -> usize {
        self.registries
            .get(&(registry.root.clone(), registry.location.clone()))
            .map_or(0, HashMap::len)
    }
}

impl RegistryHolder for Registries {
    fn find<T: Any>(&self, registry: &RegistryType<T>, key: &ResourceKey) -> Option<&T> {
        self.registries
            .get(&(registry.root.clone(), registry.location.clone()))?
            .get(key)?
            .downcast_ref::<T>()
    }
}

impl fmt::Debug for Registries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.registries
                    .iter()
                    .map(|((root, location), entries)| (format!("{root} / {location}"), entries.len())),
            )
            .finish()
    }
}

static GLOBAL: OnceLock<Registries> = OnceLock::new();

/// Installs the process-wide registries used by the `*_global` accessors.
///
/// Can only succeed once; a second call hands the registries back.
pub fn install_global(registries: Registries) -> Result<(), Registries> {
    GLOBAL.set(registries)
}

/// The process-wide registries, if installed.
#[inline]
pub fn global() -> Option<&'static Registries> {
    GLOBAL.get()
}
