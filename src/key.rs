use std::any::type_name;

use crate::{RegistryType, ResourceKey};

/// A registered data key: a resource key naming a piece of data together
/// with the type of the element it stores.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DataKey {
    key: ResourceKey,
    element_type: &'static str,
}

impl DataKey {
    pub fn new<E: 'static>(key: ResourceKey) -> Self {
        Self {
            key,
            element_type: type_name::<E>(),
        }
    }

    #[inline]
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    #[inline]
    pub fn element_type(&self) -> &'static str {
        self.element_type
    }
}

/// The registry data keys are looked up in.
pub fn data_key_registry() -> RegistryType<DataKey> {
    RegistryType::new(
        ResourceKey::new_unchecked(ResourceKey::SPONGE_NAMESPACE, "root"),
        ResourceKey::new_unchecked(ResourceKey::SPONGE_NAMESPACE, "key"),
    )
}
