use std::any::{Any, type_name};

use crate::{
    DataKey, DataManager, DataSerializable, DataValue, DataView, Error, Index, Opaque,
    RegistryHolder, RegistryType, Result, data_key_registry,
};

impl DataView {
    /// Stores the container produced by `object` at `path`.
    pub fn set_serializable(
        &self,
        path: impl Index,
        object: &impl DataSerializable,
    ) -> Result<&Self> {
        self.set(path, object.to_container())
    }

    /// Stores `object` at `path` through its registered translator, or as an
    /// [`Opaque`] value when `T` has none.
    pub fn set_object<T: Any>(
        &self,
        path: impl Index,
        object: T,
        manager: &DataManager,
    ) -> Result<&Self> {
        match manager.translator::<T>() {
            Some(translator) => self.set(path, translator.serialize(&object)),
            None => self.set(path, Opaque::new(object)),
        }
    }

    /// Builds a `T` from the view at `path` with the builder registered for `T`.
    ///
    /// `Ok(None)` if there is no view at `path`, no builder for `T`, or the
    /// builder declines the data.
    ///
    /// # Errors
    ///
    /// [`Error::Deserialize`] wrapping the builder's failure.
    pub fn get_serializable<T: 'static>(
        &self,
        path: impl Index,
        manager: &DataManager,
    ) -> Result<Option<T>> {
        let Some(view) = self.get_view(path) else {
            return Ok(None);
        };
        let Some(builder) = manager.builder::<T>() else {
            log::debug!("no builder registered for {}", type_name::<T>());
            return Ok(None);
        };
        builder.build(&view).map_err(Error::deserialize::<T>)
    }

    /// Builds a `T` from every view of the list at `path`.
    ///
    /// `Ok(None)` if any element is not a view or is declined by the builder.
    pub fn get_serializable_list<T: 'static>(
        &self,
        path: impl Index,
        manager: &DataManager,
    ) -> Result<Option<Vec<T>>> {
        let Some(views) = self.get_view_list(path) else {
            return Ok(None);
        };
        let Some(builder) = manager.builder::<T>() else {
            log::debug!("no builder registered for {}", type_name::<T>());
            return Ok(None);
        };
        let mut out = Vec::with_capacity(views.len());
        for view in &views {
            match builder.build(view).map_err(Error::deserialize::<T>)? {
                Some(object) => out.push(object),
                None => return Ok(None),
            }
        }
        Ok(Some(out))
    }

    /// Reads a `T` at `path`: an [`Opaque`] holding a `T` is cloned out,
    /// anything else goes through the translator registered for `T`.
    ///
    /// # Errors
    ///
    /// [`Error::Deserialize`] wrapping the translator's failure.
    pub fn get_object<T: Any + Clone>(
        &self,
        path: impl Index,
        manager: &DataManager,
    ) -> Result<Option<T>> {
        match self.get(path) {
            Some(value) => object_from(&value, manager),
            None => Ok(None),
        }
    }

    /// Reads every element of the list at `path` like [`get_object`](Self::get_object).
    ///
    /// `Ok(None)` if any element yields nothing.
    pub fn get_object_list<T: Any + Clone>(
        &self,
        path: impl Index,
        manager: &DataManager,
    ) -> Result<Option<Vec<T>>> {
        let Some(list) = self.get_list(path) else {
            return Ok(None);
        };
        let values = list.to_vec();
        let mut out = Vec::with_capacity(values.len());
        for value in &values {
            match object_from(value, manager)? {
                Some(object) => out.push(object),
                None => return Ok(None),
            }
        }
        Ok(Some(out))
    }

    /// Looks up the resource key stored at `path` in `registry`.
    pub fn get_registry_value<T: Any + Clone>(
        &self,
        path: impl Index,
        registry: &RegistryType<T>,
        holder: &impl RegistryHolder,
    ) -> Option<T> {
        let key = self.get_resource_key(path)?;
        holder.find(registry, &key).cloned()
    }

    /// Looks up every resource key of the list at `path`. Malformed keys are
    /// skipped like [`get_resource_key_list`](Self::get_resource_key_list);
    /// a well-formed key missing from the registry makes the result `None`.
    pub fn get_registry_value_list<T: Any + Clone>(
        &self,
        path: impl Index,
        registry: &RegistryType<T>,
        holder: &impl RegistryHolder,
    ) -> Option<Vec<T>> {
        let keys = self.get_resource_key_list(path)?;
        keys.iter()
            .map(|key| holder.find(registry, key).cloned())
            .collect()
    }

    /// [`get_registry_value`](Self::get_registry_value) against the
    /// process-wide registries; `None` if none are installed.
    pub fn get_registry_value_global<T: Any + Clone>(
        &self,
        path: impl Index,
        registry: &RegistryType<T>,
    ) -> Option<T> {
        let Some(holder) = crate::registry::global() else {
            log::debug!("no global registries installed");
            return None;
        };
        self.get_registry_value(path, registry, holder)
    }

    pub fn get_registry_value_list_global<T: Any + Clone>(
        &self,
        path: impl Index,
        registry: &RegistryType<T>,
    ) -> Option<Vec<T>> {
        let Some(holder) = crate::registry::global() else {
            log::debug!("no global registries installed");
            return None;
        };
        self.get_registry_value_list(path, registry, holder)
    }

    pub fn get_data_key(&self, path: impl Index, holder: &impl RegistryHolder) -> Option<DataKey> {
        self.get_registry_value(path, &data_key_registry(), holder)
    }

    pub fn get_data_key_list(
        &self,
        path: impl Index,
        holder: &impl RegistryHolder,
    ) -> Option<Vec<DataKey>> {
        self.get_registry_value_list(path, &data_key_registry(), holder)
    }
}

fn object_from<T: Any + Clone>(value: &DataValue, manager: &DataManager) -> Result<Option<T>> {
    if let Some(object) = value.as_object().and_then(Opaque::downcast_ref::<T>) {
        return Ok(Some(object.clone()));
    }
    match manager.translator::<T>() {
        Some(translator) => translator.translate(value).map_err(Error::deserialize::<T>),
        None => {
            log::debug!("no translator registered for {}", type_name::<T>());
            Ok(None)
        }
    }
}
