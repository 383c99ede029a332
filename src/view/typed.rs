use crate::{DataList, DataValue, DataView, FromDataValue, Index, ResourceKey};

macro_rules! typed_getters {
    ($($(#[$meta:meta])* $get:ident, $get_list:ident => $t:ty;)*) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $get(&self, path: impl Index) -> Option<$t> {
                self.get_as::<$t>(path)
            }

            #[inline]
            pub fn $get_list(&self, path: impl Index) -> Option<Vec<$t>> {
                self.get_list_as::<$t>(path)
            }
        )*
    };
}

impl DataView {
    /// Reads the value at `path` as `T`, or `None` if it is missing or not
    /// coercible. See [`scalar`](crate::scalar) for the coercion rules.
    pub fn get_as<T: FromDataValue>(&self, path: impl Index) -> Option<T> {
        let value = self.get(path)?;
        let result = T::from_value(&value);
        if result.is_none() {
            log::trace!("{} value does not coerce to {}", value.kind(), T::KIND);
        }
        result
    }

    /// Reads the list at `path` as `Vec<T>`. Every element must coerce to `T`,
    /// otherwise the whole list reads as `None`.
    pub fn get_list_as<T: FromDataValue>(&self, path: impl Index) -> Option<Vec<T>> {
        let list = self.get_list(path)?;
        let list = list.borrow();
        list.iter().map(T::from_value).collect()
    }

    typed_getters! {
        /// Booleans also accept integers holding exactly 0 or 1.
        get_bool, get_bool_list => bool;
        get_byte, get_byte_list => i8;
        get_short, get_short_list => i16;
        get_int, get_int_list => i32;
        get_long, get_long_list => i64;
        get_float, get_float_list => f32;
        get_double, get_double_list => f64;
        get_string, get_string_list => String;
        /// A character is stored as a string of length one.
        get_char, get_char_list => char;
    }

    /// The list at `path`, shared or cloned according to the safety mode.
    pub fn get_list(&self, path: impl Index) -> Option<DataList> {
        match self.get(path)? {
            DataValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// The nested view at `path`. The empty path returns this view.
    pub fn get_view(&self, path: impl Index) -> Option<DataView> {
        match self.get(path)? {
            DataValue::View(view) => Some(view),
            _ => None,
        }
    }

    /// The direct entries of the view at `path`, in insertion order.
    pub fn get_map(&self, path: impl Index) -> Option<Vec<(String, DataValue)>> {
        self.get_view(path).map(|view| view.entries())
    }

    /// A list whose elements are all views.
    pub fn get_view_list(&self, path: impl Index) -> Option<Vec<DataView>> {
        let list = self.get_list(path)?;
        let list = list.borrow();
        list.iter().map(|value| value.as_view().cloned()).collect()
    }

    /// A list whose elements are all views, each read as its entries.
    pub fn get_map_list(&self, path: impl Index) -> Option<Vec<Vec<(String, DataValue)>>> {
        let views = self.get_view_list(path)?;
        Some(views.iter().map(DataView::entries).collect())
    }

    /// Direct entries of this view, in insertion order. Values follow the
    /// safety mode like [`get`](DataView::get).
    pub fn entries(&self) -> Vec<(String, DataValue)> {
        self.values(false)
            .into_iter()
            .map(|(query, value)| (query.to_string(), value))
            .collect()
    }

    /// The string at `path` parsed as a [`ResourceKey`]; `None` if it is
    /// missing or malformed.
    pub fn get_resource_key(&self, path: impl Index) -> Option<ResourceKey> {
        ResourceKey::resolve(&self.get_string(path)?).ok()
    }

    /// The string list at `path` parsed as resource keys.
    ///
    /// Malformed entries are skipped one by one. If no entry survives, the
    /// result is `None` rather than an empty list.
    pub fn get_resource_key_list(&self, path: impl Index) -> Option<Vec<ResourceKey>> {
        let strings = self.get_string_list(path)?;
        let keys: Vec<ResourceKey> = strings
            .iter()
            .filter_map(|s| match ResourceKey::resolve(s) {
                Ok(key) => Some(key),
                Err(e) => {
                    log::debug!("skipping list entry: {e}");
                    None
                }
            })
            .collect();
        if keys.is_empty() { None } else { Some(keys) }
    }
}
