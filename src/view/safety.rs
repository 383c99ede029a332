use crate::DataValue;

/// Clone policy of a container, shared by every view of its tree.
///
/// | mode | `set` stores | `get` returns | `copy` lists |
/// |------|--------------|---------------|--------------|
/// | [`AllDataCloned`](SafetyMode::AllDataCloned) | deep clone | deep clone | deep clone |
/// | [`ClonedOnSet`](SafetyMode::ClonedOnSet) | deep clone | shared handle | shared |
/// | [`NoDataCloned`](SafetyMode::NoDataCloned) | the given handle | shared handle | shared |
///
/// Nested views are always materialized as fresh nodes and opaque objects are
/// never cloned, whatever the mode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum SafetyMode {
    #[default]
    AllDataCloned,
    ClonedOnSet,
    /// Lists are shared between the caller, the container and its copies.
    ///
    /// A shared list may end up holding a view of the very container that
    /// stores it. Such a tree stays alive after its last outside handle is
    /// dropped, and its `Debug` output does not terminate. Clear the list or
    /// remove its entry to break the cycle.
    NoDataCloned,
}

impl SafetyMode {
    #[inline]
    pub(crate) fn on_set(self, value: DataValue) -> DataValue {
        match self {
            SafetyMode::NoDataCloned => value,
            _ => value.deep_clone(),
        }
    }

    #[inline]
    pub(crate) fn on_get(self, value: &DataValue) -> DataValue {
        match self {
            SafetyMode::AllDataCloned => value.deep_clone(),
            _ => value.clone(),
        }
    }

    #[inline]
    pub(crate) fn on_copy(self, value: &DataValue) -> DataValue {
        self.on_get(value)
    }
}
