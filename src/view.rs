//! Path-addressed views over a tree of [`DataValue`]s.
//!
//! A [`DataContainer`] owns a tree of nodes; a [`DataView`] is a handle on one
//! node of that tree. Views are cheap to clone and all clones address the same
//! node. Nodes hold their children strongly and their parent weakly, so a
//! tree is freed as soon as the last handle on its container is dropped,
//! unless a list shared under [`SafetyMode::NoDataCloned`] holds a view of
//! the same tree.
//!
//! Views use `Rc` internally and are neither `Send` nor `Sync`: a container
//! is confined to the thread that built it.
//!
//! # Example
//!
//! ```
//! use dataview::DataContainer;
//!
//! let container = DataContainer::new();
//! container.set("player.name", "Steve")?.set("player.level", 30)?;
//!
//! let player = container.get_view("player").unwrap();
//! assert_eq!(player.name(), "player");
//! assert_eq!(player.get_int("level"), Some(30));
//! assert_eq!(container.get_string("player.name").as_deref(), Some("Steve"));
//! # Ok::<(), dataview::Error>(())
//! ```

use std::{
    cell::RefCell,
    fmt,
    ops::Deref,
    rc::{Rc, Weak},
};

use crate::{DataQuery, DataValue, Error, Index, Result, cold_path};

mod delegate;
mod safety;
mod typed;

pub use safety::*;

type NodeRef = Rc<RefCell<Node>>;

struct Node {
    name: String,
    path: DataQuery,
    parent: Weak<RefCell<Node>>,
    entries: Vec<(String, Slot)>,
}

#[derive(Clone)]
enum Slot {
    Data(DataValue),
    View(NodeRef),
}

impl Node {
    fn root() -> NodeRef {
        Rc::new(RefCell::new(Node {
            name: String::new(),
            path: DataQuery::empty(),
            parent: Weak::new(),
            entries: Vec::new(),
        }))
    }

    fn child(parent: &NodeRef, key: &str) -> NodeRef {
        let path = parent.borrow().path.then_key(key);
        Rc::new(RefCell::new(Node {
            name: key.to_owned(),
            path,
            parent: Rc::downgrade(parent),
            entries: Vec::new(),
        }))
    }

    #[inline]
    fn slot(&self, key: &str) -> Option<&Slot> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, slot)| slot)
    }

    /// Replaces in place so the key keeps its enumeration position.
    fn insert(&mut self, key: &str, slot: Slot) -> Option<Slot> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, slot)),
            None => {
                self.entries.push((key.to_owned(), slot));
                None
            }
        }
    }

    fn remove(&mut self, key: &str) -> Option<Slot> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }
}

fn detach(slot: Slot) {
    if let Slot::View(node) = slot {
        node.borrow_mut().parent = Weak::new();
    }
}

fn nodes_eq(a: &NodeRef, b: &NodeRef) -> bool {
    if Rc::ptr_eq(a, b) {
        return true;
    }
    let a = a.borrow();
    let b = b.borrow();
    a.entries.len() == b.entries.len()
        && a.entries.iter().all(|(key, slot)| match (slot, b.slot(key)) {
            (Slot::Data(x), Some(Slot::Data(y))) => x == y,
            (Slot::View(x), Some(Slot::View(y))) => nodes_eq(x, y),
            _ => false,
        })
}

struct Root {
    safety: SafetyMode,
    node: NodeRef,
}

/// A handle on one node of a container's tree.
///
/// Equality compares contents, ignoring key order and the position of the
/// view inside its tree.
#[derive(Clone)]
pub struct DataView {
    root: Rc<Root>,
    node: NodeRef,
}

impl DataView {
    #[inline]
    fn handle(&self, node: NodeRef) -> DataView {
        DataView {
            root: self.root.clone(),
            node,
        }
    }

    /// The root container owning this view.
    pub fn container(&self) -> DataContainer {
        DataContainer {
            view: self.handle(self.root.node.clone()),
        }
    }

    /// Full path of this view from its container.
    pub fn current_path(&self) -> DataQuery {
        self.node.borrow().path.clone()
    }

    /// Last segment of [`current_path`](Self::current_path); empty for a container.
    pub fn name(&self) -> String {
        self.node.borrow().name.clone()
    }

    /// The enclosing view, or `None` for a container or a removed view.
    pub fn parent(&self) -> Option<DataView> {
        let parent = self.node.borrow().parent.upgrade()?;
        Some(self.handle(parent))
    }

    #[inline]
    pub fn safety_mode(&self) -> SafetyMode {
        self.root.safety
    }

    /// Returns `true` if this view is the root of its container.
    #[inline]
    pub fn is_container(&self) -> bool {
        Rc::ptr_eq(&self.node, &self.root.node)
    }

    /// Number of direct entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.node.borrow().entries.len()
    }

    /// Returns `true` if this view has no direct entries. A view holding only
    /// empty child views is not empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node.borrow().entries.is_empty()
    }

    /// Walks `segments` through nested views without creating anything.
    fn resolve(&self, segments: &[String]) -> Option<NodeRef> {
        let mut current = self.node.clone();
        for segment in segments {
            let next = match current.borrow().slot(segment) {
                Some(Slot::View(child)) => child.clone(),
                _ => return None,
            };
            current = next;
        }
        Some(current)
    }

    /// Walks `segments`, replacing anything that is not a view with a fresh node.
    fn materialize(&self, segments: &[String]) -> NodeRef {
        let mut current = self.node.clone();
        for segment in segments {
            let existing = match current.borrow().slot(segment) {
                Some(Slot::View(child)) => Some(child.clone()),
                _ => None,
            };
            current = match existing {
                Some(child) => child,
                None => attach(&current, segment),
            };
        }
        current
    }

    fn slot_at(&self, query: &DataQuery) -> Option<Slot> {
        let Some((leaf, parents)) = query.parts().split_last() else {
            return Some(Slot::View(self.node.clone()));
        };
        let node = self.resolve(parents)?;
        let slot = node.borrow().slot(leaf).cloned();
        slot
    }

    fn read(&self, slot: Slot) -> DataValue {
        match slot {
            Slot::Data(value) => self.root.safety.on_get(&value),
            Slot::View(node) => DataValue::View(self.handle(node)),
        }
    }

    /// Shallow snapshot of the direct entries, bypassing the safety mode.
    pub(crate) fn snapshot(&self) -> Vec<(String, DataValue)> {
        let entries = self.node.borrow().entries.clone();
        entries
            .into_iter()
            .map(|(key, slot)| {
                let value = match slot {
                    Slot::Data(value) => value,
                    Slot::View(node) => DataValue::View(self.handle(node)),
                };
                (key, value)
            })
            .collect()
    }

    fn store(&self, node: &NodeRef, key: &str, value: DataValue) {
        match value {
            DataValue::View(source) => {
                // The source may be the node being replaced or one of its ancestors.
                let entries = source.snapshot();
                let target = self.handle(attach(node, key));
                for (key, value) in entries {
                    target.store(&target.node, &key, value);
                }
            }
            value => {
                let value = self.root.safety.on_set(value);
                let previous = node.borrow_mut().insert(key, Slot::Data(value));
                if let Some(previous) = previous {
                    detach(previous);
                }
            }
        }
    }

    /// Stores a value no other handle refers to, bypassing the safety mode.
    pub(crate) fn store_owned(&self, key: &str, value: DataValue) {
        if let DataValue::View(_) = value {
            return self.store(&self.node, key, value);
        }
        let previous = self.node.borrow_mut().insert(key, Slot::Data(value));
        if let Some(previous) = previous {
            detach(previous);
        }
    }

    /// Returns `true` if a value of any kind is reachable at `path`.
    ///
    /// The empty path addresses this view and is always contained.
    pub fn contains(&self, path: impl Index) -> bool {
        let query = path.to_query();
        let Some((leaf, parents)) = query.parts().split_last() else {
            return true;
        };
        self.resolve(parents)
            .is_some_and(|node| node.borrow().slot(leaf).is_some())
    }

    /// Returns `true` if every path is contained. Stops at the first missing one.
    pub fn contains_all<I>(&self, paths: I) -> bool
    where
        I: IntoIterator,
        I::Item: Index,
    {
        paths.into_iter().all(|path| self.contains(path))
    }

    /// Returns the raw value at `path` without creating any structure.
    ///
    /// The empty path returns this view. Lists are deep-cloned under
    /// [`SafetyMode::AllDataCloned`] and shared otherwise.
    pub fn get(&self, path: impl Index) -> Option<DataValue> {
        let query = path.to_query();
        log::trace!("get {} from {}", query, self.current_path());
        let slot = self.slot_at(&query)?;
        Some(self.read(slot))
    }

    /// Stores `value` at `path`, creating intermediate views and overwriting
    /// whatever was there.
    ///
    /// A view value is copied into a fresh node of this tree. Returns this view
    /// so calls can be chained.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPath`] if `path` has no segments.
    pub fn set(&self, path: impl Index, value: impl Into<DataValue>) -> Result<&Self> {
        let query = path.to_query();
        let Some((leaf, parents)) = query.parts().split_last() else {
            cold_path();
            return Err(Error::EmptyPath("set"));
        };
        log::trace!("set {} under {}", query, self.current_path());
        let node = self.materialize(parents);
        self.store(&node, leaf, value.into());
        Ok(self)
    }

    /// Deletes the entry at `path`. Removing a missing entry does nothing.
    ///
    /// To remove a view itself, remove its name from its parent.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPath`] if `path` has no segments.
    pub fn remove(&self, path: impl Index) -> Result<&Self> {
        let query = path.to_query();
        let Some((leaf, parents)) = query.parts().split_last() else {
            cold_path();
            return Err(Error::EmptyPath("remove"));
        };
        if let Some(node) = self.resolve(parents) {
            let removed = node.borrow_mut().remove(leaf);
            if let Some(removed) = removed {
                log::debug!("removed {} under {}", query, self.current_path());
                detach(removed);
            }
        }
        Ok(self)
    }

    /// Creates an empty view at `path`, discarding whatever was there.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPath`] if `path` has no segments.
    pub fn create_view(&self, path: impl Index) -> Result<DataView> {
        let query = path.to_query();
        let Some((leaf, parents)) = query.parts().split_last() else {
            cold_path();
            return Err(Error::EmptyPath("create_view"));
        };
        let parent = self.materialize(parents);
        Ok(self.handle(attach(&parent, leaf)))
    }

    /// Creates a view at `path` and fills it from `entries`. Keys are parsed
    /// as dotted queries relative to the new view.
    pub fn create_view_with<I, K, V>(&self, path: impl Index, entries: I) -> Result<DataView>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<DataValue>,
    {
        let view = self.create_view(path)?;
        for (key, value) in entries {
            view.set(key.as_ref(), value)?;
        }
        Ok(view)
    }

    /// Keys of this view.
    ///
    /// With `deep`, every reachable path is listed, intermediate views before
    /// their contents, each relative to this view.
    pub fn keys(&self, deep: bool) -> Vec<DataQuery> {
        let mut out = Vec::new();
        collect(&self.node, &DataQuery::empty(), deep, &mut |path, _| {
            out.push(path)
        });
        out
    }

    /// Same traversal as [`keys`](Self::keys), paired with each value.
    pub fn values(&self, deep: bool) -> Vec<(DataQuery, DataValue)> {
        let mut out = Vec::new();
        collect(&self.node, &DataQuery::empty(), deep, &mut |path, slot| {
            out.push((path, self.read(slot.clone())))
        });
        out
    }

    /// Copies this view's subtree into a new container with the same safety mode.
    ///
    /// The copy is rooted at the empty path whatever this view's own path is.
    #[inline]
    pub fn copy(&self) -> DataContainer {
        self.copy_with(self.root.safety)
    }

    /// Copies this view's subtree into a new container using `safety` both for
    /// the copy pass and as the new container's mode.
    pub fn copy_with(&self, safety: SafetyMode) -> DataContainer {
        let container = DataContainer::with_safety(safety);
        copy_into(&self.node, &container.node, safety);
        log::debug!(
            "copied {} ({} entries) with {:?}",
            self.current_path(),
            self.len(),
            safety
        );
        container
    }
}

fn attach(parent: &NodeRef, key: &str) -> NodeRef {
    let child = Node::child(parent, key);
    let previous = parent.borrow_mut().insert(key, Slot::View(child.clone()));
    if let Some(previous) = previous {
        log::debug!(
            "replaced existing data at {} with a new view",
            child.borrow().path
        );
        detach(previous);
    }
    child
}

fn collect(node: &NodeRef, prefix: &DataQuery, deep: bool, f: &mut impl FnMut(DataQuery, &Slot)) {
    let entries = node.borrow().entries.clone();
    for (key, slot) in &entries {
        let path = prefix.then_key(key.as_str());
        f(path.clone(), slot);
        if let (true, Slot::View(child)) = (deep, slot) {
            collect(child, &path, deep, f);
        }
    }
}

fn copy_into(source: &NodeRef, target: &NodeRef, safety: SafetyMode) {
    let entries = source.borrow().entries.clone();
    for (key, slot) in entries {
        match slot {
            Slot::Data(value) => {
                let value = safety.on_copy(&value);
                target.borrow_mut().insert(&key, Slot::Data(value));
            }
            Slot::View(child) => {
                let copied = attach(target, &key);
                copy_into(&child, &copied, safety);
            }
        }
    }
}

impl PartialEq for DataView {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        nodes_eq(&self.node, &other.node)
    }
}

impl fmt::Debug for DataView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.snapshot()).finish()
    }
}

/// The root of a tree of views.
///
/// A container is the view at the empty path: it is its own
/// [`container`](DataView::container) and has no [`parent`](DataView::parent).
/// It dereferences to [`DataView`] for every path operation.
#[derive(Clone, PartialEq)]
pub struct DataContainer {
    view: DataView,
}

impl DataContainer {
    /// An empty container with [`SafetyMode::AllDataCloned`].
    #[inline]
    pub fn new() -> Self {
        Self::with_safety(SafetyMode::default())
    }

    pub fn with_safety(safety: SafetyMode) -> Self {
        let node = Node::root();
        Self {
            view: DataView {
                root: Rc::new(Root {
                    safety,
                    node: node.clone(),
                }),
                node,
            },
        }
    }

    /// A container filled from `entries`, keys parsed as dotted queries.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<DataValue>,
    {
        let container = Self::new();
        for (key, value) in entries {
            container.set(key.as_ref(), value)?;
        }
        Ok(container)
    }

    #[inline]
    pub fn as_view(&self) -> &DataView {
        &self.view
    }

    #[inline]
    pub fn into_view(self) -> DataView {
        self.view
    }
}

impl Default for DataContainer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for DataContainer {
    type Target = DataView;

    #[inline]
    fn deref(&self) -> &DataView {
        &self.view
    }
}

impl fmt::Debug for DataContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view.fmt(f)
    }
}
