//! Module containing the implementation of the [`RadixMap`] and associated
//! iterators.

use crate::{raw, raw::Node, AsBytes};
use std::{
    borrow::Borrow,
    collections::HashMap,
    fmt::Debug,
    hash::{Hash, Hasher},
    ops::{ControlFlow, Index},
};

mod iterators;
pub use iterators::*;

/// An ordered map based on a compressed prefix tree (PATRICIA-style radix
/// trie), keyed by byte strings.
///
/// Runs of keys sharing a common prefix share a single path through the
/// tree: each node carries a multi-byte prefix segment, and nodes with a
/// single child and no value of their own are merged away. On top of the
/// usual map operations this enables longest-prefix matching
/// ([`RadixMap::longest_prefix`]), prefix-scoped traversal
/// ([`RadixMap::walk_prefix`]) and prefix-scoped bulk removal
/// ([`RadixMap::remove_prefix`]).
///
/// Iteration and traversal visit keys in lexicographic byte order, with a
/// key always visited before any key that extends it.
///
/// The empty key is not storable: inserting it is a silent no-op. This
/// mirrors the root node owning the empty prefix and never carrying a
/// value.
#[derive(Clone)]
pub struct RadixMap<K, V> {
    /// The node every descent starts from; its prefix is always empty.
    pub(crate) root: Node<K, V>,
    /// The number of present leaves.
    num_entries: usize,
}

impl<K, V> RadixMap<K, V> {
    /// Create a new, empty [`RadixMap`].
    ///
    /// This function will not pre-allocate anything.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let map = RadixMap::<String, ()>::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        RadixMap {
            root: Node::new(&[]),
            num_entries: 0,
        }
    }

    /// Returns the number of keys in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let mut map = RadixMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(String::from("a"), 'a');
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.num_entries
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// Removes every entry from the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let mut map = RadixMap::new();
    /// map.insert(String::from("a"), 'a');
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.get("a"), None);
    /// ```
    pub fn clear(&mut self) {
        self.root = Node::new(&[]);
        self.num_entries = 0;
    }

    /// An iterator over the entries of the map, in lexicographic order of
    /// keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let map: RadixMap<_, _> = [("b", 2), ("a", 1)].into_iter().collect();
    /// let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(entries, [("a", 1), ("b", 2)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// An iterator over the keys of the map, in lexicographic order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self)
    }

    /// An iterator over the values of the map, ordered by their keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self)
    }
}

impl<K, V> RadixMap<K, V>
where
    K: AsBytes,
{
    /// Insert a key-value pair into the map, returning the previous value
    /// if the key was already present.
    ///
    /// An existing entry keeps its original key object; only the value is
    /// replaced. Inserting under the empty key stores nothing and returns
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let mut map = RadixMap::new();
    /// assert_eq!(map.insert(String::from("a"), 1), None);
    /// assert_eq!(map.insert(String::from("a"), 2), Some(1));
    /// assert_eq!(map.len(), 1);
    ///
    /// // The empty key is rejected without error.
    /// assert_eq!(map.insert(String::new(), 3), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if key.as_bytes().is_empty() {
            return None;
        }
        let previous = raw::insert_into(&mut self.root, key, value);
        if previous.is_none() {
            self.num_entries += 1;
        }
        previous
    }

    /// Returns a reference to the value stored under exactly the given
    /// key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let mut map = RadixMap::new();
    /// map.insert(String::from("foo"), 1);
    /// assert_eq!(map.get("foo"), Some(&1));
    /// assert_eq!(map.get("fo"), None);
    /// assert_eq!(map.get("foobar"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: AsBytes + ?Sized,
    {
        raw::search(&self.root, key.as_bytes()).map(|leaf| &leaf.value)
    }

    /// Returns the stored key-value pair matching the given key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: AsBytes + ?Sized,
    {
        raw::search(&self.root, key.as_bytes()).map(|leaf| (&leaf.key, &leaf.value))
    }

    /// Returns a mutable reference to the value stored under exactly the
    /// given key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let mut map = RadixMap::new();
    /// map.insert(String::from("foo"), 1);
    /// *map.get_mut("foo").unwrap() += 10;
    /// assert_eq!(map.get("foo"), Some(&11));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: AsBytes + ?Sized,
    {
        raw::search_mut(&mut self.root, key.as_bytes()).map(|leaf| &mut leaf.value)
    }

    /// Returns `true` if the map contains the given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: AsBytes + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Remove the entry stored under exactly the given key, returning its
    /// value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let mut map = RadixMap::new();
    /// map.insert(String::from("foo"), 1);
    /// assert_eq!(map.remove("foo"), Some(1));
    /// assert_eq!(map.remove("foo"), None);
    /// assert!(map.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: AsBytes + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove the entry stored under exactly the given key, returning the
    /// stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: AsBytes + ?Sized,
    {
        let leaf = raw::remove(&mut self.root, key.as_bytes())?;
        self.num_entries -= 1;
        Some((leaf.key, leaf.value))
    }

    /// Remove every entry whose key starts with the given prefix,
    /// returning how many entries were removed.
    ///
    /// An empty prefix matches every key and clears the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let mut map: RadixMap<_, _> = [
    ///     ("romane", 1),
    ///     ("romanus", 2),
    ///     ("romulus", 3),
    ///     ("rubens", 4),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// assert_eq!(map.remove_prefix("rom"), 3);
    /// assert_eq!(map.len(), 1);
    /// assert!(map.contains_key("rubens"));
    /// ```
    pub fn remove_prefix<Q>(&mut self, prefix: &Q) -> usize
    where
        Q: AsBytes + ?Sized,
    {
        let removed = raw::remove_prefix(&mut self.root, prefix.as_bytes());
        self.num_entries -= removed;
        removed
    }

    /// Find the entry whose key is the longest byte-prefix of the given
    /// pattern.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let mut map = RadixMap::new();
    /// map.insert(String::from("foo"), 1);
    /// map.insert(String::from("foobar"), 2);
    ///
    /// let (key, value) = map.longest_prefix("foobarbaz").unwrap();
    /// assert_eq!((key.as_str(), *value), ("foobar", 2));
    ///
    /// // No key in the map is a prefix of "fo".
    /// assert_eq!(map.longest_prefix("fo"), None);
    /// ```
    pub fn longest_prefix<Q>(&self, pattern: &Q) -> Option<(&K, &V)>
    where
        Q: AsBytes + ?Sized,
    {
        raw::longest_prefix_search(&self.root, pattern.as_bytes())
            .map(|leaf| (&leaf.key, &leaf.value))
    }

    /// Visit every entry in depth-first pre-order: a key is visited before
    /// any key extending it, siblings in lexicographic order. Returning
    /// [`ControlFlow::Break`] from the callback stops the walk.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    /// use std::ops::ControlFlow;
    ///
    /// let map: RadixMap<_, _> = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
    ///
    /// let mut seen = Vec::new();
    /// let flow = map.walk(|key, _| {
    ///     seen.push(*key);
    ///     if *key == "b" {
    ///         ControlFlow::Break(())
    ///     } else {
    ///         ControlFlow::Continue(())
    ///     }
    /// });
    /// assert_eq!(flow, ControlFlow::Break(()));
    /// assert_eq!(seen, ["a", "b"]);
    /// ```
    pub fn walk<F>(&self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        raw::walk_tree(&self.root, &mut f)
    }

    /// Visit every entry whose key starts with the given prefix, in the
    /// same order as [`RadixMap::walk`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    /// use std::ops::ControlFlow;
    ///
    /// let map: RadixMap<_, _> = [
    ///     ("romane", 1),
    ///     ("romanus", 2),
    ///     ("romulus", 3),
    ///     ("rubens", 4),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let mut seen = Vec::new();
    /// let _ = map.walk_prefix("rom", |key, _| {
    ///     seen.push(*key);
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(seen, ["romane", "romanus", "romulus"]);
    /// ```
    pub fn walk_prefix<Q, F>(&self, prefix: &Q, mut f: F) -> ControlFlow<()>
    where
        Q: AsBytes + ?Sized,
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        raw::walk_prefix(&self.root, prefix.as_bytes(), &mut f)
    }

    /// Visit every entry whose key is a prefix of the given path, from the
    /// shortest to the longest. This is the mirror image of
    /// [`RadixMap::walk_prefix`]: it reports the stored keys *on the way
    /// to* `path` rather than the keys extending it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    /// use std::ops::ControlFlow;
    ///
    /// let map: RadixMap<_, _> = [("foo", 1), ("foobar", 2), ("foobarbaz", 3)]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let mut seen = Vec::new();
    /// let _ = map.walk_path("foobarba", |key, _| {
    ///     seen.push(*key);
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(seen, ["foo", "foobar"]);
    /// ```
    pub fn walk_path<Q, F>(&self, path: &Q, mut f: F) -> ControlFlow<()>
    where
        Q: AsBytes + ?Sized,
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        raw::walk_path(&self.root, path.as_bytes(), &mut f)
    }

    /// Keep only the entries the predicate approves of, visiting them in
    /// the same pre-order as [`RadixMap::walk`]. The predicate receives
    /// the value mutably, so it can update entries it keeps.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let mut map: RadixMap<_, _> = [("apple", 1), ("banana", 2), ("cherry", 3)]
    ///     .into_iter()
    ///     .collect();
    ///
    /// map.retain(|_, value| *value % 2 == 1);
    /// let kept: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(kept, ["apple", "cherry"]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let removed = raw::retain_tree(&mut self.root, true, &mut f);
        self.num_entries -= removed;
    }

    /// Collect every entry into a fresh [`HashMap`]. The result aliases
    /// nothing inside the tree; keys and values are cloned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radix_map::RadixMap;
    ///
    /// let map: RadixMap<_, _> = [("a", 1), ("b", 2)].into_iter().collect();
    /// let snapshot = map.to_map();
    /// assert_eq!(snapshot.len(), map.len());
    /// assert_eq!(snapshot["a"], 1);
    /// ```
    pub fn to_map(&self) -> HashMap<K, V>
    where
        K: Clone + Eq + Hash,
        V: Clone,
    {
        let mut out = HashMap::with_capacity(self.num_entries);
        let _ = self.walk(|key, value| {
            out.insert(key.clone(), value.clone());
            ControlFlow::Continue(())
        });
        out
    }
}

impl<K, V> Default for RadixMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for RadixMap<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for RadixMap<K, V>
where
    K: AsBytes,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RadixMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for RadixMap<K, V>
where
    K: AsBytes,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> Extend<(&'a K, &'a V)> for RadixMap<K, V>
where
    K: AsBytes + Copy,
    V: Copy,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(*key, *value);
        }
    }
}

impl<K, V, Q> Index<&Q> for RadixMap<K, V>
where
    K: Borrow<Q> + AsBytes,
    Q: AsBytes + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V> PartialEq for RadixMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(lhs, rhs)| lhs == rhs)
    }
}

impl<K, V> Eq for RadixMap<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> Hash for RadixMap<K, V>
where
    K: Hash,
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}
