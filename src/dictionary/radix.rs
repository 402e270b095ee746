//! Radix tree keyed by Hebrew surface forms.
//!
//! [`PrefixDictionary`] is a compressed prefix tree: chains of single-child
//! nodes are merged into one node holding a multi-character fragment, so a
//! dictionary of several hundred thousand inflected forms stays compact while
//! lookups walk at most one node per branching point.
//!
//! Nodes live in an arena (`Vec`) and refer to their children by index. Each
//! node keeps its children in a table sorted by branching character, which is
//! also what makes iteration come out in code-point order for free.
//!
//! # Examples
//!
//! ```
//! use hebmorph::dictionary::radix::PrefixDictionary;
//!
//! let mut dict = PrefixDictionary::new();
//! dict.insert("שלום", 1).unwrap();
//! dict.insert("שלומי", 2).unwrap();
//!
//! assert_eq!(dict.lookup("שלום", false).unwrap(), Some(&1));
//! assert!(dict.lookup("שלו", false).is_err());
//! assert_eq!(dict.lookup("שלו", true).unwrap(), None);
//!
//! let keys: Vec<String> = dict.iter().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec!["שלום", "שלומי"]);
//! ```

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{HebMorphError, Result};

const ROOT: usize = 0;

/// What to do when a key that already carries a value is inserted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InsertPolicy {
    /// Keep the first value written (first-write-wins).
    #[default]
    KeepFirst,
    /// Replace the stored value.
    Overwrite,
}

#[derive(Debug, Clone)]
struct Node<T> {
    fragment: Vec<char>,
    value: Option<T>,
    /// Sorted by branching character.
    children: Vec<(char, usize)>,
}

impl<T> Node<T> {
    fn new(fragment: Vec<char>, value: Option<T>) -> Self {
        Node {
            fragment,
            value,
            children: Vec::new(),
        }
    }

    fn child(&self, c: char) -> Option<usize> {
        self.children
            .binary_search_by_key(&c, |&(ch, _)| ch)
            .ok()
            .map(|i| self.children[i].1)
    }

    fn set_child(&mut self, c: char, index: usize) {
        match self.children.binary_search_by_key(&c, |&(ch, _)| ch) {
            Ok(i) => self.children[i].1 = index,
            Err(i) => self.children.insert(i, (c, index)),
        }
    }
}

/// A radix tree mapping string keys to values.
#[derive(Debug, Clone)]
pub struct PrefixDictionary<T> {
    nodes: Vec<Node<T>>,
    len: usize,
    policy: InsertPolicy,
}

impl<T> Default for PrefixDictionary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PrefixDictionary<T> {
    /// Create an empty dictionary with the first-write-wins policy.
    pub fn new() -> Self {
        Self::with_policy(InsertPolicy::default())
    }

    pub fn with_policy(policy: InsertPolicy) -> Self {
        PrefixDictionary {
            nodes: vec![Node::new(Vec::new(), None)],
            len: 0,
            policy,
        }
    }

    /// Build a dictionary from `(key, value)` pairs.
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
    {
        let mut dict = Self::new();
        for (key, value) in entries {
            dict.insert(key.as_ref(), value)?;
        }
        Ok(dict)
    }

    pub fn policy(&self) -> InsertPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: InsertPolicy) {
        self.policy = policy;
    }

    /// Number of keys carrying a value.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[ROOT] = Node::new(Vec::new(), None);
        self.len = 0;
    }

    /// Insert `value` under `key`.
    ///
    /// Re-inserting a present key follows the active [`InsertPolicy`].
    /// An empty key is rejected with [`HebMorphError::InvalidKey`] and leaves
    /// the dictionary unchanged.
    pub fn insert(&mut self, key: &str, value: T) -> Result<()> {
        if key.is_empty() {
            return Err(HebMorphError::invalid_key("dictionary keys must not be empty"));
        }
        let chars: Vec<char> = key.chars().collect();

        let mut parent = ROOT;
        let mut pos = 0;
        loop {
            let Some(child) = self.nodes[parent].child(chars[pos]) else {
                let leaf = self.push_node(chars[pos..].to_vec(), Some(value));
                self.nodes[parent].set_child(chars[pos], leaf);
                self.len += 1;
                return Ok(());
            };

            let fragment = &self.nodes[child].fragment;
            let common = fragment
                .iter()
                .zip(&chars[pos..])
                .take_while(|(a, b)| a == b)
                .count();

            if common < fragment.len() {
                // The key leaves this fragment part way through (or ends
                // inside it): put a branching node at the divergence point.
                let bridge = self.split(parent, child, common);
                pos += common;
                if pos == chars.len() {
                    self.nodes[bridge].value = Some(value);
                } else {
                    let leaf = self.push_node(chars[pos..].to_vec(), Some(value));
                    self.nodes[bridge].set_child(chars[pos], leaf);
                }
                self.len += 1;
                return Ok(());
            }

            pos += common;
            if pos == chars.len() {
                self.store(child, key, value);
                return Ok(());
            }
            parent = child;
        }
    }

    fn push_node(&mut self, fragment: Vec<char>, value: Option<T>) -> usize {
        self.nodes.push(Node::new(fragment, value));
        self.nodes.len() - 1
    }

    /// Split `child` after `at` characters of its fragment. The head moves
    /// into a new node that takes the child's place under `parent`.
    fn split(&mut self, parent: usize, child: usize, at: usize) -> usize {
        let tail = self.nodes[child].fragment.split_off(at);
        let head = std::mem::replace(&mut self.nodes[child].fragment, tail);
        let first = head[0];
        let branch = self.nodes[child].fragment[0];

        let bridge = self.push_node(head, None);
        self.nodes[bridge].children.push((branch, child));
        self.nodes[parent].set_child(first, bridge);
        bridge
    }

    fn store(&mut self, node: usize, key: &str, value: T) {
        if self.nodes[node].value.is_none() {
            self.nodes[node].value = Some(value);
            self.len += 1;
        } else if self.policy == InsertPolicy::Overwrite {
            self.nodes[node].value = Some(value);
        } else {
            trace!("keeping first value for duplicate key {key}");
        }
    }

    /// Walk the tree along `key`, returning the node the key ends on exactly.
    fn find_node(&self, key: &str) -> Option<usize> {
        let mut node = ROOT;
        let mut chars = key.chars().peekable();
        while let Some(&c) = chars.peek() {
            node = self.nodes[node].child(c)?;
            for &expected in &self.nodes[node].fragment {
                if chars.next() != Some(expected) {
                    return None;
                }
            }
        }
        Some(node)
    }

    /// Look up `key`.
    ///
    /// In strict mode (`allow_partial == false`) a key that was never
    /// inserted fails with [`HebMorphError::NotFound`]. With `allow_partial`
    /// the lookup never fails: a key ending exactly on a node yields that
    /// node's value if it has one, and anything else yields `None`.
    pub fn lookup(&self, key: &str, allow_partial: bool) -> Result<Option<&T>> {
        match self.find_node(key).and_then(|node| self.nodes[node].value.as_ref()) {
            Some(value) => Ok(Some(value)),
            None if allow_partial => Ok(None),
            None => Err(HebMorphError::not_found(key)),
        }
    }

    /// Strict lookup with absence folded into `None`.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.find_node(key)
            .and_then(|node| self.nodes[node].value.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over `(key, value)` pairs in code-point order of the keys.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            stack: vec![(ROOT, 0)],
            key: String::new(),
        }
    }
}

/// Lazy pre-order walk over a [`PrefixDictionary`].
///
/// A node's key is a prefix of every key below it, and children are visited
/// in character order, so pre-order yields keys sorted by code point.
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    /// Pending nodes with the byte length of the key above them.
    stack: Vec<(usize, usize)>,
    key: String,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (String, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, key_len)) = self.stack.pop() {
            let node = &self.nodes[index];
            self.key.truncate(key_len);
            self.key.extend(node.fragment.iter());

            let len = self.key.len();
            self.stack
                .extend(node.children.iter().rev().map(|&(_, child)| (child, len)));

            if let Some(value) = &node.value {
                return Some((self.key.clone(), value));
            }
        }
        None
    }
}

impl<'a, T> IntoIterator for &'a PrefixDictionary<T> {
    type Item = (String, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two dictionaries are equal when they hold the same pairs, whatever the
/// shape their insertion order gave the tree.
impl<T: PartialEq> PartialEq for PrefixDictionary<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PrefixDictionary<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// No node but the root may have exactly one child and no value.
    fn assert_compressed<T>(dict: &PrefixDictionary<T>) {
        for (i, node) in dict.nodes.iter().enumerate().skip(1) {
            assert!(
                node.value.is_some() || node.children.len() != 1,
                "node {i} ({:?}) is a pass-through node",
                node.fragment
            );
            assert!(!node.fragment.is_empty());
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut dict = PrefixDictionary::new();
        dict.insert("abcd", 1).unwrap();
        dict.insert("abce", 2).unwrap();
        dict.insert("ab", 3).unwrap();
        dict.insert("abcdef", 4).unwrap();
        dict.insert("x", 5).unwrap();

        assert_eq!(dict.len(), 5);
        assert_eq!(dict.get("abcd"), Some(&1));
        assert_eq!(dict.get("abce"), Some(&2));
        assert_eq!(dict.get("ab"), Some(&3));
        assert_eq!(dict.get("abcdef"), Some(&4));
        assert_eq!(dict.get("x"), Some(&5));
        assert_eq!(dict.get("abc"), None);
        assert_compressed(&dict);
    }

    #[test]
    fn test_key_prefix_of_existing_fragment() {
        let mut dict = PrefixDictionary::new();
        dict.insert("בדיקה", 1).unwrap();
        dict.insert("ב", 2).unwrap();

        assert_eq!(dict.get("ב"), Some(&2));
        assert_eq!(dict.get("בדיקה"), Some(&1));
        assert_eq!(dict.nodes[ROOT].children.len(), 1);
        assert_compressed(&dict);
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut dict = PrefixDictionary::new();
        dict.insert("a", 1).unwrap();

        let err = dict.insert("", 2).unwrap_err();
        assert!(matches!(err, HebMorphError::InvalidKey(_)));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.iter().count(), 1);
    }

    #[test]
    fn test_insert_policy() {
        let mut dict = PrefixDictionary::new();
        dict.insert("key", 1).unwrap();
        dict.insert("key", 2).unwrap();
        assert_eq!(dict.get("key"), Some(&1));
        assert_eq!(dict.len(), 1);

        dict.set_policy(InsertPolicy::Overwrite);
        dict.insert("key", 3).unwrap();
        assert_eq!(dict.get("key"), Some(&3));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_value_on_existing_internal_node() {
        let mut dict = PrefixDictionary::new();
        dict.insert("abc", 1).unwrap();
        dict.insert("abd", 2).unwrap();
        // "ab" is now a branching node without a value
        assert!(dict.lookup("ab", false).unwrap_err().is_not_found());

        dict.insert("ab", 3).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.lookup("ab", false).unwrap(), Some(&3));
    }

    #[test]
    fn test_partial_lookup() {
        let mut dict = PrefixDictionary::new();
        dict.insert("abcd", 1).unwrap();
        dict.insert("abx", 2).unwrap();

        assert_eq!(dict.lookup("ab", true).unwrap(), None);
        assert_eq!(dict.lookup("abc", true).unwrap(), None);
        assert_eq!(dict.lookup("zzz", true).unwrap(), None);
        assert_eq!(dict.lookup("abcd", true).unwrap(), Some(&1));

        assert!(dict.lookup("ab", false).is_err());
        assert!(dict.lookup("abc", false).is_err());
        assert!(dict.lookup("abcde", false).is_err());
        assert!(dict.lookup("", false).is_err());
        assert_eq!(dict.lookup("", true).unwrap(), None);
    }

    #[test]
    fn test_iteration_order() {
        let mut dict = PrefixDictionary::new();
        for key in ["בית", "אב", "ב", "בית ספר", "abc", "ab", "ת"] {
            dict.insert(key, key.len()).unwrap();
        }
        let keys: Vec<String> = dict.iter().map(|(k, _)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 7);

        let again: Vec<String> = (&dict).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, again);
    }

    #[test]
    fn test_equality_ignores_shape() {
        let a = PrefixDictionary::from_entries([("abc", 1), ("ab", 2), ("b", 3)]).unwrap();
        let b = PrefixDictionary::from_entries([("b", 3), ("ab", 2), ("abc", 1)]).unwrap();
        assert_eq!(a, b);

        let c = PrefixDictionary::from_entries([("b", 3), ("ab", 2), ("abc", 4)]).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_clear() {
        let mut dict = PrefixDictionary::from_entries([("a", 1), ("b", 2)]).unwrap();
        dict.clear();
        assert!(dict.is_empty());
        assert_eq!(dict.iter().count(), 0);
        dict.insert("a", 3).unwrap();
        assert_eq!(dict.get("a"), Some(&3));
    }
}
