//! Metadata - Nested, unit-aware key/value storage
//!
//! Experimental metadata (detector geometry, wavelength, sample distance,
//! ...) is stored in an [`MdDict`]: a tree of named nodes addressed with
//! dot-separated paths such as `"detector.pixel_size"`. Each leaf is an
//! [`MdValue`] carrying a value together with its physical units.
//!
//! # Examples
//!
//! ```
//! use scatterkit_core::{MdDict, MdValue, Value};
//!
//! let mut md = MdDict::new();
//! md.set("name", "test").unwrap();
//! md.set("nested.a", 2i64).unwrap();
//! md.set("nested.b", MdValue::new(Value::Int(5), Some("m"))).unwrap();
//!
//! assert_eq!(md.get("nested.a").unwrap().value, Value::Int(2));
//! assert!(md.get("nested.a").unwrap().units.is_none());
//! assert_eq!(md.get("name").unwrap().units.as_deref(), Some("text"));
//! assert_eq!(md.get("nested.b").unwrap().units.as_deref(), Some("m"));
//! ```

mod container;
mod keys;
mod value;

pub use container::XrData;
pub use keys::{CORE_KEYS, KeyKind, KeySpec, core_key};
pub use value::{MdValue, TEXT_UNITS, Value};

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Path separator used by [`MdDict`]
pub const PATH_SEPARATOR: char = '.';

/// A node in the metadata tree
#[derive(Debug, Clone, PartialEq)]
pub enum MdNode {
    /// Terminal value with units
    Leaf(MdValue),
    /// Nested dictionary
    Branch(MdDict),
}

/// Nested metadata dictionary addressed by dotted paths
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MdDict {
    children: BTreeMap<String, MdNode>,
}

fn split_path(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::Configuration(format!(
            "metadata path '{path}' contains an empty segment"
        )));
    }
    Ok(segments)
}

impl MdDict {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leaf at `path`, creating intermediate branches as needed
    ///
    /// Existing nodes at `path` are replaced.
    ///
    /// # Errors
    ///
    /// - `Error::LeafAsBranch` if an intermediate segment is a leaf
    /// - `Error::Configuration` if the path has an empty segment
    pub fn set(&mut self, path: &str, value: impl Into<MdValue>) -> Result<()> {
        let segments = split_path(path)?;
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| Error::Configuration("empty metadata path".into()))?;

        let mut node = self;
        for (depth, segment) in parents.iter().enumerate() {
            let child = node
                .children
                .entry((*segment).to_string())
                .or_insert_with(|| MdNode::Branch(MdDict::new()));
            node = match child {
                MdNode::Branch(dict) => dict,
                MdNode::Leaf(_) => {
                    return Err(Error::LeafAsBranch(segments[..=depth].join(".")));
                }
            };
        }
        node.children
            .insert((*last).to_string(), MdNode::Leaf(value.into()));
        Ok(())
    }

    /// Get the node at `path`, if any
    pub fn node(&self, path: &str) -> Option<&MdNode> {
        let segments = split_path(path).ok()?;
        let (last, parents) = segments.split_last()?;
        let mut dict = self;
        for segment in parents {
            match dict.children.get(*segment)? {
                MdNode::Branch(inner) => dict = inner,
                MdNode::Leaf(_) => return None,
            }
        }
        dict.children.get(*last)
    }

    /// Get the leaf at `path`, if any
    ///
    /// Returns `None` when the path is missing or names a branch.
    pub fn get(&self, path: &str) -> Option<&MdValue> {
        match self.node(path)? {
            MdNode::Leaf(v) => Some(v),
            MdNode::Branch(_) => None,
        }
    }

    /// Get the branch at `path`, if any
    pub fn branch(&self, path: &str) -> Option<&MdDict> {
        match self.node(path)? {
            MdNode::Branch(d) => Some(d),
            MdNode::Leaf(_) => None,
        }
    }

    /// Whether a leaf exists at `path`
    pub fn contains_key(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Remove and return the leaf at `path`
    ///
    /// Branches left empty by the removal are pruned.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyNotFound` if there is no leaf at `path`.
    pub fn remove(&mut self, path: &str) -> Result<MdValue> {
        let segments = split_path(path)?;
        self.remove_segments(&segments)
            .ok_or_else(|| Error::KeyNotFound(path.to_string()))
    }

    fn remove_segments(&mut self, segments: &[&str]) -> Option<MdValue> {
        let (first, rest) = segments.split_first()?;
        if rest.is_empty() {
            if !matches!(self.children.get(*first)?, MdNode::Leaf(_)) {
                return None;
            }
            return match self.children.remove(*first)? {
                MdNode::Leaf(v) => Some(v),
                MdNode::Branch(_) => None,
            };
        }

        let (removed, now_empty) = match self.children.get_mut(*first)? {
            MdNode::Branch(inner) => {
                let removed = inner.remove_segments(rest)?;
                (removed, inner.children.is_empty())
            }
            MdNode::Leaf(_) => return None,
        };
        if now_empty {
            self.children.remove(*first);
        }
        Some(removed)
    }

    /// Dotted paths of every leaf, depth-first in key order
    pub fn keys(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_keys("", &mut out);
        out
    }

    fn collect_keys(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, node) in &self.children {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}{PATH_SEPARATOR}{name}")
            };
            match node {
                MdNode::Leaf(_) => out.push(path),
                MdNode::Branch(inner) => inner.collect_keys(&path, out),
            }
        }
    }

    /// Iterate over `(path, leaf)` pairs, depth-first in key order
    pub fn iter(&self) -> impl Iterator<Item = (String, &MdValue)> {
        self.keys().into_iter().filter_map(move |k| {
            let v = self.get(&k)?;
            Some((k, v))
        })
    }

    /// Number of leaves in the whole tree
    pub fn len(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                MdNode::Leaf(_) => 1,
                MdNode::Branch(inner) => inner.len(),
            })
            .sum()
    }

    /// Whether the tree holds no leaves
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for MdDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (path, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{path}: {value}")?;
        }
        write!(f, "}}")
    }
}
