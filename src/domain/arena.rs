//! Arena-backed configuration tree.

use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::path::{combine, split_key};

/// One element of the configuration document.
#[derive(Debug, Clone)]
pub struct ConfigNode {
    /// Element name (one key path segment)
    pub name: String,
    /// Text content, set only when an entry's key resolves to this node
    pub value: Option<String>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in insertion order
    pub children: Vec<Index>,
}

impl fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} = {}", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Configuration tree stored in a generational arena.
///
/// Parent links are plain indices, so the tree owns every node exactly once.
/// A tree always has a root; it is built fresh for every write and dropped
/// afterwards.
#[derive(Debug)]
pub struct ConfigTree {
    /// Arena storage for all tree nodes
    arena: Arena<ConfigNode>,
    /// Index of the synthetic root element
    root: Index,
}

impl ConfigTree {
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(ConfigNode {
            name: root_name.into(),
            value: None,
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Append a new node below `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, name: &str, value: Option<&str>, parent: Index) -> Index {
        let node = ConfigNode {
            name: name.to_string(),
            value: value.map(str::to_string),
            parent: Some(parent),
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(node_idx);
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&ConfigNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut ConfigNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &ConfigNode {
        &self.arena[self.root]
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True if the tree holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.root_node().children.is_empty()
    }

    /// Direct child of `parent` with the given name.
    pub fn child_named(&self, parent: Index, name: &str) -> Option<Index> {
        self.get_node(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.arena.get(child).is_some_and(|n| n.name == name))
    }

    /// Look up the node a configuration key resolves to.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, key: &str) -> Option<Index> {
        let (parent, leaf) = split_key(key).ok()?;
        let parent_idx = match parent {
            Some(parent) => self.find(parent)?,
            None => self.root,
        };
        self.child_named(parent_idx, leaf)
    }

    /// Configuration key of a node, walking parent links up to the root.
    ///
    /// The root itself has the empty key.
    pub fn key_of(&self, idx: Index) -> Option<String> {
        let mut names = Vec::new();
        let mut current = idx;
        loop {
            let node = self.get_node(current)?;
            match node.parent {
                Some(parent) => {
                    names.push(node.name.as_str());
                    current = parent;
                }
                None => break,
            }
        }
        names.reverse();
        Some(combine(names))
    }

    /// Pre-order traversal, children left to right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Keys of all nodes that carry a value, in document order.
    pub fn valued_keys(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.value.is_some())
            .filter_map(|(idx, _)| self.key_of(idx))
            .collect()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a ConfigTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a ConfigTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a ConfigNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
