//! Tree builder folding flat configuration entries into a [`ConfigTree`].

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::ConfigTree;
use crate::domain::entities::ConfigMap;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::{is_element_name, split_key};

/// Root element name used when none is configured.
pub const DEFAULT_ROOT_NAME: &str = "configuration";

/// Constructs configuration trees from ordered key/value entries.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root_name: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_NAME)
    }
}

impl TreeBuilder {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
        }
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Build a tree from the complete mapping, in its iteration order.
    pub fn build(&self, data: &ConfigMap) -> DomainResult<ConfigTree> {
        self.build_entries(data.iter().map(|(k, v)| (k.as_str(), Some(v.as_str()))))
    }

    /// Build a tree from entries whose value may be absent.
    ///
    /// An absent value creates the node (and its ancestors) without text and
    /// never clears a value set by an earlier entry. When two entries resolve
    /// to the same node, the later value wins.
    #[instrument(level = "debug", skip(self, entries), fields(root = %self.root_name))]
    pub fn build_entries<'a, I>(&self, entries: I) -> DomainResult<ConfigTree>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        if self.root_name.is_empty() {
            return Err(DomainError::EmptyRootName);
        }
        if !is_element_name(&self.root_name) {
            return Err(DomainError::InvalidRootName(self.root_name.clone()));
        }

        let mut tree = ConfigTree::new(self.root_name.clone());
        let mut resolved: HashMap<String, Index> = HashMap::new();
        let mut count = 0usize;

        for (key, value) in entries {
            Self::resolve(&mut tree, &mut resolved, key, value)?;
            count += 1;
        }

        debug!("built tree: entries={}, nodes={}", count, tree.len());
        Ok(tree)
    }

    /// Find or create the node for `key`, creating ancestor placeholders first.
    ///
    /// `resolved` memoizes full key paths to arena indices so every ancestor is
    /// walked once per build.
    fn resolve(
        tree: &mut ConfigTree,
        resolved: &mut HashMap<String, Index>,
        key: &str,
        value: Option<&str>,
    ) -> DomainResult<Index> {
        let (parent_key, leaf) = split_key(key)?;

        if let Some(&idx) = resolved.get(key) {
            if let (Some(value), Some(node)) = (value, tree.get_node_mut(idx)) {
                trace!("overwrite value: key={}", key);
                node.value = Some(value.to_string());
            }
            return Ok(idx);
        }

        let parent = match parent_key {
            Some(parent_key) => Self::resolve(tree, resolved, parent_key, None)?,
            None => tree.root(),
        };

        let idx = match tree.child_named(parent, leaf) {
            Some(existing) => {
                if let (Some(value), Some(node)) = (value, tree.get_node_mut(existing)) {
                    node.value = Some(value.to_string());
                }
                existing
            }
            None => {
                trace!("create node: key={}, placeholder={}", key, value.is_none());
                tree.insert_node(leaf, value, parent)
            }
        };

        resolved.insert(key.to_string(), idx);
        Ok(idx)
    }
}
