//! Arena-backed editor for the entity forest.
//!
//! Nodes live in a flat map keyed by id, with parent pointers and ordered
//! child lists, so add/rename/remove never clone the nested structure. The
//! forest value (`Vec<EntityNode>`) is produced on demand.

use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, CoreResult};
use crate::project::EntityNode;

#[derive(Debug, Clone)]
struct ArenaNode {
    name: String,
    parent: Option<String>,
    children: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EntityArena {
    nodes: HashMap<String, ArenaNode>,
    roots: Vec<String>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a forest, keeping ids that are present and unique.
    ///
    /// Blank or repeated ids are replaced with fresh ones, so the arena always
    /// satisfies forest-wide id uniqueness.
    pub fn from_forest(forest: &[EntityNode]) -> Self {
        let mut arena = Self::new();
        for node in forest {
            arena.insert_subtree(node, None);
        }
        arena
    }

    fn insert_subtree(&mut self, node: &EntityNode, parent: Option<&str>) {
        let id = if node.id.trim().is_empty() || self.nodes.contains_key(&node.id) {
            self.generate_id()
        } else {
            node.id.clone()
        };
        self.attach(id.clone(), node.name.clone(), parent);
        for child in &node.children {
            self.insert_subtree(child, Some(&id));
        }
    }

    fn attach(&mut self, id: String, name: String, parent: Option<&str>) {
        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(p) {
                    parent_node.children.push(id.clone());
                }
            }
            None => self.roots.push(id.clone()),
        }
        self.nodes.insert(
            id,
            ArenaNode {
                name,
                parent: parent.map(str::to_string),
                children: Vec::new(),
            },
        );
    }

    fn generate_id(&self) -> String {
        loop {
            let id = to_base36(rand::random::<u64>());
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn add_root(&mut self, name: impl Into<String>) -> String {
        let id = self.generate_id();
        self.attach(id.clone(), name.into(), None);
        id
    }

    pub fn add_child(&mut self, parent_id: &str, name: impl Into<String>) -> CoreResult<String> {
        if !self.nodes.contains_key(parent_id) {
            return Err(CoreError::NotFound(format!("entity {}", parent_id)));
        }
        let id = self.generate_id();
        self.attach(id.clone(), name.into(), Some(parent_id));
        Ok(id)
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> CoreResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(format!("entity {}", id)))?;
        node.name = name.into();
        Ok(())
    }

    /// Remove a node together with its whole subtree.
    pub fn remove(&mut self, id: &str) -> CoreResult<()> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| CoreError::NotFound(format!("entity {}", id)))?;

        match node.parent.clone() {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|c| c != id);
                }
            }
            None => self.roots.retain(|r| r != id),
        }

        let mut pending = vec![id.to_string()];
        while let Some(current) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&current) {
                pending.extend(removed.children);
            }
        }
        Ok(())
    }

    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.parent.as_deref())
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|n| n.name.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_forest(&self) -> Vec<EntityNode> {
        self.roots.iter().filter_map(|id| self.build(id)).collect()
    }

    fn build(&self, id: &str) -> Option<EntityNode> {
        let node = self.nodes.get(id)?;
        Some(EntityNode {
            id: id.to_string(),
            name: node.name.clone(),
            children: node.children.iter().filter_map(|c| self.build(c)).collect(),
        })
    }
}

/// Normalise a forest so that every id is present and unique.
pub fn normalize_forest(forest: &[EntityNode]) -> Vec<EntityNode> {
    EntityArena::from_forest(forest).to_forest()
}

/// True when no id repeats anywhere in the forest.
pub fn has_unique_ids(forest: &[EntityNode]) -> bool {
    fn walk<'a>(nodes: &'a [EntityNode], seen: &mut HashSet<&'a str>) -> bool {
        nodes
            .iter()
            .all(|n| seen.insert(n.id.as_str()) && walk(&n.children, seen))
    }
    walk(forest, &mut HashSet::new())
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
