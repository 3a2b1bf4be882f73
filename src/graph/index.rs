use crate::form::Edge;
use ahash::{AHashMap, AHashSet};

/// Parent lookup over the directed edge list.
///
/// Built once by scanning the edges (`O(E)`); the parent list of each target
/// preserves edge-array order, which makes every traversal result below
/// reproducible for a given package.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    parents: AHashMap<String, Vec<String>>,
}

impl GraphIndex {
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut parents: AHashMap<String, Vec<String>> = AHashMap::new();
        for edge in edges {
            parents
                .entry(edge.target.clone())
                .or_default()
                .push(edge.source.clone());
        }
        Self { parents }
    }

    /// Direct parents of a node, in edge order.
    pub fn parent_ids(&self, node_id: &str) -> &[String] {
        self.parents.get(node_id).map_or(&[], Vec::as_slice)
    }

    /// The transitive closure of parents of `node_id`, excluding the node
    /// itself, in depth-first preorder (a parent's full upstream subtree is
    /// visited before the next parent).
    ///
    /// The visited guard guarantees termination on malformed (cyclic)
    /// graphs; a cyclic path is silently truncated.
    pub fn ancestor_ids(&self, node_id: &str) -> Vec<String> {
        self.walk(node_id)
            .into_iter()
            .filter(|(id, _)| id != node_id)
            .map(|(id, _)| id)
            .collect()
    }

    /// Like [`ancestor_ids`](Self::ancestor_ids), but tags each ancestor
    /// with the depth at which the traversal *first* reached it.
    ///
    /// A node is assigned a level exactly once; a later discovery through a
    /// longer path never overrides it. This is not shortest-path distance —
    /// it depends on edge order and is part of the classification contract.
    /// Level 1 ancestors are direct parents, deeper ones transitive.
    pub fn ancestor_levels(&self, node_id: &str) -> Vec<(String, usize)> {
        self.walk(node_id)
            .into_iter()
            .filter(|(id, _)| id != node_id)
            .collect()
    }

    /// Depth-first walk upstream from `node_id` (self included at level 0),
    /// as an explicit stack loop with a fresh visited set per call.
    ///
    /// Children are pushed in reverse so pop order matches the recursive
    /// formulation: node, first parent, first parent's subtree, second
    /// parent, and so on. The seen check happens at pop time, so a node
    /// reached through several paths keeps its first-visit position and
    /// level.
    fn walk(&self, node_id: &str) -> Vec<(String, usize)> {
        let mut order = Vec::new();
        let mut seen: AHashSet<String> = AHashSet::new();
        let mut stack: Vec<(String, usize)> = vec![(node_id.to_string(), 0)];

        while let Some((id, level)) = stack.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            for parent in self.parent_ids(&id).iter().rev() {
                if !seen.contains(parent) {
                    stack.push((parent.clone(), level + 1));
                }
            }
            order.push((id, level));
        }
        order
    }
}
