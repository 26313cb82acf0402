//! Dependency graph for step/variable relationships
//!
//! Edges point from a dependent node to the node it depends on. Depth is the
//! longest dependency chain, computed with an explicit stack (no call-stack
//! recursion) and memoization, so very large graphs stay bounded.
//!
//! Cycles terminate cleanly: a node currently on the visit stack contributes
//! 0 to its dependent's depth. That undercounts true depth for cyclic graphs,
//! which is the documented default (`CyclePolicy::TreatAsZero`); callers who
//! want the already-memoized value counted instead can pass
//! `CyclePolicy::SaturateAtVisited`.

use crate::models::DependencyEdge;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("dependency edge has an empty node id")]
    EmptyNodeId,
}

/// How the depth computation treats a dependency that is currently on the
/// visit stack (i.e. part of a cycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// The on-stack node contributes depth 0.
    #[default]
    TreatAsZero,
    /// The on-stack node contributes its memoized depth if one exists,
    /// otherwise 0.
    SaturateAtVisited,
}

/// Directed dependency graph built from explicit edges.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
    /// adjacency: node -> the nodes it depends on
    deps: Vec<Vec<usize>>,
    edge_count: usize,
}

impl DependencyGraph {
    pub fn from_edges(edges: &[DependencyEdge]) -> Result<Self, GraphError> {
        let mut graph = Self::default();
        for edge in edges {
            if edge.from.trim().is_empty() || edge.to.trim().is_empty() {
                return Err(GraphError::EmptyNodeId);
            }
            let from = graph.intern(&edge.from);
            let to = graph.intern(&edge.to);
            graph.deps[from].push(to);
            graph.edge_count += 1;
        }
        Ok(graph)
    }

    fn intern(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        self.deps.push(Vec::new());
        i
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Largest number of direct dependencies held by any single node.
    pub fn max_dependency_count(&self) -> usize {
        self.deps.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Largest in-degree: how many nodes depend on the most-depended-upon node.
    pub fn max_in_degree(&self) -> usize {
        let mut in_degree = vec![0usize; self.names.len()];
        for targets in &self.deps {
            for &t in targets {
                in_degree[t] += 1;
            }
        }
        in_degree.into_iter().max().unwrap_or(0)
    }

    /// True if any directed cycle exists. Iterative DFS with an on-stack set.
    pub fn has_cycle(&self) -> bool {
        const WHITE: u8 = 0; // unvisited
        const GRAY: u8 = 1; // on stack
        const BLACK: u8 = 2; // done
        let n = self.names.len();
        let mut color = vec![WHITE; n];

        for root in 0..n {
            if color[root] != WHITE {
                continue;
            }
            // (node, next-dependency index)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            color[root] = GRAY;
            while let Some(top) = stack.last_mut() {
                let node = top.0;
                if let Some(&dep) = self.deps[node].get(top.1) {
                    top.1 += 1;
                    match color[dep] {
                        GRAY => return true,
                        WHITE => {
                            color[dep] = GRAY;
                            stack.push((dep, 0));
                        }
                        _ => {}
                    }
                } else {
                    color[node] = BLACK;
                    stack.pop();
                }
            }
        }
        false
    }

    /// Longest dependency chain under the default cycle policy.
    pub fn longest_depth(&self) -> u32 {
        self.depth_with_policy(CyclePolicy::TreatAsZero)
    }

    /// Longest dependency chain: depth(n) = 0 for a leaf, else
    /// 1 + max(depth of dependencies). Memoized, iterative, cycle-safe.
    pub fn depth_with_policy(&self, policy: CyclePolicy) -> u32 {
        let n = self.names.len();
        let mut memo: Vec<Option<u32>> = vec![None; n];
        let mut on_stack = vec![false; n];

        for root in 0..n {
            if memo[root].is_some() {
                continue;
            }
            // (node, next-dependency index, best depth contribution so far)
            let mut stack: Vec<(usize, usize, u32)> = vec![(root, 0, 0)];
            on_stack[root] = true;
            while let Some(top) = stack.last_mut() {
                let node = top.0;
                if let Some(&dep) = self.deps[node].get(top.1) {
                    top.1 += 1;
                    if on_stack[dep] {
                        let contribution = match policy {
                            CyclePolicy::TreatAsZero => 0,
                            CyclePolicy::SaturateAtVisited => memo[dep].unwrap_or(0),
                        };
                        top.2 = top.2.max(contribution + 1);
                    } else if let Some(d) = memo[dep] {
                        top.2 = top.2.max(d + 1);
                    } else {
                        on_stack[dep] = true;
                        stack.push((dep, 0, 0));
                    }
                } else {
                    let depth = if self.deps[node].is_empty() { 0 } else { top.2 };
                    memo[node] = Some(depth);
                    on_stack[node] = false;
                    stack.pop();
                    if let Some(parent) = stack.last_mut() {
                        parent.2 = parent.2.max(depth + 1);
                    }
                }
            }
        }

        memo.into_iter().flatten().max().unwrap_or(0)
    }
}
