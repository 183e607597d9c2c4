// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier allocation for new nodes and edges

use crate::{EdgeId, IdsGraph, NodeId, NodeKind};
use rustc_hash::FxHashMap;

const EDGE_PREFIX: &str = "edge";

/// Monotonic per-kind identifier counters
///
/// Produces `spec-1`, `spec-2`, ... independently per node kind and
/// `edge-1`, `edge-2`, ... for edges. Counters are never reused or reset.
/// Each parse call owns its own allocator so concurrent imports never share
/// counter state.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    nodes: FxHashMap<NodeKind, u32>,
    edges: u32,
}

impl IdAllocator {
    /// Create an allocator with every counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose counters continue past every id already in `graph`
    ///
    /// Only ids of the form `{kind}-{n}` / `edge-{n}` advance the counters;
    /// other ids cannot collide with generated ones.
    pub fn continuing(graph: &IdsGraph) -> Self {
        let mut alloc = Self::new();

        for node in &graph.nodes {
            if let Some((prefix, n)) = split_id(&node.id) {
                if let Ok(kind) = prefix.parse::<NodeKind>() {
                    let counter = alloc.nodes.entry(kind).or_insert(0);
                    *counter = (*counter).max(n);
                }
            }
        }
        for edge in &graph.edges {
            if let Some((EDGE_PREFIX, n)) = split_id(&edge.id) {
                alloc.edges = alloc.edges.max(n);
            }
        }

        alloc
    }

    /// Allocate the next id for a node kind
    pub fn next_node(&mut self, kind: NodeKind) -> NodeId {
        let counter = self.nodes.entry(kind).or_insert(0);
        *counter += 1;
        format!("{}-{}", kind.as_str(), counter)
    }

    /// Allocate the next edge id
    pub fn next_edge(&mut self) -> EdgeId {
        self.edges += 1;
        format!("{}-{}", EDGE_PREFIX, self.edges)
    }

    /// Number of ids handed out so far for a node kind
    pub fn count(&self, kind: NodeKind) -> u32 {
        self.nodes.get(&kind).copied().unwrap_or(0)
    }
}

fn split_id(id: &str) -> Option<(&str, u32)> {
    let (prefix, n) = id.rsplit_once('-')?;
    Some((prefix, n.parse().ok()?))
}
