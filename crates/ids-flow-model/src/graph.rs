// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Owning container for graph nodes and edges

use crate::{
    EdgeId, GraphEdge, GraphIndex, GraphNode, IdAllocator, NodeData, NodeId, NodeKind, Section,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// In-memory requirements graph
///
/// Nodes are referenced by id from edges, never by pointer. Referential
/// integrity is kept by [`IdsGraph::remove_node`]; direct pushes onto
/// `nodes`/`edges` are the caller's responsibility.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IdsGraph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl IdsGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph from existing nodes and edges
    pub fn from_parts(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get node by ID
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get mutable node by ID
    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Get edge by ID
    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Append a node
    pub fn add_node(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }

    /// Append an edge
    pub fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    /// Add an edge with a freshly allocated id and return that id
    pub fn connect(
        &mut self,
        ids: &mut IdAllocator,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        section: Option<Section>,
    ) -> EdgeId {
        let id = ids.next_edge();
        self.edges.push(GraphEdge {
            id: id.clone(),
            source: source.into(),
            target: target.into(),
            target_handle: section,
        });
        id
    }

    /// Append all nodes and edges of another graph
    pub fn merge(&mut self, other: IdsGraph) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }

    /// Remove a node together with every edge touching it
    pub fn remove_node(&mut self, id: &str) -> Option<GraphNode> {
        let pos = self.nodes.iter().position(|n| n.id == id)?;
        let removed = self.nodes.remove(pos);
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        debug!(
            "removed node {} and {} edges",
            id,
            before - self.edges.len()
        );
        Some(removed)
    }

    /// Remove an edge by ID
    pub fn remove_edge(&mut self, id: &str) -> Option<GraphEdge> {
        let pos = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(pos))
    }

    /// Specification nodes in graph order
    pub fn specifications(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.kind() == NodeKind::Spec)
    }

    /// Nodes of the given kind in graph order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    /// Edges plugged into a specification handle, in edge order
    pub fn section_edges<'a>(
        &'a self,
        spec_id: &'a str,
        section: Section,
    ) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.target == spec_id && e.target_handle == Some(section))
    }

    /// Build an adjacency index over this graph
    pub fn index(&self) -> GraphIndex<'_> {
        GraphIndex::new(&self.nodes, &self.edges)
    }

    /// Find a node of the same kind whose key fields match `data`
    ///
    /// Used to reuse an existing facet instead of creating a duplicate when
    /// a facet is added to a second specification.
    pub fn find_existing_node(&self, data: &NodeData) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| match (&node.data, data) {
            (NodeData::Entity(a), NodeData::Entity(b)) => a.name == b.name,
            (NodeData::Property(a), NodeData::Property(b)) => {
                a.property_set == b.property_set && a.base_name == b.base_name
            }
            (NodeData::Attribute(a), NodeData::Attribute(b)) => a.name == b.name,
            (NodeData::Classification(a), NodeData::Classification(b)) => {
                a.system == b.system && a.value == b.value
            }
            (NodeData::Material(a), NodeData::Material(b)) => a.value == b.value,
            (NodeData::PartOf(a), NodeData::PartOf(b)) => a.entity == b.entity,
            _ => false,
        })
    }
}
