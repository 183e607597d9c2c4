// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adjacency index for restriction-chain traversal
//!
//! Built once per call so that section membership and restriction lookups
//! walk adjacency lists instead of re-filtering the edge list at every step.

use crate::{EntityData, GraphEdge, GraphNode, NodeData, NodeKind, Restriction, Section};
use rustc_hash::{FxHashMap, FxHashSet};

/// A facet occupying a specification section
#[derive(Clone, Copy, Debug)]
pub struct SectionMember<'a> {
    /// The facet node
    pub facet: &'a GraphNode,
    /// Restriction node through which the facet reaches the section, if any
    pub restriction: Option<&'a GraphNode>,
}

impl<'a> SectionMember<'a> {
    /// Restriction payload carried by the chain
    pub fn restriction_data(&self) -> Option<&'a Restriction> {
        self.restriction.and_then(|r| r.data.as_restriction())
    }
}

/// Node and edge adjacency index over a borrowed graph
pub struct GraphIndex<'a> {
    nodes: FxHashMap<&'a str, &'a GraphNode>,
    outgoing: FxHashMap<&'a str, Vec<&'a GraphEdge>>,
    incoming: FxHashMap<&'a str, Vec<&'a GraphEdge>>,
}

impl<'a> GraphIndex<'a> {
    /// Build the index; edge lists keep edge-list order
    pub fn new(nodes: &'a [GraphNode], edges: &'a [GraphEdge]) -> Self {
        let mut node_map = FxHashMap::default();
        for node in nodes {
            node_map.entry(node.id.as_str()).or_insert(node);
        }

        let mut outgoing: FxHashMap<&'a str, Vec<&'a GraphEdge>> = FxHashMap::default();
        let mut incoming: FxHashMap<&'a str, Vec<&'a GraphEdge>> = FxHashMap::default();
        for edge in edges {
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
            incoming.entry(edge.target.as_str()).or_default().push(edge);
        }

        Self {
            nodes: node_map,
            outgoing,
            incoming,
        }
    }

    /// Get node by ID
    pub fn node(&self, id: &str) -> Option<&'a GraphNode> {
        self.nodes.get(id).copied()
    }

    /// Edges leaving a node
    pub fn outgoing(&self, id: &str) -> &[&'a GraphEdge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges entering a node
    pub fn incoming(&self, id: &str) -> &[&'a GraphEdge] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Facet feeding a restriction node
    pub fn restriction_owner(&self, restriction_id: &str) -> Option<&'a GraphNode> {
        self.incoming(restriction_id)
            .iter()
            .filter_map(|e| self.node(&e.source))
            .find(|n| n.kind().is_facet())
    }

    /// Facets occupying a section of a specification, in edge order
    ///
    /// A restriction node counts as its upstream facet's occupancy of the
    /// handle. A facet reachable both directly and through a restriction is
    /// listed once, keeping the restriction.
    pub fn section_members(&self, spec_id: &str, section: Section) -> Vec<SectionMember<'a>> {
        let mut members: Vec<SectionMember<'a>> = Vec::new();

        for edge in self.incoming(spec_id) {
            if edge.target_handle != Some(section) {
                continue;
            }
            let Some(source) = self.node(&edge.source) else {
                continue;
            };

            let (facet, restriction) = match source.kind() {
                NodeKind::Restriction => match self.restriction_owner(&source.id) {
                    Some(owner) => (owner, Some(source)),
                    None => continue,
                },
                NodeKind::Spec => continue,
                _ => (source, None),
            };

            if let Some(existing) = members.iter_mut().find(|m| m.facet.id == facet.id) {
                if existing.restriction.is_none() {
                    existing.restriction = restriction;
                }
                continue;
            }
            members.push(SectionMember { facet, restriction });
        }

        members
    }

    /// Whether a node feeds a specification section directly or via one restriction hop
    pub fn is_connected_to(&self, node_id: &str, spec_id: &str, section: Section) -> bool {
        let direct = |id: &str| {
            self.outgoing(id)
                .iter()
                .any(|e| e.target == spec_id && e.target_handle == Some(section))
        };

        if direct(node_id) {
            return true;
        }

        match self.node(node_id) {
            Some(node) if node.kind().is_facet() => self
                .outgoing(node_id)
                .iter()
                .filter_map(|e| self.node(&e.target))
                .filter(|t| t.kind() == NodeKind::Restriction)
                .any(|r| direct(&r.id)),
            _ => false,
        }
    }

    /// Restriction attached to a facet for one specification section
    ///
    /// Falls back to a restriction hanging off the facet that is not yet
    /// wired into any specification.
    pub fn restriction_for(
        &self,
        facet_id: &str,
        spec_id: &str,
        section: Section,
    ) -> Option<&'a GraphNode> {
        let restrictions: Vec<&'a GraphNode> = self
            .outgoing(facet_id)
            .iter()
            .filter_map(|e| self.node(&e.target))
            .filter(|n| n.kind() == NodeKind::Restriction)
            .collect();

        restrictions
            .iter()
            .copied()
            .find(|r| {
                self.outgoing(&r.id)
                    .iter()
                    .any(|e| e.target == spec_id && e.target_handle == Some(section))
            })
            .or_else(|| {
                restrictions
                    .iter()
                    .copied()
                    .find(|r| self.outgoing(&r.id).is_empty())
            })
    }

    /// Specification a facet feeds, directly or through a restriction
    pub fn connected_spec(&self, facet_id: &str) -> Option<&'a GraphNode> {
        let mut visited = FxHashSet::default();
        let mut frontier = vec![facet_id];
        // One restriction hop at most
        for _ in 0..2 {
            let mut next = Vec::new();
            for id in frontier {
                if !visited.insert(id) {
                    continue;
                }
                for edge in self.outgoing(id) {
                    match self.node(&edge.target) {
                        Some(t) if t.kind() == NodeKind::Spec => return Some(t),
                        Some(t) if t.kind() == NodeKind::Restriction => {
                            next.push(t.id.as_str())
                        }
                        _ => {}
                    }
                }
            }
            frontier = next;
        }
        None
    }

    /// Entity named in the applicability of the specification a facet feeds
    pub fn connected_entity(&self, facet_id: &str) -> Option<&'a EntityData> {
        let spec = self.connected_spec(facet_id)?;
        self.section_members(&spec.id, Section::Applicability)
            .into_iter()
            .filter(|m| m.facet.id != facet_id)
            .find_map(|m| match &m.facet.data {
                NodeData::Entity(entity) => Some(entity),
                _ => None,
            })
    }
}
