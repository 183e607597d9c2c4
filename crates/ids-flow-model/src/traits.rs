// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for graph ⇄ document conversion
//!
//! These traits define the seams between the graph model and concrete
//! document formats.

use crate::{IdsGraph, IdsMetadata, Result};

/// Result of parsing an IDS document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedIds {
    /// Imported graph with laid-out positions
    pub graph: IdsGraph,
    /// IFC version of the first specification
    pub ifc_version: Option<String>,
    /// Parsed `info` header, if present
    pub metadata: Option<IdsMetadata>,
}

/// Parsing interface - entry point for importing IDS documents
///
/// Implementations must be pure: every call owns its identifier counters
/// and never touches state shared with other calls.
///
/// # Example
///
/// ```ignore
/// use ids_flow_model::IdsParser;
///
/// let parser: Box<dyn IdsParser> = get_parser();
/// let parsed = parser.parse(xml)?;
/// println!("Imported {} nodes", parsed.graph.nodes.len());
/// ```
pub trait IdsParser: Send + Sync {
    /// Parse IDS content into a graph
    ///
    /// # Arguments
    /// * `content` - The IDS XML document as a string
    ///
    /// # Returns
    /// The imported graph on success, or an `IdsError` on failure
    fn parse(&self, content: &str) -> Result<ParsedIds>;
}

/// Serialization interface - entry point for exporting graphs
pub trait IdsSerializer: Send + Sync {
    /// Serialize a graph to an IDS document
    ///
    /// # Arguments
    /// * `graph` - The graph to export; must contain at least one specification
    ///
    /// # Returns
    /// The XML text on success, or an `IdsError` on failure
    fn serialize(&self, graph: &IdsGraph) -> Result<String>;
}
