// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDS-Flow Model - Graph model and shared types for IDS requirement graphs
//!
//! A requirements graph is made of specification nodes, facet nodes
//! (entity, property, attribute, classification, material, partOf) and
//! restriction nodes carrying constrained values. Facets are wired into a
//! specification's `applicability` or `requirements` handle, either directly
//! or through exactly one restriction node.
//!
//! # Architecture
//!
//! - [`IdsGraph`] - Owning container for nodes and edges
//! - [`GraphIndex`] - Adjacency index built once per call for traversal
//! - [`IdAllocator`] - Per-call monotonic identifier counters
//! - [`IdsParser`] / [`IdsSerializer`] - Seams implemented by the XML crate
//! - [`CanvasDocument`] - JSON dump/restore of a graph
//!
//! # Example
//!
//! ```ignore
//! use ids_flow_model::{IdsGraph, Section};
//!
//! let graph: IdsGraph = load_graph();
//! let index = graph.index();
//! for spec in graph.specifications() {
//!     let requirements = index.section_members(&spec.id, Section::Requirements);
//!     println!("{} has {} requirements", spec.id, requirements.len());
//! }
//! ```

pub mod canvas;
pub mod checks;
pub mod error;
pub mod graph;
pub mod ids;
pub mod index;
pub mod templates;
pub mod traits;
pub mod types;

// Re-export all public types
pub use canvas::*;
pub use checks::*;
pub use error::*;
pub use graph::*;
pub use ids::*;
pub use index::*;
pub use templates::*;
pub use traits::*;
pub use types::*;
