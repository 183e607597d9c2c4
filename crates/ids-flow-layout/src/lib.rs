// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDS-Flow Layout - Deterministic node placement
//!
//! Each specification gets two stacked columns to its left: applicability
//! facets on top, requirement facets below after a fixed gap. Collisions
//! are resolved with a single downward sweep over nodes sharing the column.
//!
//! The engine never fails; every function returns a position.
//!
//! # Example
//!
//! ```ignore
//! use ids_flow_layout::{position_for, LayoutConfig};
//! use ids_flow_model::{NodeKind, Section};
//!
//! let config = LayoutConfig::default();
//! let pos = position_for(
//!     NodeKind::Property,
//!     Section::Requirements,
//!     &graph.nodes,
//!     &graph.edges,
//!     "spec-1",
//!     &config,
//! );
//! ```

pub mod config;
pub mod placement;
pub mod relayout;
pub mod subgraph;

pub use config::LayoutConfig;
pub use placement::{
    find_available_space, find_non_overlapping_position, find_template_offset, position_for,
    restriction_position, smart_position,
};
pub use relayout::relayout_all;
pub use subgraph::{clone_specification, place_template};
