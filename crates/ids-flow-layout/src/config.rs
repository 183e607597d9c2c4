// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout configuration

use ids_flow_model::Position;

/// Spacing and sizing used by every placement function
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Position of the first specification node
    pub spec_position: Position,
    /// X of the facet columns for ad-hoc placement
    pub base_x: f64,
    /// Top of the applicability column
    pub base_y: f64,
    /// Distance between rows in one column
    pub vertical_spacing: f64,
    /// Gap between the applicability and requirements columns
    pub group_gap: f64,
    /// Horizontal distance between specifications
    pub horizontal_gap: f64,
    /// Assumed node width for collision tests
    pub node_width: f64,
    /// Assumed node height for collision tests
    pub node_height: f64,
    /// Clearance kept around nodes in a column
    pub padding: f64,
    /// Facet column distance left of its specification during relayout
    pub column_offset: f64,
    /// Nodes within this x distance share a column
    pub x_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spec_position: Position::new(600.0, 150.0),
            base_x: 100.0,
            base_y: 100.0,
            vertical_spacing: 150.0,
            group_gap: 200.0,
            horizontal_gap: 600.0,
            node_width: 250.0,
            node_height: 100.0,
            padding: 30.0,
            column_offset: 500.0,
            x_tolerance: 50.0,
        }
    }
}

impl LayoutConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first specification position
    pub fn with_spec_position(mut self, position: Position) -> Self {
        self.spec_position = position;
        self
    }

    /// Set the facet column origin
    pub fn with_base(mut self, x: f64, y: f64) -> Self {
        self.base_x = x;
        self.base_y = y;
        self
    }

    /// Set row spacing and the gap between columns
    pub fn with_spacing(mut self, vertical_spacing: f64, group_gap: f64) -> Self {
        self.vertical_spacing = vertical_spacing;
        self.group_gap = group_gap;
        self
    }

    /// Set the assumed node size
    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    /// Set the collision clearance
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the facet column distance used by relayout
    pub fn with_column_offset(mut self, column_offset: f64) -> Self {
        self.column_offset = column_offset;
        self
    }

    /// Vertical distance between stacked specifications during relayout
    pub fn spec_stride(&self) -> f64 {
        self.vertical_spacing * 4.0
    }

    /// Vertical gap below the lowest specification for new subgraphs
    pub fn template_gap(&self) -> f64 {
        self.vertical_spacing * 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = LayoutConfig::new()
            .with_base(0.0, 0.0)
            .with_spacing(100.0, 50.0)
            .with_padding(10.0);
        assert_eq!(config.base_x, 0.0);
        assert_eq!(config.vertical_spacing, 100.0);
        assert_eq!(config.group_gap, 50.0);
        assert_eq!(config.spec_stride(), 400.0);
        assert_eq!(config.node_height, 100.0);
    }
}
