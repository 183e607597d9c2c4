// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Built-in specification templates
//!
//! Each template is a small self-contained graph with template-local ids
//! (`spec-1`, `entity-1`, ...) and absolute positions. Templates are
//! re-identified and shifted into place by the layout crate before being
//! merged into a user graph.

use crate::{
    AttributeData, ClassificationData, EntityData, GraphNode, IdAllocator, IdsGraph, MaterialData,
    NodeData, NodeId, NodeKind, PartOfData, Position, PropertyData, Restriction, Section,
    SpecificationData,
};

/// A reusable specification subgraph
#[derive(Clone, Debug, PartialEq)]
pub struct SpecTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub graph: IdsGraph,
}

impl SpecTemplate {
    /// Id of the template's specification node
    pub fn spec_id(&self) -> Option<&str> {
        self.graph.specifications().next().map(|n| n.id.as_str())
    }
}

/// Look up a built-in template by id
pub fn template(id: &str) -> Option<SpecTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

/// Distinct template categories in listing order
pub fn template_categories() -> Vec<&'static str> {
    let mut categories = Vec::new();
    for t in builtin_templates() {
        if !categories.contains(&t.category) {
            categories.push(t.category);
        }
    }
    categories
}

/// All built-in templates
pub fn builtin_templates() -> Vec<SpecTemplate> {
    vec![
        TemplateBuilder::new(
            "Walls-FireRating",
            "All walls must have a fire rating specified",
            Position::new(400.0, 100.0),
        )
        .entity("IFCWALL", Section::Applicability)
        .property(
            "Pset_WallCommon",
            "FireRating",
            "IFCLABEL",
            None,
            Section::Requirements,
        )
        .finish(
            "walls-fire-rating",
            "Walls need FireRating",
            "Fire rating requirements for all walls",
            "Safety",
        ),
        TemplateBuilder::new(
            "Columns-LoadBearing",
            "All structural columns must be marked load bearing",
            Position::new(400.0, 100.0),
        )
        .entity("IFCCOLUMN", Section::Applicability)
        .property(
            "Pset_ColumnCommon",
            "LoadBearing",
            "IFCBOOLEAN",
            Some("true"),
            Section::Requirements,
        )
        .finish(
            "columns-load-bearing",
            "Columns load bearing",
            "Load bearing flag for structural columns",
            "Structure",
        ),
        TemplateBuilder::new(
            "Spaces-MinArea",
            "Spaces must meet minimum area requirements",
            Position::new(400.0, 100.0),
        )
        .entity("IFCSPACE", Section::Applicability)
        .property(
            "Pset_SpaceCommon",
            "NetPlannedArea",
            "IFCAREAMEASURE",
            None,
            Section::Requirements,
        )
        .finish(
            "spaces-min-area",
            "Spaces minimum area",
            "Minimum area requirements for spaces",
            "Space",
        ),
        TemplateBuilder::new(
            "ExternalWalls-Thermal",
            "External walls must meet thermal performance requirements",
            Position::new(450.0, 150.0),
        )
        .entity("IFCWALL", Section::Applicability)
        .property(
            "Pset_WallCommon",
            "IsExternal",
            "IFCBOOLEAN",
            Some("true"),
            Section::Applicability,
        )
        .property(
            "Pset_WallCommon",
            "ThermalTransmittance",
            "IFCREAL",
            None,
            Section::Requirements,
        )
        .finish(
            "external-walls-thermal",
            "External walls thermal",
            "Thermal transmittance for external walls",
            "Energy",
        ),
        TemplateBuilder::new(
            "Doors-Naming",
            "Door names must follow the project naming convention",
            Position::new(400.0, 100.0),
        )
        .entity("IFCDOOR", Section::Applicability)
        .facet(
            NodeData::Attribute(AttributeData {
                name: "Name".into(),
                ..Default::default()
            }),
            Section::Requirements,
        )
        .finish(
            "doors-naming-convention",
            "Doors naming convention",
            "Naming convention for doors",
            "Naming",
        ),
        TemplateBuilder::new(
            "Walls-Classification",
            "Walls must be classified with Uniclass",
            Position::new(400.0, 100.0),
        )
        .entity("IFCWALL", Section::Applicability)
        .facet(
            NodeData::Classification(ClassificationData {
                system: "Uniclass 2015".into(),
                value: Some("Pr_20_70_05_05".into()),
                ..Default::default()
            }),
            Section::Requirements,
        )
        .finish(
            "walls-classification",
            "Walls classification",
            "Classification requirements for walls",
            "Classification",
        ),
        TemplateBuilder::new(
            "Structural-Steel",
            "Structural beams must be made of steel",
            Position::new(400.0, 100.0),
        )
        .entity("IFCBEAM", Section::Applicability)
        .facet(
            NodeData::Material(MaterialData {
                value: Some("steel".into()),
                ..Default::default()
            }),
            Section::Requirements,
        )
        .finish(
            "structural-steel-material",
            "Structural steel material",
            "Material requirements for structural steel",
            "Material",
        ),
        TemplateBuilder::new(
            "Equipment-Spatial",
            "Flow terminals must be contained in a space",
            Position::new(400.0, 100.0),
        )
        .entity("IFCFLOWTERMINAL", Section::Applicability)
        .facet(
            NodeData::PartOf(PartOfData {
                entity: "IFCSPACE".into(),
                relation: Some("IFCRELCONTAINEDINSPATIALSTRUCTURE".into()),
                ..Default::default()
            }),
            Section::Requirements,
        )
        .finish(
            "equipment-in-spaces",
            "Equipment in spaces",
            "Spatial containment for equipment",
            "Spatial",
        ),
        TemplateBuilder::new(
            "FireRating-Enumeration",
            "Fire ratings must be from approved enumeration",
            Position::new(500.0, 100.0),
        )
        .entity("IFCWALL", Section::Applicability)
        .restricted(
            NodeData::Property(PropertyData {
                property_set: "Pset_WallCommon".into(),
                base_name: "FireRating".into(),
                data_type: Some("IFCLABEL".into()),
                ..Default::default()
            }),
            Restriction::enumeration([
                "-", "E30", "E60", "E90", "E120", "E180", "EI30", "EI60", "EI90", "EI120",
                "EI180", "REI30", "REI60", "REI90", "REI120", "REI180", "REI240", "EW30", "EW60",
                "S", "K30", "K60",
            ]),
            Section::Requirements,
        )
        .finish(
            "fire-rating-enumeration",
            "Fire rating enumeration",
            "Fire ratings must be from approved list",
            "Restriction",
        ),
        TemplateBuilder::new(
            "MaterialTypes-Enumeration",
            "Material types must be from approved enumeration",
            Position::new(500.0, 100.0),
        )
        .entity("IFCWALL", Section::Applicability)
        .restricted(
            NodeData::Material(MaterialData::default()),
            Restriction::enumeration([
                "Concrete",
                "Steel",
                "Wood",
                "Brick",
                "Stone",
                "Glass",
                "Aluminum",
                "Plastic",
                "Composite",
                "Ceramic",
                "Gypsum",
                "Insulation",
                "Masonry",
                "Timber",
                "Metal",
                "Fiber cement",
            ]),
            Section::Requirements,
        )
        .finish(
            "material-types-enumeration",
            "Material types enumeration",
            "Material types must be from approved list",
            "Restriction",
        ),
    ]
}

// ============================================================================
// Template construction
// ============================================================================

const FACET_X: f64 = 100.0;
const FIRST_FACET_Y: f64 = 100.0;
const ROW_STEP: f64 = 120.0;
const RESTRICTION_X: f64 = 300.0;

struct TemplateBuilder {
    ids: IdAllocator,
    graph: IdsGraph,
    spec_id: NodeId,
    next_y: f64,
}

impl TemplateBuilder {
    fn new(spec_name: &str, description: &str, spec_position: Position) -> Self {
        let mut ids = IdAllocator::new();
        let mut graph = IdsGraph::new();
        let spec_id = ids.next_node(NodeKind::Spec);
        let mut spec = SpecificationData::new(spec_name);
        spec.description = Some(description.to_string());
        graph.add_node(GraphNode::new(
            spec_id.clone(),
            spec_position,
            NodeData::Spec(spec),
        ));

        Self {
            ids,
            graph,
            spec_id,
            next_y: FIRST_FACET_Y,
        }
    }

    fn push_facet(&mut self, data: NodeData) -> (NodeId, Position) {
        let id = self.ids.next_node(data.kind());
        let position = Position::new(FACET_X, self.next_y);
        self.next_y += ROW_STEP;
        self.graph
            .add_node(GraphNode::new(id.clone(), position, data));
        (id, position)
    }

    fn facet(mut self, data: NodeData, section: Section) -> Self {
        let (id, _) = self.push_facet(data);
        let spec_id = self.spec_id.clone();
        self.graph
            .connect(&mut self.ids, id, spec_id, Some(section));
        self
    }

    fn entity(self, name: &str, section: Section) -> Self {
        self.facet(
            NodeData::Entity(EntityData {
                name: name.to_string(),
                ..Default::default()
            }),
            section,
        )
    }

    fn property(
        self,
        property_set: &str,
        base_name: &str,
        data_type: &str,
        value: Option<&str>,
        section: Section,
    ) -> Self {
        self.facet(
            NodeData::Property(PropertyData {
                property_set: property_set.to_string(),
                base_name: base_name.to_string(),
                data_type: Some(data_type.to_string()),
                value: value.map(str::to_string),
                ..Default::default()
            }),
            section,
        )
    }

    /// Facet → restriction → spec chain; the facet gets no direct edge
    fn restricted(mut self, data: NodeData, restriction: Restriction, section: Section) -> Self {
        let (facet_id, facet_pos) = self.push_facet(data);
        let restriction_id = self.ids.next_node(NodeKind::Restriction);
        self.graph.add_node(GraphNode::new(
            restriction_id.clone(),
            Position::new(RESTRICTION_X, facet_pos.y),
            NodeData::Restriction(restriction),
        ));
        let spec_id = self.spec_id.clone();
        self.graph
            .connect(&mut self.ids, facet_id, restriction_id.clone(), None);
        self.graph
            .connect(&mut self.ids, restriction_id, spec_id, Some(section));
        self
    }

    fn finish(
        self,
        id: &'static str,
        name: &'static str,
        description: &'static str,
        category: &'static str,
    ) -> SpecTemplate {
        SpecTemplate {
            id,
            name,
            description,
            category,
            graph: self.graph,
        }
    }
}
