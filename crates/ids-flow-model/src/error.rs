// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for graph conversion operations

use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, IdsError>;

/// Errors that can occur while converting between graphs and IDS documents
///
/// Every error is scoped to a single serialize/parse call. The caller's
/// graph is never modified by a failing call.
#[derive(Error, Debug)]
pub enum IdsError {
    /// The graph handed to the serializer has no nodes
    #[error("No nodes provided for conversion")]
    NoNodes,

    /// The graph handed to the serializer has no specification nodes
    #[error("No specification nodes found")]
    NoSpecifications,

    /// The IDS document is empty or whitespace only
    #[error("IDS file is empty")]
    EmptyDocument,

    /// The IDS document is not well-formed XML
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// The document root is not an `ids` element
    #[error("Invalid IDS file: missing ids root element")]
    MissingIdsRoot,

    /// The document declares no specifications
    #[error("IDS file contains no specifications")]
    NoSpecificationsInDocument,

    /// A specification id does not resolve to a specification node
    #[error("Specification {0} not found")]
    UnknownSpecification(String),

    /// A facet carries data the value codec cannot interpret (strict mode only)
    #[error("Malformed {element} facet: {reason}")]
    MalformedFacet { element: String, reason: String },

    /// The author is not a valid email address (strict mode only)
    #[error("Invalid author email: {0}")]
    InvalidAuthor(String),

    /// Writing the XML document failed
    #[error("XML write error: {0}")]
    XmlWrite(String),

    /// Canvas JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IdsError {
    /// Create an invalid XML error
    pub fn invalid_xml(msg: impl Into<String>) -> Self {
        IdsError::InvalidXml(msg.into())
    }

    /// Create a malformed facet error
    pub fn malformed_facet(element: impl Into<String>, reason: impl Into<String>) -> Self {
        IdsError::MalformedFacet {
            element: element.into(),
            reason: reason.into(),
        }
    }

    /// Create an XML write error
    pub fn xml_write(msg: impl Into<String>) -> Self {
        IdsError::XmlWrite(msg.into())
    }

    /// Whether the error means the input as a whole could not be converted
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            IdsError::NoNodes
                | IdsError::NoSpecifications
                | IdsError::EmptyDocument
                | IdsError::InvalidXml(_)
                | IdsError::MissingIdsRoot
                | IdsError::NoSpecificationsInDocument
                | IdsError::UnknownSpecification(_)
        )
    }
}
