// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDS-Flow XML - buildingSMART IDS reader and writer
//!
//! Converts requirement graphs to and from IDS 1.0 documents. It implements
//! the traits defined in `ids-flow-model`.
//!
//! # Features
//!
//! - **Schema-ordered output** - applicability facets always follow the
//!   order the IDS schema requires
//! - **Deterministic enumerations** - values are written sorted
//! - **Laid-out import** - parsed nodes are placed by `ids-flow-layout`
//! - **Lenient mode** - unreadable author, cardinality and restriction data
//!   is dropped with a warning instead of failing the call
//!
//! # Example
//!
//! ```ignore
//! use ids_flow_xml::{parse, serialize, SerializeOptions};
//!
//! let parsed = parse(&ids_xml)?;
//! println!("IFC version: {:?}", parsed.ifc_version);
//!
//! let xml = serialize(&parsed.graph, &SerializeOptions::default())?;
//! ```

pub mod codec;
pub mod reader;
pub mod writer;

pub use codec::{decode_restriction, decode_value, restriction_facets, DecodedValue};
pub use reader::{parse, parse_with_options, IdsReader, ParseOptions};
pub use writer::{
    normalize_author, serialize, IdsWriter, SerializeOptions, DEFAULT_AUTHOR_DOMAIN,
    DEFAULT_SPEC_NAME, IDS_NAMESPACE, IDS_SCHEMA_LOCATION,
};
