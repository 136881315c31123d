//! GEXF 1.2 exchange format for the analytic graph.
//!
//! # Module Structure
//!
//! - [`builder`]: XML builder emitting well-formed GEXF text
//! - [`schema`]: per-title attribute type inference
//! - [`write`]: analytic graph to GEXF
//! - [`read`]: GEXF back into a flat document

mod builder;
mod read;
mod schema;
mod write;

pub use builder::{GEXF_NAMESPACE, GexfBuilder};
pub use read::{GexfDocument, GexfEdge, GexfNode, read_gexf, read_gexf_file};
pub use schema::{AttrClass, AttrType, Attribute, AttributeSchema};
pub use write::{write_gexf, write_gexf_file};
