//! Result-graph materialization for graph query consoles.
//!
//! Raw tabular query results ([`ResultTable`]) are flattened into typed
//! graph elements by the [`normalize`] module, folded into a presentation
//! graph and an analytic multigraph by [`GraphBuilder`], and frozen into a
//! [`ResultGraph`] ready for rendering or export.

pub mod analytic;
pub mod builder;
pub mod cell;
pub mod element;
pub mod encode;
pub mod executor;
pub mod normalize;
pub mod pipeline;
pub mod presentation;
pub mod value;

pub use analytic::{AnalyticEdge, AnalyticGraph, AnalyticNode};
pub use builder::{BuildOptions, GraphBuilder, ResultGraph};
pub use cell::{RawCell, RawEdge, RawPath, RawTag, RawVertex, ResultTable, StatementResult};
pub use element::{Edge, Element, Vertex};
pub use encode::{PALETTE, REPULSION_LAYOUT, RepulsionLayout, get_color, truncate};
pub use executor::{QueryExecutor, RecordedExecutor, run_statements, split_statements};
pub use graphex_error::{Error, ErrorKind, Result};
pub use normalize::{normalize, normalize_table};
pub use pipeline::{Materialization, QueryFailure, StatementTable, materialize};
pub use presentation::{PresentationEdge, PresentationGraph, PresentationNode};
pub use value::{Properties, RawValue, Scalar, WrappedValue};
