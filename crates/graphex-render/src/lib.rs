//! Rendering of materialized results.
//!
//! - [`html`]: interactive page for the presentation graph
//! - [`table`]: raw result tables as CSV or terminal text

pub mod html;
pub mod table;

pub use html::{HtmlOptions, VIS_NETWORK_CDN, VisScript, render_html, vis_data, write_html};
pub use table::{TableView, cell_text};
