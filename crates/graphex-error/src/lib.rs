//! # graphex-error
//!
//! Unified error handling for graphex.
//!
//! - **ErrorKind**: what went wrong (e.g. QueryFailed, SerializationFailed)
//! - **Context**: operation name plus key/value pairs that locate the failure
//! - **Source**: the wrapped underlying error, never leaked as a raw type
//!
//! ```rust
//! use graphex_error::{Error, ErrorKind};
//!
//! fn export() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::SerializationFailed, "attribute type conflict")
//!         .with_operation("gexf::write")
//!         .with_context("path", "nebulagraph_export.gexf"))
//! }
//! ```

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using graphex Error
pub type Result<T> = std::result::Result<T, Error>;
