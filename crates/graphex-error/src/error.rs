//! The main Error type for graphex.

use crate::ErrorKind;
use std::fmt;

/// Unified error type for all graphex operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the value of the first context entry with the given key.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set the operation that caused this error.
    ///
    /// A previously set operation is moved to context as "called" so the
    /// call chain survives.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}: {value}")?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {key}: {value}")?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {source:?}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    /// Create a QueryFailed error carrying the executor's code and message.
    ///
    /// The message is kept verbatim so callers can surface it unchanged.
    pub fn query_failed(
        statement: impl Into<String>,
        code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::QueryFailed, message)
            .with_context("statement", statement)
            .with_context("code", code.to_string())
    }

    pub fn statement_not_recorded(statement: impl Into<String>) -> Self {
        let statement = statement.into();
        Self::new(
            ErrorKind::StatementNotRecorded,
            "no recorded result for statement",
        )
        .with_context("statement", statement)
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(ErrorKind::FileNotFound, format!("file '{path}' not found"))
            .with_context("path", path)
    }

    /// Wrap a decoding failure of an input document.
    pub fn deserialization_failed<E>(what: &'static str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(ErrorKind::DeserializationFailed, err.to_string())
            .with_context("input", what)
            .set_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::InvalidFormat, "missing <graph> element");
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.message(), "missing <graph> element");
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::IoFailed, "disk full")
            .with_operation("gexf::write_file")
            .with_operation("cli::export");

        assert_eq!(err.operation(), "cli::export");
        assert_eq!(err.context_value("called"), Some("gexf::write_file"));
    }

    #[test]
    fn test_query_failed_keeps_message() {
        let err = Error::query_failed(
            "MATCH (v) RETURN v",
            -1009,
            "SemanticError: Missing yield clause.",
        );
        assert_eq!(err.kind(), ErrorKind::QueryFailed);
        assert_eq!(err.message(), "SemanticError: Missing yield clause.");
        assert_eq!(err.context_value("code"), Some("-1009"));
        assert_eq!(err.context_value("statement"), Some("MATCH (v) RETURN v"));
    }

    #[test]
    fn test_invalid_argument() {
        let err = Error::invalid_argument("graph has no edges").with_operation("html::write");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(format!("{err}"), "InvalidArgument at html::write => graph has no edges");
    }

    #[test]
    fn test_display() {
        let err = Error::statement_not_recorded("SHOW SPACES").with_operation("recorded::execute");

        let display = format!("{err}");
        assert!(display.contains("StatementNotRecorded"));
        assert!(display.contains("recorded::execute"));
        assert!(display.contains("statement: SHOW SPACES"));
        assert!(display.ends_with("=> no recorded result for statement"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert_eq!(err.operation(), "io");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_deserialization_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::deserialization_failed("recorded results", json_err);
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
        assert_eq!(err.context_value("input"), Some("recorded results"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
