//! Error types for composite font resolution.
//!
//! Every fallible operation returns [`Result`]. Variants fall into three
//! families, reported by [`Error::kind`]:
//!
//! - malformed font data, fatal to font construction
//! - unsupported features, which a renderer skips without aborting the page
//! - document-model failures, propagated unchanged from object lookups

use crate::object::ObjectRef;

/// Result type alias for font resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The font dictionary violates the PDF font model.
    MalformedFont,
    /// The input is recognised but the capability is not implemented.
    UnsupportedFeature,
    /// An object lookup or stream decode failed.
    DocumentModel,
}

/// Error types that can occur while resolving or drawing a composite font.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Font dictionary or font data is malformed
    #[error("Malformed font: {0}")]
    MalformedFont(String),

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Unsupported stream filter
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Referenced object not found in the document
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Required dictionary key is absent
    #[error("Missing dictionary key: /{0}")]
    MissingKey(String),

    /// Array index past the end
    #[error("Array index {index} out of bounds (length {len})")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Array length
        len: usize,
    },

    /// Stream decoding error
    #[error("Stream decoding error: {0}")]
    Decode(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Circular reference detected in object graph
    #[error("Circular reference detected: object {0}")]
    CircularReference(ObjectRef),

    /// Recursion depth limit exceeded
    #[error("Recursion depth limit exceeded (max: {0})")]
    RecursionLimitExceeded(u32),
}

impl Error {
    /// Shorthand for a [`Error::MalformedFont`] error.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedFont(reason.into())
    }

    /// Shorthand for an [`Error::Unsupported`] error.
    pub(crate) fn unsupported(feature: impl Into<String>) -> Self {
        Error::Unsupported(feature.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedFont(_) => ErrorKind::MalformedFont,
            Error::Unsupported(_) | Error::UnsupportedFilter(_) => ErrorKind::UnsupportedFeature,
            Error::ObjectNotFound(..)
            | Error::InvalidObjectType { .. }
            | Error::MissingKey(_)
            | Error::IndexOutOfBounds { .. }
            | Error::Decode(_)
            | Error::Io(_)
            | Error::CircularReference(_)
            | Error::RecursionLimitExceeded(_) => ErrorKind::DocumentModel,
        }
    }

    /// True when a renderer should skip the offending string and carry on.
    pub fn is_unsupported(&self) -> bool {
        self.kind() == ErrorKind::UnsupportedFeature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_font_error() {
        let err = Error::malformed("invalid /Subtype for Type 0 font");
        let msg = format!("{}", err);
        assert!(msg.contains("Malformed font"));
        assert!(msg.contains("/Subtype"));
        assert_eq!(err.kind(), ErrorKind::MalformedFont);
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_unsupported_error_kinds() {
        assert!(Error::unsupported("CMap /UniJIS-UCS2-H").is_unsupported());
        assert!(Error::UnsupportedFilter("JBIG2Decode".to_string()).is_unsupported());
    }

    #[test]
    fn test_object_not_found_error() {
        let err = Error::ObjectNotFound(10, 0);
        let msg = format!("{}", err);
        assert!(msg.contains("10 0 R"));
        assert_eq!(err.kind(), ErrorKind::DocumentModel);
    }

    #[test]
    fn test_invalid_object_type_error() {
        let err = Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: "Array".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Dictionary"));
        assert!(msg.contains("Array"));
        assert_eq!(err.kind(), ErrorKind::DocumentModel);
    }

    #[test]
    fn test_missing_key_error() {
        let err = Error::MissingKey("DescendantFonts".to_string());
        assert_eq!(format!("{}", err), "Missing dictionary key: /DescendantFonts");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
