//! PDF object types.
//!
//! A minimal in-memory object model: the resolver reads font dictionaries
//! through [`DictExt`] and [`ArrayExt`], which resolve indirect references
//! against a [`PdfDocument`].

use crate::config::FontOptions;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Dictionary payload shared by [`Object::Dictionary`] and [`Object::Stream`].
pub type Dict = HashMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dict),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: Dict,
        /// Raw (still encoded) stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream { .. } => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value of an Integer or Real.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Decode stream data using the filters named in the stream dictionary.
    pub fn decode_stream_data(&self) -> Result<Vec<u8>> {
        self.decode_stream_data_with_options(&FontOptions::default())
    }

    /// Decode stream data, enforcing the decompression limits in `options`.
    pub fn decode_stream_data_with_options(&self, options: &FontOptions) -> Result<Vec<u8>> {
        match self {
            Object::Stream { dict, data } => {
                let filters = dict
                    .get("Filter")
                    .map(extract_filter_names)
                    .unwrap_or_default();

                if filters.is_empty() {
                    Ok(data.to_vec())
                } else {
                    crate::decoders::decode_stream_with_options(data, &filters, options)
                }
            },
            _ => Err(type_error("Stream", self)),
        }
    }
}

/// Extract filter names from a Filter object.
///
/// The Filter entry is either a single Name or an Array of Names.
fn extract_filter_names(filter_obj: &Object) -> Vec<String> {
    match filter_obj {
        Object::Name(name) => vec![name.clone()],
        Object::Array(arr) => arr
            .iter()
            .filter_map(|obj| obj.as_name().map(|s| s.to_string()))
            .collect(),
        _ => vec![],
    }
}

pub(crate) fn type_error(expected: &str, found: &Object) -> Error {
    Error::InvalidObjectType {
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

/// Typed, reference-resolving accessors on a dictionary.
///
/// Every getter resolves indirect references through `doc` and fails with a
/// document-model error when the key is missing or the value has the wrong
/// type.
pub trait DictExt {
    /// Resolved value for `key`.
    fn get_object(&self, doc: &PdfDocument, key: &str) -> Result<Object>;

    /// Resolved array for `key`.
    fn get_array(&self, doc: &PdfDocument, key: &str) -> Result<Vec<Object>>;

    /// Resolved dictionary (or stream dictionary) for `key`.
    fn get_dict(&self, doc: &PdfDocument, key: &str) -> Result<Dict>;

    /// Resolved string bytes for `key`.
    fn get_string(&self, doc: &PdfDocument, key: &str) -> Result<Vec<u8>>;

    /// Resolved name for `key`.
    fn get_name(&self, doc: &PdfDocument, key: &str) -> Result<String>;

    /// Resolved number for `key`, coerced to an integer (reals are truncated).
    fn get_integer(&self, doc: &PdfDocument, key: &str) -> Result<i64>;

    /// Whether `key` is present.
    fn contains(&self, key: &str) -> bool;
}

impl DictExt for Dict {
    fn get_object(&self, doc: &PdfDocument, key: &str) -> Result<Object> {
        let value = self
            .get(key)
            .ok_or_else(|| Error::MissingKey(key.to_string()))?;
        doc.resolve(value)
    }

    fn get_array(&self, doc: &PdfDocument, key: &str) -> Result<Vec<Object>> {
        match self.get_object(doc, key)? {
            Object::Array(arr) => Ok(arr),
            other => Err(type_error("Array", &other)),
        }
    }

    fn get_dict(&self, doc: &PdfDocument, key: &str) -> Result<Dict> {
        match self.get_object(doc, key)? {
            Object::Dictionary(dict) | Object::Stream { dict, .. } => Ok(dict),
            other => Err(type_error("Dictionary", &other)),
        }
    }

    fn get_string(&self, doc: &PdfDocument, key: &str) -> Result<Vec<u8>> {
        match self.get_object(doc, key)? {
            Object::String(bytes) => Ok(bytes),
            other => Err(type_error("String", &other)),
        }
    }

    fn get_name(&self, doc: &PdfDocument, key: &str) -> Result<String> {
        match self.get_object(doc, key)? {
            Object::Name(name) => Ok(name),
            other => Err(type_error("Name", &other)),
        }
    }

    fn get_integer(&self, doc: &PdfDocument, key: &str) -> Result<i64> {
        let value = self.get_object(doc, key)?;
        match value {
            Object::Integer(i) => Ok(i),
            Object::Real(r) => Ok(r as i64),
            other => Err(type_error("Integer", &other)),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// Reference-resolving accessors on an array.
pub trait ArrayExt {
    /// Resolved dictionary at `index`.
    fn get_dict_at(&self, doc: &PdfDocument, index: usize) -> Result<Dict>;
}

impl ArrayExt for [Object] {
    fn get_dict_at(&self, doc: &PdfDocument, index: usize) -> Result<Dict> {
        let value = self.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;
        match doc.resolve(value)? {
            Object::Dictionary(dict) | Object::Stream { dict, .. } => Ok(dict),
            other => Err(type_error("Dictionary", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    #[test]
    fn test_object_integer() {
        let obj = Object::Integer(42);
        assert_eq!(obj.as_integer(), Some(42));
        assert_eq!(obj.as_number(), Some(42.0));
        assert!(obj.as_name().is_none());
    }

    #[test]
    fn test_object_real_as_number() {
        let obj = Object::Real(500.5);
        assert_eq!(obj.as_number(), Some(500.5));
        assert!(obj.as_integer().is_none());
    }

    #[test]
    fn test_stream_as_dict() {
        let mut dict = Dict::new();
        dict.insert("Length".to_string(), Object::Integer(4));
        let stream = Object::Stream {
            dict,
            data: bytes::Bytes::from_static(b"\x00\x01\x00\x02"),
        };
        assert_eq!(stream.as_dict().and_then(|d| d.get("Length")), Some(&Object::Integer(4)));
        assert_eq!(stream.decode_stream_data().unwrap(), vec![0, 1, 0, 2]);
    }

    #[test]
    fn test_decode_non_stream_fails() {
        let err = Object::Integer(1).decode_stream_data().unwrap_err();
        assert!(matches!(err, Error::InvalidObjectType { .. }));
    }

    #[test]
    fn test_extract_filter_names() {
        assert_eq!(extract_filter_names(&name("FlateDecode")), vec!["FlateDecode"]);
        let arr = Object::Array(vec![name("ASCIIHexDecode"), name("FlateDecode")]);
        assert_eq!(extract_filter_names(&arr), vec!["ASCIIHexDecode", "FlateDecode"]);
        assert!(extract_filter_names(&Object::Null).is_empty());
    }

    #[test]
    fn test_dict_accessors_resolve_references() {
        let mut doc = PdfDocument::new();
        let ordering = doc.add(Object::String(b"Japan1".to_vec()));

        let mut dict = Dict::new();
        dict.insert("Ordering".to_string(), Object::Reference(ordering));
        dict.insert("Subtype".to_string(), name("CIDFontType2"));
        dict.insert("DW".to_string(), Object::Real(1000.7));

        assert_eq!(dict.get_string(&doc, "Ordering").unwrap(), b"Japan1");
        assert_eq!(dict.get_name(&doc, "Subtype").unwrap(), "CIDFontType2");
        assert_eq!(dict.get_integer(&doc, "DW").unwrap(), 1000);
        assert!(dict.contains("DW"));
        assert!(!dict.contains("W"));
    }

    #[test]
    fn test_dict_accessor_errors() {
        let doc = PdfDocument::new();
        let mut dict = Dict::new();
        dict.insert("Subtype".to_string(), Object::Integer(2));

        assert!(matches!(dict.get_name(&doc, "Subtype"), Err(Error::InvalidObjectType { .. })));
        assert!(matches!(dict.get_array(&doc, "W"), Err(Error::MissingKey(k)) if k == "W"));
    }

    #[test]
    fn test_get_dict_at() {
        let doc = PdfDocument::new();
        let arr = vec![Object::Dictionary(Dict::new())];
        assert!(arr.get_dict_at(&doc, 0).is_ok());
        assert!(matches!(
            arr.get_dict_at(&doc, 1),
            Err(Error::IndexOutOfBounds { index: 1, len: 1 })
        ));
    }
}
