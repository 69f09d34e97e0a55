//! The `/CIDSystemInfo` dictionary of a CIDFont.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.7.3 - CIDSystemInfo Dictionaries

use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::object::{Dict, DictExt};
use std::fmt;

/// Character collection a CIDFont claims to follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidSystemInfo {
    /// Issuer of the character collection (e.g. "Adobe")
    pub registry: String,
    /// Character collection within the registry (e.g. "Japan1")
    pub ordering: String,
    /// Supplement number of the collection
    pub supplement: u8,
}

impl CidSystemInfo {
    /// Read the three required entries from a CIDSystemInfo dictionary.
    ///
    /// A missing entry is [`Error::MalformedFont`]; a wrong-typed entry
    /// propagates the document-model error.
    pub fn from_dict(dict: &Dict, doc: &PdfDocument) -> Result<Self> {
        for key in ["Registry", "Ordering", "Supplement"] {
            if !dict.contains(key) {
                return Err(Error::malformed(format!("CIDSystemInfo has no /{}", key)));
            }
        }

        let registry = String::from_utf8_lossy(&dict.get_string(doc, "Registry")?).into_owned();
        let ordering = String::from_utf8_lossy(&dict.get_string(doc, "Ordering")?).into_owned();
        let supplement = dict.get_integer(doc, "Supplement")?;
        let supplement = u8::try_from(supplement).map_err(|_| {
            Error::malformed(format!("CIDSystemInfo /Supplement {} out of range", supplement))
        })?;

        Ok(Self {
            registry,
            ordering,
            supplement,
        })
    }

    /// Whether this is the `Adobe-Identity` collection, where CIDs carry no
    /// collection-specific meaning.
    pub fn is_identity(&self) -> bool {
        self.registry == "Adobe" && self.ordering == "Identity"
    }
}

impl fmt::Display for CidSystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.registry, self.ordering, self.supplement)
    }
}
