//! CID to glyph index mapping (`/CIDToGIDMap`).
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.7.4.2 - Glyph Selection in CIDFonts
//!
//! Either the name `/Identity` or a stream of big-endian 16-bit glyph
//! indices, where the entry at byte offset `2 * cid` is the GID for `cid`.

use crate::config::FontOptions;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::object::Object;
use byteorder::{BigEndian, ByteOrder};

/// Code-to-glyph-index mapping of a CIDFontType2 font.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CidToGidMap {
    /// GID equals CID.
    #[default]
    Identity,
    /// Explicit table indexed by CID.
    Explicit(Vec<u16>),
}

impl CidToGidMap {
    /// Build an explicit table from big-endian 16-bit entries.
    ///
    /// A trailing odd byte cannot form an entry and is dropped.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.len() % 2 != 0 {
            log::warn!(
                "CIDToGIDMap stream has odd length {}, ignoring the last byte",
                bytes.len()
            );
        }
        let table = bytes.chunks_exact(2).map(BigEndian::read_u16).collect();
        CidToGidMap::Explicit(table)
    }

    /// Interpret a `/CIDToGIDMap` value; `None` means the key is absent.
    ///
    /// - absent or `/Identity` → [`CidToGidMap::Identity`]
    /// - stream → [`CidToGidMap::Explicit`] from the decoded data
    /// - any other name → [`Error::Unsupported`]
    /// - any other object → [`Error::MalformedFont`]
    pub fn from_object(
        value: Option<&Object>,
        doc: &PdfDocument,
        options: &FontOptions,
    ) -> Result<Self> {
        let Some(value) = value else {
            return Ok(CidToGidMap::Identity);
        };

        match doc.resolve(value)? {
            Object::Name(name) if name == "Identity" => Ok(CidToGidMap::Identity),
            Object::Name(name) => Err(Error::unsupported(format!("CIDToGIDMap /{}", name))),
            stream @ Object::Stream { .. } => {
                let data = stream.decode_stream_data_with_options(options)?;
                let map = Self::from_bytes(&data);
                log::debug!("CIDToGIDMap stream with {} entries", map.len().unwrap_or(0));
                Ok(map)
            },
            other => Err(Error::malformed(format!(
                "CIDToGIDMap must be a name or stream, found {}",
                other.type_name()
            ))),
        }
    }

    /// Glyph index for `cid`.
    ///
    /// A CID past the end of an explicit table has no glyph and fails with
    /// [`Error::MalformedFont`].
    pub fn glyph_id(&self, cid: u16) -> Result<u16> {
        match self {
            CidToGidMap::Identity => Ok(cid),
            CidToGidMap::Explicit(table) => table.get(usize::from(cid)).copied().ok_or_else(|| {
                Error::malformed(format!(
                    "CID {} outside CIDToGIDMap with {} entries",
                    cid,
                    table.len()
                ))
            }),
        }
    }

    /// Number of explicit entries, `None` for the identity mapping.
    pub fn len(&self) -> Option<usize> {
        match self {
            CidToGidMap::Identity => None,
            CidToGidMap::Explicit(table) => Some(table.len()),
        }
    }

    /// Whether this is the identity mapping.
    pub fn is_identity(&self) -> bool {
        matches!(self, CidToGidMap::Identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Dict;

    fn stream(data: &'static [u8]) -> Object {
        Object::Stream {
            dict: Dict::new(),
            data: bytes::Bytes::from_static(data),
        }
    }

    #[test]
    fn test_identity_maps_code_to_itself() {
        let map = CidToGidMap::Identity;
        for cid in [0u16, 1, 255, 0x1234, u16::MAX] {
            assert_eq!(map.glyph_id(cid).unwrap(), cid);
        }
        assert_eq!(map.len(), None);
    }

    #[test]
    fn test_explicit_from_bytes() {
        let map = CidToGidMap::from_bytes(&[0x00, 0x0A, 0x00, 0x14]);
        assert_eq!(map.glyph_id(0).unwrap(), 10);
        assert_eq!(map.glyph_id(1).unwrap(), 20);
        assert_eq!(map.len(), Some(2));
    }

    #[test]
    fn test_explicit_out_of_range() {
        let map = CidToGidMap::from_bytes(&[0x00, 0x0A]);
        assert!(matches!(map.glyph_id(1), Err(Error::MalformedFont(_))));
    }

    #[test]
    fn test_odd_length_drops_last_byte() {
        let map = CidToGidMap::from_bytes(&[0x01, 0x00, 0x07]);
        assert_eq!(map, CidToGidMap::Explicit(vec![0x0100]));
    }

    #[test]
    fn test_from_object_variants() {
        let doc = PdfDocument::new();
        let options = FontOptions::default();

        assert!(CidToGidMap::from_object(None, &doc, &options).unwrap().is_identity());

        let identity = Object::Name("Identity".to_string());
        assert!(CidToGidMap::from_object(Some(&identity), &doc, &options)
            .unwrap()
            .is_identity());

        let map = CidToGidMap::from_object(Some(&stream(b"\x00\x03\x00\x04")), &doc, &options)
            .unwrap();
        assert_eq!(map.glyph_id(1).unwrap(), 4);

        let custom = Object::Name("Custom".to_string());
        let err = CidToGidMap::from_object(Some(&custom), &doc, &options).unwrap_err();
        assert!(err.is_unsupported());

        let err = CidToGidMap::from_object(Some(&Object::Integer(0)), &doc, &options).unwrap_err();
        assert!(matches!(err, Error::MalformedFont(_)));
    }

    #[test]
    fn test_from_referenced_stream() {
        let mut doc = PdfDocument::new();
        let map_ref = doc.add(stream(b"\x00\x09"));
        let map = CidToGidMap::from_object(
            Some(&Object::Reference(map_ref)),
            &doc,
            &FontOptions::default(),
        )
        .unwrap();
        assert_eq!(map.glyph_id(0).unwrap(), 9);
    }
}
