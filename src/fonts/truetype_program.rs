//! TrueType/OpenType font programs.
//!
//! This module wraps the `ttf-parser` crate to serve glyph outlines for
//! CIDFontType2 programs (FontFile2) and OpenType-wrapped programs
//! (FontFile3 /OpenType). An OpenType program whose `CFF ` table is
//! CID-keyed exposes that table's charset for CID lookups.

use crate::error::{Error, Result};
use crate::fonts::cff_program::cid_charset;
use crate::fonts::program::{FontProgram, ProgramFormat};
use crate::rendering::GlyphPath;
use bytes::Bytes;
use std::collections::HashMap;
use ttf_parser::{Face, GlyphId};

/// Symbol fonts map their glyphs into the private-use block U+F000..U+F0FF
/// (Microsoft Symbol cmap); single-byte codes are looked up there as well.
const SYMBOL_CMAP_OFFSET: u32 = 0xF000;

/// A parsed sfnt (TrueType or OpenType) program.
///
/// The face is re-parsed from the shared bytes on each query; parsing only
/// reads the table directory.
#[derive(Debug, Clone)]
pub struct SfntProgram {
    data: Bytes,
    face_index: u32,
    format: ProgramFormat,
    units_per_em: u16,
    number_of_glyphs: u16,
    /// CID to glyph index, present for CID-keyed `CFF ` tables
    charset: Option<HashMap<u16, u16>>,
}

impl SfntProgram {
    /// Parse font program data.
    pub fn parse(data: Bytes, format: ProgramFormat) -> Result<Self> {
        Self::parse_face(data, 0, format)
    }

    /// Parse face `face_index` of a font collection (index 0 for single fonts).
    pub fn parse_face(data: Bytes, face_index: u32, format: ProgramFormat) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::malformed("font program is empty"));
        }

        let face = Face::parse(&data, face_index)
            .map_err(|e| Error::malformed(format!("failed to parse font program: {}", e)))?;
        let units_per_em = face.units_per_em();
        let number_of_glyphs = face.number_of_glyphs();
        let charset = face.tables().cff.as_ref().and_then(cid_charset);
        log::debug!(
            "Parsed {:?} program: {} glyphs, {} units/em, CID-keyed: {}",
            format,
            number_of_glyphs,
            units_per_em,
            charset.is_some()
        );

        Ok(Self {
            data,
            face_index,
            format,
            units_per_em,
            number_of_glyphs,
            charset,
        })
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, self.face_index).ok()
    }

    /// Number of glyphs in the program.
    pub fn number_of_glyphs(&self) -> u16 {
        self.number_of_glyphs
    }
}

impl FontProgram for SfntProgram {
    fn format(&self) -> ProgramFormat {
        self.format
    }

    fn is_cid_keyed(&self) -> bool {
        self.charset.is_some()
    }

    fn cid_to_gid(&self, cid: u16) -> Option<u16> {
        self.charset.as_ref()?.get(&cid).copied()
    }

    fn char_to_gid(&self, code: u16) -> Option<u16> {
        let face = self.face()?;
        let lookup = |cp: u32| {
            char::from_u32(cp)
                .and_then(|c| face.glyph_index(c))
                .map(|gid| gid.0)
        };

        lookup(u32::from(code)).or_else(|| {
            if code <= 0xFF {
                lookup(SYMBOL_CMAP_OFFSET + u32::from(code))
            } else {
                None
            }
        })
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn outline(&self, gid: u16) -> Result<Option<GlyphPath>> {
        if gid >= self.number_of_glyphs {
            log::debug!("Glyph {} beyond {} glyphs in program", gid, self.number_of_glyphs);
            return Ok(None);
        }

        let face = self
            .face()
            .ok_or_else(|| Error::malformed("font program no longer parses"))?;
        let mut path = GlyphPath::new();
        match face.outline_glyph(GlyphId(gid), &mut path) {
            Some(_) if !path.is_empty() => Ok(Some(path)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_fails() {
        let err = SfntProgram::parse(Bytes::new(), ProgramFormat::TrueType).unwrap_err();
        assert!(matches!(err, Error::MalformedFont(_)));
    }

    #[test]
    fn test_parse_garbage_fails() {
        let err = SfntProgram::parse(Bytes::from_static(b"\x00\x01\x00\x00garbage"), ProgramFormat::TrueType)
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse font program"));
    }
}
