//! Bare CFF font programs (FontFile3 /CIDFontType0C and /Type1C).
//!
//! Wraps `ttf_parser::cff::Table`. CID-keyed programs carry a charset that
//! maps each glyph index to a CID; it is inverted once at parse time so
//! glyph selection can go from CID to glyph index.

use crate::error::{Error, Result};
use crate::fonts::program::{FontProgram, ProgramFormat};
use crate::rendering::GlyphPath;
use bytes::Bytes;
use std::collections::HashMap;
use ttf_parser::{cff, GlyphId};

/// Inverted charset of a CID-keyed CFF table, `None` for name-keyed tables.
///
/// When several glyphs claim the same CID the lowest glyph index wins.
pub(crate) fn cid_charset(table: &cff::Table<'_>) -> Option<HashMap<u16, u16>> {
    let mut charset = HashMap::new();
    for gid in 0..table.number_of_glyphs() {
        // SID fonts report no CID for any glyph
        let cid = table.glyph_cid(GlyphId(gid))?;
        charset.entry(cid).or_insert(gid);
    }
    Some(charset)
}

/// A parsed bare CFF program.
#[derive(Debug, Clone)]
pub struct CffProgram {
    data: Bytes,
    units_per_em: u16,
    number_of_glyphs: u16,
    charset: Option<HashMap<u16, u16>>,
}

impl CffProgram {
    /// Parse CFF program data.
    pub fn parse(data: Bytes) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::malformed("font program is empty"));
        }

        let table = cff::Table::parse(&data)
            .ok_or_else(|| Error::malformed("failed to parse CFF font program"))?;
        let units_per_em = units_per_em(table.matrix().sx);
        let number_of_glyphs = table.number_of_glyphs();
        let charset = cid_charset(&table);
        log::debug!(
            "Parsed CFF program: {} glyphs, {} units/em, CID-keyed: {}",
            number_of_glyphs,
            units_per_em,
            charset.is_some()
        );

        Ok(Self {
            data,
            units_per_em,
            number_of_glyphs,
            charset,
        })
    }

    fn table(&self) -> Option<cff::Table<'_>> {
        cff::Table::parse(&self.data)
    }

    /// Number of glyphs in the program.
    pub fn number_of_glyphs(&self) -> u16 {
        self.number_of_glyphs
    }
}

/// Em size implied by the horizontal scale of a CFF FontMatrix.
fn units_per_em(scale: f32) -> u16 {
    let upem = (1.0 / scale).round();
    if upem.is_finite() && (16.0..=16384.0).contains(&upem) {
        upem as u16
    } else {
        log::warn!("Unusual CFF FontMatrix scale {}, assuming 1000 units/em", scale);
        1000
    }
}

impl FontProgram for CffProgram {
    fn format(&self) -> ProgramFormat {
        ProgramFormat::Cff
    }

    fn is_cid_keyed(&self) -> bool {
        self.charset.is_some()
    }

    fn cid_to_gid(&self, cid: u16) -> Option<u16> {
        self.charset.as_ref()?.get(&cid).copied()
    }

    fn char_to_gid(&self, code: u16) -> Option<u16> {
        let code = u8::try_from(code).ok()?;
        self.table()?.glyph_index(code).map(|gid| gid.0)
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn outline(&self, gid: u16) -> Result<Option<GlyphPath>> {
        if gid >= self.number_of_glyphs {
            log::debug!("Glyph {} beyond {} glyphs in program", gid, self.number_of_glyphs);
            return Ok(None);
        }

        let table = self
            .table()
            .ok_or_else(|| Error::malformed("font program no longer parses"))?;
        let mut path = GlyphPath::new();
        match table.outline(GlyphId(gid), &mut path) {
            Ok(_) if !path.is_empty() => Ok(Some(path)),
            Ok(_) => Ok(None),
            Err(e) => {
                log::debug!("CFF glyph {} has no outline: {:?}", gid, e);
                Ok(None)
            },
        }
    }
}
