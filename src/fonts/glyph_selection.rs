//! Glyph selection in CIDFonts.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.7.4.2 - Glyph Selection in CIDFonts
//!
//! - CIDFontType0 (CFF): if the CFF Top DICT uses CIDFont operators, the CID
//!   is mapped to a GID through the CFF charset; otherwise the CID is the GID.
//! - CIDFontType2 (TrueType): an embedded program is indexed through
//!   `/CIDToGIDMap`; a program referenced by name is indexed through its own
//!   `cmap` and `/CIDToGIDMap` is ignored.

use crate::error::{Error, Result};
use crate::fonts::cid_to_gid::CidToGidMap;
use crate::fonts::program::FontProgram;
use crate::fonts::widths::WidthTable;
use crate::rendering::{GlyphPainter, GlyphTransform, Point, TextState};

/// Character code that receives word spacing.
const SPACE_CODE: u16 = 0x20;

/// Descendant font subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CidFontKind {
    /// `/CIDFontType0`, CFF-based
    CidFontType0,
    /// `/CIDFontType2`, TrueType-based
    CidFontType2,
}

impl CidFontKind {
    /// Parse a descendant font `/Subtype`.
    pub fn from_subtype(subtype: &str) -> Result<Self> {
        match subtype {
            "CIDFontType0" => Ok(CidFontKind::CidFontType0),
            "CIDFontType2" => Ok(CidFontKind::CidFontType2),
            other => Err(Error::malformed(format!(
                "invalid /Subtype /{} for Type 0 descendant font",
                other
            ))),
        }
    }
}

/// Glyph selection strategy, one variant per font program family.
#[derive(Debug)]
pub enum CidFontType {
    /// CFF-based glyphs (CIDFontType0).
    CompactOutline {
        /// Decoder for the font program, if one is available
        program: Option<Box<dyn FontProgram>>,
    },
    /// TrueType-based glyphs (CIDFontType2).
    OutlineTable {
        /// Decoder for the font program, if one is available
        program: Option<Box<dyn FontProgram>>,
        /// Whether the program is embedded in the document
        embedded: bool,
    },
}

impl CidFontType {
    /// Build the strategy for `kind`.
    pub fn new(kind: CidFontKind, program: Option<Box<dyn FontProgram>>, embedded: bool) -> Self {
        match kind {
            CidFontKind::CidFontType0 => CidFontType::CompactOutline { program },
            CidFontKind::CidFontType2 => CidFontType::OutlineTable { program, embedded },
        }
    }

    /// Descendant font subtype served by this strategy.
    pub fn kind(&self) -> CidFontKind {
        match self {
            CidFontType::CompactOutline { .. } => CidFontKind::CidFontType0,
            CidFontType::OutlineTable { .. } => CidFontKind::CidFontType2,
        }
    }

    /// The font program decoder, if any.
    pub fn program(&self) -> Option<&dyn FontProgram> {
        match self {
            CidFontType::CompactOutline { program } | CidFontType::OutlineTable { program, .. } => {
                program.as_deref()
            },
        }
    }

    fn require_program(&self) -> Result<&dyn FontProgram> {
        self.program().ok_or_else(|| {
            Error::unsupported(match self.kind() {
                CidFontKind::CidFontType0 => "CIDFontType0 glyphs without a CFF outline decoder",
                CidFontKind::CidFontType2 => "CIDFontType2 glyphs without a TrueType program",
            })
        })
    }

    /// Glyph index for `cid`.
    pub fn select_glyph(&self, cid: u16, cid_to_gid: &CidToGidMap) -> Result<u16> {
        let program = self.require_program()?;
        match self {
            CidFontType::CompactOutline { .. } => {
                if !program.is_cid_keyed() {
                    return Ok(cid);
                }
                Ok(program.cid_to_gid(cid).unwrap_or_else(|| {
                    log::debug!("CID {} not in CFF charset, using .notdef", cid);
                    0
                }))
            },
            CidFontType::OutlineTable { embedded: true, .. } => cid_to_gid.glyph_id(cid),
            CidFontType::OutlineTable { embedded: false, .. } => {
                Ok(program.char_to_gid(cid).unwrap_or_else(|| {
                    log::debug!("Code {} not in font cmap, using .notdef", cid);
                    0
                }))
            },
        }
    }

    /// Paint `string` (Identity-H byte pairs) starting at `origin`.
    ///
    /// Returns the pen position after the last glyph. Fails with
    /// [`Error::Unsupported`] before painting anything when no program
    /// decoder is available.
    pub fn draw_string(
        &self,
        painter: &mut dyn GlyphPainter,
        origin: Point,
        string: &[u8],
        state: &TextState,
        widths: &WidthTable,
        cid_to_gid: &CidToGidMap,
    ) -> Result<Point> {
        let program = self.require_program()?;
        let units_per_em = program.units_per_em();
        let mut pen = origin;

        for code in decode_identity_h(string) {
            let gid = self.select_glyph(code, cid_to_gid)?;
            if let Some(path) = program.outline(gid)? {
                let transform = GlyphTransform::new(pen, units_per_em, state);
                painter.fill_glyph(&path, &transform, state.color)?;
            }

            pen.x += widths.width_of(code) * state.font_size * state.horizontal_scaling
                + state.char_spacing;
            if code == SPACE_CODE {
                pen.x += state.word_spacing;
            }
        }

        Ok(pen)
    }
}

/// Split a shown string into Identity-H codes (big-endian byte pairs).
///
/// A trailing odd byte cannot form a code and is dropped.
pub fn decode_identity_h(string: &[u8]) -> impl Iterator<Item = u16> + '_ {
    if string.len() % 2 != 0 {
        log::warn!(
            "Identity-H string has odd length {}, dropping the last byte",
            string.len()
        );
    }
    string
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
}
