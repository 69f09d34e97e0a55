//! Type 0 (composite) fonts.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.7 - Composite Fonts
//!
//! A Type 0 font pairs a CMap (here always `Identity-H`) with a single
//! descendant CIDFont. [`CompositeFont`] reads both dictionaries once and
//! then answers width and drawing queries for shown strings.

use crate::config::FontOptions;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::fonts::cid_system_info::CidSystemInfo;
use crate::fonts::cid_to_gid::CidToGidMap;
use crate::fonts::glyph_selection::{decode_identity_h, CidFontKind, CidFontType};
use crate::fonts::program::{DefaultProgramLoader, FontProgramLoader, ProgramSource};
use crate::fonts::widths::{width_value, WidthTable, DEFAULT_CID_WIDTH};
use crate::object::{type_error, ArrayExt, Dict, DictExt, Object};
use crate::rendering::{GlyphPainter, Point, TextState};

/// The only supported CMap: two-byte big-endian codes equal to CIDs.
pub const IDENTITY_H: &str = "Identity-H";

/// A resolved Type 0 font.
///
/// Immutable once built; construction either yields a complete font or an
/// error.
#[derive(Debug)]
pub struct CompositeFont {
    base_font: String,
    system_info: CidSystemInfo,
    cid_font_type: CidFontType,
    widths: WidthTable,
    cid_to_gid: CidToGidMap,
}

impl CompositeFont {
    /// Resolve a Type 0 font dictionary with the default program loader and
    /// strict options.
    pub fn initialize(doc: &PdfDocument, font_dict: &Object, font_size: f32) -> Result<Self> {
        Self::initialize_with(
            doc,
            font_dict,
            font_size,
            &DefaultProgramLoader,
            &FontOptions::default(),
        )
    }

    /// Resolve a Type 0 font dictionary.
    ///
    /// `font_size` does not affect the result: widths are kept in glyph space
    /// and scaled when drawing.
    pub fn initialize_with(
        doc: &PdfDocument,
        font_dict: &Object,
        font_size: f32,
        loader: &dyn FontProgramLoader,
        options: &FontOptions,
    ) -> Result<Self> {
        let dict = match doc.resolve(font_dict)? {
            Object::Dictionary(dict) => dict,
            other => return Err(type_error("Dictionary", &other)),
        };

        let base_font = if dict.contains("BaseFont") {
            dict.get_name(doc, "BaseFont")?
        } else {
            String::from("Unknown")
        };
        log::debug!("Resolving Type 0 font '{}' at size {}", base_font, font_size);

        match dict.get_object(doc, "Encoding")? {
            Object::Name(name) if name == IDENTITY_H => {},
            Object::Name(name) => {
                return Err(Error::unsupported(format!("Type 0 font with CMap /{}", name)));
            },
            other => {
                return Err(Error::unsupported(format!(
                    "Type 0 font with embedded CMap ({})",
                    other.type_name()
                )));
            },
        }

        let descendants = dict.get_array(doc, "DescendantFonts")?;
        let descendant = descendants.get_dict_at(doc, 0)?;

        let system_info = CidSystemInfo::from_dict(&descendant.get_dict(doc, "CIDSystemInfo")?, doc)?;
        let kind = CidFontKind::from_subtype(&descendant.get_name(doc, "Subtype")?)?;
        log::debug!("Font '{}': {:?}, collection {}", base_font, kind, system_info);

        let descriptor = descendant.get_dict(doc, "FontDescriptor")?;
        let source = ProgramSource::from_descriptor(&descriptor, &base_font, doc, options);
        let embedded = source.is_embedded();
        let program = loader.load(&source)?;
        if program.is_none() {
            log::debug!("Font '{}': no outline decoder available", base_font);
        }
        let cid_font_type = CidFontType::new(kind, program, embedded);

        let widths = read_widths(&descendant, doc, options)?;
        let cid_to_gid = CidToGidMap::from_object(
            descendant.get("CIDToGIDMap").or_else(|| dict.get("CIDToGIDMap")),
            doc,
            options,
        )?;
        log::debug!(
            "Font '{}': {} explicit widths, CIDToGIDMap {}",
            base_font,
            widths.len(),
            match cid_to_gid.len() {
                None => "Identity".to_string(),
                Some(n) => format!("with {} entries", n),
            }
        );

        Ok(Self {
            base_font,
            system_info,
            cid_font_type,
            widths,
            cid_to_gid,
        })
    }

    /// Advance width of `code` in text space units per unit font size.
    pub fn width_of(&self, code: u16) -> f32 {
        self.widths.width_of(code)
    }

    /// Sum of the advance widths of the codes in `string`.
    pub fn string_width(&self, string: &[u8]) -> f32 {
        decode_identity_h(string).map(|code| self.width_of(code)).sum()
    }

    /// Paint `string` starting at `origin`, returning the advanced pen
    /// position.
    pub fn draw_string(
        &self,
        painter: &mut dyn GlyphPainter,
        origin: Point,
        string: &[u8],
        state: &TextState,
    ) -> Result<Point> {
        self.cid_font_type
            .draw_string(painter, origin, string, state, &self.widths, &self.cid_to_gid)
    }

    /// Widths are size-independent, so there is nothing to update.
    pub fn set_font_size(&mut self, _font_size: f32) {}

    /// The `/BaseFont` name, or "Unknown".
    pub fn base_font(&self) -> &str {
        &self.base_font
    }

    /// Character collection of the descendant font.
    pub fn system_info(&self) -> &CidSystemInfo {
        &self.system_info
    }

    /// Glyph selection strategy.
    pub fn cid_font_type(&self) -> &CidFontType {
        &self.cid_font_type
    }

    /// CID to glyph index mapping.
    pub fn cid_to_gid_map(&self) -> &CidToGidMap {
        &self.cid_to_gid
    }

    /// Width table.
    pub fn widths(&self) -> &WidthTable {
        &self.widths
    }

    /// `/DW`, or 1000 when absent.
    pub fn default_width(&self) -> u16 {
        self.widths.default_width()
    }
}

fn read_widths(descendant: &Dict, doc: &PdfDocument, options: &FontOptions) -> Result<WidthTable> {
    let default_width = if descendant.contains("DW") {
        width_value(&descendant.get_object(doc, "DW")?)?
    } else {
        DEFAULT_CID_WIDTH
    };

    if descendant.contains("W") {
        WidthTable::from_w_array(&descendant.get_array(doc, "W")?, default_width, doc, options)
    } else {
        Ok(WidthTable::new(default_width))
    }
}
