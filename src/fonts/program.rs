//! Font programs behind a CIDFont.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.9 - Embedded Font Programs
//!
//! The resolver never looks inside a font program itself. It asks a
//! [`FontProgram`] for CID-keying, glyph lookups and outlines, and obtains
//! programs from a [`FontProgramLoader`] given the [`ProgramSource`] read
//! from the font descriptor.

use crate::config::FontOptions;
use crate::document::PdfDocument;
use crate::error::Result;
use crate::fonts::cff_program::CffProgram;
use crate::fonts::truetype_program::SfntProgram;
use crate::object::{Dict, Object};
use crate::rendering::GlyphPath;
use bytes::Bytes;

/// Container format of a font program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramFormat {
    /// TrueType (`FontFile2`)
    TrueType,
    /// OpenType wrapper (`FontFile3` with `/Subtype /OpenType`)
    OpenType,
    /// Bare CFF (`FontFile3` with `/Subtype /CIDFontType0C` or `/Type1C`)
    Cff,
    /// Type 1 (`FontFile`)
    Type1,
}

/// Font program collaborator consulted during glyph selection.
pub trait FontProgram: std::fmt::Debug + Send + Sync {
    /// Container format.
    fn format(&self) -> ProgramFormat;

    /// Whether the program's top-level dictionary uses CIDFont operators.
    ///
    /// Only meaningful for CFF-based programs.
    fn is_cid_keyed(&self) -> bool {
        false
    }

    /// Map a CID to a glyph index through the program's charset.
    fn cid_to_gid(&self, cid: u16) -> Option<u16> {
        let _ = cid;
        None
    }

    /// Map a character code to a glyph index through the program's own
    /// character map. Used for fonts referenced by name.
    fn char_to_gid(&self, code: u16) -> Option<u16>;

    /// Design units per em of the outlines.
    fn units_per_em(&self) -> u16 {
        1000
    }

    /// Outline of glyph `gid` in font units.
    ///
    /// `Ok(None)` means the glyph exists but draws nothing (or is absent);
    /// [`crate::error::Error::Unsupported`] means the program cannot produce
    /// outlines at all.
    fn outline(&self, gid: u16) -> Result<Option<GlyphPath>>;
}

/// Where a CIDFont's program comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramSource {
    /// Embedded in the document (decoded stream data).
    Embedded {
        /// Container format
        format: ProgramFormat,
        /// Decoded font file
        data: Bytes,
    },
    /// Embedded, but the font file stream could not be read or decoded.
    ///
    /// The font keeps its metrics; drawing reports the missing outlines.
    Undecodable {
        /// Container format named by the descriptor
        format: ProgramFormat,
    },
    /// Not embedded; referenced by its `/BaseFont` name.
    Named(String),
}

impl ProgramSource {
    /// Read the program source from a font descriptor.
    ///
    /// Falls back to [`ProgramSource::Named`] with `base_font` when the
    /// descriptor carries no font file. A font file that cannot be resolved
    /// or decoded yields [`ProgramSource::Undecodable`].
    pub fn from_descriptor(
        descriptor: &Dict,
        base_font: &str,
        doc: &PdfDocument,
        options: &FontOptions,
    ) -> Self {
        let embedded = [
            ("FontFile2", Some(ProgramFormat::TrueType)),
            ("FontFile3", None),
            ("FontFile", Some(ProgramFormat::Type1)),
        ];

        for (key, format) in embedded {
            let Some(value) = descriptor.get(key) else {
                continue;
            };
            let stream = match doc.resolve(value) {
                Ok(stream) => stream,
                Err(e) => {
                    log::warn!("Font '{}': cannot resolve /{}: {}", base_font, key, e);
                    return ProgramSource::Undecodable {
                        format: format.unwrap_or(ProgramFormat::Cff),
                    };
                },
            };
            let format = format.unwrap_or_else(|| font_file3_format(&stream));
            let data = match stream.decode_stream_data_with_options(options) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!(
                        "Font '{}': cannot decode /{} ({:?}), outlines unavailable: {}",
                        base_font,
                        key,
                        format,
                        e
                    );
                    return ProgramSource::Undecodable { format };
                },
            };
            log::info!(
                "Font '{}' embeds a {:?} program in /{} ({} bytes)",
                base_font,
                format,
                key,
                data.len()
            );
            return ProgramSource::Embedded {
                format,
                data: Bytes::from(data),
            };
        }

        log::debug!("Font '{}' has no embedded program", base_font);
        ProgramSource::Named(base_font.to_string())
    }

    /// Whether the program is embedded in the document.
    pub fn is_embedded(&self) -> bool {
        !matches!(self, ProgramSource::Named(_))
    }
}

fn font_file3_format(stream: &Object) -> ProgramFormat {
    match stream
        .as_dict()
        .and_then(|dict| dict.get("Subtype"))
        .and_then(|subtype| subtype.as_name())
    {
        Some("OpenType") => ProgramFormat::OpenType,
        _ => ProgramFormat::Cff,
    }
}

/// Turns a [`ProgramSource`] into a usable [`FontProgram`].
pub trait FontProgramLoader {
    /// Load the program, or `Ok(None)` when no decoder is available for it.
    fn load(&self, source: &ProgramSource) -> Result<Option<Box<dyn FontProgram>>>;
}

/// Loader backed by ttf-parser.
///
/// TrueType, OpenType and bare CFF programs are parsed; Type 1 programs have
/// no decoder and name-referenced fonts are not looked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProgramLoader;

impl FontProgramLoader for DefaultProgramLoader {
    fn load(&self, source: &ProgramSource) -> Result<Option<Box<dyn FontProgram>>> {
        match source {
            ProgramSource::Embedded { format, data } => {
                let parsed = match format {
                    ProgramFormat::TrueType | ProgramFormat::OpenType => {
                        SfntProgram::parse(data.clone(), *format)
                            .map(|p| Box::new(p) as Box<dyn FontProgram>)
                    },
                    ProgramFormat::Cff => {
                        CffProgram::parse(data.clone()).map(|p| Box::new(p) as Box<dyn FontProgram>)
                    },
                    ProgramFormat::Type1 => {
                        log::debug!("No outline decoder for embedded Type 1 programs");
                        return Ok(None);
                    },
                };
                match parsed {
                    Ok(program) => Ok(Some(program)),
                    Err(e) => {
                        log::warn!("Embedded {:?} program unusable: {}", format, e);
                        Ok(None)
                    },
                }
            },
            ProgramSource::Undecodable { format } => {
                log::debug!("Embedded {:?} program was not decoded", format);
                Ok(None)
            },
            ProgramSource::Named(name) => {
                log::debug!("Font '{}' is not embedded and system lookup is disabled", name);
                Ok(None)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_file(subtype: Option<&str>, data: &'static [u8]) -> Object {
        let mut dict = Dict::new();
        if let Some(subtype) = subtype {
            dict.insert("Subtype".to_string(), Object::Name(subtype.to_string()));
        }
        Object::Stream {
            dict,
            data: Bytes::from_static(data),
        }
    }

    fn source(key: &str, file: Object) -> ProgramSource {
        let mut doc = PdfDocument::new();
        let file_ref = doc.add(file);
        let mut descriptor = Dict::new();
        descriptor.insert(key.to_string(), Object::Reference(file_ref));
        ProgramSource::from_descriptor(&descriptor, "Test", &doc, &FontOptions::default())
    }

    #[test]
    fn test_font_file2_is_truetype() {
        let src = source("FontFile2", font_file(None, b"\x00\x01\x00\x00"));
        assert_eq!(
            src,
            ProgramSource::Embedded {
                format: ProgramFormat::TrueType,
                data: Bytes::from_static(b"\x00\x01\x00\x00"),
            }
        );
        assert!(src.is_embedded());
    }

    #[test]
    fn test_font_file3_subtypes() {
        let otf = source("FontFile3", font_file(Some("OpenType"), b"OTTO"));
        assert!(matches!(otf, ProgramSource::Embedded { format: ProgramFormat::OpenType, .. }));

        let cff = source("FontFile3", font_file(Some("CIDFontType0C"), b"\x01\x00\x04\x02"));
        assert!(matches!(cff, ProgramSource::Embedded { format: ProgramFormat::Cff, .. }));
    }

    #[test]
    fn test_no_font_file_is_named() {
        let src = ProgramSource::from_descriptor(
            &Dict::new(),
            "MS-Mincho",
            &PdfDocument::new(),
            &FontOptions::default(),
        );
        assert_eq!(src, ProgramSource::Named("MS-Mincho".to_string()));
        assert!(!src.is_embedded());
    }

    #[test]
    fn test_undecodable_font_file() {
        let mut dict = Dict::new();
        dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
        let broken = Object::Stream {
            dict,
            data: Bytes::from_static(b"not zlib"),
        };

        let src = source("FontFile2", broken);
        assert_eq!(src, ProgramSource::Undecodable { format: ProgramFormat::TrueType });
        assert!(src.is_embedded());
        assert!(DefaultProgramLoader.load(&src).unwrap().is_none());
    }

    #[test]
    fn test_dangling_font_file_reference() {
        let mut descriptor = Dict::new();
        descriptor.insert(
            "FontFile3".to_string(),
            Object::Reference(crate::object::ObjectRef::new(42, 0)),
        );
        let src = ProgramSource::from_descriptor(
            &descriptor,
            "Test",
            &PdfDocument::new(),
            &FontOptions::default(),
        );
        assert_eq!(src, ProgramSource::Undecodable { format: ProgramFormat::Cff });
    }

    #[test]
    fn test_default_loader_without_decoders() {
        let loader = DefaultProgramLoader;
        let type1 = ProgramSource::Embedded {
            format: ProgramFormat::Type1,
            data: Bytes::from_static(b"%!PS-AdobeFont-1.0"),
        };
        assert!(loader.load(&type1).unwrap().is_none());
        assert!(loader.load(&ProgramSource::Named("Arial".to_string())).unwrap().is_none());
    }

    #[test]
    fn test_default_loader_rejects_garbage_cff() {
        let cff = ProgramSource::Embedded {
            format: ProgramFormat::Cff,
            data: Bytes::from_static(b"\x01\x00\x04\x02"),
        };
        assert!(DefaultProgramLoader.load(&cff).unwrap().is_none());
    }

    #[test]
    fn test_default_loader_rejects_garbage_truetype() {
        let garbage = ProgramSource::Embedded {
            format: ProgramFormat::TrueType,
            data: Bytes::from_static(b"not a font"),
        };
        assert!(DefaultProgramLoader.load(&garbage).unwrap().is_none());
    }
}
