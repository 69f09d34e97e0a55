// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::len_without_is_empty)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # pdf_cidfont
//!
//! Composite (Type 0) font resolution for PDF renderers.
//!
//! ## Features
//!
//! - **Widths**: `/W` and `/DW` decoding (ISO 32000-1:2008 §9.7.4.3)
//! - **Character collections**: `/CIDSystemInfo` (§9.7.3)
//! - **Glyph selection**: CIDFontType0 and CIDFontType2 strategies with
//!   `/CIDToGIDMap` support (§9.7.4.2)
//! - **Font programs**: embedded TrueType/OpenType outlines via `ttf-parser`
//! - **Rendering** (feature `rendering`): `tiny-skia` painter and installed
//!   font lookup through `fontdb`
//!
//! ## Quick Start
//!
//! ```
//! use pdf_cidfont::{CompositeFont, Dict, Object, PdfDocument};
//!
//! # fn main() -> pdf_cidfont::Result<()> {
//! let mut doc = PdfDocument::new();
//!
//! let mut info = Dict::new();
//! info.insert("Registry".into(), Object::String(b"Adobe".to_vec()));
//! info.insert("Ordering".into(), Object::String(b"Identity".to_vec()));
//! info.insert("Supplement".into(), Object::Integer(0));
//!
//! let mut cid_font = Dict::new();
//! cid_font.insert("Subtype".into(), Object::Name("CIDFontType2".into()));
//! cid_font.insert("CIDSystemInfo".into(), Object::Dictionary(info));
//! cid_font.insert("FontDescriptor".into(), Object::Dictionary(Dict::new()));
//! cid_font.insert(
//!     "W".into(),
//!     Object::Array(vec![Object::Integer(1), Object::Integer(3), Object::Integer(500)]),
//! );
//! let cid_font = doc.add(Object::Dictionary(cid_font));
//!
//! let mut type0 = Dict::new();
//! type0.insert("Subtype".into(), Object::Name("Type0".into()));
//! type0.insert("Encoding".into(), Object::Name("Identity-H".into()));
//! type0.insert("DescendantFonts".into(), Object::Array(vec![Object::Reference(cid_font)]));
//!
//! let font = CompositeFont::initialize(&doc, &Object::Dictionary(type0), 12.0)?;
//! assert_eq!(font.width_of(2), 0.5);
//! assert_eq!(font.width_of(99), 1.0);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decoders;
pub mod document;
pub mod error;
pub mod fonts;
pub mod object;
pub mod rendering;

pub use config::FontOptions;
pub use document::PdfDocument;
pub use error::{Error, ErrorKind, Result};
pub use fonts::{
    CidFontKind, CidFontType, CidSystemInfo, CidToGidMap, CompositeFont, DefaultProgramLoader,
    FontProgram, FontProgramLoader, ProgramFormat, ProgramSource, WidthTable,
};
pub use object::{ArrayExt, Dict, DictExt, Object, ObjectRef};
pub use rendering::{Color, GlyphPainter, GlyphPath, GlyphTransform, PathSegment, Point, TextState};
