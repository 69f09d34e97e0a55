//! Installed fonts for CIDFonts referenced by name.
//!
//! A non-embedded CIDFontType2 names its program through `/BaseFont`
//! (e.g. `MS-Mincho` or `ABCDEF+Arial,Bold`). [`SystemFontLoader`] looks the
//! family up with `fontdb` and serves it as an [`SfntProgram`].

use crate::error::Result;
use crate::fonts::program::{
    DefaultProgramLoader, FontProgram, FontProgramLoader, ProgramFormat, ProgramSource,
};
use crate::fonts::truetype_program::SfntProgram;
use bytes::Bytes;
use fontdb::{Database, Family, Query, Style, Weight};

/// Program loader that falls back to installed fonts.
pub struct SystemFontLoader {
    db: Database,
}

impl std::fmt::Debug for SystemFontLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemFontLoader")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl SystemFontLoader {
    /// Loader over the fonts installed on this system.
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Loader over a caller-prepared database.
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    fn find(&self, base_font: &str) -> Option<SfntProgram> {
        let (family, weight, style) = parse_base_font(base_font);
        let families = [Family::Name(family)];
        let query = Query {
            families: &families,
            weight,
            style,
            ..Query::default()
        };

        let id = self.db.query(&query)?;
        let loaded = self.db.with_face_data(id, |data, face_index| {
            SfntProgram::parse_face(Bytes::copy_from_slice(data), face_index, ProgramFormat::TrueType)
        })?;
        match loaded {
            Ok(program) => Some(program),
            Err(e) => {
                log::warn!("System font for '{}' unusable: {}", base_font, e);
                None
            },
        }
    }
}

impl Default for SystemFontLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProgramLoader for SystemFontLoader {
    fn load(&self, source: &ProgramSource) -> Result<Option<Box<dyn FontProgram>>> {
        match source {
            ProgramSource::Embedded { .. } | ProgramSource::Undecodable { .. } => {
                DefaultProgramLoader.load(source)
            },
            ProgramSource::Named(name) => match self.find(name) {
                Some(program) => {
                    log::info!("Font '{}' resolved to an installed font", name);
                    Ok(Some(Box::new(program)))
                },
                None => {
                    log::warn!("No installed font matches '{}'", name);
                    Ok(None)
                },
            },
        }
    }
}

/// Split a `/BaseFont` name into family, weight and style.
///
/// Drops a subset tag (`ABCDEF+`) and reads a `,Bold`, `,Italic` or
/// `,BoldItalic` suffix.
fn parse_base_font(base_font: &str) -> (&str, Weight, Style) {
    let name = match base_font.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.bytes().all(|b| b.is_ascii_uppercase()) => rest,
        _ => base_font,
    };

    let (family, suffix) = name.split_once(',').unwrap_or((name, ""));
    let weight = if suffix.contains("Bold") {
        Weight::BOLD
    } else {
        Weight::NORMAL
    };
    let style = if suffix.contains("Italic") {
        Style::Italic
    } else {
        Style::Normal
    };
    (family, weight, style)
}
