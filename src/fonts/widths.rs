//! CIDFont glyph widths (`/W` and `/DW`).
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.7.4.3 - Glyph Metrics in CIDFonts
//!
//! The `/W` array mixes two forms:
//!
//! ```text
//! c [w1 w2 ... wn]      widths for codes c, c+1, ..., c+n-1
//! c_first c_last w      width w for every code in c_first..=c_last
//! ```
//!
//! Widths are in glyph space (1000 units = 1 em).

use crate::config::FontOptions;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::object::Object;
use std::collections::HashMap;

/// Width used when `/DW` is absent.
pub const DEFAULT_CID_WIDTH: u16 = 1000;

/// Per-code advance widths with a default fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthTable {
    entries: HashMap<u16, u16>,
    default_width: u16,
}

/// Scanner state while walking a `/W` array.
#[derive(Debug, Clone, Copy)]
enum ScanState {
    Idle,
    Pending(u16),
}

impl WidthTable {
    /// Table with no explicit entries.
    pub fn new(default_width: u16) -> Self {
        Self {
            entries: HashMap::new(),
            default_width,
        }
    }

    /// Decode a `/W` array.
    ///
    /// Entries may be indirect references; they are resolved through `doc`.
    /// A dangling code at the end of the array fails with
    /// [`Error::MalformedFont`] unless `options.strict` is off, in which
    /// case it is logged and ignored.
    pub fn from_w_array(
        w: &[Object],
        default_width: u16,
        doc: &PdfDocument,
        options: &FontOptions,
    ) -> Result<Self> {
        let mut table = Self::new(default_width);
        let mut state = ScanState::Idle;
        let mut iter = w.iter();

        while let Some(entry) = iter.next() {
            let entry = doc.resolve(entry)?;
            state = match state {
                ScanState::Idle => ScanState::Pending(code_value(&entry)?),
                ScanState::Pending(first) => {
                    match entry {
                        Object::Array(list) => table.insert_list(first, &list, doc)?,
                        last => {
                            let last = code_value(&last)?;
                            // Left Pending(first), reported after the loop
                            let Some(width) = iter.next() else {
                                break;
                            };
                            let width = width_value(&doc.resolve(width)?)?;
                            table.insert_range(first, last, width);
                        },
                    }
                    ScanState::Idle
                },
            };
        }

        if let ScanState::Pending(code) = state {
            table.truncated(code, options)?;
        }

        log::debug!(
            "/W decoded: {} explicit widths, default {}",
            table.entries.len(),
            table.default_width
        );
        Ok(table)
    }

    fn truncated(&self, code: u16, options: &FontOptions) -> Result<()> {
        if options.strict {
            return Err(Error::malformed(format!(
                "/W array ends with a dangling entry for code {}",
                code
            )));
        }
        log::warn!("/W array ends with a dangling entry for code {}, ignoring it", code);
        Ok(())
    }

    fn insert_list(&mut self, first: u16, list: &[Object], doc: &PdfDocument) -> Result<()> {
        for (offset, width) in list.iter().enumerate() {
            let code = u16::try_from(usize::from(first) + offset).map_err(|_| {
                Error::malformed(format!("/W list starting at {} runs past code 65535", first))
            })?;
            let width = width_value(&doc.resolve(width)?)?;
            self.entries.insert(code, width);
        }
        Ok(())
    }

    fn insert_range(&mut self, first: u16, last: u16, width: u16) {
        if first > last {
            log::debug!("/W range {}..={} is empty", first, last);
            return;
        }
        for code in first..=last {
            self.entries.insert(code, width);
        }
    }

    /// Width of `code` in glyph space units.
    pub fn get(&self, code: u16) -> u16 {
        self.entries.get(&code).copied().unwrap_or(self.default_width)
    }

    /// Advance of `code` as a fraction of an em.
    pub fn width_of(&self, code: u16) -> f32 {
        f32::from(self.get(code)) / 1000.0
    }

    /// Explicit width for `code`, if `/W` lists one.
    pub fn explicit(&self, code: u16) -> Option<u16> {
        self.entries.get(&code).copied()
    }

    /// The `/DW` fallback.
    pub fn default_width(&self) -> u16 {
        self.default_width
    }

    /// Number of codes with an explicit width.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no code has an explicit width.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn code_value(obj: &Object) -> Result<u16> {
    let code = obj.as_integer().ok_or_else(|| {
        Error::malformed(format!("/W expected an integer code, found {}", obj.type_name()))
    })?;
    u16::try_from(code).map_err(|_| Error::malformed(format!("/W code {} out of range", code)))
}

/// Widths may be written as reals; they are rounded to whole glyph units.
pub(crate) fn width_value(obj: &Object) -> Result<u16> {
    let width = obj
        .as_number()
        .ok_or_else(|| Error::malformed(format!("expected a glyph width, found {}", obj.type_name())))?
        .round();
    if !(0.0..=f64::from(u16::MAX)).contains(&width) {
        return Err(Error::malformed(format!("glyph width {} out of range", width)));
    }
    Ok(width as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(i: i64) -> Object {
        Object::Integer(i)
    }

    fn arr(items: &[i64]) -> Object {
        Object::Array(items.iter().map(|&i| Object::Integer(i)).collect())
    }

    fn decode(w: &[Object]) -> Result<WidthTable> {
        WidthTable::from_w_array(w, DEFAULT_CID_WIDTH, &PdfDocument::new(), &FontOptions::strict())
    }

    #[test]
    fn test_range_form() {
        let table = decode(&[int(1), int(3), int(500)]).unwrap();
        assert_eq!(table.len(), 3);
        for code in 1..=3 {
            assert_eq!(table.width_of(code), 0.5);
        }
        assert_eq!(table.width_of(99), 1.0);
    }

    #[test]
    fn test_list_form() {
        let table = decode(&[int(5), arr(&[100, 200, 300])]).unwrap();
        assert_eq!(table.width_of(5), 0.1);
        assert_eq!(table.width_of(6), 0.2);
        assert_eq!(table.width_of(7), 0.3);
        assert_eq!(table.explicit(8), None);
    }

    #[test]
    fn test_mixed_forms() {
        let table = decode(&[
            int(120),
            arr(&[400, 325, 500]),
            int(7080),
            int(8032),
            int(1000),
        ])
        .unwrap();
        assert_eq!(table.get(121), 325);
        assert_eq!(table.get(7080), 1000);
        assert_eq!(table.get(8032), 1000);
        assert_eq!(table.len(), 3 + (8032 - 7080 + 1));
    }

    #[test]
    fn test_real_widths_are_rounded() {
        let w = vec![
            int(10),
            Object::Array(vec![Object::Real(556.15234), Object::Real(277.83203)]),
            int(20),
            int(22),
            Object::Real(500.51),
        ];
        let table = decode(&w).unwrap();
        assert_eq!(table.get(10), 556);
        assert_eq!(table.get(11), 278);
        assert_eq!(table.get(21), 501);
    }

    #[test]
    fn test_dangling_code_is_malformed() {
        let err = decode(&[int(1), int(3), int(500), int(9)]).unwrap_err();
        assert!(matches!(err, Error::MalformedFont(_)));
    }

    #[test]
    fn test_range_without_width_is_malformed() {
        let err = decode(&[int(1), int(3)]).unwrap_err();
        assert!(matches!(err, Error::MalformedFont(_)));

        // The range's first code is the one reported
        let err = decode(&[int(1), int(3), int(500), int(40), int(45)]).unwrap_err();
        assert!(err.to_string().contains("code 40"), "{}", err);
    }

    #[test]
    fn test_lenient_truncation_keeps_earlier_entries() {
        let table = WidthTable::from_w_array(
            &[int(1), arr(&[250]), int(4), int(6)],
            500,
            &PdfDocument::new(),
            &FontOptions::lenient(),
        )
        .unwrap();
        assert_eq!(table.get(1), 250);
        assert_eq!(table.get(5), 500);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lenient_range_without_width_after_range() {
        let table = WidthTable::from_w_array(
            &[int(1), int(3), int(600), int(40), int(45)],
            1000,
            &PdfDocument::new(),
            &FontOptions::lenient(),
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(2), 600);
        assert_eq!(table.explicit(40), None);
        assert_eq!(table.explicit(45), None);
    }

    #[test]
    fn test_empty_range() {
        let table = decode(&[int(9), int(3), int(700)]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_list_past_last_code() {
        let err = decode(&[int(65535), arr(&[1, 2])]).unwrap_err();
        assert!(matches!(err, Error::MalformedFont(_)));
    }

    #[test]
    fn test_negative_code_and_width() {
        assert!(matches!(decode(&[int(-1), arr(&[1])]), Err(Error::MalformedFont(_))));
        assert!(matches!(decode(&[int(1), int(2), int(-5)]), Err(Error::MalformedFont(_))));
    }

    #[test]
    fn test_non_integer_code() {
        let err = decode(&[Object::Name("Foo".to_string()), int(1)]).unwrap_err();
        assert!(matches!(err, Error::MalformedFont(_)));
    }

    #[test]
    fn test_referenced_width_list() {
        let mut doc = PdfDocument::new();
        let list = doc.add(arr(&[600, 700]));
        let table = WidthTable::from_w_array(
            &[int(3), Object::Reference(list)],
            DEFAULT_CID_WIDTH,
            &doc,
            &FontOptions::strict(),
        )
        .unwrap();
        assert_eq!(table.get(4), 700);
    }

    #[test]
    fn test_later_entries_override() {
        let table = decode(&[int(1), int(5), int(300), int(3), arr(&[900])]).unwrap();
        assert_eq!(table.get(3), 900);
        assert_eq!(table.get(4), 300);
    }
}
