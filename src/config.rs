//! Options controlling how strictly font dictionaries are interpreted.

/// Font resolution options.
///
/// # Example
///
/// ```
/// use pdf_cidfont::config::FontOptions;
///
/// // Strict mode - truncated /W arrays fail (default)
/// let strict = FontOptions::strict();
///
/// // Lenient mode - truncated /W arrays are logged and the scan stops
/// let lenient = FontOptions::lenient();
///
/// let custom = FontOptions {
///     strict: false,
///     max_decompressed_size: 16 * 1024 * 1024,
///     max_decompression_ratio: 0,
/// };
/// # let _ = (strict, lenient, custom);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontOptions {
    /// Reject malformed width arrays (true) or recover from them (false).
    ///
    /// Only a dangling code at the end of /W is recoverable; every other
    /// malformed entry fails in both modes.
    pub strict: bool,

    /// Maximum decoded size of a CIDToGIDMap or font file stream in bytes.
    ///
    /// Default: 64 MB. Set to 0 to disable the check.
    pub max_decompressed_size: usize,

    /// Maximum decompression ratio (decoded:encoded).
    ///
    /// Default: 100. Set to 0 to disable the check.
    pub max_decompression_ratio: u32,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self::strict()
    }
}

impl FontOptions {
    /// Strict mode: any malformed width entry fails font construction.
    pub fn strict() -> Self {
        Self {
            strict: true,
            max_decompressed_size: 64 * 1024 * 1024, // 64 MB
            max_decompression_ratio: 100,
        }
    }

    /// Lenient mode: recover from truncated width arrays.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::strict()
        }
    }
}
