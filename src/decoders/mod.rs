//! Stream decoders for the filters found on font-related streams.
//!
//! CIDToGIDMap streams and embedded font programs are usually
//! FlateDecode-compressed. Older producers also write ASCII85Decode,
//! LZWDecode and RunLengthDecode streams, and ASCIIHexDecode shows up in
//! hand-written files. Image filters are reported as unsupported.

use crate::config::FontOptions;
use crate::error::{Error, Result};

mod ascii85;
mod ascii_hex;
mod flate;
mod lzw;
mod runlength;

pub use ascii85::Ascii85Decoder;
pub use ascii_hex::AsciiHexDecoder;
pub use flate::FlateDecoder;
pub use lzw::LzwDecoder;
pub use runlength::RunLengthDecoder;

/// Decoded size below which the decompression ratio is not checked.
///
/// Outputs this small (every CIDToGIDMap, at most 131072 bytes) are bounded
/// by `max_decompressed_size` alone.
pub const RATIO_CHECK_MIN_SIZE: usize = 1024 * 1024;

/// Trait for PDF stream decoders.
pub trait StreamDecoder {
    /// Decode the input data.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Get the name of this decoder (e.g., "FlateDecode").
    fn name(&self) -> &str;
}

/// Look up the decoder for a filter name (full or abbreviated form).
fn decoder_for(filter_name: &str) -> Result<Box<dyn StreamDecoder>> {
    match filter_name {
        "FlateDecode" | "Fl" => Ok(Box::new(FlateDecoder)),
        "ASCIIHexDecode" | "AHx" => Ok(Box::new(AsciiHexDecoder)),
        "ASCII85Decode" | "A85" => Ok(Box::new(Ascii85Decoder)),
        "LZWDecode" | "LZW" => Ok(Box::new(LzwDecoder)),
        "RunLengthDecode" | "RL" => Ok(Box::new(RunLengthDecoder)),
        other => Err(Error::UnsupportedFilter(other.to_string())),
    }
}

/// Decode stream data through a filter pipeline with default limits.
///
/// # Examples
///
/// ```
/// use pdf_cidfont::decoders::decode_stream;
///
/// let decoded = decode_stream(b"000A0014>", &["ASCIIHexDecode".to_string()]).unwrap();
/// assert_eq!(decoded, vec![0x00, 0x0A, 0x00, 0x14]);
/// ```
pub fn decode_stream(data: &[u8], filters: &[String]) -> Result<Vec<u8>> {
    decode_stream_with_options(data, filters, &FontOptions::default())
}

/// Decode stream data, enforcing the decompression-bomb limits in `options`.
pub fn decode_stream_with_options(
    data: &[u8],
    filters: &[String],
    options: &FontOptions,
) -> Result<Vec<u8>> {
    let encoded_size = data.len();
    let mut current = data.to_vec();

    for filter_name in filters {
        let decoder = decoder_for(filter_name)?;
        current = decoder.decode(&current)?;
        log::trace!("{}: {} -> {} bytes", decoder.name(), encoded_size, current.len());

        let max_ratio = options.max_decompression_ratio as u64;
        if max_ratio > 0 && encoded_size > 0 && current.len() >= RATIO_CHECK_MIN_SIZE {
            let ratio = current.len() as u64 / encoded_size as u64;
            if ratio > max_ratio {
                return Err(Error::Decode(format!(
                    "decompression ratio {}:1 exceeds limit {}:1 ({} -> {} bytes)",
                    ratio,
                    max_ratio,
                    encoded_size,
                    current.len()
                )));
            }
        }

        if options.max_decompressed_size > 0 && current.len() > options.max_decompressed_size {
            return Err(Error::Decode(format!(
                "decompressed size {} bytes exceeds limit {} bytes",
                current.len(),
                options.max_decompressed_size
            )));
        }
    }

    Ok(current)
}
