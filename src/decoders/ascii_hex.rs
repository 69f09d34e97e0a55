//! ASCIIHexDecode implementation.
//!
//! Whitespace is skipped, `>` ends the data, and a final odd digit is
//! completed with an implicit `0`.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// ASCIIHexDecode filter implementation.
pub struct AsciiHexDecoder;

impl StreamDecoder for AsciiHexDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 2);
        let mut high: Option<u8> = None;

        for &c in input {
            if c == b'>' {
                break;
            }
            if c.is_ascii_whitespace() {
                continue;
            }
            let nibble = hex_value(c).ok_or_else(|| {
                Error::Decode(format!("ASCIIHexDecode: invalid hex digit '{}'", c as char))
            })?;
            match high.take() {
                Some(h) => output.push((h << 4) | nibble),
                None => high = Some(nibble),
            }
        }

        if let Some(h) = high {
            output.push(h << 4);
        }
        Ok(output)
    }

    fn name(&self) -> &str {
        "ASCIIHexDecode"
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|v| v as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_hex_with_whitespace() {
        let output = AsciiHexDecoder.decode(b"00 0A\n00 14").unwrap();
        assert_eq!(output, vec![0x00, 0x0A, 0x00, 0x14]);
    }

    #[test]
    fn test_ascii_hex_odd_length() {
        assert_eq!(AsciiHexDecoder.decode(b"486>").unwrap(), vec![0x48, 0x60]);
    }

    #[test]
    fn test_ascii_hex_stops_at_eod() {
        assert_eq!(AsciiHexDecoder.decode(b"41>zz").unwrap(), b"A");
    }

    #[test]
    fn test_ascii_hex_invalid_digit() {
        assert!(AsciiHexDecoder.decode(b"4G").is_err());
    }
}
