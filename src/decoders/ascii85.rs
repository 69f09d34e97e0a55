//! ASCII85Decode implementation.
//!
//! Five characters in `!`..`u` carry four bytes, `z` stands for a group of
//! four zero bytes, and `~>` ends the data. A final partial group of `n`
//! characters yields `n - 1` bytes.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// ASCII85Decode filter implementation.
pub struct Ascii85Decoder;

impl StreamDecoder for Ascii85Decoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 5 * 4 + 4);
        let mut group = [0u8; 5];
        let mut len = 0usize;

        for &c in input {
            match c {
                b'~' => break,
                b'z' if len == 0 => output.extend_from_slice(&[0; 4]),
                b'z' => {
                    return Err(Error::Decode(
                        "ASCII85Decode: 'z' inside a group".to_string(),
                    ));
                },
                b'!'..=b'u' => {
                    group[len] = c - b'!';
                    len += 1;
                    if len == 5 {
                        output.extend_from_slice(&group_value(&group)?.to_be_bytes());
                        len = 0;
                    }
                },
                _ if c.is_ascii_whitespace() => {},
                _ => {
                    return Err(Error::Decode(format!(
                        "ASCII85Decode: invalid character 0x{:02X}",
                        c
                    )));
                },
            }
        }

        match len {
            0 => {},
            1 => {
                return Err(Error::Decode(
                    "ASCII85Decode: final group has a single character".to_string(),
                ));
            },
            _ => {
                // Pad with the highest digit ('u') and keep len - 1 bytes
                group[len..].fill(84);
                let bytes = group_value(&group)?.to_be_bytes();
                output.extend_from_slice(&bytes[..len - 1]);
            },
        }

        Ok(output)
    }

    fn name(&self) -> &str {
        "ASCII85Decode"
    }
}

fn group_value(group: &[u8; 5]) -> Result<u32> {
    group
        .iter()
        .try_fold(0u32, |acc, &digit| acc.checked_mul(85)?.checked_add(u32::from(digit)))
        .ok_or_else(|| Error::Decode("ASCII85Decode: group value exceeds 32 bits".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii85_full_group() {
        assert_eq!(Ascii85Decoder.decode(b"<+U,m").unwrap(), b"Test");
    }

    #[test]
    fn test_ascii85_zero_groups() {
        assert_eq!(Ascii85Decoder.decode(b"zz~>").unwrap(), vec![0u8; 8]);
    }

    #[test]
    fn test_ascii85_whitespace_and_eod() {
        assert_eq!(Ascii85Decoder.decode(b"<+U\n,m~>ignored").unwrap(), b"Test");
    }

    #[test]
    fn test_ascii85_partial_group() {
        // "Tes" is the first three bytes of the "Test" group
        assert_eq!(Ascii85Decoder.decode(b"<+U,").unwrap(), b"Tes");
    }

    #[test]
    fn test_ascii85_errors() {
        assert!(Ascii85Decoder.decode(b"!z").is_err());
        assert!(Ascii85Decoder.decode(b"!").is_err());
        assert!(Ascii85Decoder.decode(b"ab\x00").is_err());
        // s8W-! is u32::MAX, so s8W-" overflows
        assert!(Ascii85Decoder.decode(b"s8W-\"").is_err());
    }
}
