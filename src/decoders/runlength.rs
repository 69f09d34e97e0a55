//! RunLengthDecode implementation.
//!
//! A length byte `n` in `0..=127` copies the next `n + 1` bytes, `129..=255`
//! repeats the next byte `257 - n` times, and `128` ends the data.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// RunLengthDecode filter implementation.
pub struct RunLengthDecoder;

impl StreamDecoder for RunLengthDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len());
        let mut rest = input;

        while let Some((&length, tail)) = rest.split_first() {
            match length {
                128 => break,
                0..=127 => {
                    let count = usize::from(length) + 1;
                    if tail.len() < count {
                        return Err(Error::Decode(format!(
                            "RunLengthDecode: literal run of {} bytes, {} left",
                            count,
                            tail.len()
                        )));
                    }
                    output.extend_from_slice(&tail[..count]);
                    rest = &tail[count..];
                },
                129..=255 => {
                    let (&byte, tail) = tail.split_first().ok_or_else(|| {
                        Error::Decode("RunLengthDecode: repeat run without a byte".to_string())
                    })?;
                    let count = 257 - usize::from(length);
                    output.resize(output.len() + count, byte);
                    rest = tail;
                },
            }
        }

        Ok(output)
    }

    fn name(&self) -> &str {
        "RunLengthDecode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runlength_literal_and_repeat() {
        // 3 literal bytes, then 0x00 repeated 4 times (257 - 253)
        let input = [2, 0x00, 0x01, 0x00, 253, 0x00, 128, 0xFF];
        assert_eq!(
            RunLengthDecoder.decode(&input).unwrap(),
            vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_runlength_without_eod() {
        assert_eq!(RunLengthDecoder.decode(&[255, b'x']).unwrap(), b"xx");
    }

    #[test]
    fn test_runlength_truncated() {
        assert!(RunLengthDecoder.decode(&[4, b'a', b'b']).is_err());
        assert!(RunLengthDecoder.decode(&[200]).is_err());
    }
}
