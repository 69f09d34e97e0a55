//! LZWDecode implementation.
//!
//! PDF LZW uses MSB-first codes starting at 9 bits, clear code 256 and EOD
//! 257. With the default `/EarlyChange 1` the code width grows one code
//! early, which is the TIFF variant of the algorithm.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};
use weezl::{decode::Decoder as WeezlDecoder, BitOrder};

/// LZWDecode filter implementation.
pub struct LzwDecoder;

impl StreamDecoder for LzwDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut early = WeezlDecoder::with_tiff_size_switch(BitOrder::Msb, 8);
        match early.decode(input) {
            Ok(output) => Ok(output),
            Err(early_err) => {
                // Some producers write /EarlyChange 0 streams
                log::debug!(
                    "LZWDecode with early change failed ({:?}), retrying without",
                    early_err
                );
                let mut late = WeezlDecoder::new(BitOrder::Msb, 8);
                late.decode(input)
                    .map_err(|e| Error::Decode(format!("LZWDecode error: {:?}", e)))
            },
        }
    }

    fn name(&self) -> &str {
        "LZWDecode"
    }
}
