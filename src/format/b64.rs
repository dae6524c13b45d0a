//! Base64 as it appears in PHC hash strings: standard alphabet, padding stripped.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use zeroize::Zeroizing;

use crate::error::VerifyError;

/// Number of `=` characters needed to complete an unpadded segment.
pub fn padding_needed(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Decodes an unpadded standard-alphabet segment.
///
/// The exact padding is restored before decoding. URL-safe characters are rejected.
pub fn decode_unpadded(segment: &str) -> Result<Zeroizing<Vec<u8>>, VerifyError> {
    let mut padded = Zeroizing::new(String::with_capacity(segment.len() + 3));
    padded.push_str(segment);
    padded.extend(std::iter::repeat_n('=', padding_needed(segment.len())));

    STANDARD
        .decode(padded.as_bytes())
        .map(Zeroizing::new)
        .map_err(|e| VerifyError::MalformedEncoding(format!("invalid base64: {e}")))
}

/// Encodes bytes the way PHC strings carry them.
pub fn encode_unpadded(bytes: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_follows_length() {
        assert_eq!(padding_needed(0), 0);
        assert_eq!(padding_needed(22), 2);
        assert_eq!(padding_needed(23), 1);
        assert_eq!(padding_needed(24), 0);
        assert_eq!(padding_needed(43), 1);
    }

    #[test]
    fn decodes_every_padding_length() {
        assert_eq!(*decode_unpadded("YQ").unwrap(), b"a");
        assert_eq!(*decode_unpadded("YWI").unwrap(), b"ab");
        assert_eq!(*decode_unpadded("YWJj").unwrap(), b"abc");
    }

    #[test]
    fn reencoding_reproduces_segment() {
        for segment in ["c29tZXNhbHQ", "c29tZXNhbHRz", "c29tZXNhbHRzYQ", "+/+/", "ab+/Zw"] {
            let bytes = decode_unpadded(segment).unwrap();
            assert_eq!(encode_unpadded(&bytes), segment);
        }
    }

    #[test]
    fn url_safe_alphabet_rejected() {
        assert!(decode_unpadded("ab-_").is_err());
    }

    #[test]
    fn impossible_length_rejected() {
        assert!(decode_unpadded("abcde").is_err());
    }
}
