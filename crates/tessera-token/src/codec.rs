//! Segment codec: standard, padded base64.

use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError, Engine};

/// Encode bytes as a token segment.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Decode a token segment back to bytes.
pub fn decode(segment: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_value() {
        assert_eq!(
            encode(br#"{"typ":"jwt-like","alg":"HS256"}"#),
            "eyJ0eXAiOiJqd3QtbGlrZSIsImFsZyI6IkhTMjU2In0="
        );
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        assert!(decode("!!!invalid!!!").is_err());
        // URL-safe alphabet is not accepted
        assert!(decode("-_-_").is_err());
    }

    #[test]
    fn test_empty_segment() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }
}
