//! Lowercase hex codec for ids, keys and signatures.

use crate::error::DecodeError;

/// Encode bytes as lowercase hex.
pub fn bytes_to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Decode hex text into bytes.
///
/// Accepts either case. Fails on odd length or non-hex characters.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(hex::decode(s)?)
}

/// Decode hex text into a fixed-size array.
///
/// `field` names the value in the error when the decoded length is wrong.
pub fn hex_to_array<const N: usize>(
    field: &'static str,
    s: &str,
) -> Result<[u8; N], DecodeError> {
    if s.len() != N * 2 {
        // Check the characters first so "zz" reports bad hex, not bad length.
        hex_to_bytes(s)?;
        return Err(DecodeError::InvalidLength {
            field,
            expected: N,
            got: s.len() / 2,
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_lowercase() {
        assert_eq!(bytes_to_hex([0xab, 0xCD, 0x01]), "abcd01");
    }

    #[test]
    fn test_decode_accepts_uppercase() {
        assert_eq!(hex_to_bytes("ABcd").unwrap(), vec![0xab, 0xcd]);
    }

    #[test]
    fn test_decode_odd_length() {
        assert!(matches!(hex_to_bytes("abc"), Err(DecodeError::InvalidHex(_))));
    }

    #[test]
    fn test_decode_non_hex() {
        assert!(matches!(hex_to_bytes("zz"), Err(DecodeError::InvalidHex(_))));
    }

    #[test]
    fn test_array_wrong_length() {
        let result = hex_to_array::<4>("id", "abcd");
        assert_eq!(
            result,
            Err(DecodeError::InvalidLength {
                field: "id",
                expected: 4,
                got: 2
            })
        );
    }

    #[test]
    fn test_array_bad_chars_reported_as_hex() {
        assert!(matches!(
            hex_to_array::<2>("id", "zz"),
            Err(DecodeError::InvalidHex(_))
        ));
        assert!(matches!(
            hex_to_array::<2>("id", "zzzz"),
            Err(DecodeError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_array_roundtrip() {
        let arr: [u8; 3] = hex_to_array("x", "00ff10").unwrap();
        assert_eq!(arr, [0x00, 0xff, 0x10]);
        assert_eq!(bytes_to_hex(arr), "00ff10");
    }
}
