//! Key codec for record ids
//!
//! Ids are unsigned 32-bit integers stored as 4 bytes, most-significant byte
//! first. Big-endian is load-bearing: byte-lexicographic order of encoded
//! keys must equal numeric order of ids, so ordered engines return range
//! scans in ascending id order without any engine-side comparator.
//!
//! ## Contract
//!
//! - `decode_id(encode_id(id)) == id` for every id
//! - `encode_id(a) < encode_id(b)` (bytewise) iff `a < b`

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder};

/// Encoded key width in bytes
pub const KEY_LEN: usize = 4;

/// Encode an id as 4 big-endian bytes
pub fn encode_id(id: u32) -> [u8; KEY_LEN] {
    let mut buf = [0u8; KEY_LEN];
    BigEndian::write_u32(&mut buf, id);
    buf
}

/// Decode an id from its 4-byte big-endian form
///
/// # Errors
///
/// Returns [`Error::Decode`] if `bytes` is not exactly 4 bytes long.
pub fn decode_id(bytes: &[u8]) -> Result<u32> {
    if bytes.len() != KEY_LEN {
        return Err(Error::Decode {
            expected: KEY_LEN,
            actual: bytes.len(),
        });
    }
    Ok(BigEndian::read_u32(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode_id(0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_max() {
        assert_eq!(encode_id(u32::MAX), [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_encode_is_big_endian() {
        assert_eq!(encode_id(0x0102_0304), [1, 2, 3, 4]);
    }

    #[test]
    fn test_roundtrip_boundaries() {
        for id in [0, 1, 255, 256, 65_535, 65_536, u32::MAX - 1, u32::MAX] {
            assert_eq!(decode_id(&encode_id(id)).unwrap(), id);
        }
    }

    #[test]
    fn test_decode_rejects_short_input() {
        let result = decode_id(&[1, 2, 3]);
        assert!(matches!(
            result,
            Err(Error::Decode {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_decode_rejects_long_input() {
        let result = decode_id(&[1, 2, 3, 4, 5]);
        assert!(matches!(
            result,
            Err(Error::Decode {
                expected: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(decode_id(&[]).is_err());
    }

    proptest! {
        #[test]
        fn prop_roundtrip(id: u32) {
            prop_assert_eq!(decode_id(&encode_id(id)).unwrap(), id);
        }

        #[test]
        fn prop_order_preserving(a: u32, b: u32) {
            prop_assert_eq!(a.cmp(&b), encode_id(a).cmp(&encode_id(b)));
        }
    }
}
