use crate::{Error, Result};

/// Width of the packed identifier in bytes.
pub const ID_LEN: usize = 20;

/// Width of the packed identifier in bits.
pub const TOTAL_BITS: usize = ID_LEN * 8;

/// Fixed length of the encoded form: `ceil(160 / log2(62))`.
pub const ENCODED_LEN: usize = 27;

/// Digits first, then uppercase, then lowercase: ASCII order, so the
/// encoded strings sort the same way the underlying integers do.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE: u32 = 62;
const NO_VALUE: u8 = 255;

/// Lookup table for base62 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 62 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Encodes a big-endian byte string into a fixed-length base62 string.
///
/// The value is repeatedly divided by 62, collecting remainders from least-
/// to most-significant; the output is always exactly [`ENCODED_LEN`]
/// characters, left-padded with `'0'`. The all-zero input therefore encodes
/// to a full string of `'0'`s, never an empty string.
pub fn encode_base62(input: &[u8; ID_LEN]) -> String {
    let mut scratch = *input;
    let mut out = [ALPHABET[0]; ENCODED_LEN];

    // Long division of the 160-bit value by 62, one output digit per pass,
    // filling from the least significant end.
    for slot in out.iter_mut().rev() {
        let mut rem = 0_u32;
        for b in scratch.iter_mut() {
            let acc = (rem << 8) | u32::from(*b);
            *b = (acc / BASE) as u8;
            rem = acc % BASE;
        }
        *slot = ALPHABET[rem as usize];
    }

    // SAFETY: base62 output is always valid ASCII
    unsafe { String::from_utf8_unchecked(out.to_vec()) }
}

/// Decodes a base62 string into a big-endian 160-bit byte string.
///
/// Each character's alphabet index is folded into the accumulator via
/// `acc = acc * 62 + index`. Inputs shorter than [`ENCODED_LEN`] decode as
/// smaller (left-zero-padded) values.
///
/// # Errors
///
/// - [`Error::InvalidCharacter`] if a byte falls outside the alphabet.
/// - [`Error::DecodeOverflow`] if the accumulated value exceeds
///   [`TOTAL_BITS`] bits.
pub fn decode_base62(encoded: &str) -> Result<[u8; ID_LEN]> {
    let mut acc = [0_u8; ID_LEN];
    for (i, b) in encoded.bytes().enumerate() {
        let val = LOOKUP[b as usize];
        if val == NO_VALUE {
            return Err(Error::InvalidCharacter { byte: b, index: i });
        }
        // Multiply the accumulator by 62 and add the digit, carrying from
        // the least significant byte upward.
        let mut carry = u32::from(val);
        for slot in acc.iter_mut().rev() {
            let v = u32::from(*slot) * BASE + carry;
            *slot = v as u8;
            carry = v >> 8;
        }
        if carry != 0 {
            return Err(Error::DecodeOverflow);
        }
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(bytes: [u8; ID_LEN]) {
        let s = encode_base62(&bytes);
        assert_eq!(s.len(), ENCODED_LEN);
        let decoded = decode_base62(&s).unwrap();
        assert_eq!(bytes, decoded, "roundtrip failed for b62={s}");
    }

    #[test]
    fn encode_decode_preserves_values() {
        roundtrip([0u8; ID_LEN]);
        roundtrip([0xFF; ID_LEN]);
        let mut one = [0u8; ID_LEN];
        one[ID_LEN - 1] = 1;
        roundtrip(one);
        let mut top = [0u8; ID_LEN];
        top[0] = 0x80;
        roundtrip(top);
        let mut mixed = [0u8; ID_LEN];
        for (i, b) in mixed.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        roundtrip(mixed);
    }

    #[test]
    fn zero_encodes_to_full_width_zero_symbols() {
        let s = encode_base62(&[0u8; ID_LEN]);
        assert_eq!(s, "0".repeat(ENCODED_LEN));
    }

    #[test]
    fn known_small_values() {
        let mut bytes = [0u8; ID_LEN];
        bytes[ID_LEN - 1] = 61;
        assert_eq!(encode_base62(&bytes), format!("{}z", "0".repeat(26)));
        bytes[ID_LEN - 1] = 62;
        assert_eq!(encode_base62(&bytes), format!("{}10", "0".repeat(25)));
    }

    #[test]
    fn string_order_matches_numeric_order() {
        let mut values = Vec::new();
        for hi in [0u8, 1, 7, 0x42, 0xFF] {
            for lo in [0u8, 3, 0x99, 0xFF] {
                let mut bytes = [0u8; ID_LEN];
                bytes[0] = hi;
                bytes[ID_LEN - 1] = lo;
                values.push(bytes);
            }
        }
        values.sort();
        let encoded: Vec<String> = values.iter().map(encode_base62).collect();
        let mut sorted = encoded.clone();
        sorted.sort();
        assert_eq!(encoded, sorted);
    }

    #[test]
    fn short_input_decodes_left_padded() {
        let full = decode_base62(&format!("{}z", "0".repeat(26))).unwrap();
        let short = decode_base62("z").unwrap();
        assert_eq!(full, short);
    }

    #[test]
    fn rejects_invalid_characters() {
        match decode_base62("!!!") {
            Err(Error::InvalidCharacter { byte, index }) => {
                assert_eq!(byte, b'!');
                assert_eq!(index, 0);
            }
            other => panic!("expected InvalidCharacter, got {other:?}"),
        }
        assert!(matches!(
            decode_base62("00000000000000000000000000-"),
            Err(Error::InvalidCharacter { byte: b'-', index: 26 })
        ));
    }

    #[test]
    fn rejects_values_beyond_160_bits() {
        // 62^27 - 1 exceeds 2^160.
        assert_eq!(
            decode_base62(&"z".repeat(ENCODED_LEN)),
            Err(Error::DecodeOverflow)
        );
        assert_eq!(
            decode_base62(&"1".repeat(ENCODED_LEN + 1)),
            Err(Error::DecodeOverflow)
        );
        // A leading zero keeps a 28-character string in range.
        let padded = format!("0{}", "1".repeat(26));
        assert!(decode_base62(&padded).is_ok());
    }
}
