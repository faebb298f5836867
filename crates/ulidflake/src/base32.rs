use crate::{Error, Result};
use core::fmt;

/// Fixed length of an encoded identifier.
///
/// 13 base32 digits carry 65 bits, one more than the backing `u64`, so the
/// leading digit only ever uses its low four bits ('0'..='F' structurally,
/// '0'..='7' for canonical identifiers whose sign bit is clear).
pub const ENCODED_LEN: usize = 13;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: u32 = 5;

/// Lookup table for base32 decoding.
///
/// Unlike Crockford decoding, there are no aliases: the lookalike letters
/// `I`, `L`, `O`, `U` are invalid, and so is lowercase input. Callers that
/// want case-insensitive parsing uppercase before decoding.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Encodes `value` into 13 base32 digits, most significant digit first.
///
/// Digit `i` (counting from the right) is `(value >> (5 * i)) & 0x1F`, so
/// any digit position beyond the 64 bits of `value` is simply `'0'`. Never
/// fails for any `u64`.
pub fn encode_base32(value: u64, buf: &mut [u8; ENCODED_LEN]) {
    for (i, slot) in buf.iter_mut().enumerate() {
        let shift = BITS_PER_CHAR * (ENCODED_LEN - 1 - i) as u32;
        *slot = ALPHABET[((value >> shift) & 0x1F) as usize];
    }
}

/// Decodes a base32 string into a `u64`, accumulating
/// `value * 32 + symbol_index` left to right.
///
/// Length is not enforced here; for a 13-digit input, the excess high bits
/// of the leading digit fall out of the `u64` accumulator. Returns an error
/// carrying the offending byte and its index for any character outside the
/// alphabet.
pub fn decode_base32(text: &str) -> Result<u64> {
    let mut acc = 0_u64;
    for (index, byte) in text.bytes().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(Error::InvalidAscii { byte, index });
        }
        acc = (acc << BITS_PER_CHAR) | u64::from(val);
    }
    Ok(acc)
}

/// A stack-allocated view of an encoded identifier.
///
/// Holds the 13 encoded bytes inline and exposes them as `&str` without
/// heap allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Base32Text {
    buf: [u8; ENCODED_LEN],
}

impl Base32Text {
    pub(crate) fn new(value: u64) -> Self {
        let mut buf = [0_u8; ENCODED_LEN];
        encode_base32(value, &mut buf);
        Self { buf }
    }

    /// Returns a `&str` view of the encoded digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `self.buf` holds only bytes drawn from `ALPHABET`, which
        // are all ASCII.
        unsafe { core::str::from_utf8_unchecked(&self.buf) }
    }

    /// Consumes the view and returns the raw digit bytes.
    #[must_use]
    pub const fn into_inner(self) -> [u8; ENCODED_LEN] {
        self.buf
    }
}

impl fmt::Display for Base32Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Base32Text {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Base32Text {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Base32Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(val: u64) {
        let mut buf = [0_u8; ENCODED_LEN];
        encode_base32(val, &mut buf);
        let s = core::str::from_utf8(&buf).unwrap();
        let decoded = decode_base32(s).unwrap();
        assert_eq!(val, decoded, "roundtrip for u64: input={val}, b32={s}");
    }

    #[test]
    fn encode_decode_preserves_values() {
        for &v in &[
            0,
            1,
            31,
            32,
            42,
            u64::MAX,
            (1 << 63) - 1,
            0xFF00_FF00_FF00_FF00,
            0x1234_5678_90AB_CDEF,
        ] {
            roundtrip(v);
        }
    }

    #[test]
    fn known_vectors() {
        let mut buf = [0_u8; ENCODED_LEN];

        encode_base32(0, &mut buf);
        assert_eq!(core::str::from_utf8(&buf).unwrap(), "0000000000000");

        encode_base32(1, &mut buf);
        assert_eq!(core::str::from_utf8(&buf).unwrap(), "0000000000001");

        encode_base32(32, &mut buf);
        assert_eq!(core::str::from_utf8(&buf).unwrap(), "0000000000010");

        // i64::MAX: the largest value with the sign bit clear
        encode_base32((1 << 63) - 1, &mut buf);
        assert_eq!(core::str::from_utf8(&buf).unwrap(), "7ZZZZZZZZZZZZ");

        encode_base32(u64::MAX, &mut buf);
        assert_eq!(core::str::from_utf8(&buf).unwrap(), "FZZZZZZZZZZZZ");
    }

    #[test]
    fn string_order_matches_numeric_order() {
        let values = [0_u64, 1, 31, 32, 1024, 1 << 20, 1 << 43, (1 << 63) - 1];
        for &a in &values {
            for &b in &values {
                let ea = Base32Text::new(a);
                let eb = Base32Text::new(b);
                assert_eq!(
                    a.cmp(&b),
                    ea.as_str().cmp(eb.as_str()),
                    "sort mismatch for {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn decode_rejects_lookalike_letters() {
        for c in [b'I', b'L', b'O', b'U'] {
            let mut raw = *b"0000000000000";
            raw[7] = c;
            let s = core::str::from_utf8(&raw).unwrap();
            assert_eq!(
                decode_base32(s).unwrap_err(),
                Error::InvalidAscii { byte: c, index: 7 },
                "expected {} to be rejected",
                c as char
            );
        }
    }

    #[test]
    fn decode_rejects_lowercase() {
        // Case normalization is the caller's responsibility.
        assert_eq!(
            decode_base32("abc").unwrap_err(),
            Error::InvalidAscii { byte: b'a', index: 0 }
        );
    }

    #[test]
    fn decode_rejects_invalid_character() {
        assert_eq!(
            decode_base32("ZZZZZZ!").unwrap_err(),
            Error::InvalidAscii { byte: b'!', index: 6 }
        );
    }

    #[test]
    fn formatter_displays_digits() {
        let text = Base32Text::new((1 << 63) - 1);
        assert_eq!(text, "7ZZZZZZZZZZZZ");
        assert_eq!(format!("{text}"), "7ZZZZZZZZZZZZ");
        assert_eq!(text.into_inner(), *b"7ZZZZZZZZZZZZ");
    }
}
