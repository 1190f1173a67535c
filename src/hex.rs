//! ASCII hexadecimal primitives shared by the record codecs.
//!
//! The canonical record dialects use uppercase hex only; lowercase digits
//! are rejected everywhere.

/// True for `0`-`9`.
pub fn is_decimal_digit(digit: u8) -> bool {
    digit.is_ascii_digit()
}

/// True for the digit set the codecs accept: `0`-`9` and uppercase `A`-`F`.
pub fn is_hex_digit(digit: u8) -> bool {
    is_decimal_digit(digit) || (b'A'..=b'F').contains(&digit)
}

/// Decode a big-endian run of uppercase hex digits into an unsigned value.
///
/// Each digit shifts the accumulator left 4 bits; field widths are bounded
/// at 8 digits (32 bits) by the callers. Empty input or any non-hex
/// character yields `None`, never a partial value.
pub fn decode_hex(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }

    let mut value: u32 = 0;

    for &digit in digits {
        let nibble = match digit {
            b'0'..=b'9' => digit - b'0',
            b'A'..=b'F' => digit - b'A' + 10,
            _ => return None,
        };
        value = (value << 4) | u32::from(nibble);
    }
    Some(value)
}

/// Decode exactly two hex digits into a byte value.
pub fn decode_hex_byte(digits: &[u8]) -> Option<u8> {
    if digits.len() != 2 {
        return None;
    }
    decode_hex(digits).map(|value| value as u8)
}

/// True when the input starts with a full two-digit hex byte.
pub fn begins_with_hex_byte(data: &[u8]) -> bool {
    data.len() >= 2 && is_hex_digit(data[0]) && is_hex_digit(data[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_widths() {
        assert_eq!(decode_hex(b"06"), Some(0x06));
        assert_eq!(decode_hex(b"C000"), Some(0xC000));
        assert_eq!(decode_hex(b"012345"), Some(0x012345));
        assert_eq!(decode_hex(b"DEADBEEF"), Some(0xDEADBEEF));
    }

    #[test]
    fn test_decode_hex_rejects_empty() {
        assert_eq!(decode_hex(b""), None);
    }

    #[test]
    fn test_decode_hex_rejects_lowercase() {
        assert_eq!(decode_hex(b"c000"), None);
        assert_eq!(decode_hex(b"1a"), None);
    }

    #[test]
    fn test_decode_hex_rejects_garbage_without_partial_value() {
        assert_eq!(decode_hex(b"12G4"), None);
        assert_eq!(decode_hex(b"12 4"), None);
    }

    #[test]
    fn test_decode_hex_byte_needs_two_digits() {
        assert_eq!(decode_hex_byte(b"4F"), Some(0x4F));
        assert_eq!(decode_hex_byte(b"4"), None);
        assert_eq!(decode_hex_byte(b"4F0"), None);
    }

    #[test]
    fn test_begins_with_hex_byte() {
        assert!(begins_with_hex_byte(b"12 34"));
        assert!(!begins_with_hex_byte(b"1 234"));
        assert!(!begins_with_hex_byte(b"1"));
        assert!(!begins_with_hex_byte(b"ab"));
    }
}
