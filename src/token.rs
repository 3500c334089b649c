//! Decoding of the `--write` argument into raw bytes.
//!
//! The input is split on single spaces. Each token is tried, in order, as a
//! hex byte (`0x` followed by one or two hex digits), a decimal byte (one to
//! three digits) and finally as literal text copied byte for byte.

/// Decode a space separated token string into the bytes to send.
pub fn decode(input: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(input.len());
    // Empty tokens from repeated or trailing spaces decode to nothing.
    for token in input.split(' ') {
        decode_token(token, &mut bytes);
    }
    bytes
}

fn decode_token(token: &str, out: &mut Vec<u8>) {
    if let Some(byte) = parse_hex(token) {
        out.push(byte);
    } else if let Some(byte) = parse_decimal(token) {
        out.push(byte);
    } else {
        out.extend_from_slice(token.as_bytes());
    }
}

fn parse_hex(token: &str) -> Option<u8> {
    let digits = token.strip_prefix("0x")?;
    if !(1..=2).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

fn parse_decimal(token: &str) -> Option<u8> {
    if !(1..=3).contains(&token.len()) || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Three digits reach 999; keep the low byte like a C char store would.
    token.parse::<u16>().ok().map(|value| value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_tokens() {
        assert_eq!(decode("0xaa 123 hi"), vec![0xaa, 0x7b, b'h', b'i']);
    }

    #[test]
    fn test_empty_input() {
        assert!(decode("").is_empty());
    }

    #[test]
    fn test_hex_tokens() {
        assert_eq!(decode("0x0"), vec![0x00]);
        assert_eq!(decode("0xf"), vec![0x0f]);
        assert_eq!(decode("0xFF"), vec![0xff]);
        assert_eq!(decode("0xaB"), vec![0xab]);
        for value in 0..=255u8 {
            assert_eq!(decode(&format!("0x{:02x}", value)), vec![value]);
            assert_eq!(decode(&format!("0x{:X}", value)), vec![value]);
        }
    }

    #[test]
    fn test_hex_needs_lowercase_prefix_and_short_digits() {
        assert_eq!(decode("0X1f"), b"0X1f".to_vec());
        assert_eq!(decode("0x123"), b"0x123".to_vec());
        assert_eq!(decode("0x"), b"0x".to_vec());
        assert_eq!(decode("0xg1"), b"0xg1".to_vec());
    }

    #[test]
    fn test_decimal_tokens() {
        assert_eq!(decode("0"), vec![0]);
        assert_eq!(decode("7"), vec![7]);
        assert_eq!(decode("42"), vec![42]);
        assert_eq!(decode("255"), vec![255]);
        assert_eq!(decode("007"), vec![7]);
    }

    #[test]
    fn test_decimal_truncates_to_low_byte() {
        assert_eq!(decode("256"), vec![0]);
        assert_eq!(decode("300"), vec![44]);
        assert_eq!(decode("999"), vec![(999 % 256) as u8]);
    }

    #[test]
    fn test_long_numbers_are_literal() {
        assert_eq!(decode("1234"), b"1234".to_vec());
        assert_eq!(decode("-1"), b"-1".to_vec());
    }

    #[test]
    fn test_literal_tokens_keep_order() {
        assert_eq!(decode("hello 1 world"), b"hello\x01world".to_vec());
        assert_eq!(decode("a1"), b"a1".to_vec());
    }

    #[test]
    fn test_repeated_and_trailing_spaces() {
        assert_eq!(decode("1  2"), vec![1, 2]);
        assert_eq!(decode("1 "), vec![1]);
        assert_eq!(decode(" 0x10"), vec![0x10]);
        assert!(decode("   ").is_empty());
    }

    #[test]
    fn test_only_space_separates() {
        assert_eq!(decode("1\t2"), b"1\t2".to_vec());
    }

    #[test]
    fn test_decode_is_pure() {
        let input = "0x01 abc 200";
        assert_eq!(decode(input), decode(input));
    }
}
