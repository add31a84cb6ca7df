//! Byte classification for the FML lexer.
//!
//! Lexing is byte-driven: UTF-8 sequences are recognized by the lead
//! byte's range and validated structurally (a lead byte must be followed
//! by exactly the declared number of continuation bytes). Decoding to
//! code points is never needed during scanning.

/// Returns the number of continuation bytes a lead byte requires.
///
/// | Range | Result |
/// |---|---|
/// | `0xC0..=0xDF` | `Some(1)` |
/// | `0xE0..=0xEF` | `Some(2)` |
/// | `0xF0..=0xF7` | `Some(3)` |
/// | anything else | `None` |
///
/// Bytes in `0xF8..=0xFF` would declare more than three continuation
/// bytes and are invalid; see [`is_overlong_lead`].
#[inline]
pub fn continuation_count(byte: u8) -> Option<usize> {
    match byte {
        0xC0..=0xDF => Some(1),
        0xE0..=0xEF => Some(2),
        0xF0..=0xF7 => Some(3),
        _ => None,
    }
}

/// Returns true for UTF-8 continuation bytes (`0x80..=0xBF`).
///
/// These are valid only inside an active multi-byte sequence.
#[inline]
pub fn is_continuation(byte: u8) -> bool {
    matches!(byte, 0x80..=0xBF)
}

/// Returns true for bytes that would start a sequence longer than four
/// bytes (`0xF8..=0xFF`). Always an encoding error.
#[inline]
pub fn is_overlong_lead(byte: u8) -> bool {
    byte >= 0xF8
}

/// Returns true if the byte can start an identifier.
///
/// Letters, `_`, and any UTF-8 lead byte qualify. Note that the decoded
/// code point's Unicode category is deliberately not checked.
#[inline]
pub fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte >= 0xC0
}

/// Returns true if the ASCII byte can continue an identifier.
///
/// Digits and hyphens are allowed in identifiers, just not at the start.
/// Multi-byte sequences are handled separately by the identifier lexer.
#[inline]
pub fn is_ascii_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

/// Converts a byte to its digit value in the given base.
///
/// # Arguments
///
/// * `byte` - The byte to convert
/// * `base` - 2, 8, 10, or 16
///
/// # Example
///
/// ```
/// use fmlc_lex::utf8::digit_value;
///
/// assert_eq!(digit_value(b'7', 8), Some(7));
/// assert_eq!(digit_value(b'f', 16), Some(15));
/// assert_eq!(digit_value(b'F', 16), Some(15));
/// assert_eq!(digit_value(b'2', 2), None);
/// ```
#[inline]
pub fn digit_value(byte: u8, base: u32) -> Option<u8> {
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => return None,
    };
    if (value as u32) < base {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuation_counts() {
        assert_eq!(continuation_count(0xC2), Some(1));
        assert_eq!(continuation_count(0xDF), Some(1));
        assert_eq!(continuation_count(0xE0), Some(2));
        assert_eq!(continuation_count(0xF0), Some(3));
        assert_eq!(continuation_count(0xF7), Some(3));
        assert_eq!(continuation_count(b'a'), None);
        assert_eq!(continuation_count(0x80), None);
        assert_eq!(continuation_count(0xF8), None);
    }

    #[test]
    fn test_continuation_range() {
        assert!(is_continuation(0x80));
        assert!(is_continuation(0xBF));
        assert!(!is_continuation(0x7F));
        assert!(!is_continuation(0xC0));
    }

    #[test]
    fn test_overlong_leads() {
        assert!(is_overlong_lead(0xF8));
        assert!(is_overlong_lead(0xFF));
        assert!(!is_overlong_lead(0xF7));
    }

    #[test]
    fn test_ident_start() {
        assert!(is_ident_start(b'a'));
        assert!(is_ident_start(b'Z'));
        assert!(is_ident_start(b'_'));
        assert!(is_ident_start(0xC3)); // lead byte of e.g. 'é'
        assert!(!is_ident_start(b'1'));
        assert!(!is_ident_start(b'-'));
        assert!(!is_ident_start(0x80));
    }

    #[test]
    fn test_ident_continue() {
        assert!(is_ascii_ident_continue(b'a'));
        assert!(is_ascii_ident_continue(b'9'));
        assert!(is_ascii_ident_continue(b'-'));
        assert!(is_ascii_ident_continue(b'_'));
        assert!(!is_ascii_ident_continue(b'.'));
        assert!(!is_ascii_ident_continue(b' '));
    }

    #[test]
    fn test_digit_values() {
        assert_eq!(digit_value(b'0', 10), Some(0));
        assert_eq!(digit_value(b'9', 10), Some(9));
        assert_eq!(digit_value(b'a', 10), None);
        assert_eq!(digit_value(b'1', 2), Some(1));
        assert_eq!(digit_value(b'8', 8), None);
        assert_eq!(digit_value(b'E', 16), Some(14));
    }
}
