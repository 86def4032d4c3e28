//! ASCII character classes used by the Morse compiler and the serial tasks.

#[inline]
pub fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

#[inline]
pub fn is_numeric(c: u8) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub fn is_alphanum(c: u8) -> bool {
    is_alpha(c) || is_numeric(c)
}

/// Space, tab and newline. Carriage return is deliberately excluded.
#[inline]
pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n')
}

/// Characters that end a sentence.
#[inline]
pub fn is_terminal_punctuation(c: u8) -> bool {
    matches!(c, b'.' | b'?' | b'!')
}

#[inline]
pub fn is_punctuation(c: u8) -> bool {
    is_terminal_punctuation(c) || matches!(c, b',' | b'\'' | b'"' | b';' | b':' | b'-')
}

/// `y` counts as a vowel.
#[inline]
pub fn is_vowel(c: u8) -> bool {
    matches!(c.to_ascii_lowercase(), b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_excludes_carriage_return() {
        assert!(is_whitespace(b'\n'));
        assert!(is_whitespace(b'\t'));
        assert!(!is_whitespace(b'\r'));
    }

    #[test]
    fn punctuation_classes() {
        assert!(is_terminal_punctuation(b'!'));
        assert!(!is_terminal_punctuation(b','));
        assert!(is_punctuation(b','));
        assert!(is_punctuation(b'?'));
        assert!(!is_punctuation(b'#'));
    }

    #[test]
    fn vowels_ignore_case() {
        assert!(is_vowel(b'A'));
        assert!(is_vowel(b'y'));
        assert!(!is_vowel(b'b'));
        assert!(!is_vowel(b'1'));
    }
}
