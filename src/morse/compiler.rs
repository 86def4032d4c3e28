//! Text to Morse unit sequence
//!
//! Letters and digits become their marks separated by symbol gaps, followed
//! by a character gap when the very next input byte is also a letter or
//! digit. Whitespace becomes a word gap and `.`, `?` or `!` a sentence gap.
//! Every other byte is dropped without emitting anything. The character gap
//! test looks at the raw next byte, so `"it's"` has no gap between T and S.

use heapless::Vec;

use super::alphabet::glyph;
use super::timing::Unit;
use crate::config::MAX_MESSAGE_LEN;
use crate::error::{Error, Result};
use crate::utils::ascii;

/// A five-mark character needs ten units with its trailing gap.
pub const SEQUENCE_CAPACITY: usize = MAX_MESSAGE_LEN * 10;

/// Compiled message. Its end is the terminator.
pub type CompiledSequence = Vec<Unit, SEQUENCE_CAPACITY>;

/// Compiles `message`, or fails without a partial result if the units would
/// not fit in [`SEQUENCE_CAPACITY`].
pub fn compile(message: &[u8]) -> Result<CompiledSequence> {
    let mut out = CompiledSequence::new();
    let mut push = |unit: Unit| {
        out.push(unit).map_err(|_| Error::CapacityExceeded {
            capacity: SEQUENCE_CAPACITY,
        })
    };

    for (i, &c) in message.iter().enumerate() {
        if let Some(marks) = glyph(c) {
            for (n, &mark) in marks.iter().enumerate() {
                if n > 0 {
                    push(Unit::SymbolGap)?;
                }
                push(mark)?;
            }
            if message.get(i + 1).copied().is_some_and(ascii::is_alphanum) {
                push(Unit::CharacterGap)?;
            }
        } else if ascii::is_whitespace(c) {
            push(Unit::WordGap)?;
        } else if ascii::is_terminal_punctuation(c) {
            push(Unit::SentenceGap)?;
        }
    }

    Ok(out)
}

/// Playback length in ticks.
pub fn total_ticks(sequence: &[Unit]) -> u32 {
    sequence.iter().map(|u| u.ticks() as u32).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Unit::*;

    const S: [Unit; 5] = [Dot, SymbolGap, Dot, SymbolGap, Dot];
    const O: [Unit; 5] = [Dash, SymbolGap, Dash, SymbolGap, Dash];

    #[test]
    fn sos() {
        let seq = compile(b"SOS").unwrap();
        let mut expected = std::vec::Vec::new();
        expected.extend_from_slice(&S);
        expected.push(CharacterGap);
        expected.extend_from_slice(&O);
        expected.push(CharacterGap);
        expected.extend_from_slice(&S);
        assert_eq!(&seq[..], &expected[..]);
        assert_eq!(total_ticks(&seq), 34);
    }

    #[test]
    fn space_is_a_word_gap_only() {
        let seq = compile(b"A B").unwrap();
        assert_eq!(
            &seq[..],
            &[Dot, SymbolGap, Dash, WordGap, Dash, SymbolGap, Dot, SymbolGap, Dot, SymbolGap, Dot]
        );
    }

    #[test]
    fn trailing_period_adds_one_sentence_gap() {
        let seq = compile(b"E.").unwrap();
        assert_eq!(&seq[..], &[Dot, SentenceGap]);
        let seq = compile(b"E E?").unwrap();
        assert_eq!(&seq[..], &[Dot, WordGap, Dot, SentenceGap]);
    }

    #[test]
    fn lowercase_matches_uppercase() {
        assert_eq!(compile(b"sos").unwrap(), compile(b"SOS").unwrap());
    }

    #[test]
    fn unsupported_bytes_are_dropped() {
        // The apostrophe swallows the gap between T and S.
        let seq = compile(b"T'S").unwrap();
        let mut expected = std::vec![Dash];
        expected.extend_from_slice(&S);
        assert_eq!(&seq[..], &expected[..]);

        assert!(compile(b",;\r@").unwrap().is_empty());
        assert_eq!(&compile(b"E\r\n").unwrap()[..], &[Dot, WordGap]);
    }

    #[test]
    fn digits_compile_to_nine_units() {
        let seq = compile(b"0").unwrap();
        assert_eq!(seq.len(), 9);
        assert_eq!(total_ticks(&seq), 5 * 4 + 4);
    }

    #[test]
    fn capacity_is_checked() {
        let fits = [b'0'; MAX_MESSAGE_LEN];
        assert_eq!(compile(&fits).unwrap().len(), SEQUENCE_CAPACITY - 1);

        let too_long = [b'0'; MAX_MESSAGE_LEN + 1];
        assert_eq!(
            compile(&too_long),
            Err(Error::CapacityExceeded {
                capacity: SEQUENCE_CAPACITY
            })
        );

        let gaps = [b' '; SEQUENCE_CAPACITY + 1];
        assert!(compile(&gaps[..SEQUENCE_CAPACITY]).is_ok());
        assert!(compile(&gaps).is_err());
    }
}
