/// One element of a compiled Morse sequence. Durations are in dots; one dot
/// is one playback tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Dot,
    Dash,
    /// Between the marks of one character.
    SymbolGap,
    /// Between characters of a word.
    CharacterGap,
    WordGap,
    SentenceGap,
}

impl Unit {
    pub const fn ticks(self) -> u8 {
        match self {
            Unit::Dot => 1,
            Unit::Dash => 4,
            Unit::SymbolGap => 1,
            Unit::CharacterGap => 5,
            Unit::WordGap => 7,
            Unit::SentenceGap => 15,
        }
    }

    /// Marks light the output, gaps leave it dark.
    #[inline]
    pub const fn is_mark(self) -> bool {
        matches!(self, Unit::Dot | Unit::Dash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_in_dots() {
        assert_eq!(Unit::Dash.ticks(), 4 * Unit::Dot.ticks());
        assert_eq!(Unit::SentenceGap.ticks(), 15);
        assert!(Unit::Dash.is_mark());
        assert!(!Unit::WordGap.is_mark());
    }
}
