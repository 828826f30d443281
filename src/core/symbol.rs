use std::fmt;

/// A single position of an encoded sequence.
///
/// `Wildcard` serves two roles: it is the explicit "don't care" marker of a
/// degenerate pattern, and it is what every character outside `A`, `C`, `G`,
/// `T` (including `N` and malformed input) encodes to. The two cases are
/// indistinguishable once encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Symbol {
    #[default]
    Wildcard = 0,
    A = 1,
    C = 2,
    G = 3,
    T = 4,
}

/// Character used when rendering a wildcard position
pub const WILDCARD_CHAR: char = '.';

impl Symbol {
    /// Encode a single character. Never fails; unknown input becomes `Wildcard`.
    #[must_use]
    pub fn encode(c: char) -> Self {
        match c {
            'A' => Self::A,
            'C' => Self::C,
            'G' => Self::G,
            'T' => Self::T,
            _ => Self::Wildcard,
        }
    }

    /// Render the symbol as a character (diagnostics only)
    #[must_use]
    pub fn decode(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
            Self::Wildcard => WILDCARD_CHAR,
        }
    }

    #[must_use]
    pub fn is_wildcard(self) -> bool {
        self == Self::Wildcard
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decode())
    }
}

/// A fixed-length run of symbols: a corpus row, a query, or a pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EncodedSequence(Vec<Symbol>);

impl EncodedSequence {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    /// Copy of this sequence with `Wildcard` written at each of `positions`.
    ///
    /// Positions must be within bounds.
    #[must_use]
    pub fn with_wildcards(&self, positions: &[usize]) -> Self {
        let mut symbols = self.0.clone();
        for &pos in positions {
            symbols[pos] = Symbol::Wildcard;
        }
        Self(symbols)
    }
}

impl fmt::Display for EncodedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

/// Encode a whole sequence character by character
#[must_use]
pub fn encode_sequence(sequence: &str) -> EncodedSequence {
    EncodedSequence(sequence.chars().map(Symbol::encode).collect())
}
