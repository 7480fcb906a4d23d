use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplier of the piece kinds a session spawns.
///
/// The session draws from its source every time it needs a new "next" piece.
/// Hosts choose the source: [`RandomPieceSource`] for play, and
/// [`SequencePieceSource`] for deterministic tests and scripted runs.
pub trait PieceSource: fmt::Debug {
    fn next_kind(&mut self) -> PieceKind;
}

/// Seed for deterministic piece generation.
///
/// A 128-bit (16-byte) seed for the random number generator behind
/// [`RandomPieceSource`]. The same seed always produces the same piece
/// sequence. Seeds are written as 32 lowercase hex digits, both by
/// [`Display`](fmt::Display) and by serde.
///
/// # Example
///
/// ```
/// use stackfall_engine::{PieceSeed, PieceSource as _, RandomPieceSource};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = RandomPieceSource::with_seed(seed);
/// let mut b = RandomPieceSource::with_seed(seed.to_string().parse().unwrap());
///
/// for _ in 0..10 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid seed: expected 32 hex characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid seed: {_0:?} is not hexadecimal")]
    InvalidHex(#[error(not(source))] String),
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength(s.len()));
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParsePieceSeedError::InvalidHex(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Uniform draw over the seven piece kinds from a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieceSource {
    /// Creates a source seeded from the thread-local OS-seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }
}

impl PieceSource for RandomPieceSource {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Cycles endlessly through a fixed, non-empty list of piece kinds.
///
/// Parses from a string of piece letters:
///
/// ```
/// use stackfall_engine::{PieceKind, PieceSource as _, SequencePieceSource};
///
/// let mut source: SequencePieceSource = "TI".parse().unwrap();
/// assert_eq!(source.next_kind(), PieceKind::T);
/// assert_eq!(source.next_kind(), PieceKind::I);
/// assert_eq!(source.next_kind(), PieceKind::T);
/// ```
#[derive(Debug, Clone)]
pub struct SequencePieceSource {
    kinds: Vec<PieceKind>,
    position: usize,
}

impl SequencePieceSource {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, position: 0 }
    }

    #[must_use]
    pub fn kinds(&self) -> &[PieceKind] {
        &self.kinds
    }
}

impl PieceSource for SequencePieceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.position];
        self.position = (self.position + 1) % self.kinds.len();
        kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSequenceError {
    #[display("piece sequence is empty")]
    Empty,
    #[display("invalid piece letter {_0:?}")]
    InvalidPiece(#[error(not(source))] char),
}

impl FromStr for SequencePieceSource {
    type Err = ParseSequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kinds = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| {
                PieceKind::from_char(c.to_ascii_uppercase())
                    .ok_or(ParseSequenceError::InvalidPiece(c))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if kinds.is_empty() {
            return Err(ParseSequenceError::Empty);
        }
        Ok(Self::new(kinds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([
        0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
        0x77,
    ]);

    #[test]
    fn test_seed_hex_format() {
        let text = SEED.to_string();
        assert_eq!(text, "0123456789abcdef0011223344556677");
        assert_eq!(text.parse::<PieceSeed>(), Ok(SEED));
    }

    #[test]
    fn test_seed_parse_errors() {
        assert_eq!(
            "abc".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidLength(3))
        );
        let bad = "zz23456789abcdef0011223344556677";
        assert_eq!(
            bad.parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidHex(bad.to_owned()))
        );
    }

    #[test]
    fn test_seed_serde() {
        let json = serde_json::to_string(&SEED).unwrap();
        assert_eq!(json, "\"0123456789abcdef0011223344556677\"");
        let back: PieceSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SEED);
        assert!(serde_json::from_str::<PieceSeed>("\"1234\"").is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomPieceSource::with_seed(SEED);
        let mut b = RandomPieceSource::with_seed(SEED);
        let seq_a: Vec<_> = (0..50).map(|_| a.next_kind()).collect();
        let seq_b: Vec<_> = (0..50).map(|_| b.next_kind()).collect();
        assert_eq!(seq_a, seq_b);
        assert_eq!(a.seed(), SEED);
    }

    #[test]
    fn test_random_source_draws_every_kind() {
        let mut source = RandomPieceSource::with_seed(SEED);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            seen[source.next_kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_sequence_cycles() {
        let mut source = SequencePieceSource::new([PieceKind::S, PieceKind::Z, PieceKind::O]);
        let drawn: Vec<_> = (0..7).map(|_| source.next_kind()).collect();
        assert_eq!(
            drawn,
            [
                PieceKind::S,
                PieceKind::Z,
                PieceKind::O,
                PieceKind::S,
                PieceKind::Z,
                PieceKind::O,
                PieceKind::S
            ]
        );
    }

    #[test]
    fn test_sequence_parse() {
        let source: SequencePieceSource = "i, o t".parse().unwrap();
        assert_eq!(source.kinds(), [PieceKind::I, PieceKind::O, PieceKind::T]);
        assert_eq!(
            "".parse::<SequencePieceSource>().unwrap_err(),
            ParseSequenceError::Empty
        );
        assert_eq!(
            "IX".parse::<SequencePieceSource>().unwrap_err(),
            ParseSequenceError::InvalidPiece('X')
        );
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_empty_sequence_panics() {
        let _ = SequencePieceSource::new(Vec::new());
    }
}
