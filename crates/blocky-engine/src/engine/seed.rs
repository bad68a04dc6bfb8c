use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseSeedError;

/// Seed for deterministic board generation and AI decisions.
///
/// This is a 128-bit (16-byte) seed for the [`Pcg32`] generator that drives every
/// random choice of a game: board layout, goal assignment, and the choices of
/// automated players. Using the same seed reproduces the same game, enabling:
///
/// - Reproducible simulations for debugging
/// - Deterministic testing
///
/// Seeds are written as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use blocky_engine::{GameSeed, generate_board};
/// use rand::Rng as _;
///
/// let seed: GameSeed = rand::rng().random();
///
/// let board1 = generate_board(3, 750, &mut seed.rng())?;
/// let board2 = generate_board(3, 750, &mut seed.rng())?;
/// assert_eq!(board1, board2);
///
/// let parsed: GameSeed = seed.to_string().parse()?;
/// assert_eq!(parsed, seed);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSeed([u8; 16]);

impl GameSeed {
    #[must_use]
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Creates a fresh generator from this seed.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for GameSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength(s.len()));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidDigit);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::InvalidDigit)?;
        Ok(Self::from_u128(num))
    }
}

impl Serialize for GameSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid seed: {hex_str} ({e})")))
    }
}

/// Allows generating random `GameSeed` values using the standard random distribution.
///
/// This is also how automated players derive their own seeds from the game's generator.
impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GameSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_serialization() {
        let seed = GameSeed::from_u128(0x0123_4567_89ab_cdef);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"00000000000000000123456789abcdef\"");

        let deserialized: GameSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_seed_parse_errors() {
        assert_eq!(
            "abc".parse::<GameSeed>(),
            Err(ParseSeedError::InvalidLength(3))
        );
        assert_eq!(
            "0000000000000000000000000000000g".parse::<GameSeed>(),
            Err(ParseSeedError::InvalidDigit)
        );
        assert_eq!(
            "+0000000000000000000000000000001".parse::<GameSeed>(),
            Err(ParseSeedError::InvalidDigit)
        );
        assert!(serde_json::from_str::<GameSeed>("\"1234\"").is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = GameSeed::from_u128(99);
        let draw = || -> Vec<u32> {
            let mut rng = seed.rng();
            (0..8).map(|_| rng.random()).collect()
        };
        assert_eq!(draw(), draw());
    }
}
