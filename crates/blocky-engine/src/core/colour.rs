use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// An RGB colour.
///
/// Game colours come from the fixed [`Colour::PALETTE`]. [`Colour::BLACK`] and
/// [`Colour::WHITE`] exist for presentation only and are never placed on a board
/// by the generator.
///
/// # Example
///
/// ```
/// use blocky_engine::Colour;
///
/// let colour = Colour::REAL_RED;
/// assert_eq!(colour.name(), Some("Real Red"));
/// assert_eq!(colour.to_string(), "Real Red");
/// assert_eq!(Colour::new(1, 2, 3).to_string(), "#010203");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
}

impl Colour {
    pub const PACIFIC_POINT: Self = Self::new(1, 128, 181);
    pub const REAL_RED: Self = Self::new(199, 44, 58);
    pub const OLD_OLIVE: Self = Self::new(138, 151, 71);
    pub const DAFFODIL_DELIGHT: Self = Self::new(255, 211, 92);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Colours that blocks and goals are drawn from.
    pub const PALETTE: [Self; 4] = [
        Self::PACIFIC_POINT,
        Self::REAL_RED,
        Self::OLD_OLIVE,
        Self::DAFFODIL_DELIGHT,
    ];

    const NAMED: [(Self, &'static str); 6] = [
        (Self::PACIFIC_POINT, "Pacific Point"),
        (Self::REAL_RED, "Real Red"),
        (Self::OLD_OLIVE, "Old Olive"),
        (Self::DAFFODIL_DELIGHT, "Daffodil Delight"),
        (Self::BLACK, "Black"),
        (Self::WHITE, "White"),
    ];

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Returns the human readable name of a named colour.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(colour, _)| *colour == self)
            .map(|(_, name)| *name)
    }

    /// Returns the first character of the colour name, or `?` for unnamed colours.
    #[must_use]
    pub fn initial(self) -> char {
        self.name()
            .and_then(|name| name.chars().next())
            .unwrap_or('?')
    }

    fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        let [_, r, g, b] = value.to_be_bytes();
        Some(Self::new(r, g, b))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
        }
    }
}

/// Samples uniformly from [`Colour::PALETTE`].
impl Distribution<Colour> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Colour {
        Colour::PALETTE[rng.random_range(0..Colour::PALETTE.len())]
    }
}

impl Serialize for Colour {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "#rrggbb"
        let s = format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("expected colour in format '#rrggbb', got '{s}'"))
        })
    }
}
