use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colourless,
}

impl Colour {
    /// Every colour, ordered by code so iteration yields canonical order.
    pub const ALL: [Colour; 6] = [
        Colour::Black,
        Colour::Colourless,
        Colour::Green,
        Colour::Red,
        Colour::Blue,
        Colour::White,
    ];

    pub const PRIMARY: [Colour; 5] = [
        Colour::White,
        Colour::Blue,
        Colour::Black,
        Colour::Red,
        Colour::Green,
    ];

    pub fn code(self) -> char {
        match self {
            Colour::White => 'W',
            Colour::Blue => 'U',
            Colour::Black => 'B',
            Colour::Red => 'R',
            Colour::Green => 'G',
            Colour::Colourless => 'C',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Colour::White => "White",
            Colour::Blue => "Blue",
            Colour::Black => "Black",
            Colour::Red => "Red",
            Colour::Green => "Green",
            Colour::Colourless => "Colourless",
        }
    }

    pub fn from_code(code: char) -> Option<Colour> {
        match code {
            'W' => Some(Colour::White),
            'U' => Some(Colour::Blue),
            'B' => Some(Colour::Black),
            'R' => Some(Colour::Red),
            'G' => Some(Colour::Green),
            'C' => Some(Colour::Colourless),
            _ => None,
        }
    }

    pub fn is_colourless(self) -> bool {
        self == Colour::Colourless
    }

    // Bit position follows canonical order so mask order and key order agree.
    pub(crate) fn bit(self) -> u8 {
        let index = Colour::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default();
        1 << index
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A de-duplicated set of colours stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColourIdentity(u8);

impl ColourIdentity {
    pub const fn empty() -> Self {
        ColourIdentity(0)
    }

    pub fn colourless() -> Self {
        Self::from_colours([Colour::Colourless])
    }

    pub fn from_colours<I: IntoIterator<Item = Colour>>(colours: I) -> Self {
        let mut identity = Self::empty();
        for colour in colours {
            identity.insert(colour);
        }
        identity
    }

    pub fn insert(&mut self, colour: Colour) {
        self.0 |= colour.bit();
    }

    pub fn contains(&self, colour: Colour) -> bool {
        self.0 & colour.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in canonical (code-sorted) order.
    pub fn colours(&self) -> impl Iterator<Item = Colour> + '_ {
        Colour::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    /// The same identity with the colourless marker removed.
    pub fn without_colourless(&self) -> Self {
        ColourIdentity(self.0 & !Colour::Colourless.bit())
    }

    /// True when colourless is requested together with at least one primary colour.
    pub fn is_mixed(&self) -> bool {
        self.contains(Colour::Colourless) && !self.without_colourless().is_empty()
    }

    pub fn is_subset_of(&self, other: &ColourIdentity) -> bool {
        self.0 & !other.0 == 0
    }
}

impl fmt::Display for ColourIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for colour in self.colours() {
            write!(f, "{}", colour.code())?;
        }
        Ok(())
    }
}

impl FromIterator<Colour> for ColourIdentity {
    fn from_iter<I: IntoIterator<Item = Colour>>(iter: I) -> Self {
        Self::from_colours(iter)
    }
}

impl Serialize for ColourIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColourIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}
