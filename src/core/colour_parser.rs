use crate::domain::colour::{Colour, ColourIdentity};
use crate::utils::error::{Result, StaplerError};
use std::str::FromStr;

/// Parses a string of colour codes such as `"URG"` into an identity.
///
/// Order and repeats are irrelevant. Matching is exact (`u` is rejected), and
/// an empty string is the empty identity rather than colourless.
pub fn parse_identity(input: &str) -> Result<ColourIdentity> {
    let mut identity = ColourIdentity::empty();
    for character in input.chars() {
        let colour =
            Colour::from_code(character).ok_or_else(|| StaplerError::InvalidColourCharacter {
                input: input.to_string(),
                character,
            })?;
        identity.insert(colour);
    }
    Ok(identity)
}

/// Sorted, concatenated member codes. Stable, used as the cache key.
pub fn to_canonical_key(identity: &ColourIdentity) -> String {
    identity.colours().map(Colour::code).collect()
}

/// Every multi-colour subset (length 2..=n) of the identity, each as a canonical key.
///
/// Single colours and the empty set are left out; the cache probes those directly.
pub fn expand_subset_combinations(identity: &ColourIdentity) -> Vec<String> {
    let codes: Vec<char> = identity.colours().map(Colour::code).collect();
    (2..=codes.len())
        .flat_map(|length| combinations(&codes, length))
        .map(|combination| combination.into_iter().collect())
        .collect()
}

/// All `length`-sized combinations of `items`, keeping their relative order.
pub fn combinations<T: Copy>(items: &[T], length: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if length > n {
        return Vec::new();
    }

    // Walk every choose/skip mask; n never exceeds the six colour codes.
    (0u32..(1 << n))
        .filter(|mask| mask.count_ones() as usize == length)
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|(index, _)| mask & (1 << index) != 0)
                .map(|(_, item)| *item)
                .collect()
        })
        .collect()
}

impl FromStr for ColourIdentity {
    type Err = StaplerError;

    fn from_str(s: &str) -> Result<Self> {
        parse_identity(s)
    }
}
