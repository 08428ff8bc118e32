use crate::core::colour_parser::{expand_subset_combinations, to_canonical_key};
use crate::domain::colour::{Colour, ColourIdentity};
use crate::domain::model::CacheEntries;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Card names bucketed by the exact colour identity they require.
///
/// Filled once during loading, then only read. A lookup probes at most one
/// bucket per subset of the requested identity, so its cost does not grow
/// with the number of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCache {
    buckets: BTreeMap<String, BTreeSet<String>>,
}

impl CardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: CacheEntries) -> Self {
        let mut cache = Self::new();
        cache.restore_from_entries(entries);
        cache
    }

    /// Unions `names` into the bucket for `identity`. Never removes anything.
    ///
    /// A colour card never needs the colourless marker, so a mixed identity is
    /// stored under its primary colours only.
    pub fn add_cards<I, S>(&mut self, identity: &ColourIdentity, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identity = if identity.is_mixed() {
            let primaries = identity.without_colourless();
            tracing::warn!("Storing '{}' cards under '{}'", identity, primaries);
            primaries
        } else {
            *identity
        };
        let key = to_canonical_key(&identity);
        let bucket = self.buckets.entry(key).or_default();
        let before = bucket.len();
        bucket.extend(names.into_iter().map(Into::into));
        tracing::debug!(
            "Bucket '{}' grew from {} to {} cards",
            identity,
            before,
            bucket.len()
        );
    }

    /// Every card whose required identity is a non-empty subset of `identity`.
    ///
    /// Colourless cards only come back when the request includes `C`.
    pub fn lookup(&self, identity: &ColourIdentity) -> BTreeSet<String> {
        let primaries = identity.without_colourless();
        let single_keys = primaries.colours().map(|colour| colour.code().to_string());
        let multi_keys = expand_subset_combinations(&primaries);
        let colourless_key = identity
            .contains(Colour::Colourless)
            .then(|| Colour::Colourless.code().to_string());

        let mut result = BTreeSet::new();
        for key in single_keys.chain(multi_keys).chain(colourless_key) {
            if let Some(bucket) = self.buckets.get(&key) {
                result.extend(bucket.iter().cloned());
            }
        }

        tracing::debug!("Lookup for '{}' matched {} cards", identity, result.len());
        result
    }

    pub fn get_entries(&self) -> CacheEntries {
        self.buckets
            .iter()
            .map(|(key, names)| (key.clone(), names.iter().cloned().collect()))
            .collect()
    }

    /// Overwrites each named bucket wholesale. Meant for seeding an empty cache.
    pub fn restore_from_entries(&mut self, entries: CacheEntries) {
        for (key, names) in entries {
            self.buckets.insert(key, names.into_iter().collect());
        }
    }

    pub fn bucket(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.buckets.get(key)
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour_parser::parse_identity;

    fn id(input: &str) -> ColourIdentity {
        parse_identity(input).unwrap()
    }

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn gruul_cache() -> CardCache {
        let mut cache = CardCache::new();
        cache.add_cards(&id("R"), ["Bolt"]);
        cache.add_cards(&id("G"), ["Growth"]);
        cache.add_cards(&id("RG"), ["Wildfire"]);
        cache
    }

    #[test]
    fn test_lookup_unions_subset_buckets() {
        let cache = gruul_cache();
        assert_eq!(cache.lookup(&id("RG")), names(&["Bolt", "Growth", "Wildfire"]));
        assert_eq!(cache.lookup(&id("R")), names(&["Bolt"]));
    }

    #[test]
    fn test_lookup_excludes_supersets() {
        let mut cache = gruul_cache();
        cache.add_cards(&id("URG"), ["Maelstrom Wanderer"]);
        assert!(!cache.lookup(&id("RG")).contains("Maelstrom Wanderer"));
        assert!(cache.lookup(&id("WUBRG")).contains("Maelstrom Wanderer"));
    }

    #[test]
    fn test_add_cards_is_idempotent() {
        let mut cache = CardCache::new();
        cache.add_cards(&id("U"), ["Counterspell", "High Tide"]);
        cache.add_cards(&id("U"), ["Counterspell"]);
        assert_eq!(cache.bucket("U").unwrap().len(), 2);
        assert_eq!(cache.card_count(), 2);
    }

    #[test]
    fn test_add_cards_uses_canonical_key() {
        let mut cache = CardCache::new();
        cache.add_cards(&id("UR"), ["Shao Jun"]);
        cache.add_cards(&id("RU"), ["Tellah, Great Sage"]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.bucket("RU").unwrap().len(), 2);
    }

    #[test]
    fn test_colourless_only_when_requested() {
        let mut cache = gruul_cache();
        cache.add_cards(&id("C"), ["Sol Ring"]);

        assert!(!cache.lookup(&id("RG")).contains("Sol Ring"));
        assert_eq!(
            cache.lookup(&id("RGC")),
            names(&["Bolt", "Growth", "Sol Ring", "Wildfire"])
        );
        assert_eq!(cache.lookup(&id("C")), names(&["Sol Ring"]));
    }

    #[test]
    fn test_mixed_identity_is_stored_under_its_colours() {
        let mut cache = CardCache::new();
        cache.add_cards(&id("CR"), ["Bomat Courier"]);

        assert!(cache.bucket("CR").is_none());
        assert_eq!(cache.bucket("R").unwrap().len(), 1);
        assert_eq!(cache.lookup(&id("R")), names(&["Bomat Courier"]));
        assert!(cache.lookup(&id("C")).is_empty());
    }

    #[test]
    fn test_empty_identity_matches_nothing() {
        let cache = gruul_cache();
        assert!(cache.lookup(&ColourIdentity::empty()).is_empty());
    }

    #[test]
    fn test_lookup_on_missing_buckets() {
        let cache = CardCache::new();
        assert!(cache.lookup(&id("WUBRG")).is_empty());
    }

    #[test]
    fn test_same_name_in_different_buckets() {
        let mut cache = CardCache::new();
        cache.add_cards(&id("W"), ["Shared"]);
        cache.add_cards(&id("U"), ["Shared"]);
        assert_eq!(cache.card_count(), 2);
        assert_eq!(cache.lookup(&id("WU")), names(&["Shared"]));
    }

    #[test]
    fn test_entries_round_trip() {
        let cache = gruul_cache();
        let entries = cache.get_entries();
        assert_eq!(
            entries,
            vec![
                ("G".to_string(), vec!["Growth".to_string()]),
                ("GR".to_string(), vec!["Wildfire".to_string()]),
                ("R".to_string(), vec!["Bolt".to_string()]),
            ]
        );

        let restored = CardCache::from_entries(entries);
        assert_eq!(restored, cache);
        assert_eq!(restored.lookup(&id("RG")), cache.lookup(&id("RG")));
    }

    #[test]
    fn test_restore_overwrites_bucket() {
        let mut cache = gruul_cache();
        cache.restore_from_entries(vec![("R".to_string(), vec!["Shock".to_string()])]);
        assert_eq!(cache.lookup(&id("R")), names(&["Shock"]));
        assert_eq!(cache.bucket("G").unwrap().len(), 1);
    }
}
