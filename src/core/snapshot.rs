//! JSON transport for cache entries: `[["RU", ["Shao Jun", ...]], ...]`.

use crate::core::colour_parser::{parse_identity, to_canonical_key};
use crate::domain::model::CacheEntries;
use crate::utils::error::{Result, StaplerError};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub fn to_json(entries: &CacheEntries) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Parses entries and rewrites every key into canonical form.
///
/// Keys that name the same identity (`UR` and `RU`) are merged. A key that is
/// not a colour identity is rejected rather than restored into an unreachable bucket.
pub fn from_json(content: &str) -> Result<CacheEntries> {
    let raw: CacheEntries = serde_json::from_str(content)?;

    let mut buckets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (key, names) in raw {
        let identity = parse_identity(&key).map_err(|e| e.in_file("snapshot"))?;
        if identity.is_empty() {
            return Err(StaplerError::ConfigError {
                message: "snapshot entry has an empty colour key".to_string(),
            });
        }
        let identity = if identity.is_mixed() {
            identity.without_colourless()
        } else {
            identity
        };
        let canonical = to_canonical_key(&identity);
        if canonical != key {
            tracing::warn!("Snapshot key '{}' restored as '{}'", key, canonical);
        }
        buckets.entry(canonical).or_default().extend(names);
    }

    Ok(buckets
        .into_iter()
        .map(|(key, names)| (key, names.into_iter().collect()))
        .collect())
}

pub async fn write_file<P: AsRef<Path>>(path: P, entries: &CacheEntries) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, to_json(entries)?).await?;
    tracing::debug!("Wrote {} cache entries to {}", entries.len(), path.display());
    Ok(())
}

pub async fn read_file<P: AsRef<Path>>(path: P) -> Result<CacheEntries> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    from_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape_is_list_of_pairs() {
        let entries = vec![("RU".to_string(), vec!["Shao Jun".to_string()])];
        let json = to_json(&entries).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!([["RU", ["Shao Jun"]]]));
        assert_eq!(from_json(&json).unwrap(), entries);
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = from_json("{not json").unwrap_err();
        assert!(matches!(err, StaplerError::SerializationError(_)));
    }

    #[test]
    fn test_keys_are_canonicalised_and_merged() {
        let json = r#"[["UR", ["Shao Jun"]], ["RU", ["Tellah"]], ["CG", ["Cultivate"]]]"#;
        let entries = from_json(json).unwrap();
        assert_eq!(
            entries,
            vec![
                ("G".to_string(), vec!["Cultivate".to_string()]),
                ("RU".to_string(), vec!["Shao Jun".to_string(), "Tellah".to_string()]),
            ]
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = from_json(r#"[["XYZ", ["Nothing"]]]"#).unwrap_err();
        assert!(matches!(
            err.root(),
            StaplerError::InvalidColourCharacter { character: 'X', .. }
        ));

        let err = from_json(r#"[["", ["Nothing"]]]"#).unwrap_err();
        assert!(matches!(err, StaplerError::ConfigError { .. }));
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cache.json");
        let entries = vec![
            ("C".to_string(), vec!["Sol Ring".to_string()]),
            ("G".to_string(), vec!["Cultivate".to_string(), "Rampant Growth".to_string()]),
        ];

        write_file(&path, &entries).await.unwrap();
        assert_eq!(read_file(&path).await.unwrap(), entries);
    }
}
