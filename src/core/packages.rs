use crate::core::cache_populator::file_contents_to_card_names;
use crate::domain::model::{FileData, Package};
use crate::utils::error::{Result, StaplerError};
use std::collections::{BTreeMap, BTreeSet};

pub fn package_from_file_data(file_data: &FileData) -> Package {
    Package {
        name: file_data.file_name.clone(),
        card_names: file_contents_to_card_names(&file_data.contents),
    }
}

/// Named bags of cards, used to filter a colour lookup.
#[derive(Debug, Clone, Default)]
pub struct PackageCatalog {
    packages: BTreeMap<String, Package>,
}

impl PackageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files<'a, I>(files: I) -> Self
    where
        I: IntoIterator<Item = &'a FileData>,
    {
        let mut catalog = Self::new();
        for file_data in files {
            catalog.insert(package_from_file_data(file_data));
        }
        catalog
    }

    /// Replaces any package with the same name.
    pub fn insert(&mut self, package: Package) {
        tracing::debug!(
            "Registered package '{}' with {} cards",
            package.name,
            package.card_names.len()
        );
        self.packages.insert(package.name.clone(), package);
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Union of the cards in every named package.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<BTreeSet<String>> {
        let mut selected = BTreeSet::new();
        for name in names {
            let name = name.as_ref();
            let package = self.get(name).ok_or_else(|| StaplerError::UnknownPackage {
                name: name.to_string(),
            })?;
            selected.extend(package.card_names.iter().cloned());
        }
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FileCategory;

    fn catalog() -> PackageCatalog {
        PackageCatalog::from_files(&[
            FileData::new("Ramp", FileCategory::Package, "Sol Ring\nCultivate\n"),
            FileData::new("Removal", FileCategory::Package, "Doom Blade\r\nSol Ring\r\n"),
        ])
    }

    #[test]
    fn test_package_from_file_data() {
        let package = package_from_file_data(&FileData::new(
            "Package 1",
            FileCategory::Package,
            "Lightning Bolt\n\n  \nCounterspell",
        ));
        assert_eq!(package.name, "Package 1");
        assert_eq!(package.card_names, vec!["Lightning Bolt", "Counterspell"]);
    }

    #[test]
    fn test_select_unions_packages() {
        let selected = catalog().select(&["Ramp", "Removal"]).unwrap();
        assert_eq!(
            selected.into_iter().collect::<Vec<_>>(),
            vec!["Cultivate", "Doom Blade", "Sol Ring"]
        );
    }

    #[test]
    fn test_select_nothing() {
        assert!(catalog().select::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_package() {
        let err = catalog().select(&["Tokens"]).unwrap_err();
        assert!(matches!(err, StaplerError::UnknownPackage { name } if name == "Tokens"));
    }

    #[test]
    fn test_names_are_sorted() {
        let catalog = catalog();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Ramp", "Removal"]);
        assert_eq!(catalog.len(), 2);
    }
}
