use crate::core::card_cache::CardCache;
use crate::core::deck_export::{build_export, serialize, ExportOptions};
use crate::core::packages::PackageCatalog;
use crate::domain::colour::ColourIdentity;
use crate::domain::model::{CacheEntries, DeckExport};
use crate::utils::error::Result;

/// Query side: a loaded cache plus the package filter.
pub struct Stapler {
    cache: CardCache,
    packages: PackageCatalog,
}

impl Stapler {
    pub fn new(cache: CardCache, packages: PackageCatalog) -> Self {
        Self { cache, packages }
    }

    pub fn from_snapshot(entries: CacheEntries, packages: PackageCatalog) -> Self {
        Self::new(CardCache::from_entries(entries), packages)
    }

    pub fn cache(&self) -> &CardCache {
        &self.cache
    }

    pub fn packages(&self) -> &PackageCatalog {
        &self.packages
    }

    pub fn snapshot(&self) -> CacheEntries {
        self.cache.get_entries()
    }

    /// Cards that are both legal under `identity` and in one of the selected packages.
    pub fn resolve<S: AsRef<str>>(
        &self,
        identity: &ColourIdentity,
        package_names: &[S],
    ) -> Result<Vec<String>> {
        let wanted = self.packages.select(package_names)?;
        let legal = self.cache.lookup(identity);
        let resolved: Vec<String> = legal.intersection(&wanted).cloned().collect();

        tracing::info!(
            "Resolved {} cards for '{}' ({} legal, {} in packages)",
            resolved.len(),
            identity,
            legal.len(),
            wanted.len()
        );
        Ok(resolved)
    }

    pub fn build<S: AsRef<str>>(
        &self,
        identity: &ColourIdentity,
        package_names: &[S],
        options: &ExportOptions,
    ) -> Result<DeckExport> {
        let cards = self.resolve(identity, package_names)?;
        build_export(&cards, options)
    }

    pub fn export<S: AsRef<str>>(
        &self,
        identity: &ColourIdentity,
        package_names: &[S],
        options: &ExportOptions,
    ) -> Result<String> {
        self.build(identity, package_names, options)
            .map(|deck| serialize(&deck))
    }
}
