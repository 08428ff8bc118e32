use crate::config::source::{load_sources, DirectorySource};
use crate::core::cache_populator::{load_all, LoadReport};
use crate::core::card_cache::CardCache;
use crate::core::deck_export::ExportOptions;
use crate::core::packages::PackageCatalog;
use crate::core::snapshot;
use crate::core::stapler::Stapler;
use crate::core::ConfigProvider;
use crate::domain::model::FileCategory;
use crate::utils::error::Result;

/// Runs the load phase: card lists (or a snapshot) into a cache, packages into a catalog.
pub struct StaplerEngine<C: ConfigProvider> {
    config: C,
    snapshot_in: Option<String>,
}

impl<C: ConfigProvider> StaplerEngine<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            snapshot_in: None,
        }
    }

    /// Restore the cache from this snapshot instead of reading card directories.
    pub fn with_snapshot(mut self, path: Option<String>) -> Self {
        self.snapshot_in = path;
        self
    }

    /// Deck and commander names for the export, as configured.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            commander_name: self.config.commander_name().to_string(),
            deck_name: self.config.deck_name().to_string(),
        }
    }

    pub async fn load(&self) -> Result<(Stapler, LoadReport)> {
        tracing::info!("Starting load phase");

        let (cache, report) = match &self.snapshot_in {
            Some(path) => {
                tracing::info!("Restoring card cache from {}", path);
                let entries = snapshot::read_file(path).await?;
                (CardCache::from_entries(entries), LoadReport::default())
            }
            None => self.load_card_lists().await?,
        };
        tracing::info!(
            "Card cache holds {} cards in {} buckets",
            cache.card_count(),
            cache.len()
        );

        let packages = self.load_packages().await?;
        tracing::info!("Loaded {} packages", packages.len());

        Ok((Stapler::new(cache, packages), report))
    }

    async fn load_card_lists(&self) -> Result<(CardCache, LoadReport)> {
        let sources: Vec<DirectorySource> = self
            .config
            .card_directories()
            .iter()
            .map(|dir| {
                let source = DirectorySource::new(dir);
                // Only rarity is inferred here; a card directory is never a package directory.
                if source.category() == FileCategory::Package {
                    DirectorySource::with_category(dir, FileCategory::Rare)
                } else {
                    source
                }
            })
            .collect();
        let files = load_sources(&sources).await?;

        let mut cache = CardCache::new();
        let report = load_all(&files, &mut cache);
        Ok((cache, report))
    }

    async fn load_packages(&self) -> Result<PackageCatalog> {
        match self.config.package_directory() {
            Some(dir) => {
                let source = [DirectorySource::with_category(dir, FileCategory::Package)];
                let files = load_sources(&source).await?;
                Ok(PackageCatalog::from_files(&files))
            }
            None => Ok(PackageCatalog::new()),
        }
    }
}
