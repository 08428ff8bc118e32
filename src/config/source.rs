use crate::domain::model::{FileCategory, FileData};
use crate::domain::ports::CardListSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads every regular file in one directory.
///
/// The file stem becomes `FileData::file_name`, so `UR.txt` and `UR` both
/// name the Izzet bucket. Dotfiles are skipped.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    directory: PathBuf,
    category: FileCategory,
}

impl DirectorySource {
    /// Category is inferred from the path, see [`FileCategory::from_directory`].
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        let category = FileCategory::from_directory(&directory.to_string_lossy());
        Self {
            directory,
            category,
        }
    }

    pub fn with_category(directory: impl Into<PathBuf>, category: FileCategory) -> Self {
        Self {
            directory: directory.into(),
            category,
        }
    }

    pub fn category(&self) -> FileCategory {
        self.category
    }
}

#[async_trait]
impl CardListSource for DirectorySource {
    async fn load(&self) -> Result<Vec<FileData>> {
        tracing::debug!("Reading {:?} files from {}", self.category, self.directory.display());

        let mut entries = tokio::fs::read_dir(&self.directory).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }

            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping file with non UTF-8 name: {}", path.display());
                continue;
            };
            if stem.starts_with('.') {
                continue;
            }

            let bytes = tokio::fs::read(&path).await?;
            let contents = match String::from_utf8(bytes) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::warn!("{} is not valid UTF-8, replacing bad bytes", path.display());
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            files.push(FileData::new(stem, self.category, contents));
        }

        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        tracing::debug!("Read {} files from {}", files.len(), self.directory.display());
        Ok(files)
    }
}

/// Loads several sources one after another, keeping their order.
pub async fn load_sources<S: CardListSource>(sources: &[S]) -> Result<Vec<FileData>> {
    let mut files = Vec::new();
    for source in sources {
        files.extend(source.load().await?);
    }
    Ok(files)
}
