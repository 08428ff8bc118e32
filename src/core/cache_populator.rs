use crate::core::card_cache::CardCache;
use crate::core::colour_parser::parse_identity;
use crate::domain::model::{CardRecord, FileCategory, FileData};
use crate::utils::error::{Result, StaplerError};

/// Outcome of loading a batch of card-list files. A bad file does not stop the batch.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub files_loaded: usize,
    pub cards_loaded: usize,
    pub failures: Vec<(String, StaplerError)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parses one card-list file and inserts its names under the identity named by the file.
pub fn load_file_data_into_cache(
    file_data: &FileData,
    cache: &mut CardCache,
) -> Result<Vec<CardRecord>> {
    let cards = file_data_to_card_list(file_data)?;
    if let Some(first) = cards.first() {
        cache.add_cards(
            &first.colour_requirement,
            cards.iter().map(|card| card.name.as_str()),
        );
    }
    Ok(cards)
}

/// Parses one card-list file without touching a cache.
pub fn file_data_to_card_list(file_data: &FileData) -> Result<Vec<CardRecord>> {
    let colour_requirement =
        parse_identity(&file_data.file_name).map_err(|e| e.in_file(&file_data.file_name))?;
    if colour_requirement.is_mixed() {
        let err = StaplerError::MixedColourless {
            input: file_data.file_name.clone(),
        };
        return Err(err.in_file(&file_data.file_name));
    }

    if file_data.category == FileCategory::Package {
        return Err(StaplerError::PackageMisuse {
            file_name: file_data.file_name.clone(),
        });
    }

    let card_names = file_contents_to_card_names(&file_data.contents);
    if card_names.is_empty() {
        return Err(StaplerError::EmptyCardList);
    }

    Ok(card_names
        .into_iter()
        .map(|name| CardRecord {
            name,
            colour_requirement,
        })
        .collect())
}

/// Splits on `\n`, `\r\n` or a lone `\r` and drops blank lines. Kept lines are not trimmed.
pub fn file_contents_to_card_names(contents: &str) -> Vec<String> {
    contents
        .split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads every file in order, collecting per-file failures instead of stopping.
pub fn load_all<'a, I>(files: I, cache: &mut CardCache) -> LoadReport
where
    I: IntoIterator<Item = &'a FileData>,
{
    let mut report = LoadReport::default();
    for file_data in files {
        match load_file_data_into_cache(file_data, cache) {
            Ok(cards) => {
                tracing::debug!("Loaded {} cards from '{}'", cards.len(), file_data.file_name);
                report.files_loaded += 1;
                report.cards_loaded += cards.len();
            }
            Err(e) => {
                tracing::warn!("Skipping '{}': {}", file_data.file_name, e);
                report.failures.push((file_data.file_name.clone(), e));
            }
        }
    }
    tracing::info!(
        "Loaded {} cards from {} files ({} skipped)",
        report.cards_loaded,
        report.files_loaded,
        report.failures.len()
    );
    report
}
