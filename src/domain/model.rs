use crate::domain::colour::ColourIdentity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub colour_requirement: ColourIdentity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Uncommon,
    Rare,
    Package,
}

impl FileCategory {
    /// Categorises a source directory by its path.
    pub fn from_directory(directory: &str) -> Self {
        let lower = directory.to_lowercase();
        if lower.contains("uncommon") {
            FileCategory::Uncommon
        } else if lower.contains("rare") {
            FileCategory::Rare
        } else {
            FileCategory::Package
        }
    }
}

/// Raw contents of one source file. Small files, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    pub file_name: String,
    pub category: FileCategory,
    pub contents: String,
}

impl FileData {
    pub fn new(
        file_name: impl Into<String>,
        category: FileCategory,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            category,
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub card_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLine {
    pub name: String,
    pub quantity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckExport {
    pub deck_name: String,
    pub commander_name: Option<String>,
    pub card_lines: Vec<CardLine>,
}

impl DeckExport {
    /// Cards in the deck, counting the commander.
    pub fn total_cards(&self) -> usize {
        let deck: usize = self.card_lines.iter().map(|line| line.quantity).sum();
        deck + usize::from(self.commander_name.is_some())
    }
}

/// Ordered `(identity key, card names)` pairs used to move a cache between contexts.
pub type CacheEntries = Vec<(String, Vec<String>)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_directory() {
        assert_eq!(
            FileCategory::from_directory("card-lists/uncommon"),
            FileCategory::Uncommon
        );
        assert_eq!(FileCategory::from_directory("card-lists/rare"), FileCategory::Rare);
        assert_eq!(FileCategory::from_directory("./public/packages"), FileCategory::Package);
    }

    #[test]
    fn test_total_cards_counts_commander() {
        let export = DeckExport {
            deck_name: "Test".to_string(),
            commander_name: Some("Progenitus".to_string()),
            card_lines: vec![
                CardLine {
                    name: "Sol Ring".to_string(),
                    quantity: 1,
                },
                CardLine {
                    name: "Wastes".to_string(),
                    quantity: 98,
                },
            ],
        };
        assert_eq!(export.total_cards(), 100);
    }
}
