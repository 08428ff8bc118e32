use crate::domain::model::{CardLine, DeckExport};
use crate::utils::error::{Result, StaplerError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COMMANDER: &str = "Progenitus";
pub const DEFAULT_DECK_NAME: &str = "Brawl Stapler Import";
pub const FILLER_CARD: &str = "Wastes";
/// Non-commander cards in a Brawl deck.
pub const BRAWL_DECK_SIZE: usize = 99;
/// The import target refuses anything larger.
pub const IMPORT_CARD_LIMIT: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub commander_name: String,
    pub deck_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            commander_name: DEFAULT_COMMANDER.to_string(),
            deck_name: DEFAULT_DECK_NAME.to_string(),
        }
    }
}

/// Applies the deck-size rules to a list of card names.
///
/// * under 99 cards: padded with one aggregated [`FILLER_CARD`] line, commander kept
/// * exactly 99: as given, commander kept
/// * 100 to 250: as given, no commander, so the importer treats it as a plain singleton deck
/// * over 250: [`StaplerError::DeckTooLarge`]
pub fn build_export<S: AsRef<str>>(
    card_names: &[S],
    options: &ExportOptions,
) -> Result<DeckExport> {
    let count = card_names.len();
    if count > IMPORT_CARD_LIMIT {
        return Err(StaplerError::DeckTooLarge {
            count,
            limit: IMPORT_CARD_LIMIT,
        });
    }

    let mut card_lines: Vec<CardLine> = card_names
        .iter()
        .map(|name| CardLine {
            name: name.as_ref().to_string(),
            quantity: 1,
        })
        .collect();

    if count < BRAWL_DECK_SIZE {
        card_lines.push(CardLine {
            name: FILLER_CARD.to_string(),
            quantity: BRAWL_DECK_SIZE - count,
        });
    }

    let commander_name = if count <= BRAWL_DECK_SIZE {
        Some(options.commander_name.clone())
    } else {
        None
    };

    tracing::debug!(
        "Built export '{}' with {} real cards, commander: {:?}",
        options.deck_name,
        count,
        commander_name
    );

    Ok(DeckExport {
        deck_name: options.deck_name.clone(),
        commander_name,
        card_lines,
    })
}

/// Renders the import text. Line endings are always `\r\n`.
pub fn serialize(export: &DeckExport) -> String {
    let mut out = format!("About\r\nName {}\r\n\r\n", export.deck_name);
    if let Some(commander) = &export.commander_name {
        out.push_str(&format!("Commander\r\n1 {}\r\n\r\n", commander));
    }
    out.push_str("Deck\r\n");
    for line in &export.card_lines {
        out.push_str(&format!("{} {}\r\n", line.quantity, line.name));
    }
    out
}

impl fmt::Display for DeckExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}
