pub mod cache_populator;
pub mod card_cache;
pub mod colour_parser;
pub mod deck_export;
pub mod engine;
pub mod packages;
pub mod snapshot;
pub mod stapler;

pub use crate::domain::colour::{Colour, ColourIdentity};
pub use crate::domain::model::{
    CacheEntries, CardLine, CardRecord, DeckExport, FileCategory, FileData, Package,
};
pub use crate::domain::ports::{CardListSource, ConfigProvider};
pub use crate::utils::error::Result;
