pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{source::DirectorySource, toml_config::TomlConfig, Settings};
pub use crate::core::{
    card_cache::CardCache, colour_parser::parse_identity, deck_export::ExportOptions,
    engine::StaplerEngine, packages::PackageCatalog, stapler::Stapler,
};
pub use crate::domain::colour::{Colour, ColourIdentity};
pub use crate::utils::error::{Result, StaplerError};
