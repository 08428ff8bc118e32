pub mod source;
pub mod toml_config;

use crate::core::deck_export::ExportOptions;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, StaplerError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_paths, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "brawl-stapler")]
#[command(about = "Build a Brawl deck import from colour-sorted card lists and packages")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Card-list directories; each file is named after its colour identity
    #[arg(long = "cards-dir", value_delimiter = ',')]
    pub cards_dirs: Vec<String>,

    #[arg(long)]
    pub packages_dir: Option<String>,

    /// Colour selection, e.g. "URG"; add C for colourless cards
    #[arg(long, default_value = "")]
    pub colours: String,

    #[arg(long, value_delimiter = ',')]
    pub packages: Vec<String>,

    #[arg(long)]
    pub deck_name: Option<String>,

    #[arg(long)]
    pub commander: Option<String>,

    /// Write the export here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the loaded cache to a JSON snapshot
    #[arg(long)]
    pub snapshot_out: Option<String>,

    /// Restore the cache from a JSON snapshot instead of reading card directories
    #[arg(long)]
    pub snapshot_in: Option<String>,

    #[arg(long, help = "List known packages and exit")]
    pub list_packages: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings after merging the TOML file and command line.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub card_directories: Vec<String>,
    pub package_directory: Option<String>,
    pub snapshot_in: Option<String>,
    pub export: ExportOptions,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = ExportOptions::default();
        Self {
            card_directories: config.sources.card_directories.clone(),
            package_directory: config.sources.package_directory.clone(),
            snapshot_in: config.sources.snapshot.clone(),
            export: ExportOptions {
                commander_name: config
                    .export
                    .commander_name
                    .clone()
                    .unwrap_or(defaults.commander_name),
                deck_name: config.export.deck_name.clone().unwrap_or(defaults.deck_name),
            },
            log_level: config.log_level().map(str::to_string),
        }
    }

    /// Command-line values win over the file.
    #[cfg(feature = "cli")]
    pub fn apply_cli(&mut self, cli: &CliConfig) {
        if !cli.cards_dirs.is_empty() {
            self.card_directories = cli.cards_dirs.clone();
        }
        if cli.packages_dir.is_some() {
            self.package_directory = cli.packages_dir.clone();
        }
        if cli.snapshot_in.is_some() {
            self.snapshot_in = cli.snapshot_in.clone();
        }
        if let Some(deck_name) = &cli.deck_name {
            self.export.deck_name = deck_name.clone();
        }
        if let Some(commander) = &cli.commander {
            self.export.commander_name = commander.clone();
        }
    }

    #[cfg(feature = "cli")]
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Self::from_toml(&file)
            }
            None => Self::default(),
        };
        settings.apply_cli(cli);
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn card_directories(&self) -> &[String] {
        &self.card_directories
    }

    fn package_directory(&self) -> Option<&str> {
        self.package_directory.as_deref()
    }

    fn deck_name(&self) -> &str {
        &self.export.deck_name
    }

    fn commander_name(&self) -> &str {
        &self.export.commander_name
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if self.card_directories.is_empty() && self.snapshot_in.is_none() {
            return Err(StaplerError::ConfigError {
                message: "no card source: give --cards-dir or --snapshot-in".to_string(),
            });
        }
        validate_paths("card_directories", &self.card_directories)?;
        if let Some(dir) = &self.package_directory {
            validate_path("package_directory", dir)?;
        }
        if let Some(snapshot) = &self.snapshot_in {
            validate_path("snapshot_in", snapshot)?;
        }
        validate_non_empty_string("deck_name", &self.export.deck_name)?;
        validate_non_empty_string("commander_name", &self.export.commander_name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_fills_export_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[sources]
card_directories = ["./rare"]

[export]
deck_name = "Izzet Spells"
"#,
        )
        .unwrap();

        let settings = Settings::from_toml(&config);
        assert_eq!(settings.deck_name(), "Izzet Spells");
        assert_eq!(settings.commander_name(), "Progenitus");
        assert_eq!(settings.card_directories, vec!["./rare"]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_requires_a_card_source() {
        let settings = Settings::default();
        assert!(matches!(
            settings.validate(),
            Err(StaplerError::ConfigError { .. })
        ));

        let settings = Settings {
            snapshot_in: Some("cache.json".to_string()),
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_file() {
        let config = TomlConfig::from_toml_str(
            r#"
[sources]
card_directories = ["./rare"]
package_directory = "./packages"

[export]
commander_name = "Kenrith, the Returned King"
"#,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "brawl-stapler",
            "--cards-dir",
            "./a,./b",
            "--commander",
            "Progenitus",
            "--packages",
            "Ramp,Removal",
        ]);

        let mut settings = Settings::from_toml(&config);
        settings.apply_cli(&cli);

        assert_eq!(settings.card_directories, vec!["./a", "./b"]);
        assert_eq!(settings.package_directory.as_deref(), Some("./packages"));
        assert_eq!(settings.commander_name(), "Progenitus");
        assert_eq!(cli.packages, vec!["Ramp", "Removal"]);
        assert_eq!(cli.colours, "");
    }
}
