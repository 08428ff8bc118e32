use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaplerError {
    #[error("failed to parse {input} with error: Unknown colour input: {character}")]
    InvalidColourCharacter { input: String, character: char },

    #[error("failed to parse {input} with error: Colourless cannot be combined with other colours")]
    MixedColourless { input: String },

    #[error("Empty card list")]
    EmptyCardList,

    #[error("Deck has {count} cards, the import target will not accept more than {limit} cards")]
    DeckTooLarge { count: usize, limit: usize },

    #[error("Cannot add package to card list: {file_name}")]
    PackageMisuse { file_name: String },

    #[error("Unknown package: {name}")]
    UnknownPackage { name: String },

    #[error("{file_name}: {source}")]
    InFile {
        file_name: String,
        #[source]
        source: Box<StaplerError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Format,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StaplerError {
    /// Wraps an error with the name of the source file it came from.
    pub fn in_file(self, file_name: impl Into<String>) -> Self {
        StaplerError::InFile {
            file_name: file_name.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error once all file context has been stripped.
    pub fn root(&self) -> &StaplerError {
        match self {
            StaplerError::InFile { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.root() {
            StaplerError::InvalidColourCharacter { .. }
            | StaplerError::MixedColourless { .. }
            | StaplerError::EmptyCardList
            | StaplerError::PackageMisuse { .. }
            | StaplerError::UnknownPackage { .. } => ErrorCategory::Input,
            StaplerError::DeckTooLarge { .. } => ErrorCategory::Format,
            StaplerError::ConfigError { .. } | StaplerError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            StaplerError::IoError(_)
            | StaplerError::SerializationError(_)
            | StaplerError::InFile { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Format | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.root() {
            StaplerError::InvalidColourCharacter { character, .. } => {
                format!("'{}' is not a colour, use W, U, B, R, G or C", character)
            }
            StaplerError::EmptyCardList => "A card list file contains no card names".to_string(),
            StaplerError::DeckTooLarge { count, limit } => format!(
                "The selection resolved to {} cards but only {} can be imported",
                count, limit
            ),
            StaplerError::UnknownPackage { name } => format!("No package named '{}'", name),
            StaplerError::IoError(e) => format!("Could not read or write a file: {}", e),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root() {
            StaplerError::InvalidColourCharacter { .. } => {
                "Card list files must be named after their colour identity, e.g. UR or C"
            }
            StaplerError::MixedColourless { .. } => {
                "Colourless cards belong in a file named C on their own"
            }
            StaplerError::EmptyCardList => "Add at least one card name or remove the file",
            StaplerError::DeckTooLarge { .. } => "Select fewer colours or packages",
            StaplerError::PackageMisuse { .. } => {
                "Move package files out of the card list directories"
            }
            StaplerError::UnknownPackage { .. } => "Run with --list-packages to see what exists",
            StaplerError::ConfigError { .. } | StaplerError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line flags"
            }
            StaplerError::IoError(_) => "Check that the paths exist and are readable",
            StaplerError::SerializationError(_) => "Regenerate the snapshot file",
            StaplerError::InFile { .. } => "Check the named file",
        }
    }
}

pub type Result<T> = std::result::Result<T, StaplerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_file_prefixes_message_and_keeps_root() {
        let err = StaplerError::EmptyCardList.in_file("UR");
        assert_eq!(err.to_string(), "UR: Empty card list");
        assert!(matches!(err.root(), StaplerError::EmptyCardList));
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_severity_by_category() {
        let too_large = StaplerError::DeckTooLarge {
            count: 260,
            limit: 250,
        };
        assert_eq!(too_large.severity(), ErrorSeverity::High);

        let io = StaplerError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }
}
