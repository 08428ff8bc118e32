use crate::utils::error::{Result, StaplerError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(StaplerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(StaplerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_paths(field_name: &str, paths: &[String]) -> Result<()> {
    for path in paths {
        validate_path(field_name, path)?;
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StaplerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(StaplerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Must be one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("sources.package_directory", "./packages").is_ok());
        assert!(validate_path("sources.package_directory", "").is_err());
        assert!(validate_path("sources.package_directory", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_paths_reports_first_bad_entry() {
        let paths = vec!["./rare".to_string(), "".to_string()];
        let err = validate_paths("sources.card_directories", &paths).unwrap_err();
        assert!(err.to_string().contains("sources.card_directories"));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("export.deck_name", "My Deck").is_ok());
        assert!(validate_non_empty_string("export.deck_name", "   ").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.level", "debug", &["info", "debug"]).is_ok());
        assert!(validate_one_of("logging.level", "loud", &["info", "debug"]).is_err());
    }
}
