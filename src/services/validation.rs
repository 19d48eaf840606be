use anyhow::{anyhow, Result};

const MAX_NAME_LENGTH: usize = 100;
const MAX_TEXT_LENGTH: usize = 1000;

/// Input checks applied before any write reaches the database
pub struct ValidationService;

impl ValidationService {
    /// Validate a platform name, returning it without surrounding whitespace
    pub fn validate_platform_name(name: &str) -> Result<String> {
        Self::require_text("name", name, MAX_NAME_LENGTH)
    }

    /// Validate the human-readable guidance of a command
    pub fn validate_how_to(how_to: &str) -> Result<String> {
        Self::require_text("howTo", how_to, MAX_TEXT_LENGTH)
    }

    /// Validate the executable text of a command
    pub fn validate_command_line(command_line: &str) -> Result<String> {
        Self::require_text("commandLine", command_line, MAX_TEXT_LENGTH)
    }

    fn require_text(field: &str, value: &str, max_length: usize) -> Result<String> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(anyhow!("{} cannot be empty", field));
        }

        if trimmed.chars().count() > max_length {
            return Err(anyhow!(
                "{} is too long (max {} characters)",
                field,
                max_length
            ));
        }

        Ok(trimmed.to_string())
    }
}
