use crate::domain::error::{DomainError, DomainResult};

/// Trim `value` and check it holds between 1 and `max_len` characters
pub fn required_text(field: &str, value: &str, max_len: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            field, max_len
        )));
    }
    Ok(trimmed.to_string())
}
