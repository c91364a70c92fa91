//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a space name.
pub const MAX_SPACE_NAME_LEN: usize = 80;

/// Maximum length of task content.
pub const MAX_TASK_CONTENT_LEN: usize = 4000;

/// Maximum length of a floating space note.
pub const MAX_NOTE_CONTENT_LEN: usize = 280;

/// Maximum length of a study-plan prompt.
pub const MAX_PROMPT_LEN: usize = 8000;

/// Validates that a space name is non-blank and within length limits.
pub fn validate_space_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("space_name_blank");
        err.message = Some("Space name must not be blank".into());
        return Err(err);
    }
    if trimmed.len() > MAX_SPACE_NAME_LEN {
        let mut err = ValidationError::new("space_name_length");
        err.message = Some("Space name must not exceed 80 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that task content is non-blank and within length limits.
pub fn validate_task_content(content: &str) -> Result<(), ValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("task_content_blank");
        err.message = Some("Task content must not be blank".into());
        return Err(err);
    }
    if trimmed.len() > MAX_TASK_CONTENT_LEN {
        let mut err = ValidationError::new("task_content_length");
        err.message = Some("Task content must not exceed 4000 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that note content is non-blank and within length limits.
pub fn validate_note_content(content: &str) -> Result<(), ValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("note_content_blank");
        err.message = Some("Note content must not be blank".into());
        return Err(err);
    }
    if trimmed.len() > MAX_NOTE_CONTENT_LEN {
        let mut err = ValidationError::new("note_content_length");
        err.message = Some("Note content must not exceed 280 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a note coordinate is finite.
/// Positions are viewport fractions, but clients may send slight overshoot
/// during drag, so only NaN/infinite values are rejected.
pub fn validate_note_coordinate(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        let mut err = ValidationError::new("note_coordinate");
        err.message = Some("Note coordinate must be a finite number".into());
        Err(err)
    }
}

/// Validates that a study-plan prompt is non-blank and within length limits.
pub fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("prompt_blank");
        err.message = Some("Prompt must not be blank".into());
        return Err(err);
    }
    if trimmed.len() > MAX_PROMPT_LEN {
        let mut err = ValidationError::new("prompt_length");
        err.message = Some("Prompt must not exceed 8000 characters".into());
        return Err(err);
    }
    Ok(())
}
