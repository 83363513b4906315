//! Field-level validators. Each returns `ModelError::Validation` with a
//! message naming the offending field.

use crate::errors::ModelError;

/// Trimmed value must be non-empty and at most `max` characters.
pub fn required(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if v.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: i64) -> Result<(), ModelError> {
    if value < 0 {
        return Err(ModelError::Validation(format!("{field} must be >= 0")));
    }
    Ok(())
}

/// Optional link must be absolute http(s) or a site-local path when present
/// and non-empty. Protocol-relative `//host` links are rejected.
pub fn optional_url(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    match value.map(str::trim) {
        None | Some("") => Ok(()),
        Some(u) if u.starts_with("//") => Err(ModelError::Validation(format!("{field} must not be protocol-relative"))),
        Some(u) if u.starts_with("http://") || u.starts_with("https://") || u.starts_with('/') => Ok(()),
        Some(_) => Err(ModelError::Validation(format!("{field} must be an http(s) URL or an absolute path"))),
    }
}
