use crate::utils::error::{Result, SyncError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> SyncError {
    SyncError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Trello API base: http(s) only
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

/// 只檢查字串本身，repository 是否存在由 `GitCommitSource::open` 判斷
pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// 必填欄位：空白或未替換的 `${VAR}` 都視為缺少
pub fn validate_required_string(field_name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() || (trimmed.starts_with("${") && trimmed.ends_with('}')) {
        return Err(SyncError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be blank"));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(invalid(
            field_name,
            value,
            format!("Valid values: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("trello.api_base", "https://api.trello.com").is_ok());
        assert!(validate_url("trello.api_base", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("trello.api_base", "").is_err());
        assert!(validate_url("trello.api_base", "invalid-url").is_err());
        assert!(validate_url("trello.api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("sync.since_hours", 1, 1).is_ok());
        assert!(validate_positive_number("sync.since_hours", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("sync.since_hours", 1u64, 1, 8760).is_ok());
        assert!(validate_range("sync.since_hours", 8760u64, 1, 8760).is_ok());
        assert!(validate_range("sync.since_hours", 8761u64, 1, 8760).is_err());
        assert!(validate_range("sync.since_hours", u64::MAX, 1, 8760).is_err());
    }

    #[test]
    fn test_validate_required_string_rejects_placeholders() {
        assert!(validate_required_string("trello.auth_token", "abc123").is_ok());
        assert!(validate_required_string("trello.auth_token", "  ").is_err());
        assert!(matches!(
            validate_required_string("trello.auth_token", "${TRELLO_AUTH_TOKEN}"),
            Err(SyncError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_value_keeps_field_and_value() {
        let err = validate_path("repository.path", "a\0b").unwrap_err();
        assert!(matches!(
            err,
            SyncError::InvalidConfigValueError { ref field, ref value, .. }
                if field == "repository.path" && value == "a\0b"
        ));
        assert!(validate_non_empty_string("verbs.testing", " \t").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("error_handling.on_board_failure", "skip", &["abort", "skip"]).is_ok());
        assert!(validate_one_of("error_handling.on_board_failure", "retry", &["abort", "skip"]).is_err());
    }
}
