use crate::utils::error::{Result, VenueError};
use std::collections::HashMap;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(VenueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(VenueError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(VenueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| VenueError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VenueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// `[api]` 區段共用的檢查：基底 URL 與每個標頭名稱、值皆不可為空
pub fn validate_api_settings(base_url: &str, headers: &HashMap<String, String>) -> Result<()> {
    validate_url("api.base_url", base_url)?;
    for (name, value) in headers {
        validate_non_empty_string("api.headers", name)?;
        validate_non_empty_string(&format!("api.headers.{}", name), value)?;
    }
    Ok(())
}

/// 檢查數值範圍；用於使用者輸入而非設定檔，因此回傳 ValidationError
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 不會通過任何比較，需明確排除
    if !(value >= min && value <= max) {
        return Err(VenueError::ValidationError {
            message: format!(
                "{} must be between {} and {} (got {})",
                field_name, min, max, value
            ),
        });
    }
    Ok(())
}
