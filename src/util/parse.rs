use url::Url;

use crate::error::{internal::InternalError, AppError};

/// Longest handle either platform accepts.
const MAX_HANDLE_LEN: usize = 50;

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Normalizes operator input into a channel handle.
///
/// Accepts a bare handle (`Gaules`), an `@`-prefixed handle (`@gaules`) or a channel
/// URL (`https://www.twitch.tv/gaules`, `kick.com/gaules`). The result is lowercase and
/// contains only ASCII letters, digits, `_` and `-`.
///
/// # Returns
/// - `Ok(String)` - Normalized handle
/// - `Err(AppError::BadRequest)` - Empty input or invalid characters
pub fn normalize_handle(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();

    let candidate = if trimmed.contains('/') {
        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let url = Url::parse(&with_scheme)
            .map_err(|e| AppError::BadRequest(format!("Invalid channel URL '{}': {}", input, e)))?;

        url.path_segments()
            .and_then(|mut segments| segments.find(|s| !s.is_empty()))
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Channel URL '{}' has no channel name", input))
            })?
    } else {
        trimmed.to_string()
    };

    let handle = candidate.trim_start_matches('@').to_ascii_lowercase();

    if handle.is_empty() {
        return Err(AppError::BadRequest("Channel name is required".to_string()));
    }

    if handle.len() > MAX_HANDLE_LEN {
        return Err(AppError::BadRequest(format!(
            "Channel name '{}' is longer than {} characters",
            handle, MAX_HANDLE_LEN
        )));
    }

    if !handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::BadRequest(format!(
            "Channel name '{}' contains invalid characters",
            handle
        )));
    }

    Ok(handle)
}
