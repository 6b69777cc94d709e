use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// URLパスからサロゲートキーのパラメータ名を推測する
fn key_param_name(path: &str) -> &'static str {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.first().copied() {
        Some("users") => "user_key",
        Some("plans") => "subscription_plan_key",
        Some("dates") => "date_key",
        Some("campaigns") => "campaign_key",
        Some("channels") => "channel_key",
        _ => "key",
    }
}

/// 整数サロゲートキーのパスパラメータExtractor
#[derive(Debug, Clone, Copy)]
pub struct KeyPath(pub i32);

impl<S> FromRequestParts<S> for KeyPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                let param_name = key_param_name(parts.uri.path());
                AppError::BadRequest(format!("Missing path parameter '{}': {}", param_name, e))
            })?;

        let key = raw.trim().parse::<i32>().map_err(|_| {
            let param_name = key_param_name(parts.uri.path());
            AppError::BadRequest(format!(
                "Invalid key format for '{}': '{}'",
                param_name, raw
            ))
        })?;

        Ok(KeyPath(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_param_name_from_resource() {
        assert_eq!(key_param_name("/users/12"), "user_key");
        assert_eq!(key_param_name("/plans/3"), "subscription_plan_key");
        assert_eq!(key_param_name("/dates/20250101"), "date_key");
        assert_eq!(key_param_name("/unknown/1"), "key");
    }
}
