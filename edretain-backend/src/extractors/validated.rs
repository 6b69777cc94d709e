use crate::error::AppError;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{FromRequest, FromRequestParts, Json, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// クエリ文字列をデシリアライズして検証するExtractor
///
/// 不正な日付や数値などのデコード失敗は `AppError::BadRequest` になる。
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::BadRequest(format!(
                    "Invalid query parameters: {}",
                    rejection.body_text()
                ))
            })?;

        value
            .validate()
            .map_err(|e| convert_validation_errors(e, "query_parameters"))?;

        Ok(ValidatedQuery(value))
    }
}

/// JSONボディをデシリアライズして検証するExtractor
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|e| convert_validation_errors(e, "request_body"))?;

        Ok(ValidatedJson(value))
    }
}
