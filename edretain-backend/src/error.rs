// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Multiple validation errors")]
    ValidationErrors(Vec<String>),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::DbErr(db_err) => {
                // 制約違反はクライアント起因として扱う
                match db_err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(detail)) => {
                        tracing::warn!(detail = %detail, "Unique constraint violation");
                        (
                            StatusCode::CONFLICT,
                            ErrorResponse::new(
                                "The resource already exists".to_string(),
                                "conflict",
                            ),
                        )
                    }
                    Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                        tracing::warn!(detail = %detail, "Foreign key constraint violation");
                        (
                            StatusCode::BAD_REQUEST,
                            ErrorResponse::new(
                                "A referenced key does not exist".to_string(),
                                "bad_request",
                            ),
                        )
                    }
                    _ => {
                        // サーバーログには詳細を出す
                        tracing::error!(error = ?db_err, "Database error");

                        let status = match db_err {
                            DbErr::RecordNotFound(_) => StatusCode::NOT_FOUND,
                            _ => StatusCode::INTERNAL_SERVER_ERROR,
                        };

                        let (message, details) = match &db_err {
                            DbErr::RecordNotFound(entity) => (
                                "The requested resource was not found".to_string(),
                                Some(json!({ "entity": entity })),
                            ),
                            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => (
                                "The database is unavailable".to_string(),
                                Some(json!({ "operation": "connect" })),
                            ),
                            DbErr::Exec(_) => (
                                "A database operation failed".to_string(),
                                Some(json!({ "operation": "exec" })),
                            ),
                            DbErr::Query(_) => (
                                "A database query failed".to_string(),
                                Some(json!({ "operation": "query" })),
                            ),
                            _ => ("A database error occurred".to_string(), None),
                        };

                        let mut response = ErrorResponse::new(message, "database_error");
                        response.details = details;
                        (status, response)
                    }
                }
            }
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(message, "not_found"),
            ),
            AppError::ValidationError(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(message, "validation_error"),
            ),
            AppError::ValidationErrors(errors) => {
                let mut field_errors = HashMap::new();
                for error in &errors {
                    if let Some((field, message)) = error.split_once(": ") {
                        field_errors
                            .entry(field.to_string())
                            .or_insert_with(Vec::new)
                            .push(message.to_string());
                    }
                }
                let errors_array: Vec<serde_json::Value> =
                    errors.iter().map(|e| json!({"message": e})).collect();
                let mut response =
                    ErrorResponse::new("Validation failed".to_string(), "validation_errors");
                response.validation_errors = Some(field_errors);
                response.errors = Some(errors_array);
                (StatusCode::BAD_REQUEST, response)
            }
            AppError::ValidationFailure(errors) => {
                let mut field_errors: HashMap<String, Vec<String>> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let messages = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map_or_else(|| e.code.to_string(), |m| m.to_string())
                            })
                            .collect();
                        (field.to_string(), messages)
                    })
                    .collect();
                // スキーマレベルの検証エラーは "__all__" に入る
                if field_errors.is_empty() {
                    field_errors.insert("__all__".to_string(), vec!["Invalid input".to_string()]);
                }
                let errors_array: Vec<serde_json::Value> = field_errors
                    .iter()
                    .flat_map(|(field, messages)| {
                        messages
                            .iter()
                            .map(move |msg| json!({"message": format!("{}: {}", field, msg)}))
                    })
                    .collect();
                let mut response =
                    ErrorResponse::new("Validation failed".to_string(), "validation_errors");
                response.validation_errors = Some(field_errors);
                response.errors = Some(errors_array);
                (StatusCode::BAD_REQUEST, response)
            }
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(message, "bad_request"),
            ),
            AppError::Conflict(message) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(message, "conflict"),
            ),
            AppError::InternalServerError(message) => {
                tracing::error!(error = %message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "An internal server error occurred".to_string(),
                        "internal_server_error",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<serde_json::Value>>,
    pub error_type: String,
}

impl ErrorResponse {
    fn new(message: String, error_type: &str) -> Self {
        Self {
            success: false,
            error: message.clone(),
            message,
            details: None,
            validation_errors: None,
            errors: None,
            error_type: error_type.to_string(),
        }
    }
}
