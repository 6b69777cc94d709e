// edretain-backend/src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! サービス層とハンドラー層で共通して使用するエラー処理パターンを提供します。

use crate::error::AppError;
use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};
use validator::ValidationErrors;

/// validatorのValidationErrorsをAppErrorに変換する統一処理
///
/// スキーマレベルの検証エラー（フィールドに紐付かないもの）は `__all__` として扱う。
pub fn convert_validation_errors(validation_errors: ValidationErrors, context: &str) -> AppError {
    warn!(
        context = %context,
        error_count = validation_errors.field_errors().len(),
        "Validation failed"
    );

    let errors: Vec<String> = validation_errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |cow| cow.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();

    AppError::ValidationErrors(errors)
}

/// 単一のバリデーションエラーメッセージを生成
pub fn validation_error(field: &str, message: &str) -> AppError {
    AppError::ValidationError(format!("{}: {}", field, message))
}

/// 内部サーバーエラーをログ付きで生成
pub fn internal_server_error<E: std::fmt::Display>(
    error: E,
    context: &str,
    user_message: &str,
) -> AppError {
    error!(
        error = %error,
        context = %context,
        "Internal server error occurred"
    );
    AppError::InternalServerError(user_message.to_string())
}

/// リソース未発見エラーをログ付きで生成
pub fn not_found_error(resource: &str, identifier: &str, context: &str) -> AppError {
    warn!(
        context = %context,
        resource = %resource,
        identifier = %identifier,
        "Resource not found"
    );
    AppError::NotFound(format!(
        "{} with identifier {} not found",
        resource, identifier
    ))
}

/// 競合エラーをログ付きで生成
pub fn conflict_error(message: &str, context: &str) -> AppError {
    warn!(
        context = %context,
        message = %message,
        "Resource conflict occurred"
    );
    AppError::Conflict(message.to_string())
}

/// 削除時のDBエラー変換。参照中の行を消そうとした外部キー違反は競合扱い
pub fn delete_error(err: DbErr, resource: &str, identifier: &str, context: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => conflict_error(
            &format!("{} {} is still referenced by other rows", resource, identifier),
            context,
        ),
        _ => AppError::DbErr(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(range(min = 0.0, max = 1.0, message = "must be between 0 and 1"))]
        threshold: f64,
    }

    #[test]
    fn test_convert_validation_errors_formats_field_prefix() {
        let errors = Sample { threshold: 1.5 }.validate().unwrap_err();
        match convert_validation_errors(errors, "test") {
            AppError::ValidationErrors(messages) => {
                assert_eq!(messages, vec!["threshold: must be between 0 and 1".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_not_found_error_message() {
        let err = not_found_error("User", "42", "test");
        assert_eq!(err.to_string(), "Item not found: User with identifier 42 not found");
    }

    #[test]
    fn test_delete_error_passes_through_other_db_errors() {
        let err = delete_error(DbErr::Custom("boom".to_string()), "User", "7", "test");
        assert!(matches!(err, AppError::DbErr(DbErr::Custom(_))));
    }
}
