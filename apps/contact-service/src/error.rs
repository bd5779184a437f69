//! # Contact Service エラー定義
//!
//! 問い合わせ受付で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー | ステータス | 本文 `error` |
//! |--------|-----------|--------------|
//! | 本文が JSON オブジェクトでない | 400 | `Invalid request body` |
//! | 必須フィールド欠落 | 400 | `All fields are required` |
//! | メッセージ超過 | 400 | `Message is too long` |
//! | 配信プロバイダが送信を拒否 | 500 | `Failed to send message. Please try again later.` |
//! | その他の失敗 | 500 | `Internal server error` |
//!
//! 500 系の本文にはプロバイダのエラーコードや詳細を含めない（ログにのみ出力する）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contact_relay_domain::{ContactValidationError, NotificationError};
use contact_relay_shared::{ErrorResponse, event_log::error};
use thiserror::Error;

/// 配信プロバイダが送信を拒否した場合の文言
const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

/// Contact Service で発生するエラー
#[derive(Debug, Error)]
pub enum ContactError {
    /// 入力が受付ルールを満たさない
    #[error("入力エラー: {0}")]
    Validation(#[from] ContactValidationError),

    /// メール生成・送信の失敗
    #[error("通知エラー: {0}")]
    Notification(#[from] NotificationError),
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ContactError::Validation(e) => (StatusCode::BAD_REQUEST, ErrorResponse::new(client_message(*e))),
            ContactError::Notification(e @ NotificationError::Rejected { code, .. }) => {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::PROVIDER_REJECTED,
                    error.code = %code,
                    "メール配信プロバイダが送信を拒否: {}",
                    e
                );
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(SEND_FAILED_MESSAGE))
            }
            ContactError::Notification(e @ NotificationError::Unexpected(_)) => {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::PROVIDER_UNEXPECTED,
                    "メール送信で予期しないエラー: {}",
                    e
                );
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal_error())
            }
            ContactError::Notification(e @ NotificationError::TemplateFailed(_)) => {
                tracing::error!(
                    error.category = error::category::INTERNAL,
                    error.kind = error::kind::TEMPLATE,
                    "通知メールの生成に失敗: {}",
                    e
                );
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal_error())
            }
        };

        (status, Json(body)).into_response()
    }
}

/// 入力エラーの利用者向け文言
fn client_message(error: ContactValidationError) -> &'static str {
    match error {
        ContactValidationError::InvalidBody => "Invalid request body",
        ContactValidationError::MissingFields => "All fields are required",
        ContactValidationError::MessageTooLong => "Message is too long",
    }
}
