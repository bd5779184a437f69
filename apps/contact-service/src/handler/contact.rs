//! # 問い合わせ受付ハンドラ
//!
//! ブラウザのお問い合わせフォームから直接呼ばれるエンドポイント。
//!
//! ```text
//! OPTIONS /contact   プリフライト（本文なしの 200）
//! POST    /contact   問い合わせ送信
//! ```
//!
//! OPTIONS 以外のメソッドはすべて送信として処理する。
//! CORS ヘッダーはルーター側のレイヤーで全レスポンスに付与する。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use contact_relay_domain::ContactValidationError;
use contact_relay_shared::MessageResponse;

use crate::{error::ContactError, usecase::ContactUseCaseImpl};

/// 送信成功時の文言
const MESSAGE_SENT: &str = "Your message has been sent!";

/// 問い合わせハンドラーの State
pub struct ContactState {
    pub usecase: ContactUseCaseImpl,
}

/// 問い合わせを受け付ける
///
/// 本文を読み取れない場合（サイズ上限超過など）と UTF-8 として読めない場合は、
/// JSON として解析できない本文と同じ扱いにする。
#[tracing::instrument(skip_all, fields(%method))]
pub async fn submit_contact(
    State(state): State<Arc<ContactState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ContactError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    let body = body.map_err(|rejection| {
        tracing::warn!(
            status = %rejection.status(),
            "リクエスト本文の読み取りに失敗: {}",
            rejection.body_text()
        );
        ContactValidationError::InvalidBody
    })?;
    let body = std::str::from_utf8(&body).map_err(|_| ContactValidationError::InvalidBody)?;
    state.usecase.submit(Some(body)).await?;

    Ok((StatusCode::OK, Json(MessageResponse::new(MESSAGE_SENT))).into_response())
}
