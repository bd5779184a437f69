//! # エラーレスポンス
//!
//! 公開エンドポイントのエラーレスポンス形式 `{ "error": "..." }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）
//! - 500 系の文言は便利コンストラクタで固定し、内部情報を本文に載せない

use serde::{Deserialize, Serialize};

/// 500 応答で返す固定メッセージ
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// エラーレスポンス
///
/// ステータスコードは HTTP レスポンス側で表現し、本文には利用者向けの文言のみを載せる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// 500 Internal Server Error
    ///
    /// 文言は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE)
    }
}
