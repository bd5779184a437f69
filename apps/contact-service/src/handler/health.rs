//! # ヘルスチェックハンドラ
//!
//! Contact Service の稼働状態を確認するためのエンドポイント。
//!
//! ```text
//! GET /health
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0"
//! }
//! ```

use axum::Json;
use contact_relay_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// 送信バックエンドへの疎通は確認しない。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
