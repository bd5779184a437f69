//! # Contact Service アプリケーション構築
//!
//! 送信実装の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。
//!
//! ## レイヤー構成（外側から）
//!
//! 1. `SetRequestIdLayer`: リクエスト受信時に UUID v7 を生成（またはクライアント提供値を使用）
//! 2. `TraceLayer`: カスタムスパンに request_id を含め、全ログに自動注入
//! 3. `PropagateRequestIdLayer`: レスポンスヘッダーに X-Request-Id をコピー
//! 4. CORS ヘッダー: 成功・失敗・プリフライトを問わず全レスポンスに固定値を上書き設定

use std::sync::Arc;

use axum::{
    Router,
    http::{
        HeaderValue,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
            CONTENT_TYPE,
        },
    },
    routing::{any, get},
};
use contact_relay_infra::notification::{
    self,
    NoopNotificationSender,
    NotificationSender,
    SesNotificationSender,
    SmtpNotificationSender,
};
use contact_relay_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{
    config::{NotificationBackend, NotificationConfig},
    handler::{ContactState, health_check, submit_contact},
};

/// 許可するリクエストヘッダー
const ALLOWED_HEADERS: &str = "Content-Type";
/// 許可するメソッド
const ALLOWED_METHODS: &str = "POST,OPTIONS";
/// すべてのレスポンスに付与する Content-Type
const JSON_CONTENT_TYPE: &str = "application/json";

/// 設定に応じた送信実装を構築する
pub async fn build_notification_sender(config: &NotificationConfig) -> Arc<dyn NotificationSender> {
    match config.backend {
        NotificationBackend::Ses => {
            let client = notification::ses::create_client(config.ses_endpoint_url.as_deref()).await;
            Arc::new(SesNotificationSender::new(client))
        }
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSender::new(
            &config.smtp_host,
            config.smtp_port,
        )),
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    }
}

/// ルーターを構築する
///
/// - `/` と `/contact`: 問い合わせ受付（メソッド不問、OPTIONS はプリフライト）
/// - `/health`: ヘルスチェック
pub fn build_app(contact_state: Arc<ContactState>, allowed_origin: HeaderValue) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", any(submit_contact))
        .route("/contact", any(submit_contact))
        .with_state(contact_state)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            allowed_origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification_config(backend: NotificationBackend) -> NotificationConfig {
        NotificationConfig {
            backend,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            ses_endpoint_url: None,
        }
    }

    #[tokio::test]
    async fn test_noopバックエンドの送信は常に成功する() {
        let sender = build_notification_sender(&notification_config(NotificationBackend::Noop)).await;
        let email = contact_relay_domain::EmailMessage {
            from:      "noreply@example.com".to_string(),
            to:        vec!["owner@example.com".to_string()],
            reply_to:  vec!["taro@example.com".to_string()],
            subject:   "[Portfolio Contact] Hello".to_string(),
            html_body: "<p>Hi</p>".to_string(),
            text_body: "Hi".to_string(),
        };

        assert!(sender.send_email(&email).await.is_ok());
    }

    #[tokio::test]
    async fn test_smtpバックエンドは接続せずに構築できる() {
        let _sender = build_notification_sender(&notification_config(NotificationBackend::Smtp)).await;
    }
}
