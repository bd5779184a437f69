//! # Contact Service サーバー
//!
//! Web サイトのお問い合わせフォームを受け付け、サイト管理者へ通知メールを送る公開サービス。
//!
//! ## 処理の流れ
//!
//! ```text
//! ┌──────────────┐  POST /contact  ┌──────────────┐  SendEmail  ┌──────────────┐
//! │   Browser    │────────────────▶│   Contact    │────────────▶│  SES / SMTP  │
//! └──────────────┘◀────────────────└──────────────┘             └──────────────┘
//!                   JSON + CORS
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CONTACT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CONTACT_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `ALLOWED_ORIGIN` | No | `Access-Control-Allow-Origin` の値（デフォルト: `*`） |
//! | `SENDER_EMAIL` | **Yes** | 送信元メールアドレス（SES で検証済みであること） |
//! | `RECIPIENT_EMAIL` | **Yes** | 通知先メールアドレス |
//! | `NOTIFICATION_BACKEND` | No | `ses` / `smtp` / `noop`（デフォルト: `ses`） |
//! | `SES_ENDPOINT_URL` | No | SES エンドポイント（LocalStack 使用時） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP 接続先（デフォルト: `localhost:1025`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（Mailpit）
//! NOTIFICATION_BACKEND=smtp SENDER_EMAIL=noreply@example.com \
//!   RECIPIENT_EMAIL=owner@example.com cargo run -p contact-relay-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use contact_relay_service::{
    app_builder::{build_app, build_notification_sender},
    config::ServiceConfig,
    handler::ContactState,
    usecase::{ContactUseCaseImpl, TemplateRenderer},
};
use contact_relay_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

const SERVICE_NAME: &str = "contact-relay";

/// Contact Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env(SERVICE_NAME));
    let _app_span = tracing::info_span!("app", service = SERVICE_NAME).entered();

    // 設定読み込み
    let config = ServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Contact Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // 送信実装を初期化
    let sender = build_notification_sender(&config.notification).await;
    tracing::info!(
        backend = %config.notification.backend,
        "通知バックエンドを初期化しました"
    );

    let renderer = TemplateRenderer::new().context("テンプレートの読み込みに失敗しました")?;
    let contact_state = Arc::new(ContactState {
        usecase: ContactUseCaseImpl::new(sender, renderer, &config.contact),
    });

    let app = build_app(contact_state, config.contact.allowed_origin.clone());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Contact Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
