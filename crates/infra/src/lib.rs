//! # Contact Relay インフラ層
//!
//! 外部システムとの通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはメール配信プロバイダとの通信の詳細をカプセル化し、
//! ドメイン層とサービス層をプロバイダの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信（SES / SMTP / Noop）
//! - `mock` - テスト用のインメモリ送信実装（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use contact_relay_infra::notification::{self, SesNotificationSender};
//!
//! async fn setup() -> SesNotificationSender {
//!     let client = notification::ses::create_client(None).await;
//!     SesNotificationSender::new(client)
//! }
//! ```

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;

pub use notification::NotificationSender;
