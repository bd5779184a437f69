//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SES（本番用）、SMTP（Mailpit 開発用）、Noop（送信無効化用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **失敗の分類**: プロバイダがエラーコードを返した失敗は
//!   [`NotificationError::Rejected`]、それ以外は [`NotificationError::Unexpected`] に変換する

mod noop;
pub mod ses;
mod smtp;

use async_trait::async_trait;
use contact_relay_domain::notification::{EmailMessage, NotificationError};
pub use noop::NoopNotificationSender;
pub use ses::SesNotificationSender;
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
///
/// 問い合わせ通知の中核。メール送信の具体的な方法を抽象化する。
/// SES / SMTP / Noop の 3 実装を環境変数で切り替える。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
