//! # テスト用モック送信実装
//!
//! ユースケース・ハンドラのテストで使用するインメモリの `NotificationSender`。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! contact-relay-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contact_relay_domain::notification::{EmailMessage, NotificationError};

use crate::notification::NotificationSender;

/// 送信を記録するモック
///
/// 送信要求はすべて記録される（失敗させる場合も記録してから失敗を返す）。
/// `Clone` で記録領域を共有するため、State に渡した後もテスト側から参照できる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    failure: Option<NotificationError>,
}

impl MockNotificationSender {
    /// 常に成功するモックを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に指定したエラーを返すモックを作成する
    pub fn failing_with(error: NotificationError) -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            failure: Some(error),
        }
    }

    /// 送信要求されたメールの一覧
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(email.clone());

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
