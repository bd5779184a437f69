//! # 問い合わせ受付ユースケース
//!
//! 本文の解析 → 受付ルールの適用 → 通知メール生成 → 送信 を順に行う。
//!
//! 1 リクエストにつき送信要求は高々 1 回。入力エラーの場合は送信しない。
//! 再送・重複排除は行わない。

mod template_renderer;

use std::sync::Arc;

use contact_relay_domain::ContactPayload;
use contact_relay_infra::NotificationSender;
use contact_relay_shared::{event_log::event, log_business_event};
pub use template_renderer::TemplateRenderer;

use crate::{config::ContactConfig, error::ContactError};

/// 問い合わせ受付ユースケース実装
pub struct ContactUseCaseImpl {
    sender:          Arc<dyn NotificationSender>,
    renderer:        TemplateRenderer,
    sender_email:    String,
    recipient_email: String,
}

impl ContactUseCaseImpl {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        renderer: TemplateRenderer,
        config: &ContactConfig,
    ) -> Self {
        Self {
            sender,
            renderer,
            sender_email: config.sender_email.clone(),
            recipient_email: config.recipient_email.clone(),
        }
    }

    /// 問い合わせを受け付けて通知メールを送信する
    ///
    /// `body` が `None` または空文字の場合は空オブジェクトとして扱う
    /// （結果として必須フィールド欠落になる）。
    pub async fn submit(&self, body: Option<&str>) -> Result<(), ContactError> {
        let submission = ContactPayload::parse(body)?.validate()?;
        let email = self
            .renderer
            .render(&submission, &self.sender_email, &self.recipient_email)?;

        match self.sender.send_email(&email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::MESSAGE_SENT,
                    event.result = event::result::SUCCESS,
                    "問い合わせメール送信成功"
                );
                Ok(())
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::MESSAGE_FAILED,
                    event.result = event::result::FAILURE,
                    error.code = e.code().unwrap_or_default(),
                    "問い合わせメール送信失敗"
                );
                Err(e.into())
            }
        }
    }
}
