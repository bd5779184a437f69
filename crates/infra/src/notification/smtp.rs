//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use contact_relay_domain::notification::{EmailMessage, NotificationError};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp,
};

use super::NotificationSender;

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// Mailpit（開発）や SMTP リレー（テスト環境）で使用する。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    pub fn new(host: &str, port: u16) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self { transport }
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(classify_smtp_error)?;

        Ok(())
    }
}

/// `EmailMessage` から multipart/alternative のメッセージを構築する
fn build_message(email: &EmailMessage) -> Result<Message, NotificationError> {
    let mut builder = Message::builder()
        .from(parse_mailbox(&email.from, "送信元")?)
        .subject(&email.subject);

    for to in &email.to {
        builder = builder.to(parse_mailbox(to, "宛先")?);
    }
    for reply_to in &email.reply_to {
        builder = builder.reply_to(parse_mailbox(reply_to, "返信先")?);
    }

    builder
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(email.text_body.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(email.html_body.clone()),
                ),
        )
        .map_err(|e| NotificationError::Unexpected(format!("メッセージ構築失敗: {e}")))
}

fn parse_mailbox(address: &str, label: &str) -> Result<Mailbox, NotificationError> {
    address
        .parse()
        .map_err(|e| NotificationError::Unexpected(format!("{label}アドレス不正: {e}")))
}

/// SMTP エラーを分類する
///
/// サーバーが 4xx / 5xx 応答を返した場合のみ [`NotificationError::Rejected`] とし、
/// 応答コードをエラーコードとして扱う。接続失敗などは [`NotificationError::Unexpected`]。
fn classify_smtp_error(error: smtp::Error) -> NotificationError {
    match error.status() {
        Some(code) if error.is_permanent() || error.is_transient() => NotificationError::Rejected {
            code:    code.to_string(),
            message: error.to_string(),
        },
        _ => NotificationError::Unexpected(format!("SMTP 送信失敗: {error}")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_email() -> EmailMessage {
        EmailMessage {
            from:      "noreply@example.com".to_string(),
            to:        vec!["owner@example.com".to_string()],
            reply_to:  vec!["visitor@example.com".to_string()],
            subject:   "[Portfolio Contact] Hello".to_string(),
            html_body: "<p>Hello</p>".to_string(),
            text_body: "Hello".to_string(),
        }
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpNotificationSender>();
    }

    #[test]
    fn 返信先と件名を含むメッセージを構築する() {
        let message = build_message(&make_email()).unwrap();
        let headers = message.headers();

        assert!(
            headers
                .get_raw("Reply-To")
                .is_some_and(|value| value.contains("visitor@example.com"))
        );
        assert!(
            headers
                .get_raw("To")
                .is_some_and(|value| value.contains("owner@example.com"))
        );
        assert_eq!(
            headers.get_raw("Subject"),
            Some("[Portfolio Contact] Hello")
        );
    }

    #[test]
    fn 返信先アドレスが不正ならunexpectedを返す() {
        let email = EmailMessage {
            reply_to: vec!["not an address".to_string()],
            ..make_email()
        };

        let error = build_message(&email).unwrap_err();

        assert!(matches!(error, NotificationError::Unexpected(_)));
    }
}
