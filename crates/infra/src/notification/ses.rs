//! SES 通知送信実装
//!
//! AWS SES v2 API を使用してメールを送信する。
//! 本番環境で使用する。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::send_email::SendEmailError,
    types::{Body, Content, Destination, EmailContent, Message},
};
use contact_relay_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// サービスエラーにコードが付いていない場合のコード
const UNKNOWN_ERROR_CODE: &str = "Unknown";

/// SES クライアントを作成する
///
/// リージョンと認証情報は SDK のデフォルトチェーンで解決する
/// （`AWS_REGION`、`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`、IAM ロール）。
///
/// # 引数
///
/// * `endpoint` - カスタムエンドポイント URL（例: LocalStack の `http://localhost:4566`）。
///   `None` の場合は AWS SES のデフォルトエンドポイントを使用する。
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let mut config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(endpoint_url) = endpoint {
        config_builder = config_builder.endpoint_url(endpoint_url);
    }

    let config = config_builder.load().await;

    Client::new(&config)
}

/// SES 通知送信
///
/// `aws_sdk_sesv2::Client` をラップする。
/// 送信元アドレスは [`EmailMessage::from`] を使う（SES で検証済みであること）。
pub struct SesNotificationSender {
    client: Client,
}

impl SesNotificationSender {
    /// 新しい SES 送信インスタンスを作成
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationSender for SesNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let destination = Destination::builder()
            .set_to_addresses(Some(email.to.clone()))
            .build();

        let content = EmailContent::builder()
            .simple(
                Message::builder()
                    .subject(build_content(&email.subject, "件名")?)
                    .body(
                        Body::builder()
                            .text(build_content(&email.text_body, "テキスト本文")?)
                            .html(build_content(&email.html_body, "HTML 本文")?)
                            .build(),
                    )
                    .build(),
            )
            .build();

        self.client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .set_reply_to_addresses(Some(email.reply_to.clone()))
            .content(content)
            .send()
            .await
            .map_err(classify_send_error)?;

        Ok(())
    }
}

/// SES の `Content` を構築する
fn build_content(data: &str, label: &str) -> Result<Content, NotificationError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| NotificationError::Unexpected(format!("{label}の構築失敗: {e}")))
}

/// SDK エラーを分類する
///
/// SES がサービスエラー（`MessageRejected`、`Throttling` など）を返した場合のみ
/// [`NotificationError::Rejected`] とし、通信失敗・タイムアウト・リクエスト構築失敗は
/// [`NotificationError::Unexpected`] とする。
fn classify_send_error(error: SdkError<SendEmailError>) -> NotificationError {
    match &error {
        SdkError::ServiceError(service_error) => rejected_from_metadata(service_error.err()),
        _ => NotificationError::Unexpected(format!(
            "SES 送信失敗: {}",
            DisplayErrorContext(&error)
        )),
    }
}

/// エラーメタデータから分類済みの失敗を作る
fn rejected_from_metadata(error: &impl ProvideErrorMetadata) -> NotificationError {
    NotificationError::Rejected {
        code:    error.code().unwrap_or(UNKNOWN_ERROR_CODE).to_string(),
        message: error.message().unwrap_or_default().to_string(),
    }
}
