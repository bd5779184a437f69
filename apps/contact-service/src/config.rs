//! # Contact Service 設定
//!
//! 環境変数から Contact Service の設定を読み込む。
//!
//! 起動時に一度だけ読み込み、ハンドラには値として渡す。
//! 必須値の欠落はリクエスト単位のエラーではなく起動失敗として扱う。

use std::{env, str::FromStr};

use axum::http::HeaderValue;
use strum::{Display, EnumString};
use thiserror::Error;

/// `ALLOWED_ORIGIN` 未設定時の値
const DEFAULT_ALLOWED_ORIGIN: &str = "*";

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定（空文字を含む）
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("{key} の値が不正です（{value:?}）: {reason}")]
    Invalid {
        key:    &'static str,
        value:  String,
        reason: String,
    },
}

/// Contact Service の設定
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// 問い合わせ受付の設定
    pub contact:      ContactConfig,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 問い合わせ受付の設定
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// `Access-Control-Allow-Origin` に設定する値
    pub allowed_origin:  HeaderValue,
    /// 送信元メールアドレス
    pub sender_email:    String,
    /// 通知先メールアドレス
    pub recipient_email: String,
}

/// 送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationBackend {
    /// Amazon SES v2 経由で送信（本番）
    Ses,
    /// Mailpit（開発）/ SMTP サーバー経由で送信
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// 通知機能の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える。
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:          NotificationBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:        String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:        u16,
    /// SES エンドポイント URL（LocalStack 使用時に設定、未設定で AWS デフォルト）
    pub ses_endpoint_url: Option<String>,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// テストでプロセスの環境変数を書き換えずに済むよう、参照先を差し替え可能にしている。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            host:         vars.optional("CONTACT_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:         vars.parsed_or("CONTACT_PORT", 3000)?,
            contact:      ContactConfig::from_vars(&vars)?,
            notification: NotificationConfig::from_vars(&vars)?,
        })
    }
}

impl ContactConfig {
    fn from_vars<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let origin = vars
            .optional("ALLOWED_ORIGIN")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin =
            HeaderValue::from_str(&origin).map_err(|e| ConfigError::Invalid {
                key:    "ALLOWED_ORIGIN",
                value:  origin.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            allowed_origin,
            sender_email: vars.required("SENDER_EMAIL")?,
            recipient_email: vars.required("RECIPIENT_EMAIL")?,
        })
    }
}

impl NotificationConfig {
    fn from_vars<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            backend:          vars.parsed_or("NOTIFICATION_BACKEND", NotificationBackend::Ses)?,
            smtp_host:        vars
                .optional("SMTP_HOST")
                .unwrap_or_else(|| "localhost".to_string()),
            smtp_port:        vars.parsed_or("SMTP_PORT", 1025)?,
            ses_endpoint_url: vars.optional("SES_ENDPOINT_URL"),
        })
    }
}

/// 環境変数の参照ヘルパー
///
/// 空文字は未設定と同じに扱う。
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn parsed_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn required_only() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SENDER_EMAIL", "noreply@example.com"),
            ("RECIPIENT_EMAIL", "owner@example.com"),
        ]
    }

    #[test]
    fn test_必須値のみでデフォルトが適用される() {
        let config = load(&required_only()).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.contact.allowed_origin, "*");
        assert_eq!(config.contact.sender_email, "noreply@example.com");
        assert_eq!(config.contact.recipient_email, "owner@example.com");
        assert_eq!(config.notification.backend, NotificationBackend::Ses);
        assert_eq!(config.notification.smtp_host, "localhost");
        assert_eq!(config.notification.smtp_port, 1025);
        assert_eq!(config.notification.ses_endpoint_url, None);
    }

    #[test]
    fn test_全項目を環境変数から読み込む() {
        let config = load(&[
            ("CONTACT_HOST", "127.0.0.1"),
            ("CONTACT_PORT", "8080"),
            ("ALLOWED_ORIGIN", "https://example.com"),
            ("SENDER_EMAIL", "noreply@example.com"),
            ("RECIPIENT_EMAIL", "owner@example.com"),
            ("NOTIFICATION_BACKEND", "smtp"),
            ("SMTP_HOST", "mailpit"),
            ("SMTP_PORT", "2525"),
            ("SES_ENDPOINT_URL", "http://localhost:4566"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.contact.allowed_origin, "https://example.com");
        assert_eq!(config.notification.backend, NotificationBackend::Smtp);
        assert_eq!(config.notification.smtp_host, "mailpit");
        assert_eq!(config.notification.smtp_port, 2525);
        assert_eq!(
            config.notification.ses_endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
    }

    #[test]
    fn test_sender_email未設定は起動エラー() {
        let result = load(&[("RECIPIENT_EMAIL", "owner@example.com")]);

        assert!(matches!(result, Err(ConfigError::Missing("SENDER_EMAIL"))));
    }

    #[test]
    fn test_recipient_email未設定は起動エラー() {
        let result = load(&[("SENDER_EMAIL", "noreply@example.com")]);

        assert!(matches!(result, Err(ConfigError::Missing("RECIPIENT_EMAIL"))));
    }

    #[test]
    fn test_空文字の必須値は未設定として扱う() {
        let result = load(&[
            ("SENDER_EMAIL", "  "),
            ("RECIPIENT_EMAIL", "owner@example.com"),
        ]);

        assert!(matches!(result, Err(ConfigError::Missing("SENDER_EMAIL"))));
    }

    #[test]
    fn test_空文字のallowed_originはデフォルトになる() {
        let mut pairs = required_only();
        pairs.push(("ALLOWED_ORIGIN", ""));

        let config = load(&pairs).unwrap();

        assert_eq!(config.contact.allowed_origin, "*");
    }

    #[test]
    fn test_不正なポート番号はinvalid() {
        let mut pairs = required_only();
        pairs.push(("CONTACT_PORT", "eighty"));

        let result = load(&pairs);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "CONTACT_PORT",
                ..
            })
        ));
    }

    #[test]
    fn test_未知のバックエンドはinvalid() {
        let mut pairs = required_only();
        pairs.push(("NOTIFICATION_BACKEND", "sendgrid"));

        let result = load(&pairs);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "NOTIFICATION_BACKEND",
                ..
            })
        ));
    }

    #[test]
    fn test_ヘッダーに使えないoriginはinvalid() {
        let mut pairs = required_only();
        pairs.push(("ALLOWED_ORIGIN", "https://example.com\n"));

        let result = load(&pairs);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "ALLOWED_ORIGIN",
                ..
            })
        ));
    }

    #[test]
    fn test_notification_backendの文字列変換() {
        assert_eq!(NotificationBackend::from_str("ses").unwrap(), NotificationBackend::Ses);
        assert_eq!(NotificationBackend::from_str("smtp").unwrap(), NotificationBackend::Smtp);
        assert_eq!(NotificationBackend::from_str("noop").unwrap(), NotificationBackend::Noop);
        assert_eq!(NotificationBackend::Ses.to_string(), "ses");
    }
}
