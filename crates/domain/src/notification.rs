//! # 通知
//!
//! 問い合わせ通知メールに関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **送信結果は `Result` で表現**: 成功 / プロバイダによる分類済みの失敗 / 想定外の失敗 を
//!   [`NotificationError`] のバリアントで区別し、呼び出し側はパターンマッチで応答を決める
//! - **テンプレート分離**: メール本文の生成は service 側の TemplateRenderer が担う

use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// プロバイダがエラーコード付きで送信を拒否した
    ///
    /// SES のサービスエラーや SMTP の 4xx/5xx 応答が該当する。
    /// `code` は運用者向けのログにのみ出力し、利用者には返さない。
    #[error("メール配信プロバイダが送信を拒否 ({code}): {message}")]
    Rejected {
        /// プロバイダのエラーコード（例: `MessageRejected`, `550`）
        code:    String,
        /// プロバイダのエラーメッセージ
        message: String,
    },

    /// 送信処理中の想定外の失敗（接続失敗、メッセージ構築失敗など）
    #[error("メール送信で予期しないエラー: {0}")]
    Unexpected(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

impl NotificationError {
    /// プロバイダのエラーコードを返す（分類済みの失敗のみ）
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            Self::Unexpected(_) | Self::TemplateFailed(_) => None,
        }
    }
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス（プロバイダで検証済みであること）
    pub from:      String,
    /// 送信先メールアドレス
    pub to:        Vec<String>,
    /// 返信先メールアドレス
    pub reply_to:  Vec<String>,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codeは分類済みの失敗でのみ値を返す() {
        let rejected = NotificationError::Rejected {
            code:    "MessageRejected".to_string(),
            message: "Email address is not verified.".to_string(),
        };

        assert_eq!(rejected.code(), Some("MessageRejected"));
        assert_eq!(
            NotificationError::Unexpected("timeout".to_string()).code(),
            None
        );
        assert_eq!(
            NotificationError::TemplateFailed("missing".to_string()).code(),
            None
        );
    }

    #[test]
    fn test_rejectedの表示にコードとメッセージが含まれる() {
        let error = NotificationError::Rejected {
            code:    "Throttling".to_string(),
            message: "Maximum sending rate exceeded.".to_string(),
        };

        let display = error.to_string();
        assert!(display.contains("Throttling"));
        assert!(display.contains("Maximum sending rate exceeded."));
    }
}
