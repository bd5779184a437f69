//! # 成功レスポンス
//!
//! 公開エンドポイントの成功レスポンス形式 `{ "message": "..." }` を提供する。

use serde::{Deserialize, Serialize};

/// 成功時のレスポンス本文
///
/// ## 使用例
///
/// ```
/// use contact_relay_shared::MessageResponse;
///
/// let response = MessageResponse::new("done");
/// assert_eq!(response.message, "done");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// 新しい `MessageResponse` を作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializeでmessageキーのみのjsonになる() {
        let response = MessageResponse::new("Your message has been sent!");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "message": "Your message has been sent!" })
        );
    }

    #[test]
    fn test_deserializeでjsonからオブジェクトに変換する() {
        let json = r#"{"message": "ok"}"#;
        let response: MessageResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.message, "ok");
    }
}
