//! # 問い合わせ
//!
//! 問い合わせフォームから送られてくるペイロードと、その受付ルールを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`ContactPayload`] | 受信ペイロード | デコード済み・未検証の入力 |
//! | [`ContactSubmission`] | 問い合わせ | 受付ルールを満たした入力 |
//!
//! ## 受付ルール
//!
//! - 本文が存在しない・空文字の場合は `{}` として扱う（必須チェックで弾かれる）
//! - 本文が JSON オブジェクトとして読めない場合は [`ContactValidationError::InvalidBody`]
//! - 4 フィールドは前後の空白を除去したうえで必須
//! - `message` は [`MAX_MESSAGE_CHARS`] 文字まで（Unicode スカラ値で数える）
//! - メールアドレスの形式は検証しない

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// `message` の最大文字数
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// 通知メール件名の接頭辞
pub const SUBJECT_PREFIX: &str = "[Portfolio Contact] ";

/// 問い合わせの受付エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    /// 本文が JSON オブジェクトとして読めない
    #[error("リクエスト本文が JSON オブジェクトではありません")]
    InvalidBody,

    /// 必須フィールドが空
    #[error("必須フィールドが入力されていません")]
    MissingFields,

    /// `message` が長すぎる
    #[error("メッセージが {MAX_MESSAGE_CHARS} 文字を超えています")]
    MessageTooLong,
}

/// 受信ペイロード
///
/// 各フィールドは、キーが存在しない・`null`・文字列以外の場合に空文字となる。
/// 前後の空白除去と必須チェックは [`validate`](ContactPayload::validate) で行う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactPayload {
    #[serde(deserialize_with = "string_or_empty")]
    pub name:    String,
    #[serde(deserialize_with = "string_or_empty")]
    pub email:   String,
    #[serde(deserialize_with = "string_or_empty")]
    pub subject: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub message: String,
}

impl ContactPayload {
    /// リクエスト本文をデコードする
    ///
    /// 本文なしと空文字は空のペイロードとして成功させる。
    /// JSON として不正な場合と、JSON でもオブジェクト以外（配列・文字列・`null` 等）の場合は
    /// [`ContactValidationError::InvalidBody`] を返す。
    pub fn parse(body: Option<&str>) -> Result<Self, ContactValidationError> {
        let Some(raw) = body.filter(|raw| !raw.is_empty()) else {
            return Ok(Self::default());
        };

        let value: Value =
            serde_json::from_str(raw).map_err(|_| ContactValidationError::InvalidBody)?;

        // 構造体のデシリアライズは配列も位置引数として受け付けてしまうため、先に形を確認する
        if !value.is_object() {
            return Err(ContactValidationError::InvalidBody);
        }

        serde_json::from_value(value).map_err(|_| ContactValidationError::InvalidBody)
    }

    /// 受付ルールを適用して [`ContactSubmission`] に変換する
    pub fn validate(self) -> Result<ContactSubmission, ContactValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let subject = self.subject.trim();
        let message = self.message.trim();

        if [name, email, subject, message].iter().any(|field| field.is_empty()) {
            return Err(ContactValidationError::MissingFields);
        }

        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ContactValidationError::MessageTooLong);
        }

        Ok(ContactSubmission {
            name:    name.to_string(),
            email:   email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        })
    }
}

/// 文字列以外の JSON 値を空文字として受け取る
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

/// 受付ルールを満たした問い合わせ
///
/// [`ContactPayload::validate`] 経由でのみ生成される。
/// 保持する値は空白除去済みで、HTML エスケープは行っていない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name:    String,
    email:   String,
    subject: String,
    message: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 通知メールの件名（接頭辞 + 利用者が入力した件名をそのまま連結）
    pub fn subject_line(&self) -> String {
        format!("{SUBJECT_PREFIX}{}", self.subject)
    }
}
