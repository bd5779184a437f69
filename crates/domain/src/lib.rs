//! # Contact Relay ドメイン層
//!
//! 問い合わせフォームの受付ルールと、送信するメールのモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（メール配信プロバイダ）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`contact`] - 問い合わせペイロードのデコードとバリデーション
//! - [`notification`] - 送信メールとメール送信エラー
//!
//! ## 使用例
//!
//! ```rust
//! use contact_relay_domain::contact::ContactPayload;
//!
//! let payload = ContactPayload::parse(Some(
//!     r#"{"name":"Ada","email":"ada@example.com","subject":"Hi","message":"Hello"}"#,
//! ))
//! .unwrap();
//! let submission = payload.validate().unwrap();
//!
//! assert_eq!(submission.subject_line(), "[Portfolio Contact] Hi");
//! ```

pub mod contact;
pub mod notification;

pub use contact::{ContactPayload, ContactSubmission, ContactValidationError};
pub use notification::{EmailMessage, NotificationError};
