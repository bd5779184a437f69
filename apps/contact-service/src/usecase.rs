//! # ユースケース層
//!
//! Contact Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: 送信実装を `Arc<dyn NotificationSender>` で外部から注入
//! - **薄いハンドラ**: ハンドラは HTTP の入出力のみ扱い、受付の流れはユースケースに集約

pub mod contact;

pub use contact::{ContactUseCaseImpl, TemplateRenderer};
