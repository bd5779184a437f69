//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! `jq` で問い合わせ受付の結果を追跡できるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用。tracing の
//! `$($field:ident).+` パターンでサポートされ、JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。呼び出し側のクレートは `tracing` に依存すること。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const CONTACT: &str = "contact";
    }

    /// イベントアクション
    pub mod action {
        pub const MESSAGE_SENT: &str = "contact.message_sent";
        pub const MESSAGE_FAILED: &str = "contact.message_failed";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 外部サービス呼び出し（メール配信プロバイダ）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// アプリケーション内部（テンプレート等）
        pub const INTERNAL: &str = "internal";
    }

    /// エラー種別
    pub mod kind {
        /// プロバイダがエラーコード付きで送信を拒否した
        pub const PROVIDER_REJECTED: &str = "provider_rejected";
        /// プロバイダ呼び出しで想定外の失敗
        pub const PROVIDER_UNEXPECTED: &str = "provider_unexpected";
        pub const TEMPLATE: &str = "template";
    }
}
