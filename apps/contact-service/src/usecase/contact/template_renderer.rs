//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで問い合わせ通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `[Portfolio Contact] {利用者が入力した件名}`（エスケープしない）
//! - **HTML 本文**: すべての入力値を `& < > " '` の 5 文字に限ってエスケープし、
//!   メッセージ中の改行は `<br>` に置換する
//! - **テキスト本文**: 入力値をそのまま埋め込む（`.txt` は自動エスケープ対象外）

use std::collections::HashMap;

use contact_relay_domain::{
    contact::ContactSubmission,
    notification::{EmailMessage, NotificationError},
};
use tera::{Context, Tera, Value};

const HTML_TEMPLATE: &str = "contact_message.html";
const TEXT_TEMPLATE: &str = "contact_message.txt";

/// HTML 本文用のエスケープフィルタ名
const ESCAPE_HTML_FILTER: &str = "escape_html";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`ContactSubmission` から
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();
        // 組み込みの escape は `/` も変換するため、自動エスケープとフィルタの両方を差し替える
        engine.set_escape_fn(escape_html);
        engine.register_filter(ESCAPE_HTML_FILTER, escape_html_filter);

        engine
            .add_raw_templates(vec![
                (
                    HTML_TEMPLATE,
                    include_str!("../../../templates/contact_message.html"),
                ),
                (
                    TEXT_TEMPLATE,
                    include_str!("../../../templates/contact_message.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 問い合わせから通知メールを生成する
    ///
    /// 宛先は `recipient`、返信先は利用者が入力したメールアドレスになる。
    pub fn render(
        &self,
        submission: &ContactSubmission,
        sender: &str,
        recipient: &str,
    ) -> Result<EmailMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("name", submission.name());
        context.insert("email", submission.email());
        context.insert("subject", submission.subject());
        context.insert("message", submission.message());

        let html_body = self
            .engine
            .render(HTML_TEMPLATE, &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;
        let text_body = self
            .engine
            .render(TEXT_TEMPLATE, &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            from:      sender.to_string(),
            to:        vec![recipient.to_string()],
            reply_to:  vec![submission.email().to_string()],
            subject:   submission.subject_line(),
            html_body,
            text_body,
        })
    }
}

/// `& < > " '` のみを文字参照に置き換える
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_html_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = tera::try_get_value!(ESCAPE_HTML_FILTER, "value", String, value);
    Ok(Value::String(escape_html(&text)))
}

#[cfg(test)]
mod tests {
    use contact_relay_domain::contact::ContactPayload;
    use pretty_assertions::assert_eq;

    use super::*;

    fn submission(body: &str) -> ContactSubmission {
        ContactPayload::parse(Some(body))
            .unwrap()
            .validate()
            .unwrap()
    }

    fn render(body: &str) -> EmailMessage {
        TemplateRenderer::new()
            .unwrap()
            .render(
                &submission(body),
                "noreply@example.com",
                "owner@example.com",
            )
            .unwrap()
    }

    #[test]
    fn test_送信元_宛先_返信先_件名を設定する() {
        let email = render(
            r#"{"name":"Taro","email":"taro@example.com","subject":"Hello","message":"Hi"}"#,
        );

        assert_eq!(email.from, "noreply@example.com");
        assert_eq!(email.to, vec!["owner@example.com".to_string()]);
        assert_eq!(email.reply_to, vec!["taro@example.com".to_string()]);
        assert_eq!(email.subject, "[Portfolio Contact] Hello");
    }

    #[test]
    fn test_テキスト本文の形式() {
        let email = render(
            r#"{"name":"Taro","email":"taro@example.com","subject":"Hello","message":"line1\nline2"}"#,
        );

        assert_eq!(
            email.text_body,
            "New contact form submission\n\nName: Taro\nEmail: taro@example.com\nSubject: \
             Hello\n\nMessage:\nline1\nline2"
        );
    }

    #[test]
    fn test_html本文の形式() {
        let email = render(
            r#"{"name":"Taro","email":"taro@example.com","subject":"Hello","message":"line1\nline2"}"#,
        );

        assert_eq!(
            email.html_body,
            "<html><body>\n<h2>New Contact Form Submission</h2>\n<p><strong>Name:</strong> \
             Taro</p>\n<p><strong>Email:</strong> taro@example.com</p>\n<p><strong>Subject:</strong> \
             Hello</p>\n<hr>\n<p>line1<br>line2</p>\n</body></html>"
        );
    }

    #[test]
    fn test_html本文では入力値をエスケープしてから改行を置換する() {
        let email = render(
            r#"{"name":"<b>Eve</b>","email":"eve@example.com","subject":"\"quoted\" & more","message":"a<b>c\nd"}"#,
        );

        assert!(email.html_body.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(email.html_body.contains("&quot;quoted&quot; &amp; more"));
        assert!(email.html_body.contains("<p>a&lt;b&gt;c<br>d</p>"));
        assert!(!email.html_body.contains("<b>"));
    }

    #[test]
    fn test_テキスト本文と件名はエスケープしない() {
        let email = render(
            r#"{"name":"<b>Eve</b>","email":"eve@example.com","subject":"<i>hi</i> & bye","message":"a<b>c"}"#,
        );

        assert_eq!(email.subject, "[Portfolio Contact] <i>hi</i> & bye");
        assert!(email.text_body.contains("Name: <b>Eve</b>"));
        assert!(email.text_body.contains("Subject: <i>hi</i> & bye"));
        assert!(email.text_body.ends_with("Message:\na<b>c"));
    }

    #[test]
    fn test_前後の空白は除去済みの値で描画する() {
        let email = render(
            r#"{"name":"  Taro ","email":" taro@example.com ","subject":" Hello ","message":"  Hi  "}"#,
        );

        assert!(email.text_body.contains("Name: Taro\n"));
        assert!(email.text_body.ends_with("Message:\nHi"));
        assert_eq!(email.reply_to, vec!["taro@example.com".to_string()]);
    }

    #[test]
    fn test_スラッシュはエスケープしない() {
        let email = render(
            r#"{"name":"A/B","email":"ab@example.com","subject":"a/b","message":"see https://a.b/c\nx"}"#,
        );

        assert!(email.html_body.contains("<p>see https://a.b/c<br>x</p>"));
        assert!(email.html_body.contains("<strong>Name:</strong> A/B</p>"));
        assert!(!email.html_body.contains("&#x2F;"));
    }

    #[test]
    fn test_escape_htmlは5文字のみを置換する() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a> 1/2"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt; 1/2"
        );
    }
}
