//! HTML pages for the create and view states.

use axum::http::StatusCode;

use crate::models::PasteForm;

const TITLE: &str = "QuickShare";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A message box shown above or below the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    fn render(&self) -> String {
        let class = match self.kind {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        };
        format!(
            "<div class=\"notice {class}\">{}</div>\n",
            html_escape(&self.message)
        )
    }
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(heading: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{TITLE}</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 760px; margin: 0 auto; padding: 24px 16px; color: #262730; }}
textarea, input[type="text"] {{ width: 100%; box-sizing: border-box; padding: 8px; font-family: monospace; font-size: 14px; }}
textarea {{ height: 250px; }}
label {{ display: block; margin: 12px 0 4px; font-size: 14px; }}
button, .button {{ display: inline-block; width: 100%; margin-top: 16px; padding: 10px; border: 1px solid #d0d0d8; border-radius: 6px; background: #fff; font-size: 15px; text-align: center; text-decoration: none; color: inherit; cursor: pointer; }}
pre {{ background: #f0f2f6; padding: 16px; border-radius: 6px; overflow-x: auto; white-space: pre-wrap; }}
.notice {{ padding: 12px 16px; border-radius: 6px; margin: 16px 0; }}
.success {{ background: #dff5e3; }}
.info {{ background: #e1ecfb; }}
.warning {{ background: #fdf6d8; }}
.error {{ background: #fde4e4; }}
footer {{ margin-top: 48px; padding-top: 16px; border-top: 1px solid #e6e6ea; font-size: 12px; color: #808495; }}
</style>
</head>
<body>
<h1>{heading}</h1>
{body}
<footer>{TITLE} | Built with axum</footer>
</body>
</html>"#,
        heading = html_escape(heading),
    )
}

/// The create form, keeping the submitted values, plus any notices and the new link.
pub fn create(form: &PasteForm, notices: &[Notice], share_url: Option<&str>) -> String {
    let mut body = String::from(
        "<p>Paste your text or code below to generate a shareable URL.</p>\n\
         <form method=\"post\" action=\"/\">\n",
    );
    body.push_str(&format!(
        "<label for=\"content\">Paste content here...</label>\n\
         <textarea id=\"content\" name=\"content\" placeholder=\"Enter text here...\">{}</textarea>\n\
         <label for=\"custom_id\">Custom ID (Optional)</label>\n\
         <input type=\"text\" id=\"custom_id\" name=\"custom_id\" \
         placeholder=\"e.g., my-meeting-notes\" value=\"{}\">\n\
         <button type=\"submit\">Generate Shareable Link</button>\n\
         </form>\n",
        html_escape(&form.content),
        html_escape(&form.custom_id),
    ));

    for notice in notices {
        body.push_str(&notice.render());
    }

    if let Some(url) = share_url {
        body.push_str(&format!(
            "<h3>Your Shareable Link:</h3>\n<pre><code><a href=\"{url}\">{url}</a></code></pre>\n",
            url = html_escape(url)
        ));
    }

    page(TITLE, &body)
}

/// A stored paste.
pub fn view(slug: &str, content: &str) -> String {
    let body = format!(
        "{notice}<pre><code>{content}</code></pre>\n\
         <a class=\"button\" href=\"/\">Create Your Own</a>\n",
        notice = Notice::info(format!("Viewing link ID: {slug}")).render(),
        content = html_escape(content),
    );
    page("Shared Content", &body)
}

pub fn not_found() -> String {
    let body = format!(
        "{}<a class=\"button\" href=\"/\">Go Home</a>\n",
        Notice::error("Link not found! It may have been deleted or the ID is wrong.").render()
    );
    page(TITLE, &body)
}

pub fn error(status: StatusCode, notices: &[Notice]) -> String {
    let mut body: String = notices.iter().map(Notice::render).collect();
    body.push_str("<a class=\"button\" href=\"/\">Go Home</a>\n");
    page(status.canonical_reason().unwrap_or("Error"), &body)
}
