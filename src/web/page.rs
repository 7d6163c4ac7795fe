//! Server-rendered HTML for the single page of the app.

use crate::image::accept_attribute;
use crate::web::submit::SubmitOutcome;

pub const TITLE: &str = "AI Chemist App";

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; color: #262730; }
form { display: flex; flex-wrap: wrap; gap: 1.5rem; align-items: flex-end; }
form .col { flex: 1 1 20rem; display: flex; flex-direction: column; gap: 0.4rem; }
button { padding: 0.5rem 1.2rem; border: 1px solid #d0d0d8; border-radius: 0.4rem; background: #fff; cursor: pointer; }
.banner { padding: 0.8rem 1rem; border-radius: 0.4rem; margin: 1rem 0; }
.error { background: #ffe2e2; color: #7d1a1a; }
.preview figcaption { font-size: 0.85rem; color: #808495; }
.result { white-space: pre-wrap; line-height: 1.5; }
"#;

/// Everything the page may show
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub warning: Option<&'a str>,
    pub user_input: &'a str,
    pub preview: Option<&'a str>,
    pub outcome: Option<&'a SubmitOutcome>,
}

/// Escape text for use in HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn error_banner(message: &str) -> String {
    format!(r#"<div class="banner error" role="alert">{}</div>"#, escape_html(message))
}

pub fn render(view: &PageView<'_>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>{}</title>\n<style>{}</style>\n", TITLE, STYLE));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", TITLE));

    if let Some(warning) = view.warning {
        html.push_str(&error_banner(warning));
        html.push('\n');
    }

    html.push_str(&format!(
        r#"<form method="post" action="/analyze" enctype="multipart/form-data">
<div class="col">
<label for="input">Additional Input (optional): </label>
<input type="text" id="input" name="user_input" value="{}">
</div>
<div class="col">
<label for="image">Choose an image of tablets...</label>
<input type="file" id="image" name="image" accept="{}">
</div>
<button type="submit">Analyze Tablets</button>
</form>
"#,
        escape_html(view.user_input),
        accept_attribute()
    ));

    if let Some(src) = view.preview {
        html.push_str(&format!(
            r#"<figure class="preview"><img src="{}" width="400" alt="Uploaded Image."><figcaption>Uploaded Image.</figcaption></figure>"#,
            escape_html(src)
        ));
        html.push('\n');
    }

    match view.outcome {
        Some(SubmitOutcome::Analysis(text)) => {
            html.push_str("<h2>Analysis Result</h2>\n");
            html.push_str(&format!(r#"<div class="result">{}</div>"#, escape_html(text)));
            html.push('\n');
        }
        Some(SubmitOutcome::Error(message)) => {
            html.push_str(&error_banner(message));
            html.push('\n');
        }
        None => {}
    }

    html.push_str("</body>\n</html>\n");
    html
}
