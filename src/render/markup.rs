//! Templated markup. Produces the same document as
//! [`TreeRenderer`](super::TreeRenderer) serialized with `Node::to_html`.

use super::view::{Content, PopupView};
use super::{PopupRenderer, Rendered};

/// Escape text for HTML body and attribute positions.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupRenderer;

impl PopupRenderer for MarkupRenderer {
    fn render(&self, view: &PopupView) -> Rendered {
        Rendered::Markup(render_markup(view))
    }
}

pub fn render_markup(view: &PopupView) -> String {
    match &view.content {
        Content::Loading => {
            return concat!(
                r#"<div class="tp-popup tp-loading">"#,
                r#"<span class="tp-spinner"></span>"#,
                r#"<span class="tp-loading-text">Translating...</span>"#,
                "</div>"
            )
            .to_string();
        }
        Content::Error(_) if !view.shows_language_row() => {
            return format!(r#"<div class="tp-popup tp-error">{}</div>"#, error_body(view));
        }
        _ => {}
    }

    let root_class = match view.content {
        Content::Error(_) => "tp-popup tp-error",
        _ => "tp-popup",
    };

    format!(
        r#"<div class="{root_class}">{header}{languages}{body}{footer}</div>"#,
        header = HEADER,
        languages = language_row(view),
        body = body(view),
        footer = footer(view),
    )
}

const HEADER: &str = concat!(
    r#"<div class="tp-header">"#,
    r#"<span class="tp-title">Translation</span>"#,
    "<button class=\"tp-close\" id=\"tp-close\" title=\"Close\">\u{2715}</button>",
    "</div>"
);

fn language_row(view: &PopupView) -> String {
    let options: String = view
        .languages
        .iter()
        .map(|opt| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(&opt.code),
                if opt.selected { " selected" } else { "" },
                escape_html(&opt.name)
            )
        })
        .collect();

    format!(
        concat!(
            r#"<div class="tp-lang-row">"#,
            r#"<div class="tp-lang-field"><label class="tp-lang-label">From</label>"#,
            r#"<div class="tp-lang-display">{}</div></div>"#,
            r#"<div class="tp-lang-field"><label class="tp-lang-label">To</label>"#,
            r#"<select class="tp-lang-select" id="tp-target-lang">{}</select></div>"#,
            "</div>"
        ),
        escape_html(view.source_label_or_default()),
        options
    )
}

fn error_body(view: &PopupView) -> String {
    let message = match &view.content {
        Content::Error(message) => message.as_str(),
        _ => "Translation failed",
    };
    format!(
        "<div class=\"tp-error-body\"><span class=\"tp-error-icon\">\u{26a0}</span><span class=\"tp-error-text\">{}</span></div>",
        escape_html(message)
    )
}

fn body(view: &PopupView) -> String {
    let inner = match &view.content {
        Content::Translation(text) => escape_html(text),
        Content::InlineLoading => r#"<div class="tp-inline-loading">Translating...</div>"#.to_string(),
        Content::InlineError => r#"<div class="tp-inline-error">Translation failed</div>"#.to_string(),
        Content::Error(_) => error_body(view),
        Content::Loading => String::new(),
    };
    format!(r#"<div class="tp-translation" id="tp-translation-text">{}</div>"#, inner)
}

fn footer(view: &PopupView) -> String {
    let copy = match (view.can_copy(), view.copied) {
        (false, _) => "",
        (true, true) => r#"<button class="tp-btn tp-btn-secondary tp-copied" id="tp-copy-btn">Copied!</button>"#,
        (true, false) => r#"<button class="tp-btn tp-btn-secondary" id="tp-copy-btn">Copy</button>"#,
    };
    format!(
        r#"<div class="tp-footer">{}<button class="tp-btn tp-btn-primary" id="tp-done-btn">Done</button></div>"#,
        copy
    )
}
