//! Explicit element construction.

use super::markup::escape_html;
use super::view::{Content, PopupView};
use super::{PopupRenderer, Rendered};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search by `id` attribute.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        match self {
            Node::Text(_) => None,
            Node::Element(el) => {
                if el.attr_value("id") == Some(id) {
                    return Some(el);
                }
                el.children.iter().find_map(|c| c.find_by_id(id))
            }
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Node::Text(text) => escape_html(text),
            Node::Element(el) => {
                let mut out = format!("<{}", el.tag);
                if !el.classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", el.classes.join(" ")));
                }
                for (name, value) in &el.attrs {
                    if value.is_empty() {
                        out.push_str(&format!(" {}", name));
                    } else {
                        out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
                    }
                }
                out.push('>');
                for child in &el.children {
                    out.push_str(&child.to_html());
                }
                out.push_str(&format!("</{}>", el.tag));
                out
            }
        }
    }
}

/// Builds the popup as a [`Node`] tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeRenderer;

impl PopupRenderer for TreeRenderer {
    fn render(&self, view: &PopupView) -> Rendered {
        Rendered::Tree(build(view))
    }
}

pub fn build(view: &PopupView) -> Node {
    let mut root = Element::new("div").class("tp-popup");

    match &view.content {
        Content::Loading => {
            root = root
                .class("tp-loading")
                .child(Element::new("span").class("tp-spinner"))
                .child(Element::new("span").class("tp-loading-text").text("Translating..."));
            return root.into();
        }
        Content::Error(_) if !view.shows_language_row() => {
            return root.class("tp-error").child(error_body(view)).into();
        }
        Content::Error(_) => root = root.class("tp-error"),
        _ => {}
    }

    root.child(header())
        .child(language_row(view))
        .child(body(view))
        .child(footer(view))
        .into()
}

fn header() -> Element {
    Element::new("div")
        .class("tp-header")
        .child(Element::new("span").class("tp-title").text("Translation"))
        .child(
            Element::new("button")
                .class("tp-close")
                .attr("id", "tp-close")
                .attr("title", "Close")
                .text("\u{2715}"),
        )
}

fn language_row(view: &PopupView) -> Element {
    let mut select = Element::new("select").class("tp-lang-select").attr("id", "tp-target-lang");
    for option in &view.languages {
        let mut opt = Element::new("option").attr("value", option.code.clone());
        if option.selected {
            opt = opt.attr("selected", "");
        }
        select = select.child(opt.text(option.name.clone()));
    }

    Element::new("div")
        .class("tp-lang-row")
        .child(
            Element::new("div")
                .class("tp-lang-field")
                .child(Element::new("label").class("tp-lang-label").text("From"))
                .child(
                    Element::new("div")
                        .class("tp-lang-display")
                        .text(view.source_label_or_default()),
                ),
        )
        .child(
            Element::new("div")
                .class("tp-lang-field")
                .child(Element::new("label").class("tp-lang-label").text("To"))
                .child(select),
        )
}

fn error_body(view: &PopupView) -> Element {
    let message = match &view.content {
        Content::Error(message) => message.as_str(),
        _ => "Translation failed",
    };
    Element::new("div")
        .class("tp-error-body")
        .child(Element::new("span").class("tp-error-icon").text("\u{26a0}"))
        .child(Element::new("span").class("tp-error-text").text(message))
}

fn body(view: &PopupView) -> Element {
    let translation = Element::new("div").class("tp-translation").attr("id", "tp-translation-text");
    match &view.content {
        Content::Translation(text) => translation.text(text.clone()),
        Content::InlineLoading => {
            translation.child(Element::new("div").class("tp-inline-loading").text("Translating..."))
        }
        Content::InlineError => {
            translation.child(Element::new("div").class("tp-inline-error").text("Translation failed"))
        }
        Content::Error(_) => translation.child(error_body(view)),
        Content::Loading => translation,
    }
}

/// Done is always offered; Copy only when there is a settled translation.
fn footer(view: &PopupView) -> Element {
    let mut footer = Element::new("div").class("tp-footer");
    if view.can_copy() {
        let copy = Element::new("button")
            .class("tp-btn")
            .class("tp-btn-secondary")
            .attr("id", "tp-copy-btn");
        footer = footer.child(if view.copied {
            copy.class("tp-copied").text("Copied!")
        } else {
            copy.text("Copy")
        });
    }

    footer.child(
        Element::new("button")
            .class("tp-btn")
            .class("tp-btn-primary")
            .attr("id", "tp-done-btn")
            .text("Done"),
    )
}
