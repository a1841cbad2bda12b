//! Popup rendering
//!
//! One controller, pluggable render strategies. Both strategies consume the
//! same [`PopupView`] and describe the same document; hosts pick whichever
//! output they can apply (an HTML string or an element tree).

use enum_dispatch::enum_dispatch;

pub mod markup;
pub mod tree;
pub mod view;

pub use markup::MarkupRenderer;
pub use tree::{Element, Node, TreeRenderer};
pub use view::{Content, PopupView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Markup(String),
    Tree(Node),
}

impl Rendered {
    pub fn to_html(&self) -> String {
        match self {
            Rendered::Markup(html) => html.clone(),
            Rendered::Tree(node) => node.to_html(),
        }
    }
}

#[enum_dispatch]
pub trait PopupRenderer {
    fn render(&self, view: &PopupView) -> Rendered;
}

#[enum_dispatch(PopupRenderer)]
#[derive(Debug, Clone, Copy)]
pub enum RenderStrategy {
    Markup(MarkupRenderer),
    Tree(TreeRenderer),
}

impl Default for RenderStrategy {
    fn default() -> Self {
        RenderStrategy::Tree(TreeRenderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::languages;
    use crate::core::popup::Phase;
    use pretty_assertions::assert_eq;

    fn view(content: Content) -> PopupView {
        PopupView {
            phase: Phase::Success,
            content,
            source_label: Some("Spanish".to_string()),
            languages: languages::options("en"),
            copied: false,
        }
    }

    fn both(view: &PopupView) -> (String, String) {
        (
            RenderStrategy::Markup(MarkupRenderer).render(view).to_html(),
            RenderStrategy::Tree(TreeRenderer).render(view).to_html(),
        )
    }

    #[test]
    fn test_strategies_agree() {
        let mut copied = view(Content::Translation("hello".to_string()));
        copied.copied = true;
        let mut loading = view(Content::Loading);
        loading.phase = Phase::Loading;
        let mut error = view(Content::Error("HTTP error! status: 500".to_string()));
        error.phase = Phase::Error;
        let mut bare_error = error.clone();
        bare_error.languages.clear();

        for v in [
            view(Content::Translation("<b>hi</b> & \"bye\"".to_string())),
            copied,
            loading,
            error,
            bare_error,
            view(Content::InlineLoading),
            view(Content::InlineError),
        ] {
            let (markup, tree) = both(&v);
            assert_eq!(markup, tree);
        }
    }

    #[test]
    fn test_translation_text_is_escaped() {
        let html = MarkupRenderer
            .render(&view(Content::Translation("<script>x</script>".to_string())))
            .to_html();
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_tree_exposes_controls() {
        let Rendered::Tree(node) = TreeRenderer.render(&view(Content::Translation("hola".to_string()))) else {
            panic!("tree renderer returned markup");
        };
        assert_eq!(node.find_by_id("tp-translation-text").map(|e| Node::Element(e.clone()).text_content()), Some("hola".to_string()));
        assert!(node.find_by_id("tp-copy-btn").is_some());
        assert!(node.find_by_id("tp-target-lang").is_some());
    }

    #[test]
    fn test_copy_hidden_while_retranslating() {
        let Rendered::Tree(node) = TreeRenderer.render(&view(Content::InlineLoading)) else {
            panic!("tree renderer returned markup");
        };
        assert!(node.find_by_id("tp-copy-btn").is_none());
        assert!(node.find_by_id("tp-done-btn").is_some());
        assert!(node.text_content().contains("Translating..."));
    }

    #[test]
    fn test_copied_button_is_marked() {
        let mut copied = view(Content::Translation("hola".to_string()));
        copied.copied = true;
        let Rendered::Tree(node) = TreeRenderer.render(&copied) else {
            panic!("tree renderer returned markup");
        };
        let copy = node.find_by_id("tp-copy-btn").unwrap();
        assert!(copy.has_class("tp-copied"));
        assert!(copy.has_class("tp-btn"));
        assert_eq!(copy.attr_value("id"), Some("tp-copy-btn"));
    }

    #[test]
    fn test_error_with_selector_offers_done_only() {
        let mut error = view(Content::Error("HTTP error! status: 500".to_string()));
        error.phase = Phase::Error;
        let Rendered::Tree(node) = TreeRenderer.render(&error) else {
            panic!("tree renderer returned markup");
        };
        assert!(node.find_by_id("tp-target-lang").is_some());
        assert!(node.find_by_id("tp-done-btn").is_some());
        assert!(node.find_by_id("tp-copy-btn").is_none());
    }
}
