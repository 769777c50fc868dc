//! Shared preprocessing for content documents: lenient parse, removal of
//! non-content subtrees, and visible-text extraction.

use regex::{Captures, Regex};
use scraper::node::Text;
use scraper::{ElementRef, Html, Node};
use std::sync::LazyLock;

/// Elements whose whole subtree never contributes to output.
const NON_CONTENT: &[&str] = &["script", "style", "head", "noscript", "template"];

/// HTML void elements; self-closing syntax on anything else is XHTML-only.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements nested deeper than this are flattened to their text.
pub const MAX_DEPTH: usize = 128;

/// `<name attrs/>` self-closing tags.
static SELF_CLOSING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9:_.-]*)(\s[^<>]*?)?\s*/>").unwrap());

/// A content document with its non-content subtrees removed.
pub struct StrippedDocument {
    html: Html,
}

impl StrippedDocument {
    /// Parse markup as HTML. Broken markup is recovered the way browsers do,
    /// so this never fails. XHTML self-closing tags are honoured.
    pub fn parse(markup: &str) -> Self {
        let markup = expand_self_closing(markup);
        let mut html = Html::parse_document(&markup);

        let doomed: Vec<_> = html
            .tree
            .root()
            .descendants()
            .filter(|node| match node.value() {
                Node::Element(element) => NON_CONTENT.contains(&element.name()),
                _ => false,
            })
            .map(|node| node.id())
            .collect();

        for id in doomed {
            if let Some(mut node) = html.tree.get_mut(id) {
                node.detach();
            }
        }

        flatten_deep_subtrees(&mut html);

        Self { html }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Concatenated text of every remaining text node, in document order.
    pub fn text(&self) -> String {
        self.root().text().collect()
    }

    /// Serialized markup of the stripped tree.
    pub fn html(&self) -> String {
        self.html.html()
    }
}

/// Rewrite `<title/>`-style tags as `<title></title>`. An HTML5 parser ignores
/// the slash on non-void elements, and for `title`, `script`, `style` and
/// friends would swallow the rest of the document as raw text.
pub fn expand_self_closing(markup: &str) -> String {
    SELF_CLOSING_RE
        .replace_all(markup, |caps: &Captures| {
            let name = &caps[1];
            if VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
                caps[0].to_string()
            } else {
                let attrs = caps.get(2).map_or("", |m| m.as_str());
                format!("<{}{}></{}>", name, attrs, name)
            }
        })
        .into_owned()
}

/// Replace the children of every element at `MAX_DEPTH` with their text, so
/// later tree walks stay shallow.
fn flatten_deep_subtrees(html: &mut Html) {
    let mut frontier = vec![html.tree.root()];
    for _ in 0..MAX_DEPTH {
        frontier = frontier.iter().flat_map(|node| node.children()).collect();
    }

    let deep: Vec<_> = frontier
        .into_iter()
        .filter(|node| node.value().is_element() && node.has_children())
        .map(|node| {
            let text: String = node
                .descendants()
                .filter_map(|n| n.value().as_text().map(|t| t.to_string()))
                .collect();
            (node.id(), text)
        })
        .collect();

    for (id, text) in deep {
        if let Some(mut node) = html.tree.get_mut(id) {
            while let Some(mut child) = node.first_child() {
                child.detach();
            }
            node.append(Node::Text(Text { text: text.into() }));
        }
    }
}
