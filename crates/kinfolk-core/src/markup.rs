//! The slice of a markup tree the extractor reads: node kind, tag name,
//! attributes, text, and ordered children.
//!
//! Pages are parsed with `scraper` (html5ever underneath); the linearizer is
//! generic over [`MarkupNode`] so it never sees the parser's own types.

use ego_tree::NodeRef;
use scraper::{Html, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Other,
}

pub trait MarkupNode: Sized {
    fn kind(&self) -> NodeKind;

    /// Lowercase tag name for element nodes.
    fn tag_name(&self) -> Option<&str>;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Character data for text nodes.
    fn text(&self) -> Option<&str>;

    fn child_nodes(&self) -> Vec<Self>;

    fn is_tag(&self, name: &str) -> bool {
        self.tag_name() == Some(name)
    }

    /// Concatenated text of every descendant text node, in document order.
    fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// First descendant element with the given tag name, depth first.
    fn find_descendant(&self, name: &str) -> Option<Self> {
        for child in self.child_nodes() {
            if child.is_tag(name) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(name) {
                return Some(found);
            }
        }
        None
    }
}

fn collect_text<N: MarkupNode>(node: &N, out: &mut String) {
    if let Some(text) = node.text() {
        out.push_str(text);
        return;
    }
    for child in node.child_nodes() {
        collect_text(&child, out);
    }
}

impl MarkupNode for NodeRef<'_, Node> {
    fn kind(&self) -> NodeKind {
        match self.value() {
            Node::Document | Node::Fragment => NodeKind::Document,
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn tag_name(&self) -> Option<&str> {
        match self.value() {
            Node::Element(element) => Some(element.name()),
            _ => None,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match self.value() {
            Node::Element(element) => element.attr(name),
            _ => None,
        }
    }

    fn text(&self) -> Option<&str> {
        match self.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        }
    }

    fn child_nodes(&self) -> Vec<Self> {
        self.children().collect()
    }
}

/// A parsed page. Keeps the tree alive while the extractor walks it.
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeRef<'_, Node> {
        self.html.tree.root()
    }
}
