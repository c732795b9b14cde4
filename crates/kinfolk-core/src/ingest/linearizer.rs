//! Walks a page tree in document order and groups its content into one
//! [`Paragraph`] per person.
//!
//! Each relevant node becomes an [`Event`]; the walk is a plain match over
//! `(State, Event)`. A page link ends the document, so nothing after it is
//! read.

use tracing::debug;

use super::config::IngestConfig;
use super::fragment::{Fragment, Paragraph};
use crate::markup::{MarkupNode, NodeKind};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    /// `<a name=..>`: the identifier of the person about to be (or being) described.
    SelfAnchor(String),
    /// `<a href=..#id>`: a mention of another person.
    CrossRef { id: String, text: String },
    /// `<a href=..>` pointing at another page.
    PageLink,
    /// `<b>`: a person's display name.
    Name(String),
    /// `<sup>`: a citation marker.
    Footnote(String),
    /// `<hr>`
    Separator,
    Text(String),
}

#[derive(Debug)]
enum State {
    AwaitingName { pending: Option<String> },
    InRecord(Paragraph),
    Done,
}

#[derive(Debug, Clone, Copy)]
enum TagRole {
    Container,
    Anchor,
    Name,
    Footnote,
    Separator,
    Skip,
}

pub struct Linearizer<'c> {
    config: &'c IngestConfig,
    state: State,
    paragraphs: Vec<Paragraph>,
}

impl<'c> Linearizer<'c> {
    #[must_use]
    pub fn new(config: &'c IngestConfig) -> Self {
        Self {
            config,
            state: State::AwaitingName { pending: None },
            paragraphs: Vec::new(),
        }
    }

    /// Linearize everything under `root`. Any paragraph still open at the end
    /// of the tree is closed.
    pub fn run<N: MarkupNode>(mut self, root: &N) -> Result<Vec<Paragraph>> {
        self.visit(root)?;
        self.finish();
        Ok(self.paragraphs)
    }

    fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    fn walk<N: MarkupNode>(&mut self, node: &N) -> Result<()> {
        for child in node.child_nodes() {
            if self.is_done() {
                break;
            }
            self.visit(&child)?;
        }
        Ok(())
    }

    fn visit<N: MarkupNode>(&mut self, node: &N) -> Result<()> {
        match node.kind() {
            NodeKind::Document => self.walk(node),
            NodeKind::Text => {
                let text = node.text().unwrap_or_default().to_string();
                self.dispatch(Event::Text(text));
                Ok(())
            }
            NodeKind::Other => Ok(()),
            NodeKind::Element => {
                let tag = node.tag_name().unwrap_or_default();
                match self.role_of(tag) {
                    TagRole::Container => self.walk(node),
                    TagRole::Skip => Ok(()),
                    TagRole::Anchor => {
                        let event = self.anchor_event(node)?;
                        self.dispatch(event);
                        Ok(())
                    }
                    TagRole::Name => {
                        let name = node.text_content();
                        if name.trim().is_empty() {
                            return Err(Error::EmptyName);
                        }
                        self.dispatch(Event::Name(name));
                        Ok(())
                    }
                    TagRole::Footnote => {
                        let marker = node
                            .find_descendant("a")
                            .map_or_else(|| node.text_content(), |a| a.text_content());
                        self.dispatch(Event::Footnote(marker.trim().to_string()));
                        Ok(())
                    }
                    TagRole::Separator => {
                        self.dispatch(Event::Separator);
                        Ok(())
                    }
                }
            }
        }
    }

    fn role_of(&self, tag: &str) -> TagRole {
        match tag {
            "html" | "body" => TagRole::Container,
            "a" => TagRole::Anchor,
            "b" => TagRole::Name,
            "sup" => TagRole::Footnote,
            "hr" => TagRole::Separator,
            _ if self.config.is_group_tag(tag) => TagRole::Container,
            _ => TagRole::Skip,
        }
    }

    fn anchor_event<N: MarkupNode>(&self, node: &N) -> Result<Event> {
        if let Some(href) = node.attr("href") {
            if self.config.is_page_link(href) {
                return Ok(Event::PageLink);
            }

            let id = href
                .split_once('#')
                .map(|(_, id)| id.trim())
                .filter(|id| !id.is_empty())
                .ok_or_else(|| Error::MalformedReference(href.to_string()))?;

            return Ok(Event::CrossRef {
                id: id.to_string(),
                text: node.text_content(),
            });
        }

        match node.attr("name").map(str::trim) {
            Some(name) if !name.is_empty() => Ok(Event::SelfAnchor(name.to_string())),
            Some(_) => Err(Error::MissingAttribute {
                tag: "a",
                attribute: "name",
            }),
            None => Err(Error::MissingAttribute {
                tag: "a",
                attribute: "href",
            }),
        }
    }

    fn dispatch(&mut self, event: Event) {
        let state = std::mem::replace(&mut self.state, State::Done);

        self.state = match (state, event) {
            (State::Done, _) => State::Done,

            (State::AwaitingName { .. }, Event::SelfAnchor(id)) => {
                State::AwaitingName { pending: Some(id) }
            }
            (State::AwaitingName { pending }, Event::Name(name)) => {
                State::InRecord(Paragraph::open(pending, &name))
            }
            (State::AwaitingName { .. }, Event::PageLink) => State::Done,
            (State::AwaitingName { pending }, event) => {
                if !matches!(&event, Event::Text(t) if t.trim().is_empty()) {
                    debug!(?event, "Skipping content outside a record");
                }
                State::AwaitingName { pending }
            }

            (State::InRecord(mut paragraph), Event::SelfAnchor(id)) => {
                if paragraph.identifier.is_none() {
                    paragraph.set_identifier(id);
                    State::InRecord(paragraph)
                } else {
                    self.seal(paragraph);
                    State::AwaitingName { pending: Some(id) }
                }
            }
            (State::InRecord(paragraph), Event::Name(name)) => {
                self.seal(paragraph);
                State::InRecord(Paragraph::open(None, &name))
            }
            (State::InRecord(mut paragraph), Event::CrossRef { id, text }) => {
                paragraph.push(Fragment::cross_ref(id, text));
                State::InRecord(paragraph)
            }
            (State::InRecord(mut paragraph), Event::Footnote(marker)) => {
                paragraph.push(Fragment::footnote(marker));
                State::InRecord(paragraph)
            }
            (State::InRecord(mut paragraph), Event::Text(text)) => {
                paragraph.push_text(&text);
                State::InRecord(paragraph)
            }
            (State::InRecord(paragraph), Event::Separator) => {
                self.seal(paragraph);
                State::AwaitingName { pending: None }
            }
            (State::InRecord(paragraph), Event::PageLink) => {
                self.seal(paragraph);
                State::Done
            }
        };
    }

    fn seal(&mut self, paragraph: Paragraph) {
        debug!(
            identifier = paragraph.identifier.as_deref().unwrap_or("?"),
            name = %paragraph.name,
            fragments = paragraph.raw_fragments.len(),
            "Closed paragraph"
        );
        self.paragraphs.push(paragraph);
    }

    fn finish(&mut self) {
        match std::mem::replace(&mut self.state, State::Done) {
            State::InRecord(paragraph) => self.seal(paragraph),
            State::AwaitingName { pending: Some(id) } => {
                debug!(id, "Anchor with no name after it");
            }
            State::AwaitingName { pending: None } | State::Done => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::HtmlPage;
    use pretty_assertions::assert_eq;

    fn linearize(html: &str) -> Result<Vec<Paragraph>> {
        let config = IngestConfig::default();
        let page = HtmlPage::parse(html);
        Linearizer::new(&config).run(&page.root())
    }

    #[test]
    fn test_one_paragraph_per_person() {
        let paragraphs = linearize(
            r##"<html><head><title>Adams</title></head><body>
            <a name="I1"></a><b>John Adams</b> was born in 1735. Parents:
            <a href="#I2">John Adams</a> and <a href="#I3">Susanna Boylston</a>.
            <hr>
            <a name="I4"></a><b>Abigail Smith</b> was born in 1744.<sup><a href="#S1">2</a></sup>
            </body></html>"##,
        )
        .unwrap();

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].identifier.as_deref(), Some("I1"));
        assert_eq!(paragraphs[0].name, "John Adams");
        assert_eq!(paragraphs[0].raw_fragments[0], Fragment::anchor("I1"));
        assert_eq!(paragraphs[0].raw_fragments[1], Fragment::text("John Adams"));
        assert!(paragraphs[0]
            .raw_fragments
            .contains(&Fragment::cross_ref("I3", "Susanna Boylston")));

        assert_eq!(paragraphs[1].identifier.as_deref(), Some("I4"));
        assert!(paragraphs[1].raw_fragments.contains(&Fragment::footnote("2")));
    }

    #[test]
    fn test_page_link_ends_document() {
        let paragraphs = linearize(
            r#"<body><a name="I1"></a><b>John Adams</b> was a farmer.
            <a href="index.htm">Index</a>
            <a name="I9"></a><b>Never Read</b></body>"#,
        )
        .unwrap();

        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].name, "John Adams");
    }

    #[test]
    fn test_cross_page_reference_is_not_a_page_link() {
        let paragraphs = linearize(
            r#"<body><a name="I1"></a><b>John Adams</b> was married to
            <a href="fam02.htm#I7">Abigail Smith</a>.</body>"#,
        )
        .unwrap();

        assert!(paragraphs[0]
            .raw_fragments
            .contains(&Fragment::cross_ref("I7", "Abigail Smith")));
    }

    #[test]
    fn test_next_name_closes_paragraph() {
        let paragraphs = linearize(
            r#"<body><p><a name="I1"></a><b>John Adams</b> text.</p>
            <p><a name="I2"></a><b>Abigail Smith</b> more text.</p></body>"#,
        )
        .unwrap();

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[1].identifier.as_deref(), Some("I2"));
        assert!(paragraphs[0].raw_text.contains("text."));
        assert!(!paragraphs[0].raw_text.contains("more"));
    }

    #[test]
    fn test_preamble_is_ignored() {
        let paragraphs = linearize(
            r##"<body>Descendants of John Adams <a href="#I1">see below</a>
            <a name="I1"></a><b>John Adams</b></body>"##,
        )
        .unwrap();

        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].raw_fragments.len(), 2);
    }

    #[test]
    fn test_anchor_after_name_sets_identifier() {
        let paragraphs = linearize(
            r#"<body><b>John Adams</b><a name="I1"></a> was a farmer.</body>"#,
        )
        .unwrap();

        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].identifier.as_deref(), Some("I1"));
        assert_eq!(paragraphs[0].name, "John Adams");
    }

    #[test]
    fn test_second_anchor_closes_paragraph() {
        let paragraphs = linearize(
            r#"<body><a name="I1"></a><b>John Adams</b> was a farmer.
            <a name="I4"></a> <b>Abigail Smith</b> was a teacher.</body>"#,
        )
        .unwrap();

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].identifier.as_deref(), Some("I1"));
        assert!(!paragraphs[0].raw_text.contains("teacher"));
        assert_eq!(paragraphs[1].identifier.as_deref(), Some("I4"));
        assert_eq!(paragraphs[1].raw_fragments[0], Fragment::anchor("I4"));
        assert_eq!(paragraphs[1].name, "Abigail Smith");
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            linearize(r#"<body><a></a><b>X</b></body>"#),
            Err(Error::MissingAttribute { tag: "a", .. })
        ));
        assert!(matches!(
            linearize(r#"<body><a name="I1"></a><b>X</b> <a href="mailto:x">y</a></body>"#),
            Err(Error::MalformedReference(_))
        ));
        assert!(matches!(
            linearize(r#"<body><a name="I1"></a><b> </b></body>"#),
            Err(Error::EmptyName)
        ));
    }
}
