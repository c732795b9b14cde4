use serde::{Deserialize, Serialize};

use crate::record::PersonRef;

/// One atomic piece of linearized page content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cross_ref_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub anchor_id: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_footnote: bool,
}

impl Fragment {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cross_ref(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cross_ref_id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn anchor(id: impl Into<String>) -> Self {
        Self {
            anchor_id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn footnote(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_footnote: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn terminator() -> Self {
        Self::text(".")
    }

    #[must_use]
    pub fn is_reference(&self) -> bool {
        !self.cross_ref_id.is_empty() || !self.anchor_id.is_empty()
    }

    #[must_use]
    pub fn is_cross_ref(&self) -> bool {
        !self.cross_ref_id.is_empty()
    }

    #[must_use]
    pub fn is_terminator(&self) -> bool {
        !self.is_footnote && !self.is_reference() && self.text == "."
    }
}

/// Everything on a page that belongs to one person.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub identifier: Option<String>,
    pub name: String,
    pub raw_text: String,
    pub raw_fragments: Vec<Fragment>,
    pub normalized_fragments: Vec<Fragment>,
    pub sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Start a paragraph at a bold name tag.
    #[must_use]
    pub fn open(identifier: Option<String>, name: &str) -> Self {
        let name = name.replace('\n', " ").trim().to_string();
        let mut paragraph = Self::default();

        if let Some(id) = identifier {
            paragraph.set_identifier(id);
        }
        paragraph.raw_text.push_str(&name);
        paragraph.raw_fragments.push(Fragment::text(name.clone()));
        paragraph.name = name;
        paragraph
    }

    pub fn set_identifier(&mut self, id: String) {
        self.raw_fragments.push(Fragment::anchor(id.clone()));
        self.identifier = Some(id);
    }

    pub fn push_text(&mut self, text: &str) {
        self.raw_text.push_str(text);
        self.raw_fragments.push(Fragment::text(text));
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.raw_fragments.push(fragment);
    }
}

/// A period-delimited run of normalized fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    fragments: Vec<Fragment>,
}

impl Sentence {
    #[must_use]
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.fragments
            .iter()
            .rev()
            .find(|f| !f.is_footnote)
            .is_some_and(Fragment::is_terminator)
    }

    /// Whitespace-separated words of every non-footnote fragment.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.fragments
            .iter()
            .filter(|f| !f.is_footnote)
            .flat_map(|f| f.text.split_whitespace())
    }

    /// Space-joined words; the terminating period sticks to the word before it.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for word in self.words() {
            if word != "." && !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
        out
    }

    #[must_use]
    pub fn contains(&self, phrase: &str) -> bool {
        self.text().contains(phrase)
    }

    /// Words with trailing commas split off as their own `,` tokens.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in self.words() {
            let stem = word.trim_end_matches(',');
            if !stem.is_empty() {
                tokens.push(stem.to_string());
            }
            for _ in 0..(word.len() - stem.len()) {
                tokens.push(",".to_string());
            }
        }
        tokens
    }

    /// Tokens following the first occurrence of `phrase`. Falls back to every
    /// token when the phrase only appears inside a longer word.
    #[must_use]
    pub fn tokens_after(&self, phrase: &str) -> Vec<String> {
        let tokens = self.tokens();
        let needle: Vec<&str> = phrase.split_whitespace().collect();
        if needle.is_empty() || needle.len() > tokens.len() {
            return tokens;
        }

        tokens
            .windows(needle.len())
            .position(|window| window.iter().zip(&needle).all(|(a, b)| a == b))
            .map_or_else(|| tokens.clone(), |i| tokens[i + needle.len()..].to_vec())
    }

    /// Cross-referenced people, in order. Plain words between them are skipped.
    pub fn cross_references(&self) -> impl Iterator<Item = PersonRef> + '_ {
        self.fragments
            .iter()
            .filter(|f| f.is_cross_ref())
            .map(|f| PersonRef::new(f.cross_ref_id.clone(), f.text.trim()))
    }

    /// First fragment carrying visible, non-citation text.
    #[must_use]
    pub fn first_text(&self) -> Option<&Fragment> {
        self.fragments
            .iter()
            .find(|f| !f.is_footnote && !f.text.trim().is_empty())
    }

    pub fn footnotes(&self) -> impl Iterator<Item = &str> {
        self.fragments
            .iter()
            .filter(|f| f.is_footnote)
            .map(|f| f.text.as_str())
    }
}
