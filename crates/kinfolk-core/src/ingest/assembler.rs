use tracing::{debug, warn};

use super::classifier::classify;
use super::extractor::extract;
use super::fragment::Paragraph;
use super::warning::{RecordWarning, Warning};
use crate::event::DatedEvent;
use crate::record::{Child, Marriage, NameParts, Parent, Record};
use crate::{Error, Result};

/// Accumulates one person's fields while their sentences are read.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    record: Record,
    name: String,
    current_marriage: Option<usize>,
    sentences_read: usize,
    warnings: Vec<Warning>,
}

impl RecordBuilder {
    #[must_use]
    pub fn new(identifier: Option<&str>, name: &str) -> Self {
        let mut builder = Self::default();
        builder.record.identifier = identifier.unwrap_or_default().to_string();
        builder.set_name(name);
        builder
    }

    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Mark the start of the next sentence of the paragraph.
    pub fn next_sentence(&mut self) {
        self.sentences_read += 1;
    }

    /// True while reading the sentence that holds the bold name.
    #[must_use]
    pub const fn in_opening_sentence(&self) -> bool {
        self.sentences_read <= 1
    }

    pub fn set_name(&mut self, name: &str) {
        if self.name == name {
            return;
        }
        self.name = name.to_string();

        let (parts, fits) = NameParts::split(name);
        if !fits {
            self.warn(Warning::UnsplitName {
                name: name.to_string(),
            });
        }
        parts.apply_to(&mut self.record);
    }

    pub fn set_birth(&mut self, event: DatedEvent) {
        if !event.is_empty() {
            self.record.birth = Some(event);
        }
    }

    pub fn add_census(&mut self, event: DatedEvent) {
        if !event.is_empty() {
            self.record.census.push(event);
        }
    }

    /// Fill the next free parent slot. A third parent is dropped with a warning.
    pub fn add_parent(&mut self, parent: Parent) {
        match self.record.parents.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => *slot = Some(parent),
            None => self.warn(Warning::ExtraParent { parent }),
        }
    }

    /// Starts a marriage; later children sentences attach to it.
    pub fn add_marriage(&mut self, marriage: Marriage) {
        self.record.marriages.push(marriage);
        self.current_marriage = Some(self.record.marriages.len() - 1);
    }

    pub fn add_child(&mut self, child: Child) {
        if let Some(marriage) = self
            .current_marriage
            .and_then(|i| self.record.marriages.get_mut(i))
        {
            marriage.children.push(child.clone());
        }
        self.record.children.push(child);
    }

    pub fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.record.free_text.is_empty() {
            self.record.free_text.push(' ');
        }
        self.record.free_text.push_str(text);
    }

    pub fn warn(&mut self, warning: Warning) {
        warn!(record = %self.record.identifier, "{warning}");
        self.warnings.push(warning);
    }

    pub fn warn_all(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        for warning in warnings {
            self.warn(warning);
        }
    }

    /// Finish the record. Fails when no anchor ever identified the person.
    pub fn seal(self) -> Result<(Record, Vec<RecordWarning>)> {
        if self.record.identifier.is_empty() {
            return Err(Error::MissingIdentifier {
                name: self.record.full_name(),
            });
        }

        let warnings = self
            .warnings
            .into_iter()
            .map(|warning| RecordWarning {
                record: self.record.identifier.clone(),
                warning,
            })
            .collect();

        Ok((self.record, warnings))
    }
}

/// Build one record from a segmented paragraph.
pub fn assemble(paragraph: &Paragraph) -> Result<(Record, Vec<RecordWarning>)> {
    let mut builder = RecordBuilder::new(paragraph.identifier.as_deref(), &paragraph.name);

    for sentence in &paragraph.sentences {
        let topic = classify(sentence);
        debug!(%topic, sentence = %sentence.text(), "Classified sentence");
        builder.next_sentence();
        extract(topic, sentence, &mut builder)?;
    }

    builder.seal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fragment::{Fragment, Sentence};
    use crate::record::PersonRef;

    #[test]
    fn test_third_parent_is_dropped() {
        let mut builder = RecordBuilder::new(Some("I1"), "John Adams");
        builder.add_parent(PersonRef::new("I2", "A"));
        builder.add_parent(PersonRef::new("I3", "B"));
        builder.add_parent(PersonRef::new("I4", "C"));

        let (record, warnings) = builder.seal().unwrap();
        assert_eq!(record.parents().count(), 2);
        assert_eq!(record.parents[1].as_ref().map(|p| p.identifier.as_str()), Some("I3"));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].record, "I1");
    }

    #[test]
    fn test_children_follow_current_marriage() {
        let mut builder = RecordBuilder::new(Some("I1"), "John Adams");
        builder.add_child(PersonRef::new("C0", "Before"));
        builder.add_marriage(Marriage::new(PersonRef::new("S1", "First")));
        builder.add_child(PersonRef::new("C1", "One"));
        builder.add_marriage(Marriage::new(PersonRef::new("S2", "Second")));
        builder.add_child(PersonRef::new("C2", "Two"));

        let (record, _) = builder.seal().unwrap();
        assert_eq!(record.children.len(), 3);
        assert_eq!(record.marriages[0].children, [PersonRef::new("C1", "One")]);
        assert_eq!(record.marriages[1].children, [PersonRef::new("C2", "Two")]);
    }

    #[test]
    fn test_missing_identifier_is_fatal() {
        let builder = RecordBuilder::new(None, "John Adams");
        assert!(matches!(
            builder.seal(),
            Err(Error::MissingIdentifier { ref name }) if name == "John Adams"
        ));
    }

    #[test]
    fn test_later_birth_sentence_keeps_name() {
        let mut paragraph = Paragraph::open(Some("I1".into()), "John Adams");
        paragraph.sentences = vec![
            Sentence::new(vec![
                Fragment::anchor("I1"),
                Fragment::text("John Adams"),
                Fragment::text("lived at Quincy"),
                Fragment::terminator(),
            ]),
            Sentence::new(vec![
                Fragment::text("His brother"),
                Fragment::cross_ref("I2", "Peter Adams"),
                Fragment::text("was born in 1738"),
                Fragment::terminator(),
            ]),
        ];

        let (record, _) = assemble(&paragraph).unwrap();
        assert_eq!(record.first_name, "John");
        assert_eq!(record.last_name, "Adams");
    }

    #[test]
    fn test_unmatched_sentence_goes_to_free_text() {
        let mut paragraph = Paragraph::open(Some("I1".into()), "John Adams");
        paragraph.sentences = vec![
            Sentence::new(vec![Fragment::text("He moved west"), Fragment::terminator()]),
            Sentence::new(vec![Fragment::text("He came back"), Fragment::terminator()]),
        ];

        let (record, warnings) = assemble(&paragraph).unwrap();
        assert_eq!(record.free_text, "He moved west. He came back.");
        assert_eq!(record.first_name, "John");
        assert!(record.birth.is_none());
        assert!(warnings.is_empty());
    }
}
