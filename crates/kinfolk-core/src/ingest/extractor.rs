use super::assembler::RecordBuilder;
use super::classifier::Topic;
use super::dated_event::parse_dated_event;
use super::fragment::Sentence;
use super::warning::Warning;
use crate::record::Marriage;
use crate::Result;

/// Apply one classified sentence to the record being built.
pub fn extract(topic: Topic, sentence: &Sentence, builder: &mut RecordBuilder) -> Result<()> {
    match topic {
        Topic::Birth => extract_birth(sentence, builder),
        Topic::Census => extract_census(sentence, builder),
        Topic::Parents => {
            for parent in sentence.cross_references() {
                builder.add_parent(parent);
            }
            Ok(())
        }
        Topic::Children => {
            for child in sentence.cross_references() {
                builder.add_child(child);
            }
            Ok(())
        }
        Topic::Marriage => extract_marriage(sentence, builder),
        // TODO: fill `Record::occupation` from the words after "was a".
        Topic::Occupation => retain(sentence, builder),
        // TODO: fill `Record::alias` from the name after "also known as".
        Topic::Alias => retain(sentence, builder),
        // TODO: add a burial event to `Record` and parse it here.
        Topic::Burial => retain(sentence, builder),
        // TODO: parse the dated event after "died" into `Record::death`.
        Topic::Death => retain(sentence, builder),
        // TODO: read `Record::gender` from the description.
        Topic::Description => retain(sentence, builder),
        // TODO: use the listed birth date when `Record::birth` is still empty.
        Topic::BirthListing => retain(sentence, builder),
        // TODO: date the current marriage from the bond when it has no date.
        Topic::MarriageBond => retain(sentence, builder),
        // TODO: push the dated event after "resided in" onto `Record::residences`.
        Topic::Residence => retain(sentence, builder),
        Topic::Unstructured => retain(sentence, builder),
    }
}

fn retain(sentence: &Sentence, builder: &mut RecordBuilder) -> Result<()> {
    builder.append_text(&sentence.text());
    Ok(())
}

fn keyword(topic: Topic) -> &'static str {
    topic.keyword().unwrap_or_default()
}

fn extract_birth(sentence: &Sentence, builder: &mut RecordBuilder) -> Result<()> {
    let phrase = keyword(Topic::Birth);

    if builder.in_opening_sentence() {
        if let Some(first) = sentence.first_text() {
            if !first.is_reference() && !first.text.contains(phrase) {
                builder.set_name(first.text.trim());
            }
        }
    }

    let mut warnings = Vec::new();
    let event = parse_dated_event(&sentence.tokens_after(phrase), &mut warnings)?;
    builder.warn_all(warnings);
    builder.set_birth(event);
    Ok(())
}

fn extract_census(sentence: &Sentence, builder: &mut RecordBuilder) -> Result<()> {
    let mut warnings = Vec::new();
    let event = parse_dated_event(&sentence.tokens_after(keyword(Topic::Census)), &mut warnings)?;
    builder.warn_all(warnings);
    builder.add_census(event);
    Ok(())
}

fn extract_marriage(sentence: &Sentence, builder: &mut RecordBuilder) -> Result<()> {
    let Some(spouse) = sentence.cross_references().next() else {
        builder.warn(Warning::MarriageWithoutSpouse {
            sentence: sentence.text(),
        });
        return retain(sentence, builder);
    };

    let mut warnings = Vec::new();
    let event =
        parse_dated_event(&sentence.tokens_after(keyword(Topic::Marriage)), &mut warnings)?;
    builder.warn_all(warnings);

    let date = (!event.is_empty()).then_some(event);
    builder.add_marriage(Marriage::new(spouse).with_date(date));
    Ok(())
}
