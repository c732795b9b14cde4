use super::fragment::{Fragment, Sentence};

/// Group normalized fragments into sentences. Each sentence ends at a `.`
/// fragment, and a footnote right after the period stays with it. Anything
/// left after the last period is a final, unterminated sentence.
#[must_use]
pub fn segment(fragments: &[Fragment]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();
    let mut iter = fragments.iter().peekable();

    while let Some(fragment) = iter.next() {
        current.push(fragment.clone());

        if fragment.is_terminator() {
            if let Some(footnote) = iter.next_if(|f| f.is_footnote) {
                current.push(footnote.clone());
            }
            sentences.push(Sentence::new(std::mem::take(&mut current)));
        }
    }

    if !current.is_empty() {
        sentences.push(Sentence::new(current));
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footnote_stays_with_its_sentence() {
        let fragments = [
            Fragment::anchor("I1"),
            Fragment::text("John Adams"),
            Fragment::text("was born in 1735"),
            Fragment::terminator(),
            Fragment::footnote("1"),
            Fragment::text("He was a farmer"),
            Fragment::terminator(),
        ];

        let sentences = segment(&fragments);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text(), "John Adams was born in 1735.");
        assert_eq!(sentences[0].footnotes().collect::<Vec<_>>(), ["1"]);
        assert_eq!(sentences[1].text(), "He was a farmer.");
    }

    #[test]
    fn test_only_one_footnote_is_absorbed() {
        let fragments = [
            Fragment::text("a"),
            Fragment::terminator(),
            Fragment::footnote("1"),
            Fragment::footnote("2"),
            Fragment::text("b"),
        ];

        let sentences = segment(&fragments);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].footnotes().collect::<Vec<_>>(), ["2"]);
        assert!(!sentences[1].is_terminated());
    }

    #[test]
    fn test_concatenation_preserves_fragments() {
        let fragments = vec![
            Fragment::text("Parents:"),
            Fragment::cross_ref("I2", "John Adams"),
            Fragment::terminator(),
            Fragment::text("trailing"),
        ];

        let rejoined: Vec<Fragment> = segment(&fragments)
            .iter()
            .flat_map(|s| s.fragments().to_vec())
            .collect();
        assert_eq!(rejoined, fragments);
    }

    #[test]
    fn test_empty_input() {
        assert!(segment(&[]).is_empty());
    }
}
