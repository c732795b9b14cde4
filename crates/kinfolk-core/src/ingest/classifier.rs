use serde::{Deserialize, Serialize};

use super::fragment::Sentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Birth,
    Census,
    Parents,
    Children,
    Marriage,
    Occupation,
    Alias,
    Burial,
    Death,
    Description,
    BirthListing,
    MarriageBond,
    Residence,
    Unstructured,
}

/// Keyword phrases in priority order. The first one found in a sentence
/// decides its topic, so "was born" beats "died" in "was born ... and died ...".
pub const KEYWORDS: [(&str, Topic); 13] = [
    ("was born", Topic::Birth),
    ("appeared on the census", Topic::Census),
    ("Parents:", Topic::Parents),
    ("Children were:", Topic::Children),
    ("was married to", Topic::Marriage),
    ("was a", Topic::Occupation),
    ("also known as", Topic::Alias),
    ("was buried", Topic::Burial),
    ("died", Topic::Death),
    ("was described as", Topic::Description),
    ("listed as being born", Topic::BirthListing),
    ("date of marriage bond", Topic::MarriageBond),
    ("resided in", Topic::Residence),
];

impl Topic {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Birth => "birth",
            Self::Census => "census",
            Self::Parents => "parents",
            Self::Children => "children",
            Self::Marriage => "marriage",
            Self::Occupation => "occupation",
            Self::Alias => "alias",
            Self::Burial => "burial",
            Self::Death => "death",
            Self::Description => "description",
            Self::BirthListing => "birth_listing",
            Self::MarriageBond => "marriage_bond",
            Self::Residence => "residence",
            Self::Unstructured => "unstructured",
        }
    }

    /// The phrase that selects this topic.
    #[must_use]
    pub fn keyword(&self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, topic)| topic == self)
            .map(|(phrase, _)| *phrase)
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[must_use]
pub fn classify(sentence: &Sentence) -> Topic {
    classify_text(&sentence.text())
}

#[must_use]
pub fn classify_text(text: &str) -> Topic {
    KEYWORDS
        .iter()
        .find(|(phrase, _)| text.contains(phrase))
        .map_or(Topic::Unstructured, |(_, topic)| *topic)
}
