use serde::{Deserialize, Serialize};

use crate::event::DatedEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to another person on the same set of pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub identifier: String,
    pub name: String,
}

impl PersonRef {
    #[must_use]
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

pub type Parent = PersonRef;
pub type Child = PersonRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marriage {
    pub other_identifier: String,
    pub other_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DatedEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
}

impl Marriage {
    #[must_use]
    pub fn new(other: PersonRef) -> Self {
        Self {
            other_identifier: other.identifier,
            other_name: other.name,
            date: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: Option<DatedEvent>) -> Self {
        self.date = date;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupation {
    pub name: String,
    #[serde(default)]
    pub date: DatedEvent,
}

/// A finished person record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub identifier: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<DatedEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<DatedEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub census: Vec<DatedEvent>,
    #[serde(default)]
    pub parents: [Option<Parent>; 2],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marriages: Vec<Marriage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub residences: Vec<DatedEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<Occupation>,
    #[serde(default)]
    pub free_text: String,
}

impl Record {
    #[must_use]
    pub fn full_name(&self) -> String {
        [
            self.first_name.as_str(),
            self.middle_name.as_str(),
            self.last_name.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn parents(&self) -> impl Iterator<Item = &Parent> {
        self.parents.iter().flatten()
    }
}

/// The pieces of a person's name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub first: String,
    pub middle: String,
    pub last: String,
}

impl NameParts {
    /// Split on single spaces. Two tokens are first and last, three add a
    /// middle name. Any other count keeps only the first token and returns
    /// `false` alongside.
    #[must_use]
    pub fn split(name: &str) -> (Self, bool) {
        let tokens: Vec<&str> = name.trim().split(' ').collect();

        match tokens.as_slice() {
            [first, last] => (
                Self {
                    first: (*first).to_string(),
                    last: (*last).to_string(),
                    ..Self::default()
                },
                true,
            ),
            [first, middle, last] => (
                Self {
                    first: (*first).to_string(),
                    middle: (*middle).to_string(),
                    last: (*last).to_string(),
                },
                true,
            ),
            [first] => (
                Self {
                    first: (*first).to_string(),
                    ..Self::default()
                },
                true,
            ),
            [first, ..] => (
                Self {
                    first: (*first).to_string(),
                    ..Self::default()
                },
                false,
            ),
            [] => (Self::default(), false),
        }
    }

    pub fn apply_to(self, record: &mut Record) {
        record.first_name = self.first;
        record.middle_name = self.middle;
        record.last_name = self.last;
    }
}
