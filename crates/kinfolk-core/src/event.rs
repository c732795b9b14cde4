use chrono::Month;
use serde::{Deserialize, Serialize};

const MONTH_ABBREVIATIONS: [(&str, Month); 12] = [
    ("Jan", Month::January),
    ("Feb", Month::February),
    ("Mar", Month::March),
    ("Apr", Month::April),
    ("May", Month::May),
    ("Jun", Month::June),
    ("Jul", Month::July),
    ("Aug", Month::August),
    ("Sep", Month::September),
    ("Oct", Month::October),
    ("Nov", Month::November),
    ("Dec", Month::December),
];

/// Parse a three-letter month abbreviation, optionally followed by a period.
#[must_use]
pub fn parse_month_abbreviation(token: &str) -> Option<Month> {
    let token = token.strip_suffix('.').unwrap_or(token);
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == token)
        .map(|(_, month)| *month)
}

#[must_use]
pub fn month_abbreviation(month: Month) -> &'static str {
    &month.name()[..3]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "month_serde")]
    pub month: Option<Month>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
}

impl EventDate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }
}

impl std::fmt::Display for EventDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(day) = self.day {
            parts.push(day.to_string());
        }
        if let Some(month) = self.month {
            parts.push(month_abbreviation(month).to_string());
        }
        if let Some(year) = self.year {
            parts.push(year.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Location {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.town.is_none() && self.county.is_none() && self.state.is_none()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<&str> = [&self.town, &self.county, &self.state]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// A dated occurrence in a person's life. Every component is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedEvent {
    #[serde(default)]
    pub date: EventDate,
    #[serde(default)]
    pub location: Location,
}

impl DatedEvent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.location.is_empty()
    }
}

impl std::fmt::Display for DatedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.date.is_empty(), self.location.is_empty()) {
            (false, false) => write!(f, "{} in {}", self.date, self.location),
            (false, true) => write!(f, "{}", self.date),
            (true, false) => write!(f, "in {}", self.location),
            (true, true) => Ok(()),
        }
    }
}

mod month_serde {
    use chrono::Month;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(month: &Option<Month>, s: S) -> Result<S::Ok, S::Error> {
        match month {
            Some(m) => s.serialize_some(super::month_abbreviation(*m)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Month>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| {
            super::parse_month_abbreviation(&s)
                .ok_or_else(|| D::Error::custom(format!("unknown month `{s}`")))
        })
        .transpose()
    }
}
