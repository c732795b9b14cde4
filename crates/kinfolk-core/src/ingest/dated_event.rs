//! Reads `[on|in|about] [day] [month] [year] [in town, county Co., state]`
//! out of a flat token stream.

use super::warning::Warning;
use crate::event::{parse_month_abbreviation, DatedEvent, EventDate, Location};
use crate::{Error, Result};

const TRIGGERS: [&str; 3] = ["on", "in", "about"];

/// Parse the first dated event in `tokens`. No trigger word gives an empty
/// event. Commas are expected as their own tokens.
pub fn parse_dated_event<S: AsRef<str>>(
    tokens: &[S],
    warnings: &mut Vec<Warning>,
) -> Result<DatedEvent> {
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

    let Some(start) = tokens.iter().position(|t| TRIGGERS.contains(t)) else {
        return Ok(DatedEvent::default());
    };

    let mut cursor = start + 1;
    let mut date = EventDate::default();
    let mut terminated = false;

    if let Some(day) = tokens.get(cursor).and_then(|t| parse_day(t)) {
        date.day = Some(day);
        cursor += 1;
    }
    if let Some(month) = tokens.get(cursor).and_then(|t| parse_month_abbreviation(t)) {
        date.month = Some(month);
        cursor += 1;
    }
    if let Some(token) = tokens.get(cursor) {
        if let Some(year) = parse_year(token) {
            date.year = Some(year);
            terminated = token.ends_with('.');
            cursor += 1;
        }
    }

    if date.is_empty() {
        return Err(Error::MissingDate {
            trigger: tokens[start].to_string(),
        });
    }

    let mut event = DatedEvent {
        date,
        location: Location::default(),
    };

    if terminated {
        return Ok(event);
    }

    match tokens.get(cursor) {
        None | Some(&".") => return Ok(event),
        Some(&"in") => {}
        Some(other) => {
            return Err(Error::MissingLocationClause {
                found: (*other).to_string(),
            })
        }
    }

    let clause = tokens[cursor + 1..]
        .iter()
        .take_while(|t| **t != ".")
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    event.location = parse_location(&clause, warnings)?;

    Ok(event)
}

/// Split a `town, county Co., state` clause. Fewer parts fill from the right.
pub fn parse_location(clause: &str, warnings: &mut Vec<Warning>) -> Result<Location> {
    if clause.trim().is_empty() {
        return Ok(Location::default());
    }

    let parts: Vec<&str> = clause.split(',').map(str::trim).collect();

    let location = match parts.as_slice() {
        [state] => Location {
            state: state_name(state),
            ..Location::default()
        },
        [county, state] => Location {
            county: county_name(county, warnings),
            state: state_name(state),
            ..Location::default()
        },
        [town, county, state] => Location {
            town: non_empty(town),
            county: county_name(county, warnings),
            state: state_name(state),
        },
        _ => {
            return Err(Error::AmbiguousLocation {
                location: clause.to_string(),
                clauses: parts.len(),
            })
        }
    };

    Ok(location)
}

fn county_name(raw: &str, warnings: &mut Vec<Warning>) -> Option<String> {
    if let Some(county) = raw.strip_suffix("Co.") {
        return non_empty(county.trim_end());
    }
    if !raw.is_empty() {
        warnings.push(Warning::MissingCountySuffix {
            county: raw.to_string(),
        });
    }
    non_empty(raw)
}

fn state_name(raw: &str) -> Option<String> {
    non_empty(raw.strip_suffix('.').unwrap_or(raw).trim_end())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn digits(token: &str) -> Option<&str> {
    (!token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())).then_some(token)
}

fn parse_day(token: &str) -> Option<u8> {
    digits(token)?
        .parse::<u8>()
        .ok()
        .filter(|day| (1..=31).contains(day))
}

fn parse_year(token: &str) -> Option<i32> {
    digits(token.strip_suffix('.').unwrap_or(token))?.parse().ok()
}
