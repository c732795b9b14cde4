use regex::Regex;
use std::sync::LazyLock;

use super::fragment::Fragment;

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("static pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Clean up line-wrapping artifacts and isolate sentence-ending periods as
/// their own fragments.
///
/// Plain text is split on runs of two or more spaces. A piece ending in `.`
/// loses its trailing periods and is followed by a lone `.` fragment.
/// Reference fragments only have their whitespace collapsed, so a person's
/// name is never broken up or stripped. Footnotes pass through. Running the
/// result through again changes nothing.
#[must_use]
pub fn normalize(raw: &[Fragment]) -> Vec<Fragment> {
    let mut out = Vec::with_capacity(raw.len());
    for fragment in raw {
        normalize_fragment(fragment, &mut out);
    }
    out
}

fn normalize_fragment(fragment: &Fragment, out: &mut Vec<Fragment>) {
    let mut fragment = fragment.clone();
    fragment.text = fragment.text.replace(['\r', '\n'], " ");

    if fragment.is_footnote {
        out.push(fragment);
        return;
    }

    if fragment.is_reference() {
        fragment.text = WHITESPACE_RUN
            .replace_all(fragment.text.trim(), " ")
            .into_owned();
        out.push(fragment);
        return;
    }

    for piece in SPACE_RUN.split(&fragment.text) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }

        if piece.ends_with('.') {
            let body = piece.trim_end_matches(|c: char| c == '.' || c.is_whitespace());
            if !body.is_empty() {
                out.push(Fragment::text(body));
            }
            out.push(Fragment::terminator());
        } else {
            out.push(Fragment::text(piece));
        }
    }
}
