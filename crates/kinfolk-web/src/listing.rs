//! The family listing at `/`: one block per person with their name and
//! the narrative text that did not map onto a field.

use std::fmt::Write;

use axum::{extract::State, http::StatusCode, response::Html};
use html_escape::{encode_double_quoted_attribute, encode_text};
use kinfolk_core::StoredRecord;

use crate::state::AppState;

pub async fn family_listing(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let records = state
        .storage
        .list_records()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Html(render(&records)))
}

fn render(records: &[StoredRecord]) -> String {
    let mut page = String::from(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Family</title></head><body>\n",
    );

    for stored in records {
        let record = &stored.record;
        let _ = write!(
            page,
            "<a name=\"{}\"></a><b>Name: {}</b><br>",
            encode_double_quoted_attribute(&record.identifier),
            encode_text(&record.full_name())
        );
        if let Some(birth) = record.birth.as_ref().filter(|b| !b.is_empty()) {
            let _ = write!(page, "<b>Born:</b> {}<br>", encode_text(&birth.to_string()));
        }
        let _ = writeln!(page, "<b>Description:</b> {}<hr>", encode_text(&record.free_text));
    }

    page.push_str("</body></html>\n");
    page
}
