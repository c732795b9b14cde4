use anyhow::Result;
use console::style;
use kinfolk_core::{Storage, StoredRecord};

pub async fn run(db: &str, search: Option<&str>, json: bool) -> Result<()> {
    let storage = Storage::open(db).await?;
    let records = match search {
        Some(query) => storage.search_records(query).await?,
        None => storage.list_records().await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        eprintln!("No records");
        return Ok(());
    }

    for stored in &records {
        print_record(stored);
    }

    Ok(())
}

fn print_record(stored: &StoredRecord) {
    let record = &stored.record;
    let name = [record.first_name.as_str(), record.middle_name.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut line = if record.last_name.is_empty() {
        format!("{}", style(&name).bold())
    } else {
        format!("{}", style(format!("{}, {name}", record.last_name)).bold())
    };

    if let Some(birth) = &record.birth {
        line.push_str(&format!("  b. {birth}"));
    }

    println!(
        "{line}  {}",
        style(format!("[{}#{}]", stored.page, record.identifier)).dim()
    );
}
