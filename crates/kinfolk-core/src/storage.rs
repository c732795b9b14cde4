use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use uuid::Uuid;

use crate::{record::Record, Error, Result};

const INIT_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    id TEXT PRIMARY KEY,
    identifier TEXT NOT NULL,
    page TEXT NOT NULL,
    first_name TEXT NOT NULL,
    middle_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    data TEXT NOT NULL,
    ingested_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_records_identifier ON records(identifier);
CREATE INDEX IF NOT EXISTS idx_records_name ON records(last_name, first_name, middle_name);

CREATE VIRTUAL TABLE IF NOT EXISTS records_fts USING fts5(
    first_name,
    middle_name,
    last_name,
    content='records',
    content_rowid='rowid'
);

CREATE TRIGGER IF NOT EXISTS records_ai AFTER INSERT ON records BEGIN
    INSERT INTO records_fts(rowid, first_name, middle_name, last_name)
    VALUES (NEW.rowid, NEW.first_name, NEW.middle_name, NEW.last_name);
END;
"#;

const SELECT_COLUMNS: &str = "SELECT r.id, r.page, r.data, r.ingested_at FROM records r";
const ORDER_BY_NAME: &str = "ORDER BY r.last_name, r.first_name, r.middle_name, r.rowid";

type RecordRow = (String, String, String, String);

/// A record as persisted, with the page it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,
    pub page: String,
    #[serde(flatten)]
    pub record: Record,
    pub ingested_at: DateTime<Utc>,
}

pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn open(path: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&format!("sqlite:{path}?mode=rwc"))
            .await?;

        sqlx::query(INIT_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn open_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        sqlx::query(INIT_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Insert every record from one page in a single transaction. Existing
    /// rows are never touched.
    pub async fn insert_records(&self, page: &str, records: &[Record]) -> Result<usize> {
        self.insert_pages([(page, records)]).await
    }

    /// Insert several pages in one transaction. Nothing is stored unless
    /// every page is.
    pub async fn insert_pages<'a, I>(&self, pages: I) -> Result<usize>
    where
        I: IntoIterator<Item = (&'a str, &'a [Record])>,
    {
        let ingested_at = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for (page, records) in pages {
            for record in records {
                let data_json = serde_json::to_string(record)?;

                sqlx::query(
                    r#"
                    INSERT INTO records (id, identifier, page, first_name, middle_name, last_name, data, ingested_at)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(Uuid::now_v7().to_string())
                .bind(&record.identifier)
                .bind(page)
                .bind(&record.first_name)
                .bind(&record.middle_name)
                .bind(&record.last_name)
                .bind(data_json)
                .bind(&ingested_at)
                .execute(&mut *tx)
                .await?;

                inserted += 1;
            }
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Every record, by last name then first name.
    pub async fn list_records(&self) -> Result<Vec<StoredRecord>> {
        let rows: Vec<RecordRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} {ORDER_BY_NAME}"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(parse_record_row).collect()
    }

    /// The earliest stored record with this page identifier.
    pub async fn get_record(&self, identifier: &str) -> Result<StoredRecord> {
        let row: RecordRow = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE r.identifier = ? ORDER BY r.rowid LIMIT 1"
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::RecordNotFound(identifier.to_string()))?;

        parse_record_row(row)
    }

    /// Full-text match against name parts. The query is matched as one
    /// phrase, so punctuation in names is literal.
    pub async fn search_records(&self, query: &str) -> Result<Vec<StoredRecord>> {
        let phrase = format!("\"{}\"", query.replace('"', "\"\""));
        let rows: Vec<RecordRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} JOIN records_fts ON records_fts.rowid = r.rowid \
             WHERE records_fts MATCH ? {ORDER_BY_NAME}"
        ))
        .bind(phrase)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(parse_record_row).collect()
    }

    pub async fn count_records(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn parse_record_row(row: RecordRow) -> Result<StoredRecord> {
    let (id, page, data_json, ingested_at) = row;

    Ok(StoredRecord {
        id: id
            .parse()
            .map_err(|_| Error::CorruptRow(format!("bad row id {id:?}")))?,
        page,
        record: serde_json::from_str(&data_json)?,
        ingested_at: DateTime::parse_from_rfc3339(&ingested_at)
            .map_err(|_| Error::CorruptRow(format!("bad timestamp {ingested_at:?}")))?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DatedEvent;
    use crate::record::PersonRef;

    fn person(identifier: &str, first: &str, last: &str) -> Record {
        Record {
            identifier: identifier.into(),
            first_name: first.into(),
            last_name: last.into(),
            ..Record::default()
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let storage = Storage::open_memory().await.unwrap();

        let mut john = person("I1", "John", "Adams");
        john.parents = [Some(PersonRef::new("I2", "John Adams")), None];
        john.birth = Some(DatedEvent::default());
        john.free_text = "He was a lawyer.".into();

        let inserted = storage
            .insert_records("fam01.htm", std::slice::from_ref(&john))
            .await
            .unwrap();
        assert_eq!(inserted, 1);

        let stored = storage.get_record("I1").await.unwrap();
        assert_eq!(stored.page, "fam01.htm");
        assert_eq!(stored.record, john);
        assert_eq!(stored.id.get_version_num(), 7);
    }

    #[tokio::test]
    async fn test_list_sorted_by_last_name() {
        let storage = Storage::open_memory().await.unwrap();
        storage
            .insert_records(
                "fam01.htm",
                &[
                    person("I1", "John", "Adams"),
                    person("I4", "Abigail", "Smith"),
                    person("I9", "Abigail", "Adams"),
                ],
            )
            .await
            .unwrap();

        let names: Vec<String> = storage
            .list_records()
            .await
            .unwrap()
            .iter()
            .map(|s| s.record.full_name())
            .collect();
        assert_eq!(names, ["Abigail Adams", "John Adams", "Abigail Smith"]);
        assert_eq!(storage.count_records().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_missing_record() {
        let storage = Storage::open_memory().await.unwrap();
        let err = storage.get_record("I404").await.unwrap_err();
        assert!(matches!(err, Error::RecordNotFound(ref id) if id == "I404"));
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let storage = Storage::open_memory().await.unwrap();
        storage
            .insert_records(
                "fam01.htm",
                &[person("I1", "John", "Adams"), person("I4", "Abigail", "Smith")],
            )
            .await
            .unwrap();

        let found = storage.search_records("Smith").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.identifier, "I4");
    }

    #[tokio::test]
    async fn test_search_treats_punctuation_literally() {
        let storage = Storage::open_memory().await.unwrap();
        storage
            .insert_records(
                "fam01.htm",
                &[
                    person("I1", "Mary", "O'Brien"),
                    person("I2", "Anne", "Smith-Jones"),
                    person("I3", "John", "Adams"),
                ],
            )
            .await
            .unwrap();

        let found = storage.search_records("O'Brien").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.identifier, "I1");

        let found = storage.search_records("Smith-Jones").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.identifier, "I2");

        assert_eq!(storage.search_records("Mary.").await.unwrap().len(), 1);

        let found = storage.search_records(r#"John "Adams"#).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.identifier, "I3");
    }

    #[tokio::test]
    async fn test_failed_page_rolls_back_batch() {
        let storage = Storage::open_memory().await.unwrap();
        sqlx::query(
            "CREATE TRIGGER reject_i9 BEFORE INSERT ON records WHEN NEW.identifier = 'I9' \
             BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(&storage.pool)
        .await
        .unwrap();

        let first = [person("I1", "John", "Adams")];
        let second = [person("I9", "Louisa", "Johnson")];
        let err = storage
            .insert_pages([("fam01.htm", &first[..]), ("fam02.htm", &second[..])])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Database(_)));
        assert_eq!(storage.count_records().await.unwrap(), 0);
    }
}
