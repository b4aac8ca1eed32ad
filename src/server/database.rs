use crate::common::models::{BlogEntry, BlogSection, BlogSummary};
use chrono::{DateTime, TimeZone, Utc};
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

/// The published articles, loaded into an empty store.
const SEED_ENTRIES: &str = include_str!("../../data/seed_entries.json");

/// Schema ordinal written to `jutzo_database_info` by this version of the server.
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA_TABLES: &[(&str, &[&str])] = &[
    ("jutzo_database_info", &["schema_ordinal"]),
    ("blog_entries", &["id", "title", "teaser", "publication_date"]),
    ("blog_sections", &["entry_id", "ordinal", "kind", "text", "level", "src", "alt"]),
];

/// What `Database::schema_state` found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaState {
    /// None of the tables exist yet.
    Empty,
    Current,
    Unsupported(String),
}

#[derive(Debug, Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        info!("[DB] Connecting to {}", database_url);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        if !in_memory {
            if let Some(parent) = sqlite_file_path(database_url).and_then(|p| std::path::Path::new(p).parent()) {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    debug!("[DB] Creating directory {:?}", parent);
                    std::fs::create_dir_all(parent).map_err(|e| sqlx::Error::Configuration(Box::new(e)))?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = if in_memory {
            // every connection to :memory: is its own database, so keep exactly one alive
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().max_connections(5).connect_with(options).await?
        };

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query("CREATE TABLE IF NOT EXISTS jutzo_database_info (schema_ordinal INTEGER NOT NULL)")
            .execute(&self.pool)
            .await?;
        sqlx::query("INSERT INTO jutzo_database_info (schema_ordinal) SELECT ? WHERE NOT EXISTS (SELECT 1 FROM jutzo_database_info)")
            .bind(SCHEMA_VERSION)
            .execute(&self.pool)
            .await?;

        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS blog_entries (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                teaser TEXT NOT NULL,
                publication_date INTEGER NOT NULL
            );
        "#).execute(&self.pool).await?;

        // one row per body section; `text` holds the header text for header sections
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS blog_sections (
                entry_id TEXT NOT NULL,
                ordinal INTEGER NOT NULL,
                kind TEXT NOT NULL,
                text TEXT,
                level INTEGER,
                src TEXT,
                alt TEXT,
                PRIMARY KEY (entry_id, ordinal)
            );
        "#).execute(&self.pool).await?;

        Ok(())
    }

    /// Drop every blog table and create them again, empty.
    pub async fn recreate(&self) -> Result<(), sqlx::Error> {
        info!("[DB] Recreating content store...");
        sqlx::query("DROP TABLE IF EXISTS blog_sections").execute(&self.pool).await?;
        sqlx::query("DROP TABLE IF EXISTS blog_entries").execute(&self.pool).await?;
        sqlx::query("DROP TABLE IF EXISTS jutzo_database_info").execute(&self.pool).await?;
        self.migrate().await
    }

    /// Compare the recorded schema ordinal and the live table layout with what this server expects.
    pub async fn schema_state(&self) -> Result<SchemaState, sqlx::Error> {
        let mut layouts = Vec::with_capacity(SCHEMA_TABLES.len());
        for (table, _) in SCHEMA_TABLES {
            layouts.push(self.table_columns(table).await?);
        }
        if layouts.iter().all(Vec::is_empty) {
            return Ok(SchemaState::Empty);
        }
        if layouts[0].is_empty() {
            return Ok(SchemaState::Unsupported("no schema version recorded".to_string()));
        }

        let ordinal = sqlx::query_scalar::<_, i64>("SELECT schema_ordinal FROM jutzo_database_info LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        match ordinal {
            Some(SCHEMA_VERSION) => {}
            Some(other) => return Ok(SchemaState::Unsupported(format!("schema version {}, expected {}", other, SCHEMA_VERSION))),
            None => return Ok(SchemaState::Unsupported("no schema version recorded".to_string())),
        }

        for ((table, expected), mut found) in SCHEMA_TABLES.iter().zip(layouts) {
            let mut expected: Vec<&str> = expected.to_vec();
            expected.sort_unstable();
            found.sort_unstable();
            if found != expected {
                return Ok(SchemaState::Unsupported(format!("table {} has columns {:?}", table, found)));
            }
        }
        Ok(SchemaState::Current)
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn entry_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blog_entries")
            .fetch_one(&self.pool)
            .await
    }

    /// Insert the published articles if the store holds no entry yet. Returns how many were inserted.
    pub async fn seed_default_entries(&self) -> Result<usize, sqlx::Error> {
        if self.entry_count().await? > 0 {
            return Ok(0);
        }
        let entries = default_entries().map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        for entry in &entries {
            self.insert_entry(entry).await?;
        }
        info!("[DB] Seeded {} blog entries", entries.len());
        Ok(entries.len())
    }

    /// Store one entry with its sections. The id must be a UUID; it is stored hyphenated lowercase.
    pub async fn insert_entry(&self, entry: &BlogEntry) -> Result<(), sqlx::Error> {
        let id = Uuid::parse_str(&entry.id)
            .map_err(|e| sqlx::Error::Protocol(format!("invalid entry id '{}': {}", entry.id, e)))?;
        let id = id.to_string();

        let mut tx = self.pool.begin().await?;
        sqlx::query("INSERT INTO blog_entries (id, title, teaser, publication_date) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&entry.title)
            .bind(&entry.teaser)
            .bind(entry.publication_date.timestamp())
            .execute(&mut *tx)
            .await?;

        for section in &entry.body {
            let (text, level, src, alt) = match section {
                BlogSection::Header { level, header, .. } => (Some(header.as_str()), Some(i64::from(*level)), None, None),
                BlogSection::Image { src, alt, .. } => (None, None, Some(src.as_str()), Some(alt.as_str())),
                BlogSection::Text { text, .. } => (Some(text.as_str()), None, None, None),
            };
            sqlx::query("INSERT INTO blog_sections (entry_id, ordinal, kind, text, level, src, alt) VALUES (?, ?, ?, ?, ?, ?, ?)")
                .bind(&id)
                .bind(i64::from(section.ordinal()))
                .bind(section.kind())
                .bind(text)
                .bind(level)
                .bind(src)
                .bind(alt)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!("[DB] Stored entry {} ({} sections)", id, entry.body.len());
        Ok(())
    }

    /// Every entry without its body, newest first.
    pub async fn newest_summaries(&self) -> Result<Vec<BlogSummary>, sqlx::Error> {
        let rows = sqlx::query("SELECT id, title, teaser, publication_date FROM blog_entries ORDER BY publication_date DESC, title")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(summary_from_row).collect()
    }

    pub async fn entry_by_id(&self, id: Uuid) -> Result<Option<BlogEntry>, sqlx::Error> {
        let id = id.to_string();
        let Some(row) = sqlx::query("SELECT id, title, teaser, publication_date FROM blog_entries WHERE id = ?")
            .bind(&id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };
        let summary = summary_from_row(&row)?;

        let rows = sqlx::query("SELECT ordinal, kind, text, level, src, alt FROM blog_sections WHERE entry_id = ? ORDER BY ordinal")
            .bind(&id)
            .fetch_all(&self.pool)
            .await?;
        let body = rows.iter().map(section_from_row).collect::<Result<Vec<_>, _>>()?;

        Ok(Some(BlogEntry {
            id: summary.id,
            publication_date: summary.publication_date,
            title: summary.title,
            teaser: summary.teaser,
            body,
        }))
    }
}

pub fn default_entries() -> Result<Vec<BlogEntry>, serde_json::Error> {
    serde_json::from_str(SEED_ENTRIES)
}

fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    Some(path.split('?').next().unwrap_or(path))
}

fn summary_from_row(row: &SqliteRow) -> Result<BlogSummary, sqlx::Error> {
    let seconds: i64 = row.try_get("publication_date")?;
    Ok(BlogSummary {
        id: row.try_get("id")?,
        publication_date: timestamp_to_utc(seconds)?,
        title: row.try_get("title")?,
        teaser: row.try_get("teaser")?,
    })
}

fn section_from_row(row: &SqliteRow) -> Result<BlogSection, sqlx::Error> {
    let ordinal: i64 = row.try_get("ordinal")?;
    let ordinal = u32::try_from(ordinal).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    let kind: String = row.try_get("kind")?;
    let text: Option<String> = row.try_get("text")?;

    Ok(match kind.as_str() {
        "header" => {
            let level: Option<i64> = row.try_get("level")?;
            BlogSection::Header {
                ordinal,
                level: level.and_then(|l| u8::try_from(l).ok()).unwrap_or(1),
                header: text.unwrap_or_default(),
            }
        }
        "image" => BlogSection::Image {
            ordinal,
            src: row.try_get::<Option<String>, _>("src")?.unwrap_or_default(),
            alt: row.try_get::<Option<String>, _>("alt")?.unwrap_or_default(),
        },
        _ => BlogSection::Text { ordinal, text: text.unwrap_or_default() },
    })
}

fn timestamp_to_utc(seconds: i64) -> Result<DateTime<Utc>, sqlx::Error> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| sqlx::Error::Decode(format!("invalid publication timestamp {}", seconds).into()))
}
