use crate::server::database::{Database, SchemaState};
use log::{info, warn};

/// How the content store should be brought up at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreSetup {
    /// Create and seed the store when it is empty.
    pub init_db: bool,
    /// With `init_db`: throw away whatever is there and start over.
    pub force: bool,
}

/// Make sure the store has the expected schema and at least one entry. Returns the entry count.
pub async fn prepare_content_store(db: &Database, setup: StoreSetup) -> anyhow::Result<i64> {
    if setup.force && setup.init_db {
        db.recreate().await?;
    } else {
        if setup.force {
            warn!("[SETUP] --force has no effect without --init-db");
        }
        match db.schema_state().await? {
            SchemaState::Empty | SchemaState::Current => {}
            SchemaState::Unsupported(reason) if setup.init_db => {
                warn!("[SETUP] Rebuilding content store with an unsupported schema ({})", reason);
                db.recreate().await?;
            }
            SchemaState::Unsupported(reason) => anyhow::bail!(
                "database has an unsupported schema version ({}); start the server with --init-db to rebuild it",
                reason
            ),
        }
    }
    db.migrate().await?;

    let mut count = db.entry_count().await?;
    if count == 0 {
        if !setup.init_db {
            anyhow::bail!("the content store is empty; start the server with --init-db to seed it");
        }
        count = db.seed_default_entries().await? as i64;
    }

    info!("[SETUP] Content store ready with {} entries", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_db() -> Database {
        Database::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn empty_store_without_init_is_refused() {
        let db = memory_db().await;
        let err = prepare_content_store(&db, StoreSetup::default()).await.unwrap_err();
        assert!(err.to_string().contains("--init-db"));
    }

    #[tokio::test]
    async fn init_seeds_an_empty_store_once() {
        let db = memory_db().await;
        let setup = StoreSetup { init_db: true, force: false };
        assert_eq!(prepare_content_store(&db, setup).await.unwrap(), 2);
        assert_eq!(prepare_content_store(&db, StoreSetup::default()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn force_starts_over() {
        let db = memory_db().await;
        db.migrate().await.unwrap();
        let mut extra = crate::common::models::BlogEntry::placeholder("extra");
        extra.id = "5a4c3b2d-1e0f-4a9b-8c7d-6e5f4a3b2c1d".to_string();
        db.insert_entry(&extra).await.unwrap();

        let setup = StoreSetup { init_db: true, force: true };
        assert_eq!(prepare_content_store(&db, setup).await.unwrap(), 2);
    }

    async fn legacy_db() -> Database {
        let db = memory_db().await;
        sqlx::query("CREATE TABLE blog_entries (id TEXT PRIMARY KEY, body TEXT)")
            .execute(&db.pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO blog_entries (id, body) VALUES ('x', 'old')")
            .execute(&db.pool)
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn unsupported_schema_is_refused_without_init() {
        let db = legacy_db().await;
        let err = prepare_content_store(&db, StoreSetup::default()).await.unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"), "{}", err);

        let db = memory_db().await;
        db.migrate().await.unwrap();
        sqlx::query("UPDATE jutzo_database_info SET schema_ordinal = 2").execute(&db.pool).await.unwrap();
        let err = prepare_content_store(&db, StoreSetup::default()).await.unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"), "{}", err);
    }

    #[tokio::test]
    async fn unsupported_schema_is_rebuilt_with_init() {
        let db = legacy_db().await;
        let setup = StoreSetup { init_db: true, force: false };
        assert_eq!(prepare_content_store(&db, setup).await.unwrap(), 2);
        assert_eq!(db.schema_state().await.unwrap(), SchemaState::Current);
        assert_eq!(db.newest_summaries().await.unwrap().len(), 2);
    }
}
