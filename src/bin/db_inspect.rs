use jutzo::server::config::ServerConfig;
use jutzo::server::database::Database;
use sqlx::Row;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let db_url = std::env::args().nth(1).unwrap_or_else(|| ServerConfig::from_env().database_url);
    println!("Connecting to {}", db_url);
    let db = Database::connect(&db_url).await?;
    println!("schema: {:?}", db.schema_state().await?);

    println!("\n-- blog_entries --");
    let rows = sqlx::query("SELECT id, title, publication_date FROM blog_entries ORDER BY publication_date DESC")
        .fetch_all(&db.pool)
        .await?;
    for r in rows.iter() {
        let id: String = r.try_get("id").unwrap_or_default();
        let title: String = r.try_get("title").unwrap_or_default();
        let published: i64 = r.try_get("publication_date").unwrap_or(0);
        println!("id={} published={} title={}", id, published, title);
    }

    println!("\n-- blog_sections (per entry) --");
    let rows = sqlx::query("SELECT entry_id, kind, COUNT(*) AS c FROM blog_sections GROUP BY entry_id, kind ORDER BY entry_id, kind")
        .fetch_all(&db.pool)
        .await?;
    for r in rows.iter() {
        let entry_id: String = r.try_get("entry_id").unwrap_or_default();
        let kind: String = r.try_get("kind").unwrap_or_default();
        let count: i64 = r.try_get("c").unwrap_or(0);
        println!("entry_id={} kind={} count={}", entry_id, kind, count);
    }

    Ok(())
}
