mod shared;
mod store;
mod tournament;

use std::sync::Arc;

use store::InMemoryRecordStore;
// use store::PostgresRecordStore; // For production
use tournament::TournamentService;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swisspair=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Swiss tournament demo round");

    // Easy to switch between store implementations:
    let store = Arc::new(InMemoryRecordStore::new());

    // For production with PostgreSQL (schema in schema.sql):
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await?;
    // let store = Arc::new(PostgresRecordStore::new(pool));

    let service = TournamentService::new(store);

    let mut ids = Vec::new();
    for name in ["Ada", "Grace", "Edsger", "Barbara"] {
        ids.push(service.register_player(name).await?);
    }

    service.report_match(ids[0], ids[1]).await?;
    service.report_match(ids[2], ids[3]).await?;
    service.report_match(ids[0], ids[2]).await?;

    let standings = service.standings().await?;
    println!("standings: {}", serde_json::to_string_pretty(&standings)?);

    let pairings = service.next_round_pairings().await?;
    println!("next round: {}", serde_json::to_string_pretty(&pairings)?);

    Ok(())
}
