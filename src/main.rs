use dotenvy::dotenv;
use scrapyard_ledger::{
    app::App,
    config::{database, insights::InsightsSettings, seed},
    core::{
        insights::{InsightsClient, insight_lines},
        report::format_weekly_summary,
    },
    errors::Result,
    store::SeaOrmStore,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    let want_insights = std::env::args().skip(1).any(|arg| arg == "--insights");

    // 3. Load seed data
    let seed_config = seed::load_default_config()
        .inspect_err(|e| error!("Failed to load seed configuration: {}", e))?;

    // 4. Open the database and make sure the slots table exists
    let database_url = database::get_database_url();
    database::ensure_sqlite_parent_dir(&database_url)?;
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to {}: {}", database_url, e))?;
    database::create_tables(&db).await?;
    info!("Database ready at {}", database_url);

    // 5. Load state, seeding an empty store
    let app = App::bootstrap(SeaOrmStore::new(db), &seed_config).await?;

    println!("{}", format_weekly_summary(&app.dashboard()));

    // 6. Optionally ask for insights on the current week
    if want_insights {
        let settings = InsightsSettings::from_env();
        if !settings.is_enabled() {
            info!("No insights API key configured");
        }
        let client = InsightsClient::new(settings)?;
        match app.insights_for_week(&client).await {
            Some(text) => {
                println!();
                for line in insight_lines(&text) {
                    println!("- {line}");
                }
            }
            None => println!("\nSem transações nesta semana para analisar."),
        }
    }

    Ok(())
}
