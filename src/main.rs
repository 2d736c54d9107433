use eventbook::api;
use eventbook::config::AppConfig;
use eventbook::services::EventSchedule;

use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventbook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Eventbook v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env()?;

    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    info!("Database connected");

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    info!("Migrations applied");

    let schedule = EventSchedule::new(config.event_timezone);

    let app = api::build_router(pool, schedule)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    info!("Starting server on {} (event timezone {})", addr, config.event_timezone);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
