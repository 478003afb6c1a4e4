use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expensed={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let database = sea_orm::Database::connect(&settings.server.database).await?;
    Migrator::up(&database, None).await?;

    let engine = engine::Engine::builder().database(database).build();

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, settings.app.environment, listener).await?;

    Ok(())
}
