use std::sync::Arc;

use clap::Parser;
use poem::{Server, listener::TcpListener};

use locations_backend::AppData;
use locations_backend::api::build_routes;
use locations_backend::cli::{Cli, Command, SeedSettings, seed, seed_database};
use locations_backend::config::{
    BootstrapSettings, SecretManager, init_database, init_logging, migrate_database,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();

    let settings = BootstrapSettings::from_env()?;
    let secret_manager = SecretManager::init()?;

    let db = init_database(&settings).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db, &settings, secret_manager));

    match cli.command() {
        Command::Seed => {
            seed_database(&app_data, &SeedSettings::from_env()).await?;
        }
        Command::Serve => {
            if seed::is_unseeded(&app_data.db).await? {
                tracing::info!("Empty database, seeding defaults");
                seed_database(&app_data, &SeedSettings::from_env()).await?;
            }

            let address = settings.server_address();
            let server_url = format!("http://{}/api", address);
            let app = build_routes(app_data, &server_url);

            tracing::info!("Server listening on http://{}", address);
            tracing::info!("Swagger UI available at http://{}/swagger", address);

            Server::new(TcpListener::bind(address)).run(app).await?;
        }
    }

    Ok(())
}
