use tracing::{error, info};

use authgate::auth::Argon2Hasher;
use authgate::web::handlers::AppState;
use authgate::web::WebServer;
use authgate::{Config, Database};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = authgate::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        authgate::logging::init_console_only(&config.logging.level);
    }

    info!("authgate starting");

    if let Err(e) = run(config).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> authgate::Result<()> {
    let db = Database::open(&config.database.path).await?;
    info!("Database schema version {}", db.schema_version().await?);

    let hasher = Argon2Hasher::from_config(&config.password)?;
    let state = AppState::new(&db, hasher, config.session.clone());

    let server = WebServer::new(&config.server, state)?;
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );
    server.run().await
}
