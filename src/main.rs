use std::sync::Arc;

use tracing::{error, info};

use microblog::web::{AppState, WebServer};
use microblog::{Config, Database, UserAdminService};

#[tokio::main]
async fn main() {
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = microblog::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        microblog::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = run(config).await {
        error!("Fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> microblog::Result<()> {
    config.validate()?;

    info!("Microblog starting");
    let db = Database::open(&config.database.path).await?;

    let promoted = UserAdminService::new(&db)
        .promote_admins(&config.auth.admin_emails)
        .await?;
    if promoted > 0 {
        info!(promoted, "Configured admins promoted");
    }

    let state = AppState::from_config(Arc::new(db), &config)?;
    let server = WebServer::new(&config.server, state)?;
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    server.run().await
}
