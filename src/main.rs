use std::env;

use config::Config;
use dotenvy::dotenv;

use taller_console::models::config::ServerConfig;
use taller_console::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build()
        .map_err(|e| std::io::Error::other(format!("Error loading settings: {e}")))?;

    let server_config = settings
        .try_deserialize::<ServerConfig>()
        .map_err(|e| std::io::Error::other(format!("Error loading server config: {e}")))?;

    run(server_config).await
}
