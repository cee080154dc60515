use std::env;

use clap::Parser;
use dotenvy::dotenv;
use validator::Validate;

use hrm_console::models::config::ConsoleConfig;
use hrm_console::{ConsoleCommand, run};

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let command = ConsoleCommand::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let console_config = match ConsoleConfig::load(&app_env) {
        Ok(console_config) => console_config,
        Err(err) => {
            log::error!("Error loading console config: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = console_config.validate() {
        log::error!("Invalid console config: {}", err);
        std::process::exit(1);
    }

    if let Err(err) = run(console_config, command).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}
