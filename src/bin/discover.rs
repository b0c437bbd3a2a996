//! Records every channel the bot account belongs to into the registry.
//!
//! Reads the config from `$SCRUMBOT_CONFIG` (default `config/config.json`)
//! and the registry from `$SCRUMBOT_REGISTRY` (default
//! `scrum_list/scrum_list.json`). Exits 1 on a missing or unreadable
//! config, 2 on a missing or unreadable registry.

use dotenvy::dotenv;
use scrumbot::config::Config;
use scrumbot::error::Failure;
use scrumbot::mattermost::api::Client;
use scrumbot::registry::RegistryError;
use scrumbot::sync;
use std::path::PathBuf;
use std::{env, process};
use tracing::{error, warn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    if dotenv().is_err() {
        warn!("No .env found");
    }

    let config_path: PathBuf = env::var("SCRUMBOT_CONFIG")
        .unwrap_or_else(|_| "config/config.json".into())
        .into();
    let registry_path: PathBuf = env::var("SCRUMBOT_REGISTRY")
        .unwrap_or_else(|_| "scrum_list/scrum_list.json".into())
        .into();

    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let client = match Client::connect(
        &config.mattermost.url,
        &config.mattermost.user_id,
        &config.mattermost.password,
        &config.mattermost.version,
    )
    .await
    {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = sync::run(&client, &registry_path, config.registry.on_conflict).await {
        error!("{}", e);
        process::exit(exit_code(&e));
    }
}

/// A missing or unreadable registry is the documented exit code 2;
/// everything else is the generic failure.
fn exit_code(e: &Failure) -> i32 {
    match e {
        Failure::Registry(RegistryError::NotFound(_))
        | Failure::Registry(RegistryError::Malformed(_))
        | Failure::Registry(RegistryError::Io(_)) => 2,
        _ => 1,
    }
}
