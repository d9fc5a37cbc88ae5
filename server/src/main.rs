use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use ne_core::services::{Clock, EdDsaKeyManager, SystemClock, TokenCodec, TokenCodecConfig};
use ne_infra::cache::{RedisClient, RedisRevocationStore};
use ne_infra::database::{DatabasePool, MySqlEmojiRepository, MySqlUserRepository};
use ne_server::{serve, telemetry, AppState};
use ne_shared::config::DEFAULT_CONFIG_FILE;
use ne_shared::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "noemoji-server", version, about = "NoEmoji session token authority")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, env = "NOEMOJI_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    telemetry::init(&config.logging).context("initialising logging")?;

    info!(environment = %config.environment, "Starting NoEmoji server");

    let keys = EdDsaKeyManager::from_config(&config.auth.jwt).context("loading token keys")?;
    let (private_key, public_key) = keys.key_paths();
    info!(private_key = %private_key.display(), public_key = %public_key.display(), "Loaded token keys");

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("connecting to MySQL")?;
    pool.create_tables().await.context("creating tables")?;
    info!("{}", pool.get_statistics());

    let redis = RedisClient::new(&config.cache)
        .await
        .context("connecting to Redis")?;
    anyhow::ensure!(
        pool.health_check().await? && redis.health_check().await?,
        "storage health check failed"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let codec = Arc::new(TokenCodec::new(
        keys,
        TokenCodecConfig::from(&config.auth.jwt),
        clock.clone(),
    ));
    let state = Arc::new(AppState::new(
        Arc::new(MySqlUserRepository::from_pool(&pool)),
        Arc::new(MySqlEmojiRepository::from_pool(&pool)),
        Arc::new(RedisRevocationStore::from_config(redis, &config.cache)),
        codec,
        clock,
    ));

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;
    info!(address = %listener.local_addr()?, "Listening for WebSocket connections");

    serve(listener, state, config.server.max_message_size, shutdown_signal()).await;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}
