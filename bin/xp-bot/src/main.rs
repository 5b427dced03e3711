//! # XP Bot Binary
//!
//! The entry point that assembles the engine against a ranked store selected
//! at compile time and runs the Telegram event loop.

mod config;

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{info, warn};
use xp_engine::EventRouter;
use xp_transport_telegram::{event_from_message, TelegramTransport};

// Feature-gated imports: the binary is compiled against exactly one store.
#[cfg(feature = "store-redis")]
use xp_store_redis::RedisStore;

#[cfg(all(feature = "store-memory", not(feature = "store-redis")))]
use xp_store_memory::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::BotConfig::from_env()?;

    #[cfg(feature = "store-redis")]
    let store = Arc::new(
        RedisStore::new(&config.redis_url, config.redis_prefix.clone())
            .map_err(|err| anyhow::anyhow!("failed to set up the redis pool: {err}"))?,
    );

    #[cfg(all(feature = "store-memory", not(feature = "store-redis")))]
    let store = Arc::new(MemoryStore::new());

    let bot = Bot::new(config.telegram_token.clone());
    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    let router = Arc::new(EventRouter::new(
        store.clone(),
        store,
        transport,
        config.engine,
    ));

    info!(
        min_xp = config.engine.min_xp,
        rate_limit_secs = config.engine.rate_limit_secs,
        "XP Bot starting"
    );

    teloxide::repl(bot, move |msg: Message| {
        let router = router.clone();
        async move {
            if let Some(event) = event_from_message(&msg) {
                // One event's failure never stops the loop; at worst a
                // single increment or reply is lost.
                if let Err(err) = router.handle(&event).await {
                    warn!(%err, "event handling failed");
                }
            }
            respond(())
        }
    })
    .await;

    Ok(())
}
