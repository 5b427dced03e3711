//! Process configuration, read from the environment (and `.env` via dotenvy).

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{bail, Context};
use xp_engine::EngineConfig;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    pub redis_url: String,
    pub redis_prefix: String,
    pub engine: EngineConfig,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let Ok(telegram_token) = env::var("TELEGRAM_TOKEN") else {
            bail!("$TELEGRAM_TOKEN not set");
        };

        Ok(BotConfig {
            telegram_token,
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string()),
            redis_prefix: env::var("REDIS_PREFIX").unwrap_or_else(|_| "TELEGRAM_XP_".to_string()),
            engine: EngineConfig {
                min_xp: parse_or("MIN_XP", 15)?,
                rate_limit_secs: parse_or("RATE_LIMIT", 15)?,
            },
        })
    }
}

fn parse_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display + Send + Sync + std::error::Error + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("${name} is not a valid number: {raw:?}")),
        Err(_) => Ok(default),
    }
}
