//! # xp-store-redis
//!
//! Redis implementation of `ScoreLedger` and `TicketStore`. Each group's
//! scoreboard is a sorted set under `{prefix}{group_id}`; rate-limit tickets
//! are plain keys under `{prefix}_USER_{user_id}` written with `SET NX EX`,
//! so a claim is a single atomic check-and-set-with-expiry.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::redis::{cmd, AsyncCommands};
use deadpool_redis::{Config, Connection, Pool, Runtime};
use xp_core::error::{Result, XpError};
use xp_core::models::{GroupId, ScoreEntry, UserId};
use xp_core::traits::{ScoreLedger, TicketStore};

pub struct RedisStore {
    pool: Pool,
    prefix: String,
}

fn store_err(err: impl std::fmt::Display) -> XpError {
    XpError::Store(err.to_string())
}

impl RedisStore {
    pub fn new(url: &str, prefix: impl Into<String>) -> Result<Self> {
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(store_err)?;
        Ok(Self {
            pool,
            prefix: prefix.into(),
        })
    }

    fn board_key(&self, group: GroupId) -> String {
        format!("{}{}", self.prefix, group.0)
    }

    fn ticket_key(&self, user: UserId) -> String {
        format!("{}_USER_{}", self.prefix, user.0)
    }

    async fn conn(&self) -> Result<Connection> {
        self.pool.get().await.map_err(store_err)
    }
}

#[async_trait]
impl ScoreLedger for RedisStore {
    async fn increment(&self, group: GroupId, user: UserId, delta: i64) -> Result<i64> {
        let mut conn = self.conn().await?;
        let score: i64 = conn
            .zincr(self.board_key(group), user.0, delta)
            .await
            .map_err(store_err)?;
        Ok(score)
    }

    async fn score(&self, group: GroupId, user: UserId) -> Result<Option<i64>> {
        let mut conn = self.conn().await?;
        conn.zscore(self.board_key(group), user.0)
            .await
            .map_err(store_err)
    }

    async fn rank(&self, group: GroupId, user: UserId) -> Result<Option<u64>> {
        let mut conn = self.conn().await?;
        let rank: Option<i64> = conn
            .zrevrank(self.board_key(group), user.0)
            .await
            .map_err(store_err)?;
        // ZREVRANK is 0-based; callers see 1 = highest score.
        Ok(rank.map(|r| r as u64 + 1))
    }

    async fn total_ranked(&self, group: GroupId) -> Result<u64> {
        let mut conn = self.conn().await?;
        conn.zcard(self.board_key(group)).await.map_err(store_err)
    }

    async fn next_threshold(&self, group: GroupId, score: i64) -> Result<Option<ScoreEntry>> {
        let mut conn = self.conn().await?;
        let hits: Vec<(u64, i64)> = conn
            .zrangebyscore_limit_withscores(self.board_key(group), score + 2, "+inf", 0, 1)
            .await
            .map_err(store_err)?;
        Ok(hits
            .into_iter()
            .next()
            .map(|(user, score)| ScoreEntry {
                user: UserId(user),
                score,
            }))
    }

    async fn top_k(&self, group: GroupId, k: usize) -> Result<Vec<ScoreEntry>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        // ZREVRANGE bounds are inclusive, so top-k ends at k-1.
        let entries: Vec<(u64, i64)> = conn
            .zrevrange_withscores(self.board_key(group), 0, k as isize - 1)
            .await
            .map_err(store_err)?;
        Ok(entries
            .into_iter()
            .map(|(user, score)| ScoreEntry {
                user: UserId(user),
                score,
            })
            .collect())
    }

    async fn reset(&self, group: GroupId, user: UserId) -> Result<()> {
        let mut conn = self.conn().await?;
        let _: i64 = conn
            .zrem(self.board_key(group), user.0)
            .await
            .map_err(store_err)?;
        Ok(())
    }
}

#[async_trait]
impl TicketStore for RedisStore {
    async fn claim(&self, user: UserId, ttl: Duration) -> Result<bool> {
        let mut conn = self.conn().await?;
        let claimed: Option<String> = cmd("SET")
            .arg(self.ticket_key(user))
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await
            .map_err(store_err)?;
        Ok(claimed.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RedisStore {
        RedisStore::new("redis://127.0.0.1/", "TELEGRAM_XP_").unwrap()
    }

    #[test]
    fn board_keys_follow_the_legacy_scheme() {
        let store = store();
        assert_eq!(store.board_key(GroupId(-1001234)), "TELEGRAM_XP_-1001234");
        assert_eq!(store.ticket_key(UserId(42)), "TELEGRAM_XP__USER_42");
    }
}
