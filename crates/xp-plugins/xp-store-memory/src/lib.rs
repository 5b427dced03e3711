//! # xp-store-memory
//!
//! In-process implementation of `ScoreLedger` and `TicketStore`. Useful for
//! trial runs without a redis instance and as the ledger double in engine
//! tests. Ordering is deterministic: descending score, ties by ascending
//! user id.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use xp_core::error::Result;
use xp_core::models::{GroupId, ScoreEntry, UserId};
use xp_core::traits::{ScoreLedger, TicketStore};

#[derive(Default)]
pub struct MemoryStore {
    boards: Mutex<HashMap<GroupId, HashMap<UserId, i64>>>,
    tickets: Mutex<HashMap<UserId, Instant>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a group's scoreboard in rank order.
    fn ranked(&self, group: GroupId) -> Vec<ScoreEntry> {
        let boards = self.boards.lock().unwrap();
        let mut entries: Vec<ScoreEntry> = boards
            .get(&group)
            .map(|board| {
                board
                    .iter()
                    .map(|(&user, &score)| ScoreEntry { user, score })
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.user.cmp(&b.user)));
        entries
    }
}

#[async_trait]
impl ScoreLedger for MemoryStore {
    async fn increment(&self, group: GroupId, user: UserId, delta: i64) -> Result<i64> {
        let mut boards = self.boards.lock().unwrap();
        let score = boards.entry(group).or_default().entry(user).or_insert(0);
        *score += delta;
        Ok(*score)
    }

    async fn score(&self, group: GroupId, user: UserId) -> Result<Option<i64>> {
        let boards = self.boards.lock().unwrap();
        Ok(boards.get(&group).and_then(|board| board.get(&user)).copied())
    }

    async fn rank(&self, group: GroupId, user: UserId) -> Result<Option<u64>> {
        Ok(self
            .ranked(group)
            .iter()
            .position(|entry| entry.user == user)
            .map(|idx| idx as u64 + 1))
    }

    async fn total_ranked(&self, group: GroupId) -> Result<u64> {
        let boards = self.boards.lock().unwrap();
        Ok(boards.get(&group).map(|board| board.len() as u64).unwrap_or(0))
    }

    async fn next_threshold(&self, group: GroupId, score: i64) -> Result<Option<ScoreEntry>> {
        let mut above: Vec<ScoreEntry> = self
            .ranked(group)
            .into_iter()
            .filter(|entry| entry.score >= score + 2)
            .collect();
        above.sort_by(|a, b| a.score.cmp(&b.score).then(a.user.cmp(&b.user)));
        Ok(above.into_iter().next())
    }

    async fn top_k(&self, group: GroupId, k: usize) -> Result<Vec<ScoreEntry>> {
        let mut entries = self.ranked(group);
        entries.truncate(k);
        Ok(entries)
    }

    async fn reset(&self, group: GroupId, user: UserId) -> Result<()> {
        let mut boards = self.boards.lock().unwrap();
        if let Some(board) = boards.get_mut(&group) {
            board.remove(&user);
        }
        Ok(())
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn claim(&self, user: UserId, ttl: Duration) -> Result<bool> {
        let mut tickets = self.tickets.lock().unwrap();
        let now = Instant::now();
        match tickets.get(&user) {
            Some(&expiry) if expiry > now => Ok(false),
            _ => {
                tickets.insert(user, now + ttl);
                Ok(true)
            }
        }
    }
}
