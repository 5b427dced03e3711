//! # Core Traits (Ports)
//!
//! The engine only ever talks to the outside world through these three
//! contracts. Any plugin must implement them to be wired into the binary.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{GroupId, Member, MessageId, ScoreEntry, SendOptions, UserId};

/// Ranked persistence contract: per-group mapping from user to XP score,
/// ordered descending by score.
///
/// An absent entry is distinct from a zero score: a user with no recorded
/// activity is unranked, not "0 XP". Operations on a group with no entries
/// return `None`/`0`/empty, never an error.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ScoreLedger: Send + Sync {
    /// Adds `delta` to the user's score, creating the entry at `delta` if
    /// absent. Returns the new score. Must be atomic in the store.
    async fn increment(&self, group: GroupId, user: UserId, delta: i64) -> Result<i64>;

    /// The user's current score, or `None` if unranked.
    async fn score(&self, group: GroupId, user: UserId) -> Result<Option<i64>>;

    /// 1-based position, 1 = highest score. Ties break per the store's
    /// deterministic ordering. `None` if unranked.
    async fn rank(&self, group: GroupId, user: UserId) -> Result<Option<u64>>;

    /// Number of entries on the group's scoreboard.
    async fn total_ranked(&self, group: GroupId) -> Result<u64>;

    /// The closest rival to beat: among users with score ≥ `score + 2`,
    /// the one with the lowest such score, or `None`.
    async fn next_threshold(&self, group: GroupId, score: i64) -> Result<Option<ScoreEntry>>;

    /// The top `k` entries, highest score first, length ≤ `k`.
    async fn top_k(&self, group: GroupId, k: usize) -> Result<Vec<ScoreEntry>>;

    /// Removes the user's entry entirely. A no-op when already absent.
    async fn reset(&self, group: GroupId, user: UserId) -> Result<()>;
}

/// Rate-limit ticket contract.
///
/// Backed by an atomic check-and-set-with-expiry primitive; the engine never
/// assumes it holds an exclusive lock.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Atomically creates a ticket for `user` with the given TTL if none is
    /// live. Returns `true` if newly claimed (the event counts) or `false`
    /// if a live ticket suppressed it. The ticket self-destructs after
    /// `ttl`; there is no explicit deletion path.
    async fn claim(&self, user: UserId, ttl: Duration) -> Result<bool>;
}

/// Chat transport contract: the narrow slice of the chat API the engine uses.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_message(&self, group: GroupId, text: &str, opts: SendOptions) -> Result<()>;

    /// Sends `text` prefixed with the member's display name, silently and
    /// with text emphasis.
    async fn send_mention(&self, group: GroupId, member: &Member, text: &str) -> Result<()>;

    async fn delete_message(&self, group: GroupId, message_id: MessageId) -> Result<()>;

    /// Resolves a member's display identity, or `None` if the transport no
    /// longer knows them.
    async fn resolve_member(&self, group: GroupId, user: UserId) -> Result<Option<Member>>;
}
