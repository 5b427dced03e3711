//! # xp-engine
//!
//! The scoring and ranking engine: rate-limited XP accumulation, the content
//! gate for low-reputation users, rank presentation and event routing. All
//! outside contact goes through the `xp-core` ports, so the engine is
//! oblivious to which chat transport or ranked store backs it.

pub mod gate;
pub mod limiter;
pub mod presenter;
pub mod render;
pub mod router;

pub use gate::ContentGate;
pub use limiter::RateLimiter;
pub use presenter::{Podium, PodiumEntry, RankSummary, RankingPresenter};
pub use router::EventRouter;

/// Tunables shared across the engine components.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Minimum XP required to post gated content.
    pub min_xp: i64,
    /// Cooldown between counted activity events, in seconds. 0 disables
    /// rate limiting entirely.
    pub rate_limit_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            min_xp: 15,
            rate_limit_secs: 15,
        }
    }
}
