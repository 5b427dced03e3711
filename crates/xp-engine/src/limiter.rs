//! Cooldown-based rate limiting for XP accumulation.

use std::sync::Arc;
use std::time::Duration;

use xp_core::error::Result;
use xp_core::models::UserId;
use xp_core::traits::TicketStore;

/// Decides whether an activity event counts toward XP.
///
/// A cooldown of zero disables limiting and never touches the ticket store.
/// Otherwise at most one event per user passes per cooldown window; the
/// atomicity of that guarantee lives in `TicketStore::claim`.
pub struct RateLimiter {
    tickets: Arc<dyn TicketStore>,
    cooldown: Duration,
}

impl RateLimiter {
    pub fn new(tickets: Arc<dyn TicketStore>, cooldown_secs: u64) -> Self {
        Self {
            tickets,
            cooldown: Duration::from_secs(cooldown_secs),
        }
    }

    pub async fn should_count(&self, user: UserId) -> Result<bool> {
        if self.cooldown.is_zero() {
            return Ok(true);
        }
        self.tickets.claim(user, self.cooldown).await
    }
}
