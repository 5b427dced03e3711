//! Event routing: one inbound chat event, one pass, no retries.

use std::sync::Arc;

use tracing::debug;
use xp_core::error::Result;
use xp_core::models::{ChatEvent, ChatScope, Command, EventKind, SendOptions};
use xp_core::traits::{ScoreLedger, TicketStore, Transport};

use crate::gate::ContentGate;
use crate::limiter::RateLimiter;
use crate::presenter::{Podium, RankSummary, RankingPresenter};
use crate::{render, EngineConfig};

/// Maps inbound events to the rate limiter, content gate, ledger and
/// presenter, and delivers the resulting messages.
pub struct EventRouter {
    ledger: Arc<dyn ScoreLedger>,
    transport: Arc<dyn Transport>,
    limiter: RateLimiter,
    gate: ContentGate,
    presenter: RankingPresenter,
}

impl EventRouter {
    pub fn new(
        ledger: Arc<dyn ScoreLedger>,
        tickets: Arc<dyn TicketStore>,
        transport: Arc<dyn Transport>,
        config: EngineConfig,
    ) -> Self {
        Self {
            limiter: RateLimiter::new(tickets, config.rate_limit_secs),
            gate: ContentGate::new(ledger.clone(), transport.clone(), config.min_xp),
            presenter: RankingPresenter::new(ledger.clone(), transport.clone(), config.min_xp),
            ledger,
            transport,
        }
    }

    pub async fn handle(&self, event: &ChatEvent) -> Result<()> {
        match event.kind {
            EventKind::Text | EventKind::Voice | EventKind::Sticker => {
                self.handle_activity(event).await
            }
            EventKind::Photo | EventKind::Video | EventKind::Document => {
                self.gate.check_and_enforce(event).await.map(|_| ())
            }
            EventKind::Command(command) => self.handle_command(event, command).await,
        }
    }

    async fn handle_activity(&self, event: &ChatEvent) -> Result<()> {
        if event.scope == ChatScope::Private {
            return Ok(());
        }
        // Link-bearing messages face the gate before the rate limiter; a
        // rejection stops the event without consuming a ticket.
        if event.has_link && !self.gate.check_and_enforce(event).await? {
            return Ok(());
        }
        if !self.limiter.should_count(event.sender).await? {
            return Ok(());
        }
        let score = self.ledger.increment(event.group, event.sender, 1).await?;
        debug!(group = event.group.0, user = event.sender.0, score, "awarded XP");
        Ok(())
    }

    async fn handle_command(&self, event: &ChatEvent, command: Command) -> Result<()> {
        match command {
            Command::Start => {
                // Help is private-chat only; groups stay quiet.
                if event.scope == ChatScope::Private {
                    self.transport
                        .send_message(event.group, render::HELP_TEXT, SendOptions::default())
                        .await?;
                }
                Ok(())
            }
            Command::Xp => {
                let sender = event.sender_member();
                match self.presenter.rank_summary(event).await? {
                    RankSummary::PrivateChat => {
                        self.transport
                            .send_message(event.group, render::PRIVATE_XP_NOTICE, SendOptions::default())
                            .await
                    }
                    RankSummary::Unranked => {
                        self.transport
                            .send_mention(event.group, &sender, render::UNRANKED_MENTION)
                            .await
                    }
                    RankSummary::Leader { score, rank, total } => {
                        self.transport
                            .send_mention(event.group, &sender, &render::leader_mention(score, rank, total))
                            .await
                    }
                    RankSummary::Chasing {
                        score,
                        rank,
                        total,
                        gap,
                        rival,
                    } => {
                        let text = render::chasing_mention(score, rank, total, gap, &rival.first_name);
                        self.transport.send_mention(event.group, &sender, &text).await
                    }
                    RankSummary::RankOnly { rank, total } => {
                        self.transport
                            .send_mention(event.group, &sender, &render::rank_only_mention(rank, total))
                            .await
                    }
                }
            }
            Command::Ranks => match self.presenter.top_ranks(event).await? {
                Podium::PrivateChat => {
                    self.transport
                        .send_message(event.group, render::PRIVATE_RANKS_NOTICE, SendOptions::default())
                        .await
                }
                Podium::TooFew => Ok(()),
                Podium::Top(entries) => {
                    self.transport
                        .send_message(event.group, &render::podium_text(&entries), SendOptions::quiet())
                        .await
                }
            },
        }
    }
}
