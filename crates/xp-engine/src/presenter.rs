//! Rank presentation: structured summaries computed from ledger queries.
//!
//! These queries are read-only and yield variants rather than text; the
//! `render` module turns them into messages. Keeping the two apart means the
//! leaderboard policy here never changes when wording does.

use std::sync::Arc;

use xp_core::error::Result;
use xp_core::models::{ChatEvent, ChatScope, Member, UserId};
use xp_core::traits::{ScoreLedger, Transport};

/// Result of a `/xp` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankSummary {
    /// XP is not tracked in private chats.
    PrivateChat,
    /// The sender has no ledger entry at all (distinct from a zero score).
    Unranked,
    /// Nobody is far enough ahead to chase: top of the leaderboard.
    Leader { score: i64, rank: u64, total: u64 },
    /// Somebody is at least 2 XP ahead; `gap` is how much XP closes it.
    Chasing {
        score: i64,
        rank: u64,
        total: u64,
        gap: i64,
        rival: Member,
    },
    /// Below the posting threshold: only rank and total are disclosed.
    RankOnly { rank: u64, total: u64 },
}

/// Result of a `/ranks` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Podium {
    PrivateChat,
    /// Fewer than 3 ranked users: no podium is shown.
    TooFew,
    /// Exactly the top 3, highest score first.
    Top(Vec<PodiumEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodiumEntry {
    pub member: Member,
    pub score: i64,
}

pub struct RankingPresenter {
    ledger: Arc<dyn ScoreLedger>,
    transport: Arc<dyn Transport>,
    min_xp: i64,
}

impl RankingPresenter {
    pub fn new(ledger: Arc<dyn ScoreLedger>, transport: Arc<dyn Transport>, min_xp: i64) -> Self {
        Self {
            ledger,
            transport,
            min_xp,
        }
    }

    pub async fn rank_summary(&self, event: &ChatEvent) -> Result<RankSummary> {
        if event.scope == ChatScope::Private {
            return Ok(RankSummary::PrivateChat);
        }

        let Some(score) = self.ledger.score(event.group, event.sender).await? else {
            return Ok(RankSummary::Unranked);
        };
        let Some(rank) = self.ledger.rank(event.group, event.sender).await? else {
            // A score without a rank means the entry vanished between calls.
            return Ok(RankSummary::Unranked);
        };
        let total = self.ledger.total_ranked(event.group).await?;

        if score < self.min_xp {
            return Ok(RankSummary::RankOnly { rank, total });
        }

        match self.ledger.next_threshold(event.group, score).await? {
            None => Ok(RankSummary::Leader { score, rank, total }),
            Some(rival) => Ok(RankSummary::Chasing {
                score,
                rank,
                total,
                gap: rival.score - score,
                rival: self
                    .resolve(event, rival.user)
                    .await?
                    .unwrap_or_else(Member::unknown),
            }),
        }
    }

    pub async fn top_ranks(&self, event: &ChatEvent) -> Result<Podium> {
        if event.scope == ChatScope::Private {
            return Ok(Podium::PrivateChat);
        }
        if self.ledger.total_ranked(event.group).await? < 3 {
            return Ok(Podium::TooFew);
        }

        let mut entries = Vec::with_capacity(3);
        for entry in self.ledger.top_k(event.group, 3).await? {
            let member = self
                .resolve(event, entry.user)
                .await?
                .unwrap_or_else(Member::ghost);
            entries.push(PodiumEntry {
                member,
                score: entry.score,
            });
        }
        Ok(Podium::Top(entries))
    }

    /// Resolves a user to a display identity; callers pick the placeholder
    /// when the transport no longer knows them.
    async fn resolve(&self, event: &ChatEvent, user: UserId) -> Result<Option<Member>> {
        self.transport.resolve_member(event.group, user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xp_core::models::{EventKind, GroupId, MessageId, UserId};
    use xp_core::traits::MockTransport;
    use xp_store_memory::MemoryStore;

    const GROUP: GroupId = GroupId(-200);

    fn xp_event(sender: UserId) -> ChatEvent {
        ChatEvent {
            sender,
            sender_name: "Ada".into(),
            group: GROUP,
            message_id: MessageId(1),
            scope: ChatScope::Group,
            kind: EventKind::Command(xp_core::models::Command::Xp),
            has_link: false,
        }
    }

    fn presenter_with(
        ledger: Arc<MemoryStore>,
        transport: MockTransport,
        min_xp: i64,
    ) -> RankingPresenter {
        RankingPresenter::new(ledger, Arc::new(transport), min_xp)
    }

    #[tokio::test]
    async fn private_chat_yields_the_notice_variant() {
        let presenter = presenter_with(Arc::new(MemoryStore::new()), MockTransport::new(), 15);
        let mut ev = xp_event(UserId(1));
        ev.scope = ChatScope::Private;
        assert_eq!(presenter.rank_summary(&ev).await.unwrap(), RankSummary::PrivateChat);
        assert_eq!(presenter.top_ranks(&ev).await.unwrap(), Podium::PrivateChat);
    }

    #[tokio::test]
    async fn unranked_user_is_not_conflated_with_zero() {
        let presenter = presenter_with(Arc::new(MemoryStore::new()), MockTransport::new(), 15);
        assert_eq!(
            presenter.rank_summary(&xp_event(UserId(1))).await.unwrap(),
            RankSummary::Unranked
        );
    }

    #[tokio::test]
    async fn leader_with_no_rival_gets_the_crown_variant() {
        let ledger = Arc::new(MemoryStore::new());
        ledger.increment(GROUP, UserId(1), 40).await.unwrap();
        ledger.increment(GROUP, UserId(2), 39).await.unwrap(); // 1 behind: not a rival

        let presenter = presenter_with(ledger, MockTransport::new(), 15);
        assert_eq!(
            presenter.rank_summary(&xp_event(UserId(1))).await.unwrap(),
            RankSummary::Leader {
                score: 40,
                rank: 1,
                total: 2
            }
        );
    }

    #[tokio::test]
    async fn chaser_sees_the_minimal_qualifying_rival_and_gap() {
        let ledger = Arc::new(MemoryStore::new());
        ledger.increment(GROUP, UserId(1), 20).await.unwrap();
        ledger.increment(GROUP, UserId(2), 25).await.unwrap();
        ledger.increment(GROUP, UserId(3), 40).await.unwrap();

        let mut transport = MockTransport::new();
        transport
            .expect_resolve_member()
            .withf(|_, user| *user == UserId(2))
            .times(1)
            .returning(|_, user| {
                Ok(Some(Member {
                    id: user,
                    first_name: "Bea".into(),
                }))
            });

        let presenter = presenter_with(ledger, transport, 15);
        let summary = presenter.rank_summary(&xp_event(UserId(1))).await.unwrap();
        match summary {
            RankSummary::Chasing {
                score,
                rank,
                total,
                gap,
                rival,
            } => {
                assert_eq!(score, 20);
                assert_eq!(rank, 3);
                assert_eq!(total, 3);
                assert_eq!(gap, 5);
                assert_eq!(rival.first_name, "Bea");
            }
            other => panic!("expected Chasing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unresolvable_rival_gets_the_unknown_placeholder() {
        let ledger = Arc::new(MemoryStore::new());
        ledger.increment(GROUP, UserId(1), 20).await.unwrap();
        ledger.increment(GROUP, UserId(2), 25).await.unwrap();

        let mut transport = MockTransport::new();
        transport
            .expect_resolve_member()
            .times(1)
            .returning(|_, _| Ok(None));

        let presenter = presenter_with(ledger, transport, 15);
        match presenter.rank_summary(&xp_event(UserId(1))).await.unwrap() {
            RankSummary::Chasing { rival, .. } => {
                assert_eq!(rival, Member::unknown());
                assert_ne!(rival, Member::ghost());
            }
            other => panic!("expected Chasing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn below_threshold_only_discloses_rank_and_total() {
        let ledger = Arc::new(MemoryStore::new());
        ledger.increment(GROUP, UserId(1), 5).await.unwrap();
        ledger.increment(GROUP, UserId(2), 50).await.unwrap();

        let presenter = presenter_with(ledger, MockTransport::new(), 15);
        assert_eq!(
            presenter.rank_summary(&xp_event(UserId(1))).await.unwrap(),
            RankSummary::RankOnly { rank: 2, total: 2 }
        );
    }

    #[tokio::test]
    async fn podium_needs_three_ranked_users() {
        let ledger = Arc::new(MemoryStore::new());
        ledger.increment(GROUP, UserId(1), 10).await.unwrap();
        ledger.increment(GROUP, UserId(2), 20).await.unwrap();

        let presenter = presenter_with(ledger, MockTransport::new(), 15);
        assert_eq!(presenter.top_ranks(&xp_event(UserId(1))).await.unwrap(), Podium::TooFew);
    }

    #[tokio::test]
    async fn podium_is_exactly_top_three_with_ghost_fallback() {
        let ledger = Arc::new(MemoryStore::new());
        for (user, score) in [(1, 10), (2, 20), (3, 30), (4, 40)] {
            ledger.increment(GROUP, UserId(user), score).await.unwrap();
        }

        let mut transport = MockTransport::new();
        transport.expect_resolve_member().times(3).returning(|_, user| {
            if user == UserId(3) {
                Ok(None) // left the group
            } else {
                Ok(Some(Member {
                    id: user,
                    first_name: format!("User{}", user.0),
                }))
            }
        });

        let presenter = presenter_with(ledger, transport, 15);
        match presenter.top_ranks(&xp_event(UserId(1))).await.unwrap() {
            Podium::Top(entries) => {
                assert_eq!(entries.len(), 3);
                assert_eq!(entries[0].score, 40);
                assert_eq!(entries[1].score, 30);
                assert_eq!(entries[1].member, Member::ghost());
                assert_eq!(entries[2].score, 20);
            }
            other => panic!("expected Top, got {other:?}"),
        }
    }
}
