//! Message text rendering.
//!
//! The presenter and gate compute structured results; this module is the one
//! place those results become user-facing text. Mention bodies are written to
//! follow the sender's display name, hence the leading punctuation.

use crate::presenter::PodiumEntry;

pub const HELP_TEXT: &str = "Hi, I'm XP Bot. Add me to a group and I will track users' \
    message count (XP). Available commands:\n \
    - /xp displays the XP count and rank of the user\n \
    - /ranks displays the top 3";

pub const PRIVATE_XP_NOTICE: &str = "Sorry, you can't gain XP in private chats.";

pub const PRIVATE_RANKS_NOTICE: &str = "Please add me to a group.";

pub const UNRANKED_MENTION: &str = ", you're not ranked yet 👶";

pub const GATE_REJECTED_MENTION: &str = " Sorry, but you don't have enough XP to send that. \
    You can earn XP by talking 😉";

pub fn leader_mention(score: i64, rank: u64, total: u64) -> String {
    format!(", you have {score} XP  ◎  Rank {rank} / {total}  ◎  King of the hill 👑")
}

pub fn chasing_mention(score: i64, rank: u64, total: u64, gap: i64, rival_name: &str) -> String {
    format!(", you have {score} XP  ◎  Rank {rank} / {total}  ◎  {gap} to beat {rival_name}!")
}

pub fn rank_only_mention(rank: u64, total: u64) -> String {
    format!(", your rank is {rank} / {total}.")
}

pub fn podium_text(entries: &[PodiumEntry]) -> String {
    const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
    entries
        .iter()
        .zip(MEDALS)
        .map(|(entry, medal)| format!("{medal} {}: {} XP", entry.member.first_name, entry.score))
        .collect::<Vec<_>>()
        .join("\n")
}
