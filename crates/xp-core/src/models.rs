//! # Domain Models
//!
//! These types represent the core entities of XP Bot. Identifiers come from
//! the chat transport as plain integers; we wrap them in newtypes so a group
//! id can never be passed where a user id belongs.

use serde::{Deserialize, Serialize};

/// Identifier of a group chat (negative for most transports, but opaque here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub i64);

/// Identifier of a chat user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Identifier of a single message within a group, used for deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i32);

/// Where a message was sent. Supergroups and plain groups both count as
/// `Group`; XP is never tracked in private chats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatScope {
    Private,
    Group,
}

/// Bot commands recognised by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Xp,
    Ranks,
}

/// Classification of an inbound message.
///
/// Text, voice and sticker messages earn XP; photo, video and document
/// messages are gated content and never earn XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Text,
    Voice,
    Sticker,
    Photo,
    Video,
    Document,
    Command(Command),
}

impl EventKind {
    /// Kinds that count toward XP when not suppressed.
    pub fn is_activity(&self) -> bool {
        matches!(self, EventKind::Text | EventKind::Voice | EventKind::Sticker)
    }

    /// Kinds that must pass the content gate before they may stand.
    pub fn is_gated_content(&self) -> bool {
        matches!(self, EventKind::Photo | EventKind::Video | EventKind::Document)
    }
}

/// A single inbound chat event, already mapped out of the transport's types.
///
/// `sender_name` is carried from the transport event itself so the engine can
/// mention the sender without a round-trip; display data is never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    pub sender: UserId,
    pub sender_name: String,
    pub group: GroupId,
    pub message_id: MessageId,
    pub scope: ChatScope,
    pub kind: EventKind,
    /// True when the message carries an embedded text-link entity.
    pub has_link: bool,
}

impl ChatEvent {
    pub fn sender_member(&self) -> Member {
        Member {
            id: self.sender,
            first_name: self.sender_name.clone(),
        }
    }
}

/// One scoreboard entry: a user and their XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub user: UserId,
    pub score: i64,
}

/// Display identity of a group member, resolved live from the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: UserId,
    pub first_name: String,
}

impl Member {
    /// Placeholder for a scoreboard entry whose member can no longer be
    /// resolved (left the group, deleted account). The score is still shown.
    pub fn ghost() -> Self {
        Member {
            id: UserId(0),
            first_name: "A ghost".to_string(),
        }
    }

    /// Placeholder for an unresolvable rival in a rank summary. Distinct
    /// from the podium's ghost.
    pub fn unknown() -> Self {
        Member {
            id: UserId(0),
            first_name: "???".to_string(),
        }
    }
}

/// Delivery options for outbound messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Deliver without a notification sound.
    pub silent: bool,
    /// Render with lightweight text emphasis (markdown).
    pub markdown: bool,
}

impl SendOptions {
    /// The options used for every mention the bot sends.
    pub fn quiet() -> Self {
        SendOptions {
            silent: true,
            markdown: true,
        }
    }
}
