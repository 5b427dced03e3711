//! Shared fixtures for the scenario tests.

use xp_core::models::{ChatEvent, ChatScope, EventKind, GroupId, MessageId, UserId};

pub const GROUP: GroupId = GroupId(-1001000);

/// A group-chat event from the given sender. Tests that care about a
/// specific message id or link flag overwrite the field.
pub fn group_event(sender: u64, kind: EventKind) -> ChatEvent {
    ChatEvent {
        sender: UserId(sender),
        sender_name: format!("User{sender}"),
        group: GROUP,
        message_id: MessageId(1),
        scope: ChatScope::Group,
        kind,
        has_link: false,
    }
}

pub fn private_event(sender: u64, kind: EventKind) -> ChatEvent {
    ChatEvent {
        scope: ChatScope::Private,
        ..group_event(sender, kind)
    }
}
