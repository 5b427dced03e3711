//! # xp-transport-telegram
//!
//! Telegram implementation of the `Transport` port plus the mapping from
//! teloxide's `Message` into the domain `ChatEvent`. Everything
//! Telegram-specific stays on this side of the boundary.

use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Message, MessageEntity, MessageEntityKind, ParseMode};
use teloxide::RequestError;
use xp_core::error::{Result, XpError};
use xp_core::models::{
    ChatEvent, ChatScope, Command, EventKind, GroupId, Member, MessageId, SendOptions, UserId,
};
use xp_core::traits::Transport;

pub struct TelegramTransport {
    bot: Bot,
}

fn transport_err(err: impl std::fmt::Display) -> XpError {
    XpError::Transport(err.to_string())
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_message(&self, group: GroupId, text: &str, opts: SendOptions) -> Result<()> {
        let mut req = self.bot.send_message(ChatId(group.0), text);
        if opts.silent {
            req = req.disable_notification(true);
        }
        if opts.markdown {
            req = req.parse_mode(ParseMode::Markdown);
        }
        req.await.map_err(transport_err)?;
        Ok(())
    }

    async fn send_mention(&self, group: GroupId, member: &Member, text: &str) -> Result<()> {
        let body = format!("{}{}", member.first_name, text);
        self.send_message(group, &body, SendOptions::quiet()).await
    }

    async fn delete_message(&self, group: GroupId, message_id: MessageId) -> Result<()> {
        self.bot
            .delete_message(ChatId(group.0), teloxide::types::MessageId(message_id.0))
            .await
            .map_err(transport_err)?;
        Ok(())
    }

    async fn resolve_member(&self, group: GroupId, user: UserId) -> Result<Option<Member>> {
        match self
            .bot
            .get_chat_member(ChatId(group.0), teloxide::types::UserId(user.0))
            .await
        {
            Ok(member) => Ok(Some(Member {
                id: user,
                first_name: member.user.first_name,
            })),
            // The API not knowing the member (left, deleted) is absence,
            // not failure.
            Err(RequestError::Api(_)) => Ok(None),
            Err(err) => Err(transport_err(err)),
        }
    }
}

/// Maps a teloxide update into the domain event model. Returns `None` for
/// updates the engine has no interest in (channels, service messages,
/// unknown commands are still text).
pub fn event_from_message(msg: &Message) -> Option<ChatEvent> {
    let from = msg.from()?;
    let scope = if msg.chat.is_private() {
        ChatScope::Private
    } else if msg.chat.is_group() || msg.chat.is_supergroup() {
        ChatScope::Group
    } else {
        return None;
    };

    Some(ChatEvent {
        sender: UserId(from.id.0),
        sender_name: from.first_name.clone(),
        group: GroupId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
        scope,
        kind: classify(msg)?,
        has_link: msg.entities().is_some_and(has_text_link),
    })
}

fn classify(msg: &Message) -> Option<EventKind> {
    if let Some(text) = msg.text() {
        return Some(match parse_command(text) {
            Some(command) => EventKind::Command(command),
            None => EventKind::Text,
        });
    }
    if msg.voice().is_some() {
        Some(EventKind::Voice)
    } else if msg.sticker().is_some() {
        Some(EventKind::Sticker)
    } else if msg.photo().is_some() {
        Some(EventKind::Photo)
    } else if msg.video().is_some() {
        Some(EventKind::Video)
    } else if msg.document().is_some() {
        Some(EventKind::Document)
    } else {
        None
    }
}

fn has_text_link(entities: &[MessageEntity]) -> bool {
    entities
        .iter()
        .any(|entity| matches!(entity.kind, MessageEntityKind::TextLink { .. }))
}

/// Parses a leading `/command` token, tolerating an `@BotName` suffix.
fn parse_command(text: &str) -> Option<Command> {
    let first = text.split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name);
    match name {
        "start" => Some(Command::Start),
        "xp" => Some(Command::Xp),
        "ranks" => Some(Command::Ranks),
        _ => None,
    }
}
