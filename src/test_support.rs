//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::core::model::{Channel, Message, Team, Thread, User};
use crate::core::session::Session;
use crate::core::store::Store;
use crate::remote::types::{IdentitySet, ItemBody, MemberPayload};
use crate::remote::{
    ChannelPayload, ChatPayload, ChatService, MessagePayload, RemoteError, TeamPayload,
    UserPayload,
};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn user_payload(remote_id: &str, name: &str) -> UserPayload {
    UserPayload {
        id: remote_id.to_string(),
        display_name: Some(name.to_string()),
    }
}

pub fn payload(remote_id: &str, body: &str, sender_id: &str, sender_name: &str) -> MessagePayload {
    MessagePayload {
        id: remote_id.to_string(),
        body: ItemBody {
            content: body.to_string(),
            content_type: None,
        },
        from: Some(IdentitySet {
            user: Some(user_payload(sender_id, sender_name)),
        }),
        created_date_time: base_time(),
        reply_to_id: None,
    }
}

/// A message from "Sam" posted `minute` minutes after `base_time()`.
pub fn payload_at(remote_id: &str, body: &str, minute: i64) -> MessagePayload {
    let mut p = payload(remote_id, body, "sam", "Sam");
    p.created_date_time = base_time() + Duration::minutes(minute);
    p
}

fn reply(remote_id: &str, body: &str, root: &str) -> MessagePayload {
    let mut p = payload(remote_id, body, "kim", "Kim");
    p.reply_to_id = Some(root.to_string());
    p
}

pub fn user(id: i64, name: &str) -> User {
    User {
        id,
        remote_id: name.to_lowercase(),
        display_name: name.to_string(),
    }
}

pub fn thread(id: i64, remote_id: &str) -> Thread {
    Thread {
        id,
        remote_id: remote_id.to_string(),
        topic: None,
        member_ids: Vec::new(),
    }
}

pub fn team(id: i64, name: &str) -> Team {
    Team {
        id,
        remote_id: format!("team-{id}"),
        display_name: name.to_string(),
    }
}

pub fn channel(id: i64, team_id: i64, name: &str) -> Channel {
    Channel {
        id,
        remote_id: format!("channel-{id}"),
        team_id,
        display_name: name.to_string(),
    }
}

pub fn message(id: i64, body: &str, reply_to: Option<i64>) -> Message {
    Message {
        id,
        remote_id: format!("msg-{id}"),
        body: body.to_string(),
        from_id: None,
        created_date_time: base_time(),
        thread_id: None,
        channel_id: None,
        reply_to,
        reply_to_remote_id: None,
    }
}

/// A chat service that echoes sent messages back and serves a fixed cache.
///
/// Sent messages always come back with remote id `"42"`, authored by the
/// current user (`"me"`).
#[derive(Default)]
pub struct EchoService {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    chats: Vec<ChatPayload>,
    chat_messages: Vec<MessagePayload>,
    teams: Vec<TeamPayload>,
    channels: Vec<ChannelPayload>,
    channel_roots: Vec<MessagePayload>,
    replies: Vec<MessagePayload>,
    /// Sends and chat listings fail with a network error.
    offline: bool,
}

impl EchoService {
    pub fn new() -> Self {
        Self::default()
    }

    /// One DM with Sam (2 messages) and one channel, Rust/General, holding
    /// root `r1` with one reply and root `r2` with none.
    pub fn with_fixture() -> Self {
        let member = |id: &str, name: &str| MemberPayload {
            user_id: id.to_string(),
            display_name: Some(name.to_string()),
        };
        Self {
            sent: Arc::default(),
            chats: vec![ChatPayload {
                id: "chat-sam".to_string(),
                topic: None,
                chat_type: Some("oneOnOne".to_string()),
                members: vec![member("me", "Me"), member("sam", "Sam")],
            }],
            chat_messages: vec![payload_at("m2", "second", 2), payload_at("m1", "first", 1)],
            teams: vec![TeamPayload {
                id: "team-rust".to_string(),
                display_name: "Rust".to_string(),
            }],
            channels: vec![ChannelPayload {
                id: "chan-general".to_string(),
                display_name: "General".to_string(),
            }],
            channel_roots: vec![
                payload("r1", "release planning", "sam", "Sam"),
                payload("r2", "lunch?", "kim", "Kim"),
            ],
            replies: vec![reply("r1-a", "next week", "r1")],
            offline: false,
        }
    }

    /// A service that cannot be reached: sending and refreshing fail.
    pub fn failing() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check_reachable(&self) -> Result<(), RemoteError> {
        if self.offline {
            return Err(RemoteError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    /// Shared log of `(chat_id, text)` pairs, readable after the service is
    /// boxed into a session.
    pub fn sent_log(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

#[async_trait]
impl ChatService for EchoService {
    async fn current_user(&self) -> Result<UserPayload, RemoteError> {
        Ok(user_payload("me", "Me"))
    }

    async fn send_chat_message(
        &self,
        chat_id: &str,
        message: &str,
    ) -> Result<MessagePayload, RemoteError> {
        self.check_reachable()?;
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((chat_id.to_string(), message.to_string()));
        }
        let mut echo = payload("42", message, "me", "Me");
        echo.created_date_time = Utc::now();
        Ok(echo)
    }

    async fn list_chats(&self) -> Result<Vec<ChatPayload>, RemoteError> {
        self.check_reachable()?;
        Ok(self.chats.clone())
    }

    async fn list_chat_messages(&self, _chat_id: &str) -> Result<Vec<MessagePayload>, RemoteError> {
        Ok(self.chat_messages.clone())
    }

    async fn list_joined_teams(&self) -> Result<Vec<TeamPayload>, RemoteError> {
        Ok(self.teams.clone())
    }

    async fn list_channels(&self, _team_id: &str) -> Result<Vec<ChannelPayload>, RemoteError> {
        Ok(self.channels.clone())
    }

    async fn list_channel_messages(
        &self,
        _team_id: &str,
        _channel_id: &str,
    ) -> Result<Vec<MessagePayload>, RemoteError> {
        Ok(self.channel_roots.clone())
    }

    async fn list_message_replies(
        &self,
        _team_id: &str,
        _channel_id: &str,
        message_id: &str,
    ) -> Result<Vec<MessagePayload>, RemoteError> {
        Ok(self
            .replies
            .iter()
            .filter(|r| r.reply_to_id.as_deref() == Some(message_id))
            .cloned()
            .collect())
    }
}

/// A session over an in-memory store whose current user is "Me".
pub fn test_session(service: EchoService) -> Session {
    let mut store = Store::in_memory();
    let current_user = store.get_or_create_user("me", Some("Me")).clone();
    store.commit().unwrap();
    Session::new(current_user, store, Box::new(service)).unwrap()
}
