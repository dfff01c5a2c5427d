use std::fmt;

use async_trait::async_trait;

use super::types::{ChannelPayload, ChatPayload, MessagePayload, TeamPayload, UserPayload};

/// Errors that can occur while talking to the chat service.
#[derive(Debug)]
pub enum RemoteError {
    /// Client misconfigured (missing access token, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service returned an error response.
    Api { status: u16, message: String },
    /// Failed to decode the service's response.
    Parse(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Config(msg) => write!(f, "config error: {msg}"),
            RemoteError::Network(msg) => write!(f, "network error: {msg}"),
            RemoteError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            RemoteError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RemoteError {}

/// The remote side of a chat session.
///
/// Every call completes (or fails) before returning; callers that live on a
/// synchronous loop drive these through `Session::block_on`.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// The authenticated user.
    async fn current_user(&self) -> Result<UserPayload, RemoteError>;

    /// Posts `message` into the chat identified by its remote id and returns
    /// the message as the service stored it.
    async fn send_chat_message(
        &self,
        chat_id: &str,
        message: &str,
    ) -> Result<MessagePayload, RemoteError>;

    /// All chats the current user takes part in, members included.
    async fn list_chats(&self) -> Result<Vec<ChatPayload>, RemoteError>;

    async fn list_chat_messages(&self, chat_id: &str) -> Result<Vec<MessagePayload>, RemoteError>;

    async fn list_joined_teams(&self) -> Result<Vec<TeamPayload>, RemoteError>;

    async fn list_channels(&self, team_id: &str) -> Result<Vec<ChannelPayload>, RemoteError>;

    /// Top-level messages of a channel.
    async fn list_channel_messages(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> Result<Vec<MessagePayload>, RemoteError>;

    async fn list_message_replies(
        &self,
        team_id: &str,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Vec<MessagePayload>, RemoteError>;
}
