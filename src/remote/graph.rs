//! Chat service client for a Graph-style REST API.
//!
//! Every request carries a bearer token. List endpoints answer with a
//! `{"value": [...]}` envelope; single resources come back bare.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::service::{ChatService, RemoteError};
use super::types::{
    ChannelPayload, ChatPayload, Collection, MessagePayload, NewMessage, NewMessageBody,
    TeamPayload, UserPayload,
};

pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

pub struct GraphClient {
    access_token: String,
    base_url: String,
    client: reqwest::Client,
}

impl GraphClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `access_token` - bearer token for the service
    /// * `base_url` - Optional custom base URL (defaults to the public endpoint)
    pub fn new(access_token: String, base_url: Option<String>) -> Self {
        Self {
            access_token,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, RemoteError> {
        if self.access_token.is_empty() {
            return Err(RemoteError::Config(
                "no access token (config file or CHATLINE_ACCESS_TOKEN env var)".to_string(),
            ));
        }
        Ok(request.header("Authorization", format!("Bearer {}", self.access_token)))
    }

    /// Sends the request and decodes a successful body as `T`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = self
            .authorize(request)?
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        debug!("Chat service response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat service error: {} - {}", status, err_body);
            return Err(RemoteError::Api {
                status,
                message: err_body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| RemoteError::Parse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        debug!("GET {}", path);
        self.execute(self.client.get(self.url(path))).await
    }

    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, RemoteError> {
        let collection: Collection<T> = self.get(path).await?;
        Ok(collection.value)
    }
}

#[async_trait]
impl ChatService for GraphClient {
    async fn current_user(&self) -> Result<UserPayload, RemoteError> {
        self.get("/me").await
    }

    async fn send_chat_message(
        &self,
        chat_id: &str,
        message: &str,
    ) -> Result<MessagePayload, RemoteError> {
        info!("Sending message to chat {} ({} bytes)", chat_id, message.len());
        let body = NewMessage {
            body: NewMessageBody { content: message },
        };
        let request = self
            .client
            .post(self.url(&format!("/chats/{chat_id}/messages")))
            .json(&body);
        self.execute(request).await
    }

    async fn list_chats(&self) -> Result<Vec<ChatPayload>, RemoteError> {
        self.get_collection("/me/chats?$expand=members").await
    }

    async fn list_chat_messages(&self, chat_id: &str) -> Result<Vec<MessagePayload>, RemoteError> {
        self.get_collection(&format!("/chats/{chat_id}/messages")).await
    }

    async fn list_joined_teams(&self) -> Result<Vec<TeamPayload>, RemoteError> {
        self.get_collection("/me/joinedTeams").await
    }

    async fn list_channels(&self, team_id: &str) -> Result<Vec<ChannelPayload>, RemoteError> {
        self.get_collection(&format!("/teams/{team_id}/channels")).await
    }

    async fn list_channel_messages(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> Result<Vec<MessagePayload>, RemoteError> {
        self.get_collection(&format!("/teams/{team_id}/channels/{channel_id}/messages"))
            .await
    }

    async fn list_message_replies(
        &self,
        team_id: &str,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Vec<MessagePayload>, RemoteError> {
        self.get_collection(&format!(
            "/teams/{team_id}/channels/{channel_id}/messages/{message_id}/replies"
        ))
        .await
    }
}
