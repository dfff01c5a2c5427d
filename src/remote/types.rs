//! Wire payloads for the chat service.
//!
//! These mirror the JSON the service returns (camelCase keys, RFC 3339
//! timestamps). Mapping them onto local records is the store's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every list endpoint wraps its items in `{"value": [...]}`.
#[derive(Deserialize, Debug)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A user reference as it appears inside a message's `from` field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySet {
    #[serde(default)]
    pub user: Option<UserPayload>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub id: String,
    pub body: ItemBody,
    #[serde(default)]
    pub from: Option<IdentitySet>,
    pub created_date_time: DateTime<Utc>,
    /// Set on channel replies; names the root message.
    #[serde(default)]
    pub reply_to_id: Option<String>,
}

impl MessagePayload {
    pub fn sender(&self) -> Option<&UserPayload> {
        self.from.as_ref().and_then(|f| f.user.as_ref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub id: String,
    #[serde(default)]
    pub topic: Option<String>,
    /// `"oneOnOne"`, `"group"` or `"meeting"`.
    #[serde(default)]
    pub chat_type: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberPayload>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamPayload {
    pub id: String,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPayload {
    pub id: String,
    pub display_name: String,
}

/// Request body for posting a message.
#[derive(Serialize, Debug)]
pub(crate) struct NewMessage<'a> {
    pub body: NewMessageBody<'a>,
}

#[derive(Serialize, Debug)]
pub(crate) struct NewMessageBody<'a> {
    pub content: &'a str,
}
