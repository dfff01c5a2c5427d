//! # Cached Records
//!
//! Local copies of what the chat service knows about. Every record has a
//! local `id` (assigned by the store) and the `remote_id` the service uses.
//! Records refer to each other by local id only.
//!
//! ```text
//! Team ──< Channel ──< Message (top-level) ──< Message (reply_to)
//! Thread ──< Message (thread_id)
//! User  <── Message.from_id
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub remote_id: String,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub remote_id: String,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: i64,
    pub remote_id: String,
    pub team_id: i64,
    pub display_name: String,
}

/// A chat between two or more users.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Thread {
    pub id: i64,
    pub remote_id: String,
    pub topic: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: i64,
    pub remote_id: String,
    pub body: String,
    pub from_id: Option<i64>,
    pub created_date_time: DateTime<Utc>,
    pub thread_id: Option<i64>,
    pub channel_id: Option<i64>,
    pub reply_to: Option<i64>,
    /// Remote id of the message this one answers, kept even while that
    /// message is not cached yet.
    #[serde(default)]
    pub reply_to_remote_id: Option<String>,
}

impl Message {
    /// A channel message that starts a discussion rather than answering one.
    pub fn is_toplevel(&self) -> bool {
        self.reply_to.is_none() && self.reply_to_remote_id.is_none()
    }
}
