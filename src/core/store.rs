//! # Local Cache
//!
//! Threads, messages, users, teams and channels the client has seen, kept in
//! memory and saved as a single JSON document (`~/.chatline/cache.json` by
//! default).
//!
//! Mutations only touch memory. `commit()` is the transaction boundary: it
//! writes the whole document with an atomic rename (write `.tmp`, then
//! `rename()`) so a crash never leaves a half-written cache behind.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::model::{Channel, Message, Team, Thread, User};
use crate::remote::MessagePayload;

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "cache I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "cache parse error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Serialize, Deserialize, Default, Debug)]
struct StoreData {
    next_id: i64,
    /// Local id of the signed-in user, remembered for offline starts.
    #[serde(default)]
    current_user_id: Option<i64>,
    users: Vec<User>,
    teams: Vec<Team>,
    channels: Vec<Channel>,
    threads: Vec<Thread>,
    messages: Vec<Message>,
}

pub struct Store {
    data: StoreData,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Store {
    /// A store with no backing file. `commit()` only clears the dirty flag.
    pub fn in_memory() -> Self {
        Self {
            data: StoreData::default(),
            path: None,
            dirty: false,
        }
    }

    /// Load the cache at `path`, or start empty if the file doesn't exist yet.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let data = if path.exists() {
            let json = fs::read_to_string(path).map_err(StoreError::Io)?;
            let data: StoreData = serde_json::from_str(&json).map_err(StoreError::Parse)?;
            info!(
                "Loaded cache from {} ({} threads, {} messages)",
                path.display(),
                data.threads.len(),
                data.messages.len()
            );
            data
        } else {
            info!("No cache at {}, starting empty", path.display());
            StoreData::default()
        };
        Ok(Self {
            data,
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persist everything changed since the last commit.
    pub fn commit(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(StoreError::Io)?;
            }
            let tmp_path = path.with_extension("tmp");
            let json = serde_json::to_string_pretty(&self.data).map_err(StoreError::Parse)?;
            fs::write(&tmp_path, json).map_err(StoreError::Io)?;
            fs::rename(&tmp_path, path).map_err(StoreError::Io)?;
            debug!("Cache committed to {}", path.display());
        }
        self.dirty = false;
        Ok(())
    }

    fn allocate_id(&mut self) -> i64 {
        self.data.next_id += 1;
        self.dirty = true;
        self.data.next_id
    }

    // ------------------------------------------------------------------------
    // Upserts (keyed by remote id)
    // ------------------------------------------------------------------------

    pub fn get_or_create_user(&mut self, remote_id: &str, display_name: Option<&str>) -> &User {
        let index = match self.data.users.iter().position(|u| u.remote_id == remote_id) {
            Some(i) => {
                if let Some(name) = display_name
                    && self.data.users[i].display_name != name
                {
                    self.data.users[i].display_name = name.to_string();
                    self.dirty = true;
                }
                i
            }
            None => {
                let id = self.allocate_id();
                self.data.users.push(User {
                    id,
                    remote_id: remote_id.to_string(),
                    display_name: display_name.unwrap_or(remote_id).to_string(),
                });
                self.data.users.len() - 1
            }
        };
        &self.data.users[index]
    }

    pub fn get_or_create_team(&mut self, remote_id: &str, display_name: &str) -> &Team {
        let index = match self.data.teams.iter().position(|t| t.remote_id == remote_id) {
            Some(i) => {
                self.data.teams[i].display_name = display_name.to_string();
                i
            }
            None => {
                let id = self.allocate_id();
                self.data.teams.push(Team {
                    id,
                    remote_id: remote_id.to_string(),
                    display_name: display_name.to_string(),
                });
                self.data.teams.len() - 1
            }
        };
        self.dirty = true;
        &self.data.teams[index]
    }

    pub fn get_or_create_channel(
        &mut self,
        team_id: i64,
        remote_id: &str,
        display_name: &str,
    ) -> &Channel {
        let index = match self.data.channels.iter().position(|c| c.remote_id == remote_id) {
            Some(i) => {
                self.data.channels[i].display_name = display_name.to_string();
                i
            }
            None => {
                let id = self.allocate_id();
                self.data.channels.push(Channel {
                    id,
                    remote_id: remote_id.to_string(),
                    team_id,
                    display_name: display_name.to_string(),
                });
                self.data.channels.len() - 1
            }
        };
        self.dirty = true;
        &self.data.channels[index]
    }

    pub fn get_or_create_thread(&mut self, remote_id: &str, topic: Option<&str>) -> &mut Thread {
        let index = match self.data.threads.iter().position(|t| t.remote_id == remote_id) {
            Some(i) => {
                if topic.is_some() {
                    self.data.threads[i].topic = topic.map(str::to_string);
                }
                i
            }
            None => {
                let id = self.allocate_id();
                self.data.threads.push(Thread {
                    id,
                    remote_id: remote_id.to_string(),
                    topic: topic.map(str::to_string),
                    member_ids: Vec::new(),
                });
                self.data.threads.len() - 1
            }
        };
        self.dirty = true;
        &mut self.data.threads[index]
    }

    /// Insert or refresh the message described by `payload`.
    ///
    /// Body, timestamp and sender are taken from the payload. The payload does
    /// not say which thread or channel it belongs to, so the caller fills in
    /// `thread_id` / `channel_id` on the returned record.
    pub fn get_or_create_message(&mut self, payload: &MessagePayload) -> &mut Message {
        let from_id = payload
            .sender()
            .map(|u| self.get_or_create_user(&u.id, u.display_name.as_deref()).id);
        let reply_to = payload
            .reply_to_id
            .as_deref()
            .and_then(|remote| self.find_message(remote))
            .map(|m| m.id);

        let index = match self.data.messages.iter().position(|m| m.remote_id == payload.id) {
            Some(i) => i,
            None => {
                let id = self.allocate_id();
                self.data.messages.push(Message {
                    id,
                    remote_id: payload.id.clone(),
                    body: String::new(),
                    from_id: None,
                    created_date_time: payload.created_date_time,
                    thread_id: None,
                    channel_id: None,
                    reply_to: None,
                    reply_to_remote_id: None,
                });
                self.link_pending_replies(&payload.id, id);
                self.data.messages.len() - 1
            }
        };

        let message = &mut self.data.messages[index];
        message.body = payload.body.content.clone();
        message.created_date_time = payload.created_date_time;
        if from_id.is_some() {
            message.from_id = from_id;
        }
        if reply_to.is_some() {
            message.reply_to = reply_to;
        }
        if payload.reply_to_id.is_some() {
            message.reply_to_remote_id = payload.reply_to_id.clone();
        }
        self.dirty = true;
        message
    }

    /// Point replies that arrived before their root at the newly cached root.
    fn link_pending_replies(&mut self, root_remote_id: &str, root_id: i64) {
        for reply in self.data.messages.iter_mut().filter(|m| {
            m.reply_to.is_none() && m.reply_to_remote_id.as_deref() == Some(root_remote_id)
        }) {
            reply.reply_to = Some(root_id);
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// The user last recorded with `set_current_user`.
    pub fn current_user(&self) -> Option<&User> {
        self.data.current_user_id.and_then(|id| self.user(id))
    }

    pub fn set_current_user(&mut self, id: i64) {
        if self.data.current_user_id != Some(id) {
            self.data.current_user_id = Some(id);
            self.dirty = true;
        }
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.data.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_remote_id(&self, remote_id: &str) -> Option<&User> {
        self.data.users.iter().find(|u| u.remote_id == remote_id)
    }

    pub fn threads(&self) -> &[Thread] {
        &self.data.threads
    }

    pub fn find_message(&self, remote_id: &str) -> Option<&Message> {
        self.data.messages.iter().find(|m| m.remote_id == remote_id)
    }

    /// Messages of a thread, oldest first.
    pub fn thread_messages(&self, thread_id: i64) -> Vec<&Message> {
        let mut messages: Vec<&Message> = self
            .data
            .messages
            .iter()
            .filter(|m| m.thread_id == Some(thread_id))
            .collect();
        messages.sort_by_key(|m| m.created_date_time);
        messages
    }

    /// Every message posted in a channel (roots and replies), in storage order.
    pub fn channel_messages(&self, channel_id: i64) -> impl Iterator<Item = &Message> {
        self.data
            .messages
            .iter()
            .filter(move |m| m.channel_id == Some(channel_id))
    }

    pub fn reply_count(&self, message_id: i64) -> usize {
        self.data
            .messages
            .iter()
            .filter(|m| m.reply_to == Some(message_id))
            .count()
    }

    /// The two-member thread shared by `current_user_id` and the user whose
    /// display name matches `display_name` (case-insensitive).
    pub fn find_direct_thread(
        &self,
        current_user_id: i64,
        display_name: &str,
    ) -> Option<(&Thread, &User)> {
        self.data.threads.iter().find_map(|thread| {
            if thread.member_ids.len() != 2 || !thread.member_ids.contains(&current_user_id) {
                return None;
            }
            let other = thread
                .member_ids
                .iter()
                .filter(|id| **id != current_user_id)
                .find_map(|id| self.user(*id))?;
            other
                .display_name
                .eq_ignore_ascii_case(display_name)
                .then_some((thread, other))
        })
    }

    pub fn find_thread_by_topic(&self, topic: &str) -> Option<&Thread> {
        self.data
            .threads
            .iter()
            .find(|t| t.topic.as_deref().is_some_and(|name| name.eq_ignore_ascii_case(topic)))
    }

    /// Look a channel up by its team's and its own display name.
    pub fn find_channel(&self, team_name: &str, channel_name: &str) -> Option<(&Team, &Channel)> {
        let team = self
            .data
            .teams
            .iter()
            .find(|t| t.display_name.eq_ignore_ascii_case(team_name))?;
        let channel = self.data.channels.iter().find(|c| {
            c.team_id == team.id && c.display_name.eq_ignore_ascii_case(channel_name)
        })?;
        Some((team, channel))
    }
}
