//! # Conversation Modes
//!
//! A chat view shows exactly one kind of conversation, fixed when the view is
//! built. Each variant carries only the records that mode needs:
//!
//! ```text
//! Conversation
//! ├── DirectMessage  { thread, other_user }
//! ├── GroupThread    { thread }
//! ├── ChannelRoot    { team, channel }
//! └── ChannelMessage { team, channel, root_message }
//! ```
//!
//! Every mode-dependent operation is a single `match` over this enum, so a
//! new variant cannot be added without handling it everywhere.
//!
//! `GroupThread` behaves like `DirectMessage` in every action; only its title
//! differs, because participant names are not composed yet.

use std::fmt;

use log::{debug, info};

use crate::core::error::ChatError;
use crate::core::model::{Channel, Message, Team, Thread, User};
use crate::core::session::Session;

/// The kind of conversation, without its data.
///
/// `Invalid` is what a view would be before any factory ran. No
/// `Conversation` ever reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    #[default]
    Invalid,
    DirectMessage,
    GroupThread,
    ChannelRoot,
    ChannelMessage,
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChatMode::Invalid => "invalid",
            ChatMode::DirectMessage => "direct message",
            ChatMode::GroupThread => "group thread",
            ChatMode::ChannelRoot => "channel",
            ChatMode::ChannelMessage => "channel thread",
        };
        f.write_str(name)
    }
}

/// What a mode action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// The active mode has no implementation of `action` yet.
    NotYetSupported { mode: ChatMode, action: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Conversation {
    DirectMessage { thread: Thread, other_user: User },
    GroupThread { thread: Thread },
    ChannelRoot { team: Team, channel: Channel },
    ChannelMessage { team: Team, channel: Channel, root_message: Message },
}

impl Conversation {
    pub fn direct_message(thread: Thread, other_user: User) -> Self {
        Conversation::DirectMessage { thread, other_user }
    }

    pub fn group_thread(thread: Thread) -> Self {
        Conversation::GroupThread { thread }
    }

    /// The list of discussions in a channel.
    pub fn channel(team: Team, channel: Channel) -> Self {
        Conversation::ChannelRoot { team, channel }
    }

    /// One discussion in a channel, rooted at `root_message`.
    pub fn channel_thread(team: Team, channel: Channel, root_message: Message) -> Self {
        Conversation::ChannelMessage {
            team,
            channel,
            root_message,
        }
    }

    pub fn mode(&self) -> ChatMode {
        match self {
            Conversation::DirectMessage { .. } => ChatMode::DirectMessage,
            Conversation::GroupThread { .. } => ChatMode::GroupThread,
            Conversation::ChannelRoot { .. } => ChatMode::ChannelRoot,
            Conversation::ChannelMessage { .. } => ChatMode::ChannelMessage,
        }
    }

    /// Unpadded title bar text.
    pub fn title(&self) -> String {
        match self {
            Conversation::DirectMessage { other_user, .. } => {
                format!("chatting with {}", other_user.display_name)
            }
            Conversation::GroupThread { .. } => "chatting with group...".to_string(),
            Conversation::ChannelRoot { team, channel } => {
                format!("all threads in {}/{}", team.display_name, channel.display_name)
            }
            Conversation::ChannelMessage { team, channel, .. } => {
                format!("chatting in {}/{}", team.display_name, channel.display_name)
            }
        }
    }

    /// Label drawn left of the input box.
    pub fn prompt(&self) -> &'static str {
        match self {
            Conversation::ChannelRoot { .. } => "Start a thread: ",
            Conversation::DirectMessage { .. }
            | Conversation::GroupThread { .. }
            | Conversation::ChannelMessage { .. } => "Enter a message:",
        }
    }

    /// Post `message` to wherever this conversation lives.
    ///
    /// For chats the service's copy of the message is cached under the active
    /// thread and the current user, then committed before returning.
    pub fn send_message(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ActionOutcome, ChatError> {
        match self {
            Conversation::DirectMessage { thread, .. } | Conversation::GroupThread { thread } => {
                let payload = session.send_chat_message(&thread.remote_id, message)?;
                let current_user_id = session.current_user.id;
                let record = session.store.get_or_create_message(&payload);
                record.thread_id = Some(thread.id);
                record.from_id = Some(current_user_id);
                debug!("Stored sent message {} as #{}", payload.id, record.id);
                session.store.commit()?;
                Ok(ActionOutcome::Done)
            }
            Conversation::ChannelRoot { .. } => Ok(self.not_yet_supported("start a thread")),
            Conversation::ChannelMessage { .. } => Ok(self.not_yet_supported("reply to a thread")),
        }
    }

    /// Pull new messages for this conversation into the cache.
    pub fn fetch_new_messages(&self, session: &mut Session) -> Result<ActionOutcome, ChatError> {
        match self {
            Conversation::DirectMessage { .. } | Conversation::GroupThread { .. } => {
                let summary = session.refill_cache(true)?;
                info!("Refreshed: {} messages across {} threads", summary.messages, summary.threads);
                Ok(ActionOutcome::Done)
            }
            Conversation::ChannelRoot { .. } | Conversation::ChannelMessage { .. } => {
                Ok(self.not_yet_supported("refresh"))
            }
        }
    }

    pub(crate) fn not_yet_supported(&self, action: &'static str) -> ActionOutcome {
        ActionOutcome::NotYetSupported {
            mode: self.mode(),
            action,
        }
    }
}
