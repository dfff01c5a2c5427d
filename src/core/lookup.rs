//! Turning names typed on the command line into a cached `Conversation`.

use crate::core::conversation::Conversation;
use crate::core::error::ChatError;
use crate::core::model::{Channel, Team};
use crate::core::store::Store;

/// What the user asked to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Two-person chat, by the other person's display name.
    Direct(String),
    /// Group chat, by topic.
    Group(String),
    Channel { team: String, channel: String },
    /// One discussion in a channel, by the remote id of its first message.
    Thread {
        team: String,
        channel: String,
        root_remote_id: String,
    },
}

pub fn find_conversation(
    store: &Store,
    current_user_id: i64,
    target: &Target,
) -> Result<Conversation, ChatError> {
    match target {
        Target::Direct(name) => {
            let (thread, other) = store
                .find_direct_thread(current_user_id, name)
                .ok_or_else(|| ChatError::NotFound(format!("chat with '{name}'")))?;
            Ok(Conversation::direct_message(thread.clone(), other.clone()))
        }
        Target::Group(topic) => {
            let thread = store
                .find_thread_by_topic(topic)
                .ok_or_else(|| ChatError::NotFound(format!("group chat '{topic}'")))?;
            Ok(Conversation::group_thread(thread.clone()))
        }
        Target::Channel { team, channel } => {
            let (team, channel) = find_channel(store, team, channel)?;
            Ok(Conversation::channel(team.clone(), channel.clone()))
        }
        Target::Thread {
            team,
            channel,
            root_remote_id,
        } => {
            let (team, channel) = find_channel(store, team, channel)?;
            let root = store
                .find_message(root_remote_id)
                .filter(|m| m.channel_id == Some(channel.id) && m.is_toplevel())
                .ok_or_else(|| {
                    ChatError::NotFound(format!(
                        "thread '{root_remote_id}' in {}/{}",
                        team.display_name, channel.display_name
                    ))
                })?;
            Ok(Conversation::channel_thread(team.clone(), channel.clone(), root.clone()))
        }
    }
}

fn find_channel<'s>(
    store: &'s Store,
    team: &str,
    channel: &str,
) -> Result<(&'s Team, &'s Channel), ChatError> {
    store
        .find_channel(team, channel)
        .ok_or_else(|| ChatError::NotFound(format!("channel {team}/{channel}")))
}
