//! # Cache Refill
//!
//! Pulls every chat and channel the current user can see into the local
//! store, then commits once.
//!
//! ```text
//! chats ──► threads + members ──► chat messages
//! teams ──► channels ──► top-level messages ──► replies
//! ```
//!
//! `quiet` suppresses the per-chat progress lines printed to stdout; the TUI
//! always refills quietly because stdout belongs to the terminal backend.

use log::{debug, info};

use crate::core::error::ChatError;
use crate::core::store::Store;
use crate::remote::{ChatPayload, ChatService};

/// Counts of what a refill touched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheSummary {
    pub threads: usize,
    pub channels: usize,
    pub messages: usize,
}

fn chat_label(chat: &ChatPayload) -> String {
    match &chat.topic {
        Some(topic) if !topic.is_empty() => topic.clone(),
        _ => {
            let names: Vec<&str> = chat
                .members
                .iter()
                .filter_map(|m| m.display_name.as_deref())
                .collect();
            if names.is_empty() {
                chat.id.clone()
            } else {
                names.join(", ")
            }
        }
    }
}

pub async fn cache_all_messages(
    service: &dyn ChatService,
    store: &mut Store,
    quiet: bool,
) -> Result<CacheSummary, ChatError> {
    let mut summary = CacheSummary::default();

    for chat in service.list_chats().await? {
        let member_ids: Vec<i64> = chat
            .members
            .iter()
            .map(|m| store.get_or_create_user(&m.user_id, m.display_name.as_deref()).id)
            .collect();
        let thread = store.get_or_create_thread(&chat.id, chat.topic.as_deref());
        thread.member_ids = member_ids;
        let thread_id = thread.id;

        let messages = service.list_chat_messages(&chat.id).await?;
        for payload in &messages {
            store.get_or_create_message(payload).thread_id = Some(thread_id);
        }
        debug!("Cached {} messages for chat {}", messages.len(), chat.id);
        if !quiet {
            println!("cached {:>4} messages  {}", messages.len(), chat_label(&chat));
        }
        summary.threads += 1;
        summary.messages += messages.len();
    }

    for team in service.list_joined_teams().await? {
        let team_id = store.get_or_create_team(&team.id, &team.display_name).id;

        for channel in service.list_channels(&team.id).await? {
            let channel_id = store
                .get_or_create_channel(team_id, &channel.id, &channel.display_name)
                .id;

            let roots = service.list_channel_messages(&team.id, &channel.id).await?;
            let mut count = roots.len();
            for root in &roots {
                store.get_or_create_message(root).channel_id = Some(channel_id);
                // Roots are stored first so replies can resolve `replyToId`.
                let replies = service
                    .list_message_replies(&team.id, &channel.id, &root.id)
                    .await?;
                for reply in &replies {
                    store.get_or_create_message(reply).channel_id = Some(channel_id);
                }
                count += replies.len();
            }
            if !quiet {
                println!(
                    "cached {:>4} messages  {}/{}",
                    count, team.display_name, channel.display_name
                );
            }
            summary.channels += 1;
            summary.messages += count;
        }
    }

    store.commit()?;
    info!(
        "Cache refill done: {} threads, {} channels, {} messages",
        summary.threads, summary.channels, summary.messages
    );
    Ok(summary)
}
