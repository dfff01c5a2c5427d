pub mod graph;
pub mod service;
pub mod types;

pub use graph::GraphClient;
pub use service::{ChatService, RemoteError};
pub use types::{ChannelPayload, ChatPayload, MessagePayload, TeamPayload, UserPayload};
