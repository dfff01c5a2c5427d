//! # Session Context
//!
//! The bundle every conversation view borrows: who is signed in, the local
//! cache, and the remote chat service.
//!
//! The service is async; the UI is not. The session owns a current-thread
//! tokio runtime and `block_on`s each remote call, so a call has finished
//! (or failed) by the time control returns to the input loop.

use std::future::Future;

use log::info;

use crate::core::cache::{CacheSummary, cache_all_messages};
use crate::core::error::ChatError;
use crate::core::model::User;
use crate::core::store::Store;
use crate::remote::{ChatService, MessagePayload};

pub struct Session {
    pub current_user: User,
    pub store: Store,
    service: Box<dyn ChatService>,
    runtime: tokio::runtime::Runtime,
}

impl Session {
    pub fn new(
        current_user: User,
        store: Store,
        service: Box<dyn ChatService>,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            current_user,
            store,
            service,
            runtime,
        })
    }

    /// Open a session, learning who is signed in.
    ///
    /// Online, the service is asked and the answer is remembered in the
    /// store. Offline, the user remembered last time is used.
    pub fn connect(
        mut store: Store,
        service: Box<dyn ChatService>,
        offline: bool,
    ) -> Result<Self, ChatError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let current_user = if offline {
            store
                .current_user()
                .cloned()
                .ok_or_else(|| ChatError::NotFound("signed-in user".to_string()))?
        } else {
            let me = runtime.block_on(service.current_user())?;
            let user = store.get_or_create_user(&me.id, me.display_name.as_deref()).clone();
            store.set_current_user(user.id);
            store.commit()?;
            user
        };
        info!("Signed in as {} ({})", current_user.display_name, current_user.remote_id);
        Ok(Self {
            current_user,
            store,
            service,
            runtime,
        })
    }

    /// Run a future to completion on the session's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn send_chat_message(
        &self,
        remote_thread_id: &str,
        message: &str,
    ) -> Result<MessagePayload, ChatError> {
        let payload = self.block_on(self.service.send_chat_message(remote_thread_id, message))?;
        Ok(payload)
    }

    /// Refill the whole cache from the service.
    pub fn refill_cache(&mut self, quiet: bool) -> Result<CacheSummary, ChatError> {
        self.runtime
            .block_on(cache_all_messages(self.service.as_ref(), &mut self.store, quiet))
    }
}
