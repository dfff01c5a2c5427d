//! # Core Application Logic
//!
//! Conversation state, the local cache and the actions that move data
//! between them and the chat service. It knows nothing about any specific
//! UI technology.
//!
//! ```text
//!     ┌──────────────┐     send / refresh      ┌──────────────┐
//!     │ Conversation │ ──────────────────────► │   Session    │
//!     │  (one mode)  │                         │ user·store·  │
//!     └──────┬───────┘                         │   service    │
//!            │ title / prompt                  └──────┬───────┘
//!            ▼                                        ▼
//!     ┌──────────────┐                         ┌──────────────┐
//!     │     TUI      │ ◄──── reads records ─── │    Store     │
//!     └──────────────┘                         └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`conversation`]: the `Conversation` enum and its per-mode actions
//! - [`session`]: the context every view borrows
//! - [`store`]: cached records and their JSON persistence
//! - [`cache`]: bulk refill of the store from the service
//! - [`config`]: settings and their override hierarchy
//! - [`lookup`]: finding a cached conversation by name

pub mod cache;
pub mod config;
pub mod conversation;
pub mod error;
pub mod lookup;
pub mod model;
pub mod session;
pub mod store;
