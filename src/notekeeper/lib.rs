//! # Notekeeper Architecture
//!
//! Notekeeper is a small note-keeping core: short notes with a title, a
//! tagline and a body, which can be pinned, edited, deleted and browsed a
//! page at a time. All durable state lives in a keyed document collection;
//! the client keeps an in-memory copy and reconciles it after every write.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Front end (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints pages and notices               │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ intents
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns cache, form, current page and notice sink           │
//! │  - Routes form submissions to create or update              │
//! └─────────────────────────────────────────────────────────────┘
//!          │                    │                     │
//!          ▼                    ▼                     ▼
//! ┌────────────────┐  ┌──────────────────┐  ┌─────────────────┐
//! │  form.rs       │  │  repository.rs   │  │  order.rs       │
//! │  draft state,  │  │  store writes,   │  │  pinned-first   │
//! │  validation    │  │  cache updates,  │  │  sort, pages    │
//! │                │  │  notices         │  │                 │
//! └────────────────┘  └──────────────────┘  └─────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RemoteStore trait over a keyed collection                │
//! │  - FileStore (JSON on disk), InMemoryStore (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//!
//! Each write goes to the store first; the cache changes only when the store
//! call succeeded. A failed write leaves the cache as it was and the user
//! sees an error notice. There is no background reconciliation.
//!
//! ## Notices vs. logs
//!
//! Outcomes the user must see (saved, deleted, failed, title missing) are
//! [`notify::Notice`]s sent to a [`notify::NotificationSink`]. Diagnostics
//! go through `tracing` and are off unless a subscriber is installed.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade that front ends drive
//! - [`repository`]: Store access and cache reconciliation
//! - [`order`]: Display order and pagination
//! - [`form`]: Draft state and validation
//! - [`cache`]: The in-memory note set
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Notes, drafts, patches and their wire forms
//! - [`notify`]: Notices and sinks
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod notify;
pub mod order;
pub mod repository;
pub mod store;
