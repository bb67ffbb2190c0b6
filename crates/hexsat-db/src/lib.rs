//! # Hexsat DB
//!
//! Persistence for the hexsatisfaction API, seen by the rest of the service
//! only through the [`UserStore`] and [`AuthorStore`] traits.
//!
//! Two adapters implement both traits:
//!
//! - [`PgStore`]: PostgreSQL through a SQLx pool, with embedded migrations
//! - [`MemoryStore`]: process-local maps, used by tests and `--in-memory` runs
//!
//! Store errors are [`anyhow::Error`]s; callers report them as internal
//! errors. The one error callers inspect is [`DuplicateLogin`], returned by
//! [`UserStore::create`] when the login is already taken.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hexsat_db::{MemoryStore, UserStore};
//!
//! let store = Arc::new(MemoryStore::new());
//! assert!(!store.is_exist("alice").await?);
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{AuthorStore, DuplicateLogin, UserStore};
