//! # DevCamper DB
//!
//! Document storage for the DevCamper API.
//!
//! Every resource is a JSON document in a named collection. Services talk to
//! storage through the [`DocumentStore`] trait, which has two backends:
//!
//! - [`MemoryStore`]: process-local collections, used by tests and when no
//!   database is configured
//! - [`PgDocumentStore`]: a single PostgreSQL `documents` table with a JSONB
//!   body column
//!
//! Both backends evaluate the same [`Filter`](devcamper_core::Filter)
//! semantics, so a listing query returns the same documents on either.
//!
//! # Example
//!
//! ```ignore
//! use devcamper_db::{DocumentStore, FindQuery, MemoryStore};
//!
//! let store = MemoryStore::new().with_unique("users", "email");
//! let users = store.find("users", &FindQuery::default()).await?;
//! ```

pub mod error;
pub mod matching;
pub mod memory;
pub mod populate;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use populate::{Relation, populate};
pub use postgres::{PgDocumentStore, connect};
pub use store::{Document, DocumentStore, FindQuery};

// Re-export PgPool for convenience
pub use sqlx::PgPool;
