//! # DevCamper Core
//!
//! Core types, errors, and utilities for the DevCamper API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`query`]: Translation of listing query strings into storage filters
//! - [`pagination`]: Page/limit handling and prev/next page descriptors
//! - [`password`]: Secure password hashing and verification
//! - [`serde`]: Custom serde serialization/deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use devcamper_core::query::ListQuery;
//!
//! // GET /api/v1/bootcamps?averageCost[lte]=10000&sort=-name&page=2
//! let query = ListQuery::from_pairs(&pairs)?;
//! let skip = query.page.skip();
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod query;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use pagination::{PageLink, PageRequest, Pagination};
pub use password::{hash_password, verify_password};
pub use query::{
    Condition, FieldPath, Filter, ListQuery, Operand, Predicate, Projection, QueryError, SortKey,
};
