//! Request extractors for cross-cutting concerns.
//!
//! - [`auth`]: session authentication ([`auth::AuthUser`]) and path ids
//! - [`role`]: role gates built on top of `AuthUser`
//! - [`advanced_results`]: filtering, sorting, projection and pagination for
//!   listing routes
//!
//! Extractors run in argument order, so a handler taking
//! `(PublisherOrAdmin, ResourceId, ValidatedJson<T>)` authenticates, checks the
//! role, parses the id and only then reads the body.

pub mod advanced_results;
pub mod auth;
pub mod role;
