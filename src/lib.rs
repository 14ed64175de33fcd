//! # DevCamper API
//!
//! A bootcamp directory REST API built with Axum. Publishers list bootcamps
//! and their courses, users review them, and admins manage accounts.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Extractors: authentication, role gates, listing queries
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Registration, login, session cookie, current account
//! │   ├── bootcamps/   # Bootcamps (cascade delete, one per publisher)
//! │   ├── courses/     # Courses (maintain bootcamp averageCost)
//! │   ├── reviews/     # Reviews (maintain bootcamp averageRating)
//! │   └── users/       # Account administration
//! ├── docs.rs          # OpenAPI document
//! ├── logging.rs       # Subscriber setup and request logging
//! ├── router.rs        # Route tree under /api/v1
//! ├── state.rs         # Shared application state
//! └── validator.rs     # Validated JSON bodies
//! ```
//!
//! Each feature module has a `controller.rs` (HTTP handlers with OpenAPI
//! annotations), a `service.rs` (storage and business rules) and a
//! `router.rs`.
//!
//! ## Listing queries
//!
//! Every collection route accepts field filters with optional bracket
//! operators and the control keys `select`, `sort`, `page` and `limit`:
//!
//! ```text
//! GET /api/v1/bootcamps?averageCost[lte]=10000&careers[in]=Business&select=name,averageCost&sort=-averageCost&page=2&limit=10
//! ```
//!
//! Responses are `{ success, count, pagination: { next?, prev? }, data }`,
//! sorted newest first unless `sort` says otherwise.
//!
//! ## Authentication
//!
//! Login and registration return a JWT in the body and as the HTTP-only
//! `token` cookie. Protected routes accept either the cookie or an
//! `Authorization: Bearer` header. Role gates answer 403 for roles outside
//! their allow-list; ownership checks answer 403 for non-owners.
//!
//! ## Storage
//!
//! With `DATABASE_URL` set, documents are stored as JSONB in PostgreSQL.
//! Without it the server keeps everything in memory.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:5000/swagger-ui`
//! - Scalar: `http://localhost:5000/scalar`

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use devcamper_auth;
pub use devcamper_config;
pub use devcamper_core;
pub use devcamper_db;
pub use devcamper_models;
