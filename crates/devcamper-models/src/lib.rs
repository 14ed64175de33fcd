//! # DevCamper Models
//!
//! Domain models and DTOs for the DevCamper API.
//!
//! Every resource is stored as a JSON document; the structs here are the
//! typed view services use when they need to reason about a document (owner
//! checks, rating averages, password verification). Listing routes return the
//! raw documents so that field selection works on any field.
//!
//! # Modules
//!
//! - [`aggregates`]: bootcamp averages derived from courses and reviews
//! - [`auth`]: registration, login and account maintenance DTOs
//! - [`bootcamps`]: bootcamps, careers and slug derivation
//! - [`courses`]: courses and skill levels
//! - [`document`]: conversions between typed models and stored documents
//! - [`responses`]: response envelopes shared by every route
//! - [`reviews`]: bootcamp reviews
//! - [`users`]: users and roles

pub mod aggregates;
pub mod auth;
pub mod bootcamps;
pub mod courses;
pub mod document;
pub mod responses;
pub mod reviews;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateDetailsRequest, UpdatePasswordRequest,
};
pub use bootcamps::{Bootcamp, Career, CreateBootcampDto, UpdateBootcampDto, slugify};
pub use courses::{Course, CreateCourseDto, MinimumSkill, UpdateCourseDto};
pub use document::{Model, from_document, to_document};
pub use responses::{DataResponse, EmptyData, ListResponse};
pub use reviews::{CreateReviewDto, Review, UpdateReviewDto};
pub use users::{CreateUserDto, NewUser, Role, UpdateUserDto, User};
