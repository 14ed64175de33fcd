//! # DevCamper Config
//!
//! Configuration types for the DevCamper API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: session token signing and lifetime
//! - [`server`]: deployment mode, listen port and database URL
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use devcamper_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! // Load all configs from environment
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::{Environment, ServerConfig};
