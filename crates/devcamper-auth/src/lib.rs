//! # DevCamper Auth
//!
//! Session token types and JWT utilities for the DevCamper API.
//!
//! - [`claims`]: the claim set carried by every session token
//! - [`jwt`]: token creation and verification
//!
//! A session token only names the user it was issued to. The user's role is
//! looked up on every request, so a role change takes effect immediately.
//!
//! # Example
//!
//! ```ignore
//! use devcamper_auth::{create_session_token, verify_token};
//! use devcamper_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_session_token(user_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_session_token, encode_claims, verify_token};
