//! # Hexsat Auth
//!
//! The token authority of the hexsatisfaction API.
//!
//! - [`claims`]: the JWT claim set carried by identity tokens
//! - [`token`]: [`TokenAuthority`], which issues and validates tokens
//!
//! Tokens are stateless: a token is valid iff its HS256 signature verifies
//! against the process signing key and its expiry has not elapsed. There is
//! no session table and no revocation list.
//!
//! # Example
//!
//! ```ignore
//! use hexsat_auth::TokenAuthority;
//! use hexsat_config::JwtConfig;
//!
//! let authority = TokenAuthority::from_config(&JwtConfig::from_env())?;
//!
//! let token = authority.issue("42")?;
//! assert_eq!(authority.validate(&token)?, "42");
//! ```

pub mod claims;
pub mod token;

pub use claims::Claims;
pub use token::{TokenAuthority, TokenError};
