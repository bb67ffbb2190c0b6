//! # Hexsat Models
//!
//! Domain models and request DTOs for the hexsatisfaction API.
//!
//! - [`users`]: users, roles, login and registration requests
//! - [`authors`]: authors and their create/update/lookup requests
//!
//! Request DTOs derive [`validator::Validate`]; their rules are pure functions
//! of the deserialized fields, so validating the same value twice always
//! yields the same outcome.

pub mod authors;
pub mod users;

pub use authors::{Author, AuthorChanges, AuthorIdPath, AuthorNameQuery, AuthorRequest, NewAuthor};
pub use users::{LoginUserRequest, NewUser, RegisterUserRequest, Role, User, UserWithRole};
