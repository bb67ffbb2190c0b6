//! # hexsatisfaction
//!
//! A REST API for user accounts and the authors they manage, built with Axum.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/      # Bearer token gate and the AuthSubject extractor
//! ├── modules/         # Feature modules
//! │   ├── users/      # Registration, login, user listing
//! │   └── authors/    # Author CRUD, owned by users
//! ├── router.rs        # Route table composition, CORS, request logging
//! ├── state.rs         # Shared application state
//! └── validator.rs     # Build + validate request extractors
//! ```
//!
//! Shared pieces live in workspace crates:
//!
//! | Crate | Contents |
//! |---|---|
//! | `hexsat-core` | `AppError`, `Reply`, password hashing |
//! | `hexsat-config` | environment configuration |
//! | `hexsat-auth` | `TokenAuthority` (JWT issue / validate) |
//! | `hexsat-models` | domain models and request DTOs |
//! | `hexsat-db` | `UserStore` / `AuthorStore`, Postgres and in-memory |
//! | `hexsat-observability` | tracing setup and request logging |
//!
//! ## Request pipeline
//!
//! Every request goes through the same steps:
//!
//! 1. request logging assigns a request id
//! 2. gated routes (`/<resource>/api/...`) run the token gate, which answers
//!    401 without calling the handler when the bearer token is missing,
//!    invalid or expired
//! 3. the handler's extractors build the typed request and validate it,
//!    answering 400 on failure
//! 4. the handler calls its service and returns exactly one reply
//!
//! ## Response envelope
//!
//! ```text
//! {"result": <payload>}      success
//! {"error": "<message>"}     failure
//! <empty body>               empty result
//! ```

pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use router::init_router;
pub use state::AppState;
