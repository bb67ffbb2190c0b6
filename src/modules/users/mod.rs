//! User accounts: registration, login and listing.
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | POST | `/user/login` | public |
//! | POST | `/user/registration` | public |
//! | GET | `/user/api/getAll` | bearer token |

pub mod controller;
pub mod router;
pub mod service;
